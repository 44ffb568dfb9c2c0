// ABOUTME: Final coherence pass over a decision before it leaves the engine
// ABOUTME: Canonical-priority and modifier-direction fixes are applied in place and counted
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Milo Coaching Intelligence

use crate::decision::{Decision, DecisionAction, DecisionPriority};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Result of the coherence pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationOutcome {
    /// True when no fixes were needed
    pub valid: bool,
    /// Number of in-place fixes applied
    pub fixes_applied: u32,
    /// Non-blocking observations about the decision
    pub warnings: Vec<String>,
}

impl ValidationOutcome {
    /// Outcome for a decision that needed nothing
    #[must_use]
    pub const fn passed() -> Self {
        Self {
            valid: true,
            fixes_applied: 0,
            warnings: Vec::new(),
        }
    }
}

/// Cross-checks a decision for internal coherence.
///
/// The arbiter and emergency tables produce coherent decisions by
/// construction; this pass exists so a conflict rewrite or a future
/// rule change cannot ship a contradictory record.
#[derive(Debug, Clone, Copy, Default)]
pub struct DecisionValidator;

impl DecisionValidator {
    /// Validate and repair the decision in place.
    #[must_use]
    pub fn validate(decision: &mut Decision) -> ValidationOutcome {
        let mut fixes = 0;
        let mut warnings = Vec::new();

        // Priority must match the action's canonical urgency.
        if let Some(canonical) = Self::canonical_priority(decision.action) {
            if decision.priority != canonical {
                debug!(
                    action = ?decision.action,
                    found = ?decision.priority,
                    "priority repaired to canonical value"
                );
                decision.priority = canonical;
                fixes += 1;
            }
        }

        // Modifier direction must match the action.
        if let Some(modifiers) = decision.modifiers {
            let wrong_direction = match decision.action {
                DecisionAction::ReduceLoad => modifiers.load >= 1.0 || modifiers.volume >= 1.0,
                DecisionAction::IncreaseStimulus => {
                    modifiers.load <= 1.0 || modifiers.volume <= 1.0
                }
                _ => false,
            };
            if wrong_direction {
                decision.modifiers = None;
                fixes += 1;
                warnings.push("Modifiers contradicted the action and were cleared".to_owned());
            }
        }

        // Emergency decisions carry their session restrictions.
        if decision.action.is_emergency() && decision.session_constraints.is_none() {
            warnings.push("Emergency decision without session constraints".to_owned());
        }

        // Every decision should explain itself.
        if decision.factors.is_empty() {
            warnings.push("No supporting factors recorded".to_owned());
        }

        ValidationOutcome {
            valid: fixes == 0,
            fixes_applied: fixes,
            warnings,
        }
    }

    /// Canonical urgency for actions whose priority is fixed by the
    /// precedence table. Actions outside the table return `None`.
    const fn canonical_priority(action: DecisionAction) -> Option<DecisionPriority> {
        match action {
            DecisionAction::SkipToDeload | DecisionAction::MedicalReferral => {
                Some(DecisionPriority::Critical)
            }
            DecisionAction::ReduceLoad => Some(DecisionPriority::High),
            DecisionAction::ChangeStimulus | DecisionAction::IncreaseStimulus => {
                Some(DecisionPriority::Medium)
            }
            DecisionAction::ExtendPhase => Some(DecisionPriority::Low),
            DecisionAction::Continue => Some(DecisionPriority::None),
            _ => None,
        }
    }
}

// ABOUTME: Maps the four risk assessments to exactly one decision via a fixed cascade
// ABOUTME: First matching rule wins; safety-reducing actions dominate safety-increasing ones
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Milo Coaching Intelligence

use crate::decision::{Decision, DecisionAction, DecisionPriority, LoadModifiers};
use crate::risk_analyzer::{RiskAnalysis, RiskLevel};
use milo_core::models::AdaptationSignals;

/// Load multiplier applied when reducing this week's work
const REDUCE_LOAD_FACTOR: f64 = 0.85;

/// Volume multiplier applied when reducing this week's work
const REDUCE_VOLUME_FACTOR: f64 = 0.80;

/// Load multiplier applied when the athlete is coasting
const INCREASE_LOAD_FACTOR: f64 = 1.10;

/// Volume multiplier applied when the athlete is coasting
const INCREASE_VOLUME_FACTOR: f64 = 1.15;

/// Arbitrates the analyzer outputs into one prioritized decision.
///
/// The cascade is first-match-wins; a later rule can never fire while
/// an earlier rule's condition holds. Any future rule addition that
/// could create ambiguity is a defect to fix in this table, not
/// something to resolve at runtime.
#[derive(Debug, Clone, Copy)]
pub struct DecisionArbiter {
    max_phase_extensions: u32,
}

impl Default for DecisionArbiter {
    fn default() -> Self {
        Self::new(2)
    }
}

impl DecisionArbiter {
    /// Create an arbiter with the given phase-extension cap
    #[must_use]
    pub const fn new(max_phase_extensions: u32) -> Self {
        Self {
            max_phase_extensions,
        }
    }

    /// Run the precedence cascade.
    ///
    /// Ordering rationale: load-reducing actions dominate load-raising
    /// ones; plateau (a quality problem) is handled before
    /// undertraining (a dosage problem) because a stimulus change can
    /// itself resolve apparent undertraining; phase extension is
    /// purely opportunistic and capped so progression is never delayed
    /// indefinitely.
    #[must_use]
    pub fn decide(&self, analysis: &RiskAnalysis, signals: &AdaptationSignals) -> Decision {
        // Priority 1: overtraining high -> straight to deload
        if analysis.overtraining.risk == RiskLevel::High {
            return Decision {
                action: DecisionAction::SkipToDeload,
                priority: DecisionPriority::Critical,
                reason: "High overtraining risk".to_owned(),
                factors: analysis.overtraining.factors.clone(),
                modifiers: None,
                recommendation: format!(
                    "Skip immediately to the deload phase. Factors: {}",
                    analysis.overtraining.factors.join("; ")
                ),
                actionable_steps: Vec::new(),
                session_constraints: None,
            };
        }

        // Priority 2: overtraining medium -> reduce this week's dosage
        if analysis.overtraining.risk == RiskLevel::Medium {
            return Decision {
                action: DecisionAction::ReduceLoad,
                priority: DecisionPriority::High,
                reason: "Accumulating fatigue signals".to_owned(),
                factors: analysis.overtraining.factors.clone(),
                modifiers: Some(LoadModifiers {
                    load: REDUCE_LOAD_FACTOR,
                    volume: REDUCE_VOLUME_FACTOR,
                }),
                recommendation:
                    "Reduce intensity 15% and volume 20% this week. Watch for a possible deload."
                        .to_owned(),
                actionable_steps: Vec::new(),
                session_constraints: None,
            };
        }

        // Priority 3: plateau -> change the stimulus, not the dosage
        if analysis.plateau.detected {
            return Decision {
                action: DecisionAction::ChangeStimulus,
                priority: DecisionPriority::Medium,
                reason: "Plateau detected".to_owned(),
                factors: analysis.plateau.factors.clone(),
                modifiers: None,
                recommendation: "Vary the training stimulus to restart progress.".to_owned(),
                actionable_steps: vec![
                    "Vary the training methodology".to_owned(),
                    "Reorder the main exercises".to_owned(),
                    "Introduce a high-volume shock week".to_owned(),
                    "Consider a split change".to_owned(),
                ],
                session_constraints: None,
            };
        }

        // Priority 4: undertraining high -> raise the dosage
        if analysis.undertraining.risk == RiskLevel::High {
            return Decision {
                action: DecisionAction::IncreaseStimulus,
                priority: DecisionPriority::Medium,
                reason: "Insufficient training stimulus".to_owned(),
                factors: analysis.undertraining.factors.clone(),
                modifiers: Some(LoadModifiers {
                    load: INCREASE_LOAD_FACTOR,
                    volume: INCREASE_VOLUME_FACTOR,
                }),
                recommendation:
                    "Increase intensity 10% and volume 15%. The body is adapting too easily."
                        .to_owned(),
                actionable_steps: Vec::new(),
                session_constraints: None,
            };
        }

        // Priority 5: adaptation window open and extensions remain
        if analysis.optimal.optimal && signals.phase_extensions < self.max_phase_extensions {
            return Decision {
                action: DecisionAction::ExtendPhase,
                priority: DecisionPriority::Low,
                reason: "Optimal progression under way".to_owned(),
                factors: analysis.optimal.factors.clone(),
                modifiers: None,
                recommendation:
                    "The current phase is working. Repeat this week before moving to the next phase."
                        .to_owned(),
                actionable_steps: Vec::new(),
                session_constraints: None,
            };
        }

        Decision::continue_as_planned()
    }
}

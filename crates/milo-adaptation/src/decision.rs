// ABOUTME: Decision types emitted by the engine: action, priority, modifiers, constraints
// ABOUTME: "No modifier" and "no constraint" are explicit None states, not absent keys
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Milo Coaching Intelligence

use serde::{Deserialize, Serialize};

/// The single prioritized action recommended for the coming week.
///
/// The first six variants come from the weekly arbitration cascade;
/// the remainder are complete emergency substitutes that bypass it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionAction {
    /// Proceed with the plan as written
    Continue,
    /// Keep the plan position, reduce load and volume this week
    ReduceLoad,
    /// The athlete is coasting; raise load and volume
    IncreaseStimulus,
    /// Quality problem, not dosage: vary the training stimulus
    ChangeStimulus,
    /// Adaptation window is open; repeat the current phase week
    ExtendPhase,
    /// Jump straight to the deload phase
    SkipToDeload,
    /// Acute injury: stop and refer to a physician
    MedicalReferral,
    /// Critical energy: no training at all
    CompleteRest,
    /// Critical sleep: mobility-only capped session
    MinimalSession,
    /// Competition tomorrow: neural activation only
    PreCompetitionActivation,
    /// CNS depleted: active recovery only
    ActiveRecovery,
    /// Mental burnout: mandatory reduced week
    ForcedDeload,
}

impl DecisionAction {
    /// Whether this action raises the training stimulus
    #[must_use]
    pub const fn increases_stimulus(self) -> bool {
        matches!(self, Self::IncreaseStimulus | Self::ExtendPhase)
    }

    /// Whether this action is an emergency substitute
    #[must_use]
    pub const fn is_emergency(self) -> bool {
        matches!(
            self,
            Self::MedicalReferral
                | Self::CompleteRest
                | Self::MinimalSession
                | Self::PreCompetitionActivation
                | Self::ActiveRecovery
                | Self::ForcedDeload
        )
    }
}

/// Decision urgency, totally ordered
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionPriority {
    /// No intervention required
    None,
    /// Opportunistic, can be skipped
    Low,
    /// Should be applied this week
    Medium,
    /// Apply before the next session
    High,
    /// Apply immediately, overrides planning
    Critical,
}

/// Numeric multipliers for load and volume when a decision adjusts
/// dosage without moving the plan position
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoadModifiers {
    /// Intensity multiplier (1.0 = unchanged)
    pub load: f64,
    /// Volume multiplier (1.0 = unchanged)
    pub volume: f64,
}

/// Activities still permitted under an emergency decision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecoveryActivity {
    /// Passive stretching only
    StretchingPassive,
    /// Breathing work
    Breathing,
    /// Full rest
    Rest,
    /// Easy walking
    LightWalk,
    /// Sleep as recovery
    Sleep,
    /// Mobility work
    Mobility,
    /// Light neural activation drills
    LightActivation,
    /// Active stretching
    Stretching,
    /// Pre-competition neural activation
    NeuralActivation,
    /// Mental rehearsal
    Visualization,
    /// Low-intensity cardio
    LightCardio,
    /// Massage or self-myofascial work
    Massage,
}

/// Practices explicitly forbidden under an emergency decision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ForbiddenPractice {
    /// Heavy barbell or near-maximal work
    HeavyLifting,
    /// High-volume accumulation work
    HighVolume,
    /// Exercises the athlete has not practiced
    NewExercises,
    /// Anything likely to induce soreness
    DomsInducing,
}

/// Session restrictions attached to emergency decisions
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionConstraints {
    /// Activities still permitted
    pub allowed_activities: Vec<RecoveryActivity>,
    /// Practices explicitly forbidden
    #[serde(default)]
    pub forbidden_practices: Vec<ForbiddenPractice>,
    /// Hard session duration cap, minutes
    pub max_duration_minutes: Option<u32>,
    /// Volume reduction factor for a forced reduced week
    pub volume_reduction: Option<f64>,
    /// Intensity reduction factor for a forced reduced week
    pub intensity_reduction: Option<f64>,
}

/// The engine's structured output: one prioritized action with its
/// evidence trail. Produced fresh per evaluation and never mutated by
/// the engine afterwards; the external plan-mutation component
/// consumes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decision {
    /// The recommended action
    pub action: DecisionAction,
    /// Urgency of the action
    pub priority: DecisionPriority,
    /// One-line reason
    pub reason: String,
    /// Contributing evidence strings, for explainability
    pub factors: Vec<String>,
    /// Dosage multipliers, when the action adjusts load in place
    pub modifiers: Option<LoadModifiers>,
    /// Coach-facing recommendation text
    pub recommendation: String,
    /// Concrete steps, when the action is qualitative
    #[serde(default)]
    pub actionable_steps: Vec<String>,
    /// Session restrictions, present only on emergency decisions
    pub session_constraints: Option<SessionConstraints>,
}

impl Decision {
    /// The neutral fall-through decision: continue as programmed.
    #[must_use]
    pub fn continue_as_planned() -> Self {
        Self {
            action: DecisionAction::Continue,
            priority: DecisionPriority::None,
            reason: "Progression within normal range".to_owned(),
            factors: vec!["No intervention necessary".to_owned()],
            modifiers: None,
            recommendation: "Continue with the program as planned.".to_owned(),
            actionable_steps: Vec::new(),
            session_constraints: None,
        }
    }
}

// ABOUTME: Adaptive training decision engine: weekly evaluation and special-event overrides
// ABOUTME: Combines noisy module heuristics into one explainable, confidence-scored decision
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Milo Coaching Intelligence

//! # Milo Adaptation Engine
//!
//! Rule-based arbiter that ingests weekly athlete-state signals
//! (fatigue, performance trend, sleep, motivation, pain, CNS load) and
//! produces a single prioritized action recommendation, subject to
//! hard emergency overrides, cross-module conflict resolution,
//! consensus amplification, and a calibrated confidence score.
//!
//! The engine is stateless and synchronous: evaluations are pure
//! computations over caller-supplied inputs, so independent athletes
//! can be evaluated in parallel (see
//! [`AdaptationEngine::evaluate_batch`]).
//!
//! ## Pipeline
//!
//! `EmergencyEvaluator` (short-circuit) → `RiskAnalyzer` →
//! `DecisionArbiter` → `ConflictResolver` → `SignalAmplifier` →
//! `DecisionValidator` → `ConfidenceCalibrator` → [`EvaluationReport`].
//!
//! The special-event overlay ([`AdaptationEngine::handle_event`]) is
//! invoked ad hoc and produces a decision-shaped override independent
//! of the weekly cadence.

/// Cross-source agreement detection
pub mod amplifier;
/// Precedence cascade from risk assessments to one decision
pub mod arbiter;
/// Confidence calibration and baseline safety risk
pub mod confidence;
/// Engine configuration with validated thresholds
pub mod config;
/// Cross-module conflict detection and resolution
pub mod conflict;
/// Decision types: action, priority, modifiers, constraints
pub mod decision;
/// Hard-stop emergency triggers
pub mod emergency;
/// The evaluation pipeline
pub mod engine;
/// Special-event overlay
pub mod events;
/// Risk analysis over the rolling weekly history
pub mod risk_analyzer;
/// Trend fitting over recent weeks
pub mod trend;
/// Final decision coherence pass
pub mod validation;

pub use amplifier::{Amplification, AmplificationKind, ConsensusAction, SignalAmplifier, SignalSource};
pub use arbiter::DecisionArbiter;
pub use confidence::{
    baseline_safety_risk, ConfidenceCalibrator, ConfidenceCategory, ConfidenceResult,
};
pub use config::{AdaptationConfig, ConfigError, ConfidenceWeights, EmergencyThresholds, RiskThresholds};
pub use conflict::{
    ConflictKind, ConflictRecord, ConflictResolver, FatigueProposal, HabitProposal,
    IntensityLevel, MethodCategory, ModuleId, ModuleProposals, SafetyProposal, StrategyProposal,
};
pub use decision::{
    Decision, DecisionAction, DecisionPriority, ForbiddenPractice, LoadModifiers,
    RecoveryActivity, SessionConstraints,
};
pub use emergency::{EmergencyEvaluator, EmergencyTrigger};
pub use engine::{AdaptationEngine, EvaluationInput, EvaluationReport};
pub use events::{
    EventAction, EventOutcome, EventProtocol, PlanStatus, SpecialEvent, TaperProtocol,
};
pub use risk_analyzer::{
    OptimalAdaptation, PlateauAssessment, RiskAnalysis, RiskAnalyzer, RiskAssessment, RiskLevel,
};
pub use trend::{TrendAnalyzer, TrendAssessment, TrendDirection};
pub use validation::{DecisionValidator, ValidationOutcome};

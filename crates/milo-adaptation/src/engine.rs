// ABOUTME: The evaluation pipeline wiring emergency, analysis, arbitration, conflicts,
// ABOUTME: amplification, validation, and confidence into one stateless pure computation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Milo Coaching Intelligence

use crate::amplifier::{Amplification, SignalAmplifier};
use crate::arbiter::DecisionArbiter;
use crate::confidence::{baseline_safety_risk, ConfidenceCalibrator, ConfidenceResult};
use crate::config::{AdaptationConfig, ConfigError};
use crate::conflict::{ConflictRecord, ConflictResolver, ModuleProposals};
use crate::decision::Decision;
use crate::emergency::{EmergencyEvaluator, EmergencyTrigger};
use crate::events::{handle_event, EventOutcome};
use crate::risk_analyzer::{RiskAnalysis, RiskAnalyzer};
use crate::trend::{TrendAnalyzer, TrendAssessment};
use crate::validation::{DecisionValidator, ValidationOutcome};
use milo_core::errors::AppResult;
use milo_core::models::{
    AdaptationSignals, AthleteContext, CurrentStateSnapshot, EventRecord, WeeklySummary,
};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// One complete evaluation result.
///
/// `decision` is the structured output the plan-mutation component
/// consumes; the remaining fields are the evidence trail. When an
/// emergency trigger fired, `analysis` and `trend` are `None` because
/// the analyzers were never consulted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationReport {
    /// True when an emergency trigger bypassed the weekly pipeline
    pub emergency: bool,
    /// The trigger that fired, when `emergency` is true
    pub emergency_trigger: Option<EmergencyTrigger>,
    /// The single prioritized decision
    pub decision: Decision,
    /// Risk analysis, absent on emergency short-circuit
    pub analysis: Option<RiskAnalysis>,
    /// Fitted trends, absent on emergency short-circuit or short history
    pub trend: Option<TrendAssessment>,
    /// Conflicts detected and resolved against sibling modules
    pub conflicts: Vec<ConflictRecord>,
    /// Cross-source agreements detected
    pub amplifications: Vec<Amplification>,
    /// Result of the final coherence pass
    pub validation: ValidationOutcome,
    /// Calibrated confidence for the decision
    pub confidence: ConfidenceResult,
}

/// Owned inputs for one athlete's evaluation, used by the batch entry
/// point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationInput {
    /// Fresh current-state snapshot
    pub snapshot: CurrentStateSnapshot,
    /// Rolling weekly history, most-recent-last
    pub history: Vec<WeeklySummary>,
    /// Accumulated adaptation signals
    pub signals: AdaptationSignals,
}

/// The adaptive training decision engine.
///
/// Stateless and synchronous: given a snapshot and history, an
/// evaluation is a pure computation. Identical inputs always produce
/// identical reports; nothing here reads a clock or random source.
#[derive(Debug, Clone)]
pub struct AdaptationEngine {
    analyzer: RiskAnalyzer,
    emergency: EmergencyEvaluator,
    arbiter: DecisionArbiter,
    resolver: ConflictResolver,
    calibrator: ConfidenceCalibrator,
}

impl Default for AdaptationEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl AdaptationEngine {
    /// Create an engine with the default calibrated configuration
    #[must_use]
    pub fn new() -> Self {
        Self::from_config(AdaptationConfig::default())
    }

    /// Create an engine from a validated configuration.
    ///
    /// # Errors
    /// Returns `ConfigError` when the configuration fails validation.
    pub fn with_config(config: AdaptationConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_config(config))
    }

    fn from_config(config: AdaptationConfig) -> Self {
        Self {
            arbiter: DecisionArbiter::new(config.risk.max_phase_extensions),
            analyzer: RiskAnalyzer::new(config.risk),
            emergency: EmergencyEvaluator::new(config.emergency),
            resolver: ConflictResolver::new(config.safety_veto_risk),
            calibrator: ConfidenceCalibrator::new(config.confidence),
        }
    }

    /// The weekly evaluation entry point.
    ///
    /// Emergency short-circuit happens inside: when a hard-stop
    /// condition matches, the returned report carries the emergency
    /// decision and no risk analysis was performed.
    #[must_use]
    pub fn evaluate(
        &self,
        snapshot: &CurrentStateSnapshot,
        history: &[WeeklySummary],
        signals: &AdaptationSignals,
    ) -> EvaluationReport {
        self.evaluate_inner(snapshot, history, signals, None)
    }

    /// Weekly evaluation combined with sibling-module proposals.
    ///
    /// Conflicts are resolved by rewriting the losing fields in place,
    /// both in `proposals` and (for safety vetoes) in the decision;
    /// every rewrite is annotated in the report.
    #[must_use]
    pub fn evaluate_with_modules(
        &self,
        snapshot: &CurrentStateSnapshot,
        history: &[WeeklySummary],
        signals: &AdaptationSignals,
        proposals: &mut ModuleProposals,
    ) -> EvaluationReport {
        self.evaluate_inner(snapshot, history, signals, Some(proposals))
    }

    /// Evaluate many independent athletes in parallel.
    ///
    /// Each case is its own pure computation over its own inputs, so
    /// the reports equal what item-wise `evaluate` calls would return.
    #[must_use]
    pub fn evaluate_batch(&self, cases: &[EvaluationInput]) -> Vec<EvaluationReport> {
        cases
            .par_iter()
            .map(|case| self.evaluate(&case.snapshot, &case.history, &case.signals))
            .collect()
    }

    /// Ad hoc, out-of-band special-event override.
    ///
    /// # Errors
    /// Returns `AppError::UnrecognizedEvent` for event types outside
    /// the closed set.
    pub fn handle_event(
        &self,
        event: &EventRecord,
        ctx: &AthleteContext,
    ) -> AppResult<EventOutcome> {
        handle_event(event, ctx)
    }

    fn evaluate_inner(
        &self,
        snapshot: &CurrentStateSnapshot,
        history: &[WeeklySummary],
        signals: &AdaptationSignals,
        proposals: Option<&mut ModuleProposals>,
    ) -> EvaluationReport {
        // Hard-stop conditions bypass everything else.
        if let Some((trigger, decision)) = self.emergency.check(snapshot) {
            return EvaluationReport {
                emergency: true,
                emergency_trigger: Some(trigger),
                decision,
                analysis: None,
                trend: None,
                conflicts: Vec::new(),
                amplifications: Vec::new(),
                validation: ValidationOutcome::passed(),
                confidence: ConfidenceResult::emergency(),
            };
        }

        let analysis = self.analyzer.analyze(history, signals);
        let trend = TrendAnalyzer::assess(history);
        let mut decision = self.arbiter.decide(&analysis, signals);
        debug!(action = ?decision.action, priority = ?decision.priority, "arbiter decided");

        let mut conflicts = Vec::new();
        let proposals_view = match proposals {
            Some(proposals) => {
                conflicts = self.resolver.resolve(&mut decision, proposals);
                Some(&*proposals)
            }
            None => None,
        };
        let safety_risk = proposals_view
            .and_then(|p| p.safety.as_ref().map(|s| s.overall_risk))
            .unwrap_or_else(|| baseline_safety_risk(snapshot));

        let amplifications =
            SignalAmplifier::scan(&decision, snapshot, signals, trend.as_ref(), proposals_view);
        let validation = DecisionValidator::validate(&mut decision);
        let confidence = self
            .calibrator
            .calibrate(snapshot, &amplifications, safety_risk);

        debug!(
            action = ?decision.action,
            confidence = confidence.value,
            conflicts = conflicts.len(),
            amplifications = amplifications.len(),
            "evaluation complete"
        );

        EvaluationReport {
            emergency: false,
            emergency_trigger: None,
            decision,
            analysis: Some(analysis),
            trend,
            conflicts,
            amplifications,
            validation,
            confidence,
        }
    }
}

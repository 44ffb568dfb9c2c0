// ABOUTME: Detects independent agreement across signal sources and emits amplification records
// ABOUTME: Amplifications never change the decided action; they feed confidence calibration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Milo Coaching Intelligence

use crate::conflict::{IntensityLevel, ModuleProposals};
use crate::decision::{Decision, DecisionAction};
use crate::trend::{TrendAssessment, TrendDirection};
use milo_core::models::{AdaptationSignals, CurrentStateSnapshot};
use serde::{Deserialize, Serialize};

/// Sustainable RPE at or below which the fatigue module votes "light"
const LIGHT_RPE_CEILING: f64 = 6.0;

/// Sustainable RPE at or above which the fatigue module votes "heavy"
const HEAVY_RPE_FLOOR: f64 = 8.0;

/// Safety risk above which the safety module votes "light"
const LIGHT_RISK_FLOOR: f64 = 0.5;

/// CNS score above which the CNS signal votes "heavy"
const HEAVY_CNS_FLOOR: f64 = 80.0;

/// Overreaching flags at which history votes for a deload
const DELOAD_FLAG_FLOOR: u32 = 2;

/// Independent sources that can agree on a directional conclusion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalSource {
    /// Strategic-intent module
    Strategy,
    /// Fatigue / sustainable-RPE module
    Fatigue,
    /// Safety evaluation
    Safety,
    /// CNS readiness proxy
    Cns,
    /// The weekly arbitration itself
    Arbiter,
    /// Fitted fatigue trend
    Trend,
    /// Accumulated adaptation signals
    History,
}

/// Consensus rules, each with its own fixed source pool.
///
/// The strength denominator is a per-rule constant: different rules
/// consult different source sets, so a universal denominator would be
/// meaningless.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AmplificationKind {
    /// Multiple sources agree the session should be light
    LightIntensityConsensus,
    /// Multiple sources clear the athlete for heavy work
    HeavyIntensityConsensus,
    /// Multiple sources point at a deload
    DeloadConsensus,
}

impl AmplificationKind {
    /// Number of sources this rule consults
    #[must_use]
    pub const fn source_pool(self) -> usize {
        match self {
            Self::LightIntensityConsensus | Self::DeloadConsensus => 3,
            Self::HeavyIntensityConsensus => 4,
        }
    }

    /// Agreeing sources required before the rule fires
    #[must_use]
    pub const fn quorum(self) -> usize {
        match self {
            Self::LightIntensityConsensus | Self::DeloadConsensus => 2,
            Self::HeavyIntensityConsensus => 3,
        }
    }
}

/// Directional conclusion confirmed by a consensus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConsensusAction {
    /// Keep the session light
    ConfirmLight,
    /// Heavy work is cleared
    ConfirmHeavy,
    /// Reinforce the deload direction
    ReinforceDeload,
}

/// One detected agreement across independent sources
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Amplification {
    /// The rule that fired
    pub kind: AmplificationKind,
    /// agreeing sources / rule source pool, in (0, 1]
    pub strength: f64,
    /// Which sources agreed
    pub sources: Vec<SignalSource>,
    /// The confirmed conclusion
    pub action: ConsensusAction,
    /// Human-readable summary
    pub message: String,
    /// Supporting data for the record
    pub evidence: Option<serde_json::Value>,
}

/// Scans the combined evaluation output for cross-source agreement.
#[derive(Debug, Clone, Copy, Default)]
pub struct SignalAmplifier;

impl SignalAmplifier {
    /// Run all consensus rules over the combined outputs.
    #[must_use]
    pub fn scan(
        decision: &Decision,
        snapshot: &CurrentStateSnapshot,
        signals: &AdaptationSignals,
        trend: Option<&TrendAssessment>,
        proposals: Option<&ModuleProposals>,
    ) -> Vec<Amplification> {
        let mut amplifications = Vec::new();

        if let Some(light) = Self::light_consensus(proposals) {
            amplifications.push(light);
        }
        if let Some(heavy) = Self::heavy_consensus(snapshot, proposals) {
            amplifications.push(heavy);
        }
        if let Some(deload) = Self::deload_consensus(decision, signals, trend) {
            amplifications.push(deload);
        }

        amplifications
    }

    fn light_consensus(proposals: Option<&ModuleProposals>) -> Option<Amplification> {
        let proposals = proposals?;
        let mut sources = Vec::new();

        if proposals
            .strategy
            .as_ref()
            .is_some_and(|s| s.intensity == IntensityLevel::Light)
        {
            sources.push(SignalSource::Strategy);
        }
        if proposals
            .fatigue
            .is_some_and(|f| f.sustainable_rpe <= LIGHT_RPE_CEILING)
        {
            sources.push(SignalSource::Fatigue);
        }
        if proposals
            .safety
            .as_ref()
            .is_some_and(|s| s.overall_risk > LIGHT_RISK_FLOOR)
        {
            sources.push(SignalSource::Safety);
        }

        Self::build(
            AmplificationKind::LightIntensityConsensus,
            ConsensusAction::ConfirmLight,
            sources,
            |count| format!("{count} sources agree: keep the session light"),
        )
    }

    fn heavy_consensus(
        snapshot: &CurrentStateSnapshot,
        proposals: Option<&ModuleProposals>,
    ) -> Option<Amplification> {
        let mut sources = Vec::new();

        if let Some(proposals) = proposals {
            if proposals
                .strategy
                .as_ref()
                .is_some_and(|s| s.intensity == IntensityLevel::High)
            {
                sources.push(SignalSource::Strategy);
            }
            if proposals
                .fatigue
                .is_some_and(|f| f.sustainable_rpe >= HEAVY_RPE_FLOOR)
            {
                sources.push(SignalSource::Fatigue);
            }
            if proposals
                .safety
                .as_ref()
                .is_some_and(|s| s.cleared_for_heavy)
            {
                sources.push(SignalSource::Safety);
            }
        }
        if snapshot.cns().is_some_and(|cns| cns > HEAVY_CNS_FLOOR) {
            sources.push(SignalSource::Cns);
        }

        Self::build(
            AmplificationKind::HeavyIntensityConsensus,
            ConsensusAction::ConfirmHeavy,
            sources,
            |count| format!("Full green light: {count} positive signals for heavy work"),
        )
    }

    fn deload_consensus(
        decision: &Decision,
        signals: &AdaptationSignals,
        trend: Option<&TrendAssessment>,
    ) -> Option<Amplification> {
        let mut sources = Vec::new();

        if matches!(
            decision.action,
            DecisionAction::SkipToDeload | DecisionAction::ReduceLoad
        ) {
            sources.push(SignalSource::Arbiter);
        }
        if trend.is_some_and(|t| t.fatigue == TrendDirection::Rising) {
            sources.push(SignalSource::Trend);
        }
        if signals.overreaching_flags >= DELOAD_FLAG_FLOOR {
            sources.push(SignalSource::History);
        }

        Self::build(
            AmplificationKind::DeloadConsensus,
            ConsensusAction::ReinforceDeload,
            sources,
            |count| format!("Strong signal: deload direction confirmed by {count} sources"),
        )
    }

    fn build(
        kind: AmplificationKind,
        action: ConsensusAction,
        sources: Vec<SignalSource>,
        message: impl Fn(usize) -> String,
    ) -> Option<Amplification> {
        if sources.len() < kind.quorum() {
            return None;
        }

        let strength = sources.len() as f64 / kind.source_pool() as f64;
        Some(Amplification {
            kind,
            strength,
            evidence: Some(serde_json::json!({
                "agreeing": sources.len(),
                "pool": kind.source_pool(),
            })),
            message: message(sources.len()),
            sources,
            action,
        })
    }
}

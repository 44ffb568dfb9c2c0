// ABOUTME: Confidence calibration producing a clamped scalar, a category, and guidance
// ABOUTME: Also derives a baseline safety risk from the snapshot when no safety module ran
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Milo Coaching Intelligence

use crate::amplifier::Amplification;
use crate::config::ConfidenceWeights;
use milo_core::models::CurrentStateSnapshot;
use serde::{Deserialize, Serialize};

/// Soreness at or above this contributes to baseline safety risk (0-10)
const RISKY_SORENESS: u8 = 7;

/// Sleep at or below this contributes to baseline safety risk (0-10)
const RISKY_SLEEP: u8 = 4;

/// CNS below this contributes to baseline safety risk (0-100)
const RISKY_CNS: f64 = 50.0;

/// Confidence category with fixed thresholds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceCategory {
    /// Below 0.40
    VeryLow,
    /// 0.40 to 0.55
    Low,
    /// 0.55 to 0.70
    Moderate,
    /// 0.70 to 0.85
    High,
    /// 0.85 and above
    VeryHigh,
}

impl ConfidenceCategory {
    /// Classify a calibrated confidence value
    #[must_use]
    pub fn from_value(value: f64) -> Self {
        if value >= 0.85 {
            Self::VeryHigh
        } else if value >= 0.70 {
            Self::High
        } else if value >= 0.55 {
            Self::Moderate
        } else if value >= 0.40 {
            Self::Low
        } else {
            Self::VeryLow
        }
    }

    /// Canned guidance attached to each category
    #[must_use]
    pub const fn recommendation(self) -> &'static str {
        match self {
            Self::VeryHigh => "Proceed without hesitation",
            Self::High => "Proceed with standard monitoring",
            Self::Moderate => "Proceed but monitor RPE closely",
            Self::Low => "Consider a safer alternative",
            Self::VeryLow => "Gather more data before deciding",
        }
    }
}

/// Calibrated confidence for a decision
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceResult {
    /// Clamped scalar in [0.3, 1.0]
    pub value: f64,
    /// Category by fixed thresholds
    pub category: ConfidenceCategory,
    /// Canned guidance for the category
    pub recommendation: String,
}

impl ConfidenceResult {
    /// Confidence reported for emergency decisions: the trigger table
    /// is deterministic, so the decision is as certain as it gets.
    #[must_use]
    pub fn emergency() -> Self {
        Self {
            value: 1.0,
            category: ConfidenceCategory::VeryHigh,
            recommendation: "Emergency protocol active; follow the prescribed restrictions"
                .to_owned(),
        }
    }
}

/// Produces the final scalar confidence and category for a decision.
#[derive(Debug, Clone)]
pub struct ConfidenceCalibrator {
    weights: ConfidenceWeights,
}

impl Default for ConfidenceCalibrator {
    fn default() -> Self {
        Self::new(ConfidenceWeights::default())
    }
}

impl ConfidenceCalibrator {
    /// Create a calibrator with the given weights
    #[must_use]
    pub const fn new(weights: ConfidenceWeights) -> Self {
        Self { weights }
    }

    /// Calibrate confidence for one evaluation.
    ///
    /// The amplification bonus is capped before the final clamp so a
    /// pile of simultaneous consensus hits cannot push the
    /// pre-clamp value arbitrarily high; the [floor, ceiling] clamp
    /// stays authoritative either way.
    #[must_use]
    pub fn calibrate(
        &self,
        snapshot: &CurrentStateSnapshot,
        amplifications: &[Amplification],
        safety_risk: f64,
    ) -> ConfidenceResult {
        let weights = &self.weights;
        let mut value = weights.base;

        if snapshot.is_complete() {
            value += weights.complete_snapshot_bonus;
        }

        let amplification_bonus: f64 = amplifications
            .iter()
            .map(|a| a.strength * weights.amplification_unit)
            .sum();
        value += amplification_bonus.min(weights.amplification_cap);

        if safety_risk > weights.risk_threshold {
            value -= weights.high_risk_penalty;
        }

        if snapshot
            .patterns
            .as_ref()
            .is_some_and(|p| p.successful_patterns > 0)
        {
            value += weights.pattern_bonus;
        }

        let value = value.clamp(weights.floor, weights.ceiling);
        let category = ConfidenceCategory::from_value(value);
        ConfidenceResult {
            value,
            category,
            recommendation: category.recommendation().to_owned(),
        }
    }
}

/// Baseline safety risk derived from the snapshot alone, used when no
/// dedicated safety module contributed a proposal. Presence of bad
/// values raises risk; absent data contributes nothing.
#[must_use]
pub fn baseline_safety_risk(snapshot: &CurrentStateSnapshot) -> f64 {
    let mut risk: f64 = 0.0;

    if !snapshot.constraints.injuries.is_empty() {
        risk += 0.3;
    }
    if let Some(subjective) = snapshot.subjective() {
        if subjective.soreness >= RISKY_SORENESS {
            risk += 0.2;
        }
        if subjective.sleep <= RISKY_SLEEP {
            risk += 0.2;
        }
    }
    if snapshot.cns().is_some_and(|cns| cns < RISKY_CNS) {
        risk += 0.3;
    }

    risk.min(1.0)
}

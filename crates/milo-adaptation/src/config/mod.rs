// ABOUTME: Engine configuration with validated thresholds and confidence weights
// ABOUTME: Defaults encode the calibrated production values; validate() guards overrides
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Milo Coaching Intelligence

//! Engine configuration.
//!
//! Every tunable judgment value lives here with a documented default.
//! Scoring weights that are part of the rule definitions themselves
//! (how many points a factor contributes) stay as constants next to
//! the rules; this module holds the cutoffs and scales a deployment
//! might reasonably adjust.

mod error;

pub use error::ConfigError;

use serde::{Deserialize, Serialize};

/// Risk-analysis thresholds and cutoffs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskThresholds {
    /// Fatigue at or above this counts toward overtraining (0-10)
    pub high_fatigue: u8,
    /// Motivation at or below this counts toward overtraining (0-10)
    pub low_motivation: u8,
    /// Fatigue at or below this counts toward undertraining (0-10)
    pub low_fatigue: u8,
    /// Adherence below this counts toward undertraining (0-1)
    pub low_adherence: f64,
    /// Weeks since the last deload before it counts as overdue
    pub deload_overdue_weeks: u32,
    /// Accumulated overreaching flags before they count as a factor
    pub overreaching_flag_limit: u32,
    /// Overtraining score for high risk
    pub overtraining_high: u32,
    /// Overtraining score for medium risk
    pub overtraining_medium: u32,
    /// Undertraining score for high risk
    pub undertraining_high: u32,
    /// Undertraining score for medium risk
    pub undertraining_medium: u32,
    /// Plateau score at which a plateau is declared
    pub plateau_detected: u32,
    /// Optimal-adaptation score at which the window is declared open
    pub optimal_detected: u32,
    /// Inclusive fatigue band considered productive (optimal detection)
    pub optimal_fatigue_band: (u8, u8),
    /// Motivation at or above this counts toward optimal adaptation
    pub high_motivation: u8,
    /// Phase extensions allowed before extension stops being offered
    pub max_phase_extensions: u32,
}

impl Default for RiskThresholds {
    fn default() -> Self {
        Self {
            high_fatigue: 8,
            low_motivation: 4,
            low_fatigue: 4,
            low_adherence: 0.7,
            deload_overdue_weeks: 6,
            overreaching_flag_limit: 2,
            overtraining_high: 60,
            overtraining_medium: 30,
            undertraining_high: 50,
            undertraining_medium: 25,
            plateau_detected: 40,
            optimal_detected: 60,
            optimal_fatigue_band: (5, 7),
            high_motivation: 8,
            max_phase_extensions: 2,
        }
    }
}

/// Hard-stop emergency cutoffs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmergencyThresholds {
    /// Subjective energy at or below this alone forces complete rest (0-10)
    pub critical_energy: u8,
    /// Soreness at or above this combined with depleted energy forces rest (0-10)
    pub high_soreness: u8,
    /// Energy at or below this counts as depleted in the soreness combo (0-10)
    pub depleted_energy: u8,
    /// Sleep at or below this caps the session to mobility work (0-10)
    pub critical_sleep: u8,
    /// CNS readiness below this allows active recovery only (0-100)
    pub critical_cns: f64,
    /// Motivation at or below this contributes to the burnout trigger (0-10)
    pub burnout_motivation: u8,
    /// Historical average RPE above this contributes to the burnout trigger (1-10)
    pub burnout_average_rpe: f64,
    /// Duration cap for the minimal session, minutes
    pub minimal_session_cap_minutes: u32,
    /// Volume reduction factor applied by a forced deload
    pub forced_deload_volume: f64,
    /// Intensity reduction factor applied by a forced deload
    pub forced_deload_intensity: f64,
}

impl Default for EmergencyThresholds {
    fn default() -> Self {
        Self {
            critical_energy: 2,
            high_soreness: 9,
            depleted_energy: 4,
            critical_sleep: 3,
            critical_cns: 40.0,
            burnout_motivation: 3,
            burnout_average_rpe: 8.0,
            minimal_session_cap_minutes: 30,
            forced_deload_volume: 0.5,
            forced_deload_intensity: 0.6,
        }
    }
}

/// Confidence calibration weights
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceWeights {
    /// Starting confidence before adjustments
    pub base: f64,
    /// Bonus for a complete snapshot
    pub complete_snapshot_bonus: f64,
    /// Bonus per unit of amplification strength
    pub amplification_unit: f64,
    /// Ceiling for the aggregate amplification bonus
    pub amplification_cap: f64,
    /// Penalty when safety risk exceeds `risk_threshold`
    pub high_risk_penalty: f64,
    /// Safety risk above which the penalty applies (0-1)
    pub risk_threshold: f64,
    /// Bonus when successful historical patterns exist
    pub pattern_bonus: f64,
    /// Lower clamp of the final value
    pub floor: f64,
    /// Upper clamp of the final value
    pub ceiling: f64,
}

impl Default for ConfidenceWeights {
    fn default() -> Self {
        Self {
            base: 0.5,
            complete_snapshot_bonus: 0.2,
            amplification_unit: 0.05,
            amplification_cap: 0.15,
            high_risk_penalty: 0.15,
            risk_threshold: 0.5,
            pattern_bonus: 0.1,
            floor: 0.3,
            ceiling: 1.0,
        }
    }
}

/// Top-level engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdaptationConfig {
    /// Risk-analysis thresholds
    pub risk: RiskThresholds,
    /// Emergency cutoffs
    pub emergency: EmergencyThresholds,
    /// Confidence calibration weights
    pub confidence: ConfidenceWeights,
    /// Safety risk above which stimulus-increasing decisions are vetoed (0-1)
    pub safety_veto_risk: f64,
}

impl Default for AdaptationConfig {
    fn default() -> Self {
        Self {
            risk: RiskThresholds::default(),
            emergency: EmergencyThresholds::default(),
            confidence: ConfidenceWeights::default(),
            safety_veto_risk: 0.6,
        }
    }
}

impl AdaptationConfig {
    /// Validate an overridden configuration.
    ///
    /// # Errors
    /// Returns `ConfigError` when a threshold is outside its scale or
    /// cutoffs are ordered inconsistently.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let risk = &self.risk;
        if risk.high_fatigue > 10 || risk.low_motivation > 10 || risk.low_fatigue > 10 {
            return Err(ConfigError::InvalidRange(
                "subjective thresholds must stay on the 0-10 scale",
            ));
        }
        if !(0.0..=1.0).contains(&risk.low_adherence) {
            return Err(ConfigError::InvalidRange("low_adherence must be 0-1"));
        }
        if risk.overtraining_medium >= risk.overtraining_high {
            return Err(ConfigError::InconsistentCutoffs(
                "overtraining medium must be below high",
            ));
        }
        if risk.undertraining_medium >= risk.undertraining_high {
            return Err(ConfigError::InconsistentCutoffs(
                "undertraining medium must be below high",
            ));
        }
        if risk.optimal_fatigue_band.0 > risk.optimal_fatigue_band.1 {
            return Err(ConfigError::InvalidRange(
                "optimal fatigue band is inverted",
            ));
        }

        let emergency = &self.emergency;
        if emergency.critical_sleep > 10
            || emergency.critical_energy > 10
            || emergency.high_soreness > 10
        {
            return Err(ConfigError::InvalidRange(
                "emergency subjective cutoffs must stay on the 0-10 scale",
            ));
        }
        if !(0.0..=100.0).contains(&emergency.critical_cns) {
            return Err(ConfigError::InvalidRange("critical_cns must be 0-100"));
        }

        let confidence = &self.confidence;
        if confidence.floor >= confidence.ceiling {
            return Err(ConfigError::InvalidWeights(
                "confidence floor must be below ceiling",
            ));
        }
        if !(confidence.floor..=confidence.ceiling).contains(&confidence.base) {
            return Err(ConfigError::InvalidWeights(
                "confidence base must sit inside the clamp interval",
            ));
        }
        if !(0.0..=1.0).contains(&self.safety_veto_risk) {
            return Err(ConfigError::InvalidRange("safety_veto_risk must be 0-1"));
        }
        Ok(())
    }
}

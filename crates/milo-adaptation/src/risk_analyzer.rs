// ABOUTME: Risk analysis over the rolling weekly history: overtraining, undertraining,
// ABOUTME: plateau, and optimal-adaptation detection, each failing soft on short history
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Milo Coaching Intelligence

use crate::config::RiskThresholds;
use milo_core::models::{AdaptationSignals, PerformanceTrend, SleepQuality, WeeklySummary};
use serde::{Deserialize, Serialize};

/// Minimum summaries before overtraining or optimal-adaptation scoring runs
const MIN_WEEKS_OVERTRAINING: usize = 2;

/// Minimum summaries before undertraining scoring runs
const MIN_WEEKS_UNDERTRAINING: usize = 3;

/// Minimum summaries before plateau detection runs
const MIN_WEEKS_PLATEAU: usize = 4;

/// Weeks examined by overtraining scoring
const OVERTRAINING_WINDOW: usize = 3;

/// Weeks examined by undertraining scoring and the PR drought check
const UNDERTRAINING_WINDOW: usize = 4;

/// Weeks examined by optimal-adaptation scoring
const OPTIMAL_WINDOW: usize = 2;

// Overtraining score contributions
const HIGH_FATIGUE_POINTS: u32 = 30;
const DECLINING_POINTS: u32 = 35;
const POOR_SLEEP_POINTS: u32 = 20;
const LOW_MOTIVATION_POINTS: u32 = 25;
const OVERREACHING_FLAG_POINTS: u32 = 15;
const DELOAD_OVERDUE_POINTS: u32 = 10;

// Undertraining score contributions
const LOW_FATIGUE_POINTS: u32 = 35;
const NO_IMPROVEMENT_POINTS: u32 = 30;
const LOW_ADHERENCE_POINTS: u32 = 20;

// Plateau score contributions
const PR_DROUGHT_POINTS: u32 = 40;
const STAGNANT_MOTIVATION_POINTS: u32 = 25;

// Optimal-adaptation score contributions
const STRONG_PERFORMANCE_POINTS: u32 = 40;
const PRODUCTIVE_FATIGUE_POINTS: u32 = 30;
const HIGH_MOTIVATION_POINTS: u32 = 20;
const RECENT_PR_POINTS: u32 = 15;

/// Motivation band whose mean indicates stagnation rather than distress
const STAGNANT_MOTIVATION_BAND: (f64, f64) = (5.0, 7.0);

/// Motivation variance below this counts as flat
const STAGNANT_MOTIVATION_VARIANCE: f64 = 1.0;

/// Risk classification for a scored assessment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    /// No corrective action indicated
    Low,
    /// Monitor closely, small corrections warranted
    Medium,
    /// Corrective action required
    High,
}

/// A scored risk assessment with its contributing evidence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskAssessment {
    /// Risk classification
    pub risk: RiskLevel,
    /// Accumulated score, 0-100
    pub score: u32,
    /// Contributing factor descriptions
    pub factors: Vec<String>,
    /// False when the history was too short to score
    pub has_enough_data: bool,
}

impl RiskAssessment {
    /// Neutral assessment returned when history is too short.
    /// Risk never rises above `Low` without enough data.
    #[must_use]
    pub const fn insufficient_data() -> Self {
        Self {
            risk: RiskLevel::Low,
            score: 0,
            factors: Vec::new(),
            has_enough_data: false,
        }
    }
}

/// Plateau detection result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlateauAssessment {
    /// Whether a plateau was declared
    pub detected: bool,
    /// Accumulated score, 0-100
    pub score: u32,
    /// Contributing factor descriptions
    pub factors: Vec<String>,
    /// False when the history was too short to score
    pub has_enough_data: bool,
}

/// Optimal-adaptation detection result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptimalAdaptation {
    /// Whether the adaptation window is open
    pub optimal: bool,
    /// Accumulated score, 0-100
    pub score: u32,
    /// Contributing factor descriptions
    pub factors: Vec<String>,
    /// False when the history was too short to score
    pub has_enough_data: bool,
}

/// The four independent assessments over one history window
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskAnalysis {
    /// Overtraining risk
    pub overtraining: RiskAssessment,
    /// Undertraining risk
    pub undertraining: RiskAssessment,
    /// Plateau detection
    pub plateau: PlateauAssessment,
    /// Optimal-adaptation detection
    pub optimal: OptimalAdaptation,
}

/// Rule-based analyzer over the rolling weekly history.
///
/// All four assessments are pure functions over the same inputs; the
/// analyzer holds only its thresholds.
#[derive(Debug, Clone)]
pub struct RiskAnalyzer {
    thresholds: RiskThresholds,
}

impl Default for RiskAnalyzer {
    fn default() -> Self {
        Self::new(RiskThresholds::default())
    }
}

impl RiskAnalyzer {
    /// Create an analyzer with the given thresholds
    #[must_use]
    pub const fn new(thresholds: RiskThresholds) -> Self {
        Self { thresholds }
    }

    /// Run all four assessments over the history
    #[must_use]
    pub fn analyze(&self, history: &[WeeklySummary], signals: &AdaptationSignals) -> RiskAnalysis {
        RiskAnalysis {
            overtraining: self.assess_overtraining(history, signals),
            undertraining: self.assess_undertraining(history),
            plateau: self.detect_plateau(history),
            optimal: self.detect_optimal_adaptation(history),
        }
    }

    /// Score overtraining risk over the last three weeks.
    ///
    /// Requires at least two summaries; fails soft otherwise.
    #[must_use]
    pub fn assess_overtraining(
        &self,
        history: &[WeeklySummary],
        signals: &AdaptationSignals,
    ) -> RiskAssessment {
        if history.len() < MIN_WEEKS_OVERTRAINING {
            return RiskAssessment::insufficient_data();
        }

        let recent = recent_window(history, OVERTRAINING_WINDOW);
        let mut score = 0;
        let mut factors = Vec::new();

        let high_fatigue = recent
            .iter()
            .filter(|w| w.fatigue >= self.thresholds.high_fatigue)
            .count();
        if high_fatigue >= 2 {
            score += HIGH_FATIGUE_POINTS;
            factors.push(format!(
                "Fatigue >= {} for {high_fatigue} weeks",
                self.thresholds.high_fatigue
            ));
        }

        let declining = recent
            .iter()
            .filter(|w| w.performance == PerformanceTrend::Declining)
            .count();
        if declining >= 2 {
            score += DECLINING_POINTS;
            factors.push(format!("Performance declining for {declining} weeks"));
        }

        let poor_sleep = recent
            .iter()
            .filter(|w| w.sleep_quality == SleepQuality::Poor)
            .count();
        if poor_sleep >= 2 {
            score += POOR_SLEEP_POINTS;
            factors.push(format!("Poor sleep for {poor_sleep} weeks"));
        }

        let low_motivation = recent
            .iter()
            .filter(|w| w.motivation <= self.thresholds.low_motivation)
            .count();
        if low_motivation >= 2 {
            score += LOW_MOTIVATION_POINTS;
            factors.push(format!("Low motivation for {low_motivation} weeks"));
        }

        if signals.overreaching_flags >= self.thresholds.overreaching_flag_limit {
            score += OVERREACHING_FLAG_POINTS;
            factors.push(format!(
                "{} accumulated overreaching flags",
                signals.overreaching_flags
            ));
        }

        if let Some(weeks) = signals.weeks_since_deload(history.len()) {
            if weeks >= self.thresholds.deload_overdue_weeks {
                score += DELOAD_OVERDUE_POINTS;
                factors.push(format!("{weeks} weeks since the last deload"));
            }
        }

        RiskAssessment {
            risk: if score >= self.thresholds.overtraining_high {
                RiskLevel::High
            } else if score >= self.thresholds.overtraining_medium {
                RiskLevel::Medium
            } else {
                RiskLevel::Low
            },
            score,
            factors,
            has_enough_data: true,
        }
    }

    /// Score undertraining risk over the last four weeks.
    ///
    /// Requires at least three summaries; fails soft otherwise.
    #[must_use]
    pub fn assess_undertraining(&self, history: &[WeeklySummary]) -> RiskAssessment {
        if history.len() < MIN_WEEKS_UNDERTRAINING {
            return RiskAssessment::insufficient_data();
        }

        let recent = recent_window(history, UNDERTRAINING_WINDOW);
        let mut score = 0;
        let mut factors = Vec::new();

        let low_fatigue = recent
            .iter()
            .filter(|w| w.fatigue <= self.thresholds.low_fatigue)
            .count();
        if low_fatigue >= 3 {
            score += LOW_FATIGUE_POINTS;
            factors.push(format!(
                "Fatigue <= {} for {low_fatigue} weeks, likely too easy",
                self.thresholds.low_fatigue
            ));
        }

        let stable = recent
            .iter()
            .filter(|w| w.performance == PerformanceTrend::Stable)
            .count();
        let progressing = recent
            .iter()
            .filter(|w| w.performance.is_progressing())
            .count();
        if stable >= 3 && progressing == 0 {
            score += NO_IMPROVEMENT_POINTS;
            factors.push(format!("No improvement for {stable} weeks"));
        }

        let low_adherence = recent
            .iter()
            .filter(|w| w.adherence_rate < self.thresholds.low_adherence)
            .count();
        if low_adherence >= 2 {
            score += LOW_ADHERENCE_POINTS;
            factors.push("Low adherence to the program".to_owned());
        }

        RiskAssessment {
            risk: if score >= self.thresholds.undertraining_high {
                RiskLevel::High
            } else if score >= self.thresholds.undertraining_medium {
                RiskLevel::Medium
            } else {
                RiskLevel::Low
            },
            score,
            factors,
            has_enough_data: true,
        }
    }

    /// Detect a plateau over the last four weeks.
    ///
    /// Requires at least four summaries; fails soft otherwise.
    #[must_use]
    pub fn detect_plateau(&self, history: &[WeeklySummary]) -> PlateauAssessment {
        if history.len() < MIN_WEEKS_PLATEAU {
            return PlateauAssessment {
                detected: false,
                score: 0,
                factors: Vec::new(),
                has_enough_data: false,
            };
        }

        let mut score = 0;
        let mut factors = Vec::new();

        let recent_prs: usize = recent_window(history, UNDERTRAINING_WINDOW)
            .iter()
            .map(|w| w.prs_achieved.len())
            .sum();
        if recent_prs == 0 {
            score += PR_DROUGHT_POINTS;
            factors.push("No PRs in the last 4 weeks".to_owned());
        }

        // Stagnant-but-not-unhappy signature: motivation flat in the
        // middle band across the last 3 weeks.
        let motivation: Vec<f64> = recent_window(history, 3)
            .iter()
            .map(|w| f64::from(w.motivation))
            .collect();
        let mean = motivation.iter().sum::<f64>() / motivation.len() as f64;
        let variance = motivation.iter().map(|m| (m - mean).powi(2)).sum::<f64>()
            / motivation.len() as f64;
        if (STAGNANT_MOTIVATION_BAND.0..=STAGNANT_MOTIVATION_BAND.1).contains(&mean)
            && variance < STAGNANT_MOTIVATION_VARIANCE
        {
            score += STAGNANT_MOTIVATION_POINTS;
            factors.push("Motivation stagnant (steady but uninspired)".to_owned());
        }

        PlateauAssessment {
            detected: score >= self.thresholds.plateau_detected,
            score,
            factors,
            has_enough_data: true,
        }
    }

    /// Detect optimal adaptation over the last two weeks.
    ///
    /// Requires at least two summaries; fails soft otherwise.
    #[must_use]
    pub fn detect_optimal_adaptation(&self, history: &[WeeklySummary]) -> OptimalAdaptation {
        if history.len() < MIN_WEEKS_OVERTRAINING {
            return OptimalAdaptation {
                optimal: false,
                score: 0,
                factors: Vec::new(),
                has_enough_data: false,
            };
        }

        let recent = recent_window(history, OPTIMAL_WINDOW);
        let mut score = 0;
        let mut factors = Vec::new();

        let strong = recent
            .iter()
            .filter(|w| w.performance.is_progressing())
            .count();
        if strong >= OPTIMAL_WINDOW {
            score += STRONG_PERFORMANCE_POINTS;
            factors.push("Excellent performance for 2+ weeks".to_owned());
        }

        let (band_low, band_high) = self.thresholds.optimal_fatigue_band;
        let productive_fatigue = recent
            .iter()
            .filter(|w| (band_low..=band_high).contains(&w.fatigue))
            .count();
        if productive_fatigue >= OPTIMAL_WINDOW {
            score += PRODUCTIVE_FATIGUE_POINTS;
            factors.push(format!(
                "Fatigue in the productive band ({band_low}-{band_high})"
            ));
        }

        let motivated = recent
            .iter()
            .filter(|w| w.motivation >= self.thresholds.high_motivation)
            .count();
        if motivated >= OPTIMAL_WINDOW {
            score += HIGH_MOTIVATION_POINTS;
            factors.push("High motivation".to_owned());
        }

        let recent_prs: usize = recent.iter().map(|w| w.prs_achieved.len()).sum();
        if recent_prs > 0 {
            score += RECENT_PR_POINTS;
            factors.push(format!("{recent_prs} recent PRs"));
        }

        OptimalAdaptation {
            optimal: score >= self.thresholds.optimal_detected,
            score,
            factors,
            has_enough_data: true,
        }
    }
}

/// Most-recent `n` entries of the ordered history
fn recent_window(history: &[WeeklySummary], n: usize) -> &[WeeklySummary] {
    &history[history.len().saturating_sub(n)..]
}

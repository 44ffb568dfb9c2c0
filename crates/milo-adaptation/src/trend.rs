// ABOUTME: Least-squares trend analysis over recent fatigue and performance values
// ABOUTME: Produces per-series direction plus a fatigue warning used by consensus detection
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Milo Coaching Intelligence

use milo_core::models::WeeklySummary;
use serde::{Deserialize, Serialize};

/// Weeks examined for slope computation
const TREND_WINDOW: usize = 4;

/// Fatigue slope above which the series counts as rising
const FATIGUE_RISING_SLOPE: f64 = 0.5;

/// Fatigue slope above which a warning is raised
const FATIGUE_WARNING_SLOPE: f64 = 1.5;

/// Performance slope magnitude that counts as a real trend
const PERFORMANCE_TREND_SLOPE: f64 = 0.2;

/// Direction of a fitted series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    /// Slope above the series threshold
    Rising,
    /// Slope within the dead band
    Steady,
    /// Slope below the negative threshold
    Falling,
}

/// Fitted trends over the recent history window
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendAssessment {
    /// Fatigue slope per week
    pub fatigue_slope: f64,
    /// Fatigue direction
    pub fatigue: TrendDirection,
    /// Performance ordinal slope per week
    pub performance_slope: f64,
    /// Performance direction
    pub performance: TrendDirection,
    /// Fatigue climbing fast enough to warrant attention
    pub fatigue_warning: bool,
}

/// Linear trend analyzer over the weekly history
#[derive(Debug, Clone, Copy, Default)]
pub struct TrendAnalyzer;

impl TrendAnalyzer {
    /// Fit fatigue and performance trends over the last four weeks.
    ///
    /// Returns `None` with fewer than two summaries; a slope needs two
    /// points.
    #[must_use]
    pub fn assess(history: &[WeeklySummary]) -> Option<TrendAssessment> {
        if history.len() < 2 {
            return None;
        }

        let recent = &history[history.len().saturating_sub(TREND_WINDOW)..];

        let fatigue: Vec<f64> = recent.iter().map(|w| f64::from(w.fatigue)).collect();
        let performance: Vec<f64> = recent
            .iter()
            .map(|w| f64::from(w.performance.ordinal()))
            .collect();

        let fatigue_slope = least_squares_slope(&fatigue);
        let performance_slope = least_squares_slope(&performance);

        Some(TrendAssessment {
            fatigue_slope,
            fatigue: direction(fatigue_slope, FATIGUE_RISING_SLOPE),
            performance_slope,
            performance: direction(performance_slope, PERFORMANCE_TREND_SLOPE),
            fatigue_warning: fatigue_slope > FATIGUE_WARNING_SLOPE,
        })
    }
}

/// Classify a slope against a symmetric dead band
fn direction(slope: f64, threshold: f64) -> TrendDirection {
    if slope > threshold {
        TrendDirection::Rising
    } else if slope < -threshold {
        TrendDirection::Falling
    } else {
        TrendDirection::Steady
    }
}

/// Ordinary least-squares slope of evenly spaced values
fn least_squares_slope(values: &[f64]) -> f64 {
    let n = values.len() as f64;
    if values.len() < 2 {
        return 0.0;
    }

    let (mut sum_x, mut sum_y, mut sum_xy, mut sum_xx) = (0.0, 0.0, 0.0, 0.0);
    for (i, y) in values.iter().enumerate() {
        let x = i as f64;
        sum_x += x;
        sum_y += y;
        sum_xy += x * y;
        sum_xx += x * x;
    }

    let denominator = n.mul_add(sum_xx, -(sum_x * sum_x));
    if denominator.abs() < f64::EPSILON {
        0.0
    } else {
        n.mul_add(sum_xy, -(sum_x * sum_y)) / denominator
    }
}

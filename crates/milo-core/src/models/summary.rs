// ABOUTME: Weekly athlete feedback summaries and accumulated adaptation signals
// ABOUTME: Immutable history entries appended by the external tracking component
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Milo Coaching Intelligence

use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// Subjective 0-10 scales use this upper bound
const SUBJECTIVE_SCALE_MAX: u8 = 10;

/// Objective week-over-week performance trend reported by the tracker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PerformanceTrend {
    /// Key lifts or times regressing
    Declining,
    /// Holding steady, no measurable change
    Stable,
    /// Measurable progress on main work
    Improving,
    /// Progress plus high session quality
    Excellent,
}

impl PerformanceTrend {
    /// Ordinal value for slope computations (1 = declining .. 4 = excellent)
    #[must_use]
    pub const fn ordinal(self) -> u8 {
        match self {
            Self::Declining => 1,
            Self::Stable => 2,
            Self::Improving => 3,
            Self::Excellent => 4,
        }
    }

    /// Whether the week showed forward progress
    #[must_use]
    pub const fn is_progressing(self) -> bool {
        matches!(self, Self::Improving | Self::Excellent)
    }
}

/// Self-reported sleep quality for the week
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SleepQuality {
    /// Consistently short or broken sleep
    Poor,
    /// Mixed nights
    Fair,
    /// Restorative sleep most nights
    Good,
}

/// One week of athlete feedback, recorded once and never edited.
///
/// Entries arrive in an ordered sequence, most-recent-last.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklySummary {
    /// Position of this week in the macro plan (0-based)
    pub week_index: u32,
    /// Subjective fatigue, 0-10
    pub fatigue: u8,
    /// Performance trend for the week
    pub performance: PerformanceTrend,
    /// Sleep quality for the week
    pub sleep_quality: SleepQuality,
    /// Subjective motivation, 0-10
    pub motivation: u8,
    /// Completed / planned workout ratio, 0-1
    pub adherence_rate: f64,
    /// Personal records achieved this week, by exercise name
    #[serde(default)]
    pub prs_achieved: Vec<String>,
}

impl WeeklySummary {
    /// Validate field ranges at the boundary.
    ///
    /// # Errors
    /// Returns `AppError::ValueOutOfRange` for any field outside its
    /// documented scale.
    pub fn validate(&self) -> AppResult<()> {
        if self.fatigue > SUBJECTIVE_SCALE_MAX {
            return Err(AppError::ValueOutOfRange {
                field: "fatigue",
                expected: "0-10",
            });
        }
        if self.motivation > SUBJECTIVE_SCALE_MAX {
            return Err(AppError::ValueOutOfRange {
                field: "motivation",
                expected: "0-10",
            });
        }
        if !(0.0..=1.0).contains(&self.adherence_rate) {
            return Err(AppError::ValueOutOfRange {
                field: "adherence_rate",
                expected: "0.0-1.0",
            });
        }
        Ok(())
    }
}

/// Accumulated adaptation signals maintained by the external tracker.
///
/// The engine only reads these; the plan-mutation component updates
/// them after a decision is applied (e.g., incrementing
/// `phase_extensions` when an extension is taken).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdaptationSignals {
    /// Count of overreaching flags raised so far in the cycle
    pub overreaching_flags: u32,
    /// Week index of the last deload, if one has happened
    pub last_deload_week: Option<u32>,
    /// Phase extensions already granted in the current phase
    pub phase_extensions: u32,
}

impl AdaptationSignals {
    /// Weeks elapsed since the last deload, given the current history
    /// length. `None` when no deload has been recorded yet.
    #[must_use]
    pub fn weeks_since_deload(&self, history_len: usize) -> Option<u32> {
        self.last_deload_week
            .map(|week| (history_len as u32).saturating_sub(week))
    }
}

// ABOUTME: Current-state snapshot supplied fresh for each engine evaluation
// ABOUTME: Optional sub-structures model missing data as "not reported", never as a crisis
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Milo Coaching Intelligence

use serde::{Deserialize, Serialize};

/// Training constraints reported by the athlete or their coach
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingConstraints {
    /// Current injury descriptions, free text from the intake form
    #[serde(default)]
    pub injuries: Vec<String>,
}

/// Subjective recovery check-in, each field 0-10
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectiveRecovery {
    /// Perceived energy
    pub energy: u8,
    /// Muscle soreness
    pub soreness: u8,
    /// Last night's sleep
    pub sleep: u8,
    /// Motivation to train today
    pub motivation: u8,
}

/// Recovery state: subjective check-in plus the CNS readiness proxy
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RecoveryState {
    /// Subjective check-in, absent when the athlete skipped it
    pub subjective: Option<SubjectiveRecovery>,
    /// CNS readiness proxy score, 0-100, absent without recent data
    pub cns: Option<f64>,
}

/// Calendar context around the evaluation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarContext {
    /// Days until the next match or competition, if one is scheduled
    pub days_to_match: Option<u32>,
}

/// Long-horizon pattern signals carried over from the athlete's record
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct HistoricalPatterns {
    /// Mean reported RPE across the tracked history
    pub average_rpe: Option<f64>,
    /// Count of previously successful training patterns on file
    pub successful_patterns: u32,
}

/// Fresh per-evaluation snapshot of the athlete's current state.
///
/// Sub-structures are optional: a missing section means the data was
/// not collected, and no rule may treat that absence as an alarm.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CurrentStateSnapshot {
    /// Injury and availability constraints
    #[serde(default)]
    pub constraints: TrainingConstraints,
    /// Recovery check-in and CNS proxy
    pub recovery: Option<RecoveryState>,
    /// Upcoming calendar context
    pub calendar: Option<CalendarContext>,
    /// Historical pattern signals
    pub patterns: Option<HistoricalPatterns>,
}

impl CurrentStateSnapshot {
    /// Convenience accessor for the subjective check-in
    #[must_use]
    pub fn subjective(&self) -> Option<&SubjectiveRecovery> {
        self.recovery.as_ref().and_then(|r| r.subjective.as_ref())
    }

    /// Convenience accessor for the CNS readiness score
    #[must_use]
    pub fn cns(&self) -> Option<f64> {
        self.recovery.as_ref().and_then(|r| r.cns)
    }

    /// Whether all expected measurement sections are present.
    ///
    /// Drives the completeness bonus in confidence calibration.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.recovery
            .as_ref()
            .is_some_and(|r| r.subjective.is_some() && r.cns.is_some())
    }
}

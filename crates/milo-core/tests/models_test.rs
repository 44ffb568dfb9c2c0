// ABOUTME: Tests for core input models: boundary validation and snapshot accessors
// ABOUTME: Covers range errors, deload arithmetic, and completeness semantics
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Milo Coaching Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use milo_core::errors::AppError;
use milo_core::models::{
    AdaptationSignals, CurrentStateSnapshot, PerformanceTrend, RecoveryState, SleepQuality,
    SubjectiveRecovery, WeeklySummary,
};

fn valid_summary() -> WeeklySummary {
    WeeklySummary {
        week_index: 4,
        fatigue: 6,
        performance: PerformanceTrend::Stable,
        sleep_quality: SleepQuality::Good,
        motivation: 7,
        adherence_rate: 0.9,
        prs_achieved: vec![],
    }
}

// === WeeklySummary validation ===

#[test]
fn valid_summary_passes_validation() {
    assert!(valid_summary().validate().is_ok());
}

#[test]
fn fatigue_above_scale_is_rejected() {
    let mut summary = valid_summary();
    summary.fatigue = 11;

    let err = summary.validate().unwrap_err();
    assert!(
        matches!(err, AppError::ValueOutOfRange { field: "fatigue", .. }),
        "expected fatigue range error, got {err:?}"
    );
}

#[test]
fn adherence_above_one_is_rejected() {
    let mut summary = valid_summary();
    summary.adherence_rate = 1.2;

    assert!(summary.validate().is_err());
}

// === AdaptationSignals ===

#[test]
fn weeks_since_deload_counts_from_history_length() {
    let signals = AdaptationSignals {
        overreaching_flags: 0,
        last_deload_week: Some(2),
        phase_extensions: 0,
    };

    assert_eq!(signals.weeks_since_deload(8), Some(6));
}

#[test]
fn weeks_since_deload_is_none_without_a_deload() {
    let signals = AdaptationSignals::default();
    assert_eq!(signals.weeks_since_deload(10), None);
}

#[test]
fn deload_recorded_in_week_zero_still_counts() {
    // A deload in week 0 is a real deload, not "no deload".
    let signals = AdaptationSignals {
        overreaching_flags: 0,
        last_deload_week: Some(0),
        phase_extensions: 0,
    };

    assert_eq!(signals.weeks_since_deload(5), Some(5));
}

// === CurrentStateSnapshot ===

#[test]
fn empty_snapshot_is_incomplete() {
    let snapshot = CurrentStateSnapshot::default();
    assert!(!snapshot.is_complete());
    assert!(snapshot.subjective().is_none());
    assert!(snapshot.cns().is_none());
}

#[test]
fn snapshot_with_subjective_and_cns_is_complete() {
    let snapshot = CurrentStateSnapshot {
        recovery: Some(RecoveryState {
            subjective: Some(SubjectiveRecovery {
                energy: 7,
                soreness: 3,
                sleep: 8,
                motivation: 8,
            }),
            cns: Some(82.0),
        }),
        ..CurrentStateSnapshot::default()
    };

    assert!(snapshot.is_complete());
    assert_eq!(snapshot.cns(), Some(82.0));
}

#[test]
fn snapshot_missing_cns_is_incomplete() {
    let snapshot = CurrentStateSnapshot {
        recovery: Some(RecoveryState {
            subjective: Some(SubjectiveRecovery {
                energy: 7,
                soreness: 3,
                sleep: 8,
                motivation: 8,
            }),
            cns: None,
        }),
        ..CurrentStateSnapshot::default()
    };

    assert!(!snapshot.is_complete());
}

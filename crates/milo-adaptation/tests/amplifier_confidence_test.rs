// ABOUTME: Tests for consensus amplification and confidence calibration
// ABOUTME: Covers per-rule quorums, strength denominators, bonuses, penalties, and clamping
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Milo Coaching Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use milo_adaptation::amplifier::{
    Amplification, AmplificationKind, ConsensusAction, SignalAmplifier, SignalSource,
};
use milo_adaptation::confidence::{
    baseline_safety_risk, ConfidenceCalibrator, ConfidenceCategory,
};
use milo_adaptation::conflict::{
    FatigueProposal, IntensityLevel, ModuleProposals, SafetyProposal, StrategyProposal,
};
use milo_adaptation::decision::{Decision, DecisionAction};
use milo_core::models::{
    AdaptationSignals, CurrentStateSnapshot, HistoricalPatterns, RecoveryState,
    SubjectiveRecovery, TrainingConstraints,
};

fn complete_snapshot() -> CurrentStateSnapshot {
    CurrentStateSnapshot {
        recovery: Some(RecoveryState {
            subjective: Some(SubjectiveRecovery {
                energy: 7,
                soreness: 3,
                sleep: 8,
                motivation: 8,
            }),
            cns: Some(75.0),
        }),
        ..CurrentStateSnapshot::default()
    }
}

fn reduce_load_decision() -> Decision {
    let mut decision = Decision::continue_as_planned();
    decision.action = DecisionAction::ReduceLoad;
    decision
}

fn amplification(strength: f64) -> Amplification {
    Amplification {
        kind: AmplificationKind::DeloadConsensus,
        strength,
        sources: vec![SignalSource::Arbiter, SignalSource::History],
        action: ConsensusAction::ReinforceDeload,
        message: "test".to_owned(),
        evidence: None,
    }
}

// === Amplifier quorums and strength ===

#[test]
fn two_light_votes_reach_the_light_quorum() {
    let proposals = ModuleProposals {
        strategy: Some(StrategyProposal {
            intensity: IntensityLevel::Light,
            rationale: vec![],
        }),
        fatigue: Some(FatigueProposal {
            sustainable_rpe: 5.0,
        }),
        ..ModuleProposals::default()
    };

    let amplifications = SignalAmplifier::scan(
        &Decision::continue_as_planned(),
        &complete_snapshot(),
        &AdaptationSignals::default(),
        None,
        Some(&proposals),
    );

    let light = amplifications
        .iter()
        .find(|a| a.kind == AmplificationKind::LightIntensityConsensus)
        .unwrap();
    assert_eq!(light.sources.len(), 2);
    assert!((light.strength - 2.0 / 3.0).abs() < 1e-9);
    assert_eq!(light.action, ConsensusAction::ConfirmLight);
}

#[test]
fn heavy_consensus_needs_three_votes() {
    // Strategy high + sustainable RPE 8 is only two sources.
    let mut proposals = ModuleProposals {
        strategy: Some(StrategyProposal {
            intensity: IntensityLevel::High,
            rationale: vec![],
        }),
        fatigue: Some(FatigueProposal {
            sustainable_rpe: 8.5,
        }),
        ..ModuleProposals::default()
    };

    let none = SignalAmplifier::scan(
        &Decision::continue_as_planned(),
        &complete_snapshot(),
        &AdaptationSignals::default(),
        None,
        Some(&proposals),
    );
    assert!(none
        .iter()
        .all(|a| a.kind != AmplificationKind::HeavyIntensityConsensus));

    // A CNS above 80 adds the third vote: 3 of 4 sources.
    let mut snapshot = complete_snapshot();
    snapshot.recovery.as_mut().unwrap().cns = Some(85.0);
    proposals.safety = Some(SafetyProposal {
        overall_risk: 0.1,
        vetoed_methods: vec![],
        cleared_for_heavy: false,
    });

    let some = SignalAmplifier::scan(
        &Decision::continue_as_planned(),
        &snapshot,
        &AdaptationSignals::default(),
        None,
        Some(&proposals),
    );
    let heavy = some
        .iter()
        .find(|a| a.kind == AmplificationKind::HeavyIntensityConsensus)
        .unwrap();
    assert_eq!(heavy.sources.len(), 3);
    assert!((heavy.strength - 0.75).abs() < 1e-9);
}

#[test]
fn deload_consensus_fires_from_arbiter_and_history() {
    let signals = AdaptationSignals {
        overreaching_flags: 2,
        last_deload_week: None,
        phase_extensions: 0,
    };

    let amplifications = SignalAmplifier::scan(
        &reduce_load_decision(),
        &complete_snapshot(),
        &signals,
        None,
        None,
    );

    let deload = amplifications
        .iter()
        .find(|a| a.kind == AmplificationKind::DeloadConsensus)
        .unwrap();
    assert_eq!(
        deload.sources,
        vec![SignalSource::Arbiter, SignalSource::History]
    );
    assert!((deload.strength - 2.0 / 3.0).abs() < 1e-9);
}

#[test]
fn lone_signals_never_amplify() {
    let amplifications = SignalAmplifier::scan(
        &reduce_load_decision(),
        &complete_snapshot(),
        &AdaptationSignals::default(),
        None,
        None,
    );

    assert!(
        amplifications.is_empty(),
        "one agreeing source is not a consensus: {amplifications:?}"
    );
}

// === Confidence calibration ===

#[test]
fn complete_snapshot_with_history_scores_high() {
    let mut snapshot = complete_snapshot();
    snapshot.patterns = Some(HistoricalPatterns {
        average_rpe: Some(7.0),
        successful_patterns: 3,
    });

    let result = ConfidenceCalibrator::default().calibrate(&snapshot, &[], 0.0);

    // 0.5 base + 0.2 complete + 0.1 patterns.
    assert!((result.value - 0.8).abs() < 1e-9);
    assert_eq!(result.category, ConfidenceCategory::High);
    assert_eq!(result.recommendation, "Proceed with standard monitoring");
}

#[test]
fn high_safety_risk_is_penalized() {
    let result = ConfidenceCalibrator::default().calibrate(&complete_snapshot(), &[], 0.7);

    // 0.5 + 0.2 - 0.15.
    assert!((result.value - 0.55).abs() < 1e-9);
    assert_eq!(result.category, ConfidenceCategory::Moderate);
}

#[test]
fn amplification_bonus_is_capped() {
    // Five full-strength amplifications would add 0.25 uncapped; the
    // aggregate bonus must stop at 0.15.
    let amplifications: Vec<_> = (0..5).map(|_| amplification(1.0)).collect();

    let capped = ConfidenceCalibrator::default().calibrate(
        &CurrentStateSnapshot::default(),
        &amplifications,
        0.0,
    );

    assert!((capped.value - 0.65).abs() < 1e-9);
}

#[test]
fn confidence_never_leaves_its_bounds() {
    let calibrator = ConfidenceCalibrator::default();

    // Worst case: nothing present, maximum penalty.
    let floor = calibrator.calibrate(&CurrentStateSnapshot::default(), &[], 0.9);
    assert!(floor.value >= 0.3);

    // Best case: everything present plus a stack of amplifications.
    let mut snapshot = complete_snapshot();
    snapshot.patterns = Some(HistoricalPatterns {
        average_rpe: Some(7.0),
        successful_patterns: 5,
    });
    let amplifications: Vec<_> = (0..6).map(|_| amplification(1.0)).collect();
    let ceiling = calibrator.calibrate(&snapshot, &amplifications, 0.0);
    assert!(ceiling.value <= 1.0);
}

#[test]
fn category_thresholds_match_the_table() {
    assert_eq!(ConfidenceCategory::from_value(0.9), ConfidenceCategory::VeryHigh);
    assert_eq!(ConfidenceCategory::from_value(0.85), ConfidenceCategory::VeryHigh);
    assert_eq!(ConfidenceCategory::from_value(0.7), ConfidenceCategory::High);
    assert_eq!(ConfidenceCategory::from_value(0.6), ConfidenceCategory::Moderate);
    assert_eq!(ConfidenceCategory::from_value(0.45), ConfidenceCategory::Low);
    assert_eq!(ConfidenceCategory::from_value(0.3), ConfidenceCategory::VeryLow);
}

// === Baseline safety risk ===

#[test]
fn healthy_snapshot_has_no_baseline_risk() {
    assert!(baseline_safety_risk(&complete_snapshot()).abs() < f64::EPSILON);
}

#[test]
fn injuries_and_low_cns_accumulate_risk() {
    let snapshot = CurrentStateSnapshot {
        constraints: TrainingConstraints {
            injuries: vec!["mild knee pain".to_owned()],
        },
        recovery: Some(RecoveryState {
            subjective: None,
            cns: Some(45.0),
        }),
        ..CurrentStateSnapshot::default()
    };

    assert!((baseline_safety_risk(&snapshot) - 0.6).abs() < 1e-9);
}

#[test]
fn missing_data_contributes_no_risk() {
    assert!(baseline_safety_risk(&CurrentStateSnapshot::default()).abs() < f64::EPSILON);
}

// ABOUTME: End-to-end pipeline tests: short-circuit, precedence, idempotence, batch parity
// ABOUTME: Exercises the full evaluate() path the way the orchestration layer calls it
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Milo Coaching Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use milo_adaptation::conflict::{ModuleProposals, SafetyProposal};
use milo_adaptation::decision::{DecisionAction, DecisionPriority, RecoveryActivity};
use milo_adaptation::emergency::EmergencyTrigger;
use milo_adaptation::engine::{AdaptationEngine, EvaluationInput};
use milo_adaptation::risk_analyzer::RiskLevel;
use milo_core::models::{
    AdaptationSignals, CurrentStateSnapshot, PerformanceTrend, RecoveryState, SleepQuality,
    SubjectiveRecovery, TrainingConstraints, WeeklySummary,
};

fn week(
    index: u32,
    fatigue: u8,
    performance: PerformanceTrend,
    sleep: SleepQuality,
    motivation: u8,
) -> WeeklySummary {
    WeeklySummary {
        week_index: index,
        fatigue,
        performance,
        sleep_quality: sleep,
        motivation,
        adherence_rate: 1.0,
        prs_achieved: vec![],
    }
}

fn healthy_snapshot() -> CurrentStateSnapshot {
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

fn overtrained_history() -> Vec<WeeklySummary> {
    (0..3)
        .map(|i| week(i, 9, PerformanceTrend::Declining, SleepQuality::Poor, 5))
        .collect()
}

fn optimal_history() -> Vec<WeeklySummary> {
    let mut history = vec![
        week(0, 6, PerformanceTrend::Improving, SleepQuality::Good, 9),
        week(1, 6, PerformanceTrend::Excellent, SleepQuality::Good, 9),
    ];
    history[1].prs_achieved = vec!["front_squat".to_owned()];
    history
}

// === Emergency short-circuit ===

#[test]
fn emergency_bypasses_the_analyzers_entirely() {
    // The history screams overtraining, but the acute injury must win
    // and the analyzers must never have been consulted.
    let engine = AdaptationEngine::new();
    let snapshot = CurrentStateSnapshot {
        constraints: TrainingConstraints {
            injuries: vec!["acute ACL tear".to_owned()],
        },
        ..healthy_snapshot()
    };

    let report = engine.evaluate(
        &snapshot,
        &overtrained_history(),
        &AdaptationSignals::default(),
    );

    assert!(report.emergency);
    assert_eq!(report.emergency_trigger, Some(EmergencyTrigger::AcuteInjury));
    assert_eq!(report.decision.action, DecisionAction::MedicalReferral);
    assert!(
        report.analysis.is_none(),
        "risk analysis must not run on an emergency"
    );
    assert!(report.trend.is_none());
    assert!(report.conflicts.is_empty());
    assert!(report.amplifications.is_empty());
    assert!((report.confidence.value - 1.0).abs() < f64::EPSILON);

    let constraints = report.decision.session_constraints.unwrap();
    assert_eq!(
        constraints.allowed_activities,
        vec![
            RecoveryActivity::StretchingPassive,
            RecoveryActivity::Breathing
        ]
    );
}

// === Precedence monotonicity ===

#[test]
fn high_overtraining_always_skips_to_deload() {
    let engine = AdaptationEngine::new();

    let report = engine.evaluate(
        &healthy_snapshot(),
        &overtrained_history(),
        &AdaptationSignals::default(),
    );

    let analysis = report.analysis.unwrap();
    assert_eq!(analysis.overtraining.risk, RiskLevel::High);
    assert!(analysis.overtraining.score >= 85);
    assert_eq!(report.decision.action, DecisionAction::SkipToDeload);
    assert_eq!(report.decision.priority, DecisionPriority::Critical);
}

#[test]
fn optimal_fortnight_extends_the_phase() {
    let engine = AdaptationEngine::new();

    let report = engine.evaluate(
        &healthy_snapshot(),
        &optimal_history(),
        &AdaptationSignals::default(),
    );

    assert_eq!(report.decision.action, DecisionAction::ExtendPhase);
}

#[test]
fn extension_cap_holds_at_the_engine_level() {
    let engine = AdaptationEngine::new();
    let signals = AdaptationSignals {
        overreaching_flags: 0,
        last_deload_week: None,
        phase_extensions: 2,
    };

    let report = engine.evaluate(&healthy_snapshot(), &optimal_history(), &signals);

    assert!(
        report.analysis.unwrap().optimal.optimal,
        "the window itself is still detected"
    );
    assert_eq!(report.decision.action, DecisionAction::Continue);
}

// === Fail-soft short history ===

#[test]
fn single_week_history_falls_through_to_continue() {
    let engine = AdaptationEngine::new();
    let history = vec![week(0, 9, PerformanceTrend::Declining, SleepQuality::Poor, 2)];

    let report = engine.evaluate(&healthy_snapshot(), &history, &AdaptationSignals::default());

    let analysis = report.analysis.unwrap();
    assert!(!analysis.overtraining.has_enough_data);
    assert!(!analysis.undertraining.has_enough_data);
    assert!(!analysis.plateau.has_enough_data);
    assert!(!analysis.optimal.has_enough_data);
    assert_eq!(analysis.overtraining.risk, RiskLevel::Low);
    assert_eq!(report.decision.action, DecisionAction::Continue);
}

// === Idempotence ===

#[test]
fn identical_inputs_yield_byte_identical_reports() {
    let engine = AdaptationEngine::new();
    let snapshot = healthy_snapshot();
    let history = overtrained_history();
    let signals = AdaptationSignals {
        overreaching_flags: 2,
        last_deload_week: Some(0),
        phase_extensions: 1,
    };

    let first = engine.evaluate(&snapshot, &history, &signals);
    let second = engine.evaluate(&snapshot, &history, &signals);

    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_vec(&first).unwrap(),
        serde_json::to_vec(&second).unwrap()
    );
}

// === Conflict resolution through the engine ===

#[test]
fn safety_module_vetoes_an_extension_through_the_pipeline() {
    let engine = AdaptationEngine::new();
    let mut proposals = ModuleProposals {
        safety: Some(SafetyProposal {
            overall_risk: 0.75,
            vetoed_methods: vec![],
            cleared_for_heavy: false,
        }),
        ..ModuleProposals::default()
    };

    let report = engine.evaluate_with_modules(
        &healthy_snapshot(),
        &optimal_history(),
        &AdaptationSignals::default(),
        &mut proposals,
    );

    assert_eq!(report.decision.action, DecisionAction::ReduceLoad);
    assert_eq!(report.conflicts.len(), 1);
    // The 0.75 risk also costs confidence its high-risk penalty.
    assert!(report.confidence.value < 0.7);
}

// === Deload consensus feeds confidence ===

#[test]
fn agreeing_deload_signals_amplify_the_report() {
    let engine = AdaptationEngine::new();
    // Rising fatigue across four weeks plus accumulated flags plus a
    // reduce-load arbitration: three agreeing sources.
    let history = vec![
        week(0, 5, PerformanceTrend::Stable, SleepQuality::Good, 7),
        week(1, 6, PerformanceTrend::Stable, SleepQuality::Good, 7),
        week(2, 8, PerformanceTrend::Stable, SleepQuality::Fair, 7),
        week(3, 9, PerformanceTrend::Stable, SleepQuality::Fair, 7),
    ];
    let signals = AdaptationSignals {
        overreaching_flags: 2,
        last_deload_week: None,
        phase_extensions: 0,
    };

    let report = engine.evaluate(&healthy_snapshot(), &history, &signals);

    assert_eq!(report.decision.action, DecisionAction::ReduceLoad);
    let deload = report
        .amplifications
        .iter()
        .find(|a| a.sources.len() == 3)
        .unwrap();
    assert!((deload.strength - 1.0).abs() < 1e-9);
}

// === Batch parity ===

#[test]
fn batch_evaluation_matches_item_wise_evaluation() {
    let engine = AdaptationEngine::new();
    let cases = vec![
        EvaluationInput {
            snapshot: healthy_snapshot(),
            history: overtrained_history(),
            signals: AdaptationSignals::default(),
        },
        EvaluationInput {
            snapshot: healthy_snapshot(),
            history: optimal_history(),
            signals: AdaptationSignals::default(),
        },
        EvaluationInput {
            snapshot: CurrentStateSnapshot::default(),
            history: vec![],
            signals: AdaptationSignals::default(),
        },
    ];

    let batch = engine.evaluate_batch(&cases);

    assert_eq!(batch.len(), cases.len());
    for (case, report) in cases.iter().zip(&batch) {
        let single = engine.evaluate(&case.snapshot, &case.history, &case.signals);
        assert_eq!(*report, single);
    }
}

// === Confidence bounds across the pipeline ===

#[test]
fn confidence_stays_in_bounds_for_every_path() {
    let engine = AdaptationEngine::new();
    let scenarios = [
        (healthy_snapshot(), overtrained_history()),
        (healthy_snapshot(), optimal_history()),
        (CurrentStateSnapshot::default(), vec![]),
        (
            CurrentStateSnapshot {
                constraints: TrainingConstraints {
                    injuries: vec!["mild wrist pain".to_owned()],
                },
                recovery: Some(RecoveryState {
                    subjective: None,
                    cns: Some(45.0),
                }),
                ..CurrentStateSnapshot::default()
            },
            overtrained_history(),
        ),
    ];

    for (snapshot, history) in scenarios {
        let report = engine.evaluate(&snapshot, &history, &AdaptationSignals::default());
        assert!(
            (0.3..=1.0).contains(&report.confidence.value),
            "confidence {} out of bounds for {:?}",
            report.confidence.value,
            report.decision.action
        );
    }
}

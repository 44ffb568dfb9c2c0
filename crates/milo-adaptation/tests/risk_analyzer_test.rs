// ABOUTME: Tests for the four risk assessments over the rolling weekly history
// ABOUTME: Covers fail-soft short histories, scoring scenarios, and cutoff classification
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Milo Coaching Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use milo_adaptation::risk_analyzer::{RiskAnalyzer, RiskLevel};
use milo_core::models::{AdaptationSignals, PerformanceTrend, SleepQuality, WeeklySummary};

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

fn normal_week(index: u32) -> WeeklySummary {
    week(index, 6, PerformanceTrend::Improving, SleepQuality::Good, 7)
}

// === Insufficient data ===

#[test]
fn overtraining_needs_two_weeks() {
    let analyzer = RiskAnalyzer::default();
    let history = vec![week(0, 10, PerformanceTrend::Declining, SleepQuality::Poor, 1)];

    let assessment = analyzer.assess_overtraining(&history, &AdaptationSignals::default());

    assert!(!assessment.has_enough_data);
    assert_eq!(assessment.risk, RiskLevel::Low);
    assert_eq!(assessment.score, 0);
}

#[test]
fn undertraining_needs_three_weeks() {
    let analyzer = RiskAnalyzer::default();
    let history: Vec<_> = (0..2)
        .map(|i| week(i, 2, PerformanceTrend::Stable, SleepQuality::Good, 7))
        .collect();

    let assessment = analyzer.assess_undertraining(&history);

    assert!(!assessment.has_enough_data);
    assert_eq!(assessment.risk, RiskLevel::Low);
}

#[test]
fn plateau_needs_four_weeks() {
    let analyzer = RiskAnalyzer::default();
    let history: Vec<_> = (0..3).map(normal_week).collect();

    let assessment = analyzer.detect_plateau(&history);

    assert!(!assessment.has_enough_data);
    assert!(!assessment.detected);
}

#[test]
fn optimal_needs_two_weeks() {
    let analyzer = RiskAnalyzer::default();
    let history = vec![week(0, 6, PerformanceTrend::Excellent, SleepQuality::Good, 9)];

    let assessment = analyzer.detect_optimal_adaptation(&history);

    assert!(!assessment.has_enough_data);
    assert!(!assessment.optimal);
}

// === Overtraining scoring ===

#[test]
fn three_collapsed_weeks_score_high_overtraining() {
    // Fatigue 9 + declining + poor sleep across three weeks: 30+35+20.
    let analyzer = RiskAnalyzer::default();
    let history: Vec<_> = (0..3)
        .map(|i| week(i, 9, PerformanceTrend::Declining, SleepQuality::Poor, 5))
        .collect();

    let assessment = analyzer.assess_overtraining(&history, &AdaptationSignals::default());

    assert!(assessment.has_enough_data);
    assert!(
        assessment.score >= 85,
        "expected score >= 85, got {}",
        assessment.score
    );
    assert_eq!(assessment.risk, RiskLevel::High);
    assert!(!assessment.factors.is_empty());
}

#[test]
fn two_high_fatigue_weeks_alone_score_medium() {
    let analyzer = RiskAnalyzer::default();
    let history = vec![
        week(0, 8, PerformanceTrend::Stable, SleepQuality::Good, 7),
        week(1, 9, PerformanceTrend::Stable, SleepQuality::Good, 7),
        week(2, 6, PerformanceTrend::Improving, SleepQuality::Good, 7),
    ];

    // Only the first two weeks carry high fatigue and the window is the
    // last three, so exactly 2 of 3 qualify: +30, medium.
    let assessment = analyzer.assess_overtraining(&history, &AdaptationSignals::default());

    assert_eq!(assessment.score, 30);
    assert_eq!(assessment.risk, RiskLevel::Medium);
}

#[test]
fn overreaching_flags_and_deload_debt_add_points() {
    let analyzer = RiskAnalyzer::default();
    let history: Vec<_> = (0..8).map(normal_week).collect();
    let signals = AdaptationSignals {
        overreaching_flags: 3,
        last_deload_week: Some(1),
        phase_extensions: 0,
    };

    let assessment = analyzer.assess_overtraining(&history, &signals);

    // 15 for accumulated flags + 10 for 7 weeks since the deload.
    assert_eq!(assessment.score, 25);
    assert_eq!(assessment.risk, RiskLevel::Low);
    assert_eq!(assessment.factors.len(), 2);
}

// === Undertraining scoring ===

#[test]
fn coasting_month_scores_high_undertraining() {
    let analyzer = RiskAnalyzer::default();
    let history: Vec<_> = (0..4)
        .map(|i| WeeklySummary {
            week_index: i,
            fatigue: 3,
            performance: PerformanceTrend::Stable,
            sleep_quality: SleepQuality::Good,
            motivation: 6,
            adherence_rate: 0.5,
            prs_achieved: vec![],
        })
        .collect();

    let assessment = analyzer.assess_undertraining(&history);

    // 35 (low fatigue) + 30 (no improvement) + 20 (low adherence).
    assert_eq!(assessment.score, 85);
    assert_eq!(assessment.risk, RiskLevel::High);
}

#[test]
fn one_improving_week_cancels_the_stagnation_factor() {
    let analyzer = RiskAnalyzer::default();
    let mut history: Vec<_> = (0..4)
        .map(|i| week(i, 3, PerformanceTrend::Stable, SleepQuality::Good, 6))
        .collect();
    history[3].performance = PerformanceTrend::Improving;

    let assessment = analyzer.assess_undertraining(&history);

    // Low fatigue still scores 35, but stagnation no longer applies.
    assert_eq!(assessment.score, 35);
    assert_eq!(assessment.risk, RiskLevel::Medium);
}

// === Plateau detection ===

#[test]
fn pr_drought_with_flat_motivation_is_a_plateau() {
    let analyzer = RiskAnalyzer::default();
    let history: Vec<_> = (0..4)
        .map(|i| week(i, 6, PerformanceTrend::Stable, SleepQuality::Good, 6))
        .collect();

    let assessment = analyzer.detect_plateau(&history);

    // 40 (no PRs) + 25 (stagnant motivation signature).
    assert_eq!(assessment.score, 65);
    assert!(assessment.detected);
}

#[test]
fn recent_prs_defuse_the_plateau() {
    let mut history: Vec<_> = (0..4)
        .map(|i| week(i, 6, PerformanceTrend::Stable, SleepQuality::Good, 6))
        .collect();
    history[3].prs_achieved = vec!["back_squat".to_owned()];

    let assessment = RiskAnalyzer::default().detect_plateau(&history);

    assert_eq!(assessment.score, 25);
    assert!(!assessment.detected);
}

#[test]
fn unhappy_motivation_is_not_the_stagnation_signature() {
    // Motivation 2 is distress, not stagnation; only the PR drought scores.
    let history: Vec<_> = (0..4)
        .map(|i| week(i, 6, PerformanceTrend::Stable, SleepQuality::Good, 2))
        .collect();

    let assessment = RiskAnalyzer::default().detect_plateau(&history);

    assert_eq!(assessment.score, 40);
    assert!(assessment.detected);
}

// === Optimal adaptation ===

#[test]
fn two_excellent_weeks_open_the_adaptation_window() {
    let mut history = vec![
        week(0, 6, PerformanceTrend::Improving, SleepQuality::Good, 9),
        week(1, 6, PerformanceTrend::Excellent, SleepQuality::Good, 9),
    ];
    history[1].prs_achieved = vec!["deadlift".to_owned()];

    let assessment = RiskAnalyzer::default().detect_optimal_adaptation(&history);

    // 40 + 30 + 20 + 15.
    assert_eq!(assessment.score, 105);
    assert!(assessment.optimal);
}

#[test]
fn cutoff_is_reachable_without_productive_fatigue() {
    // Fatigue 9 misses the 5-7 band, but performance + motivation land
    // exactly on the 60-point cutoff.
    let history = vec![
        week(0, 9, PerformanceTrend::Excellent, SleepQuality::Good, 9),
        week(1, 9, PerformanceTrend::Excellent, SleepQuality::Good, 9),
    ];

    let assessment = RiskAnalyzer::default().detect_optimal_adaptation(&history);

    assert_eq!(assessment.score, 60);
    assert!(assessment.optimal);
}

#[test]
fn mixed_weeks_stay_below_the_cutoff() {
    let history = vec![
        week(0, 6, PerformanceTrend::Stable, SleepQuality::Good, 6),
        week(1, 6, PerformanceTrend::Improving, SleepQuality::Good, 7),
    ];

    let assessment = RiskAnalyzer::default().detect_optimal_adaptation(&history);

    assert!(assessment.score < 60, "score was {}", assessment.score);
    assert!(!assessment.optimal);
}

// ABOUTME: Hard-stop emergency triggers evaluated before any other analysis
// ABOUTME: Fixed safety precedence: injury > illness/sleep > competition > CNS > burnout
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Milo Coaching Intelligence

use crate::config::EmergencyThresholds;
use crate::decision::{
    Decision, DecisionAction, DecisionPriority, ForbiddenPractice, RecoveryActivity,
    SessionConstraints,
};
use milo_core::models::CurrentStateSnapshot;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Injury descriptions containing any of these mark the injury as acute
const ACUTE_INJURY_MARKERS: [&str; 3] = ["acute", "grave", "recent"];

/// Named emergency triggers, in evaluation order.
///
/// The order is a deliberate safety precedence: physical safety first,
/// then illness and sleep, then imminent-event readiness, then chronic
/// neural overload, then psychological burnout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmergencyTrigger {
    /// Acute injury reported in the constraints
    AcuteInjury,
    /// Critical or depleted subjective energy
    CriticalEnergy,
    /// Critically short or broken sleep last night
    CriticalSleep,
    /// Match or competition tomorrow
    CompetitionTomorrow,
    /// CNS readiness below the critical floor
    CnsCritical,
    /// Sustained low motivation with a history of grinding RPE
    MentalBurnout,
}

/// Scans the current-state snapshot for hard-stop conditions.
///
/// The first matching trigger produces a complete substitute decision
/// and the rest of the pipeline must not run. Missing snapshot fields
/// never match: absence of data is "condition not met", not a crisis.
#[derive(Debug, Clone)]
pub struct EmergencyEvaluator {
    thresholds: EmergencyThresholds,
}

impl Default for EmergencyEvaluator {
    fn default() -> Self {
        Self::new(EmergencyThresholds::default())
    }
}

impl EmergencyEvaluator {
    /// Create an evaluator with the given cutoffs
    #[must_use]
    pub const fn new(thresholds: EmergencyThresholds) -> Self {
        Self { thresholds }
    }

    /// Evaluate the trigger table top to bottom; first match wins.
    #[must_use]
    pub fn check(&self, snapshot: &CurrentStateSnapshot) -> Option<(EmergencyTrigger, Decision)> {
        let hit = Self::acute_injury(snapshot)
            .or_else(|| self.critical_energy(snapshot))
            .or_else(|| self.critical_sleep(snapshot))
            .or_else(|| Self::competition_tomorrow(snapshot))
            .or_else(|| self.cns_critical(snapshot))
            .or_else(|| self.mental_burnout(snapshot));

        if let Some((trigger, _)) = &hit {
            warn!(?trigger, "emergency trigger matched, bypassing weekly pipeline");
        }
        hit
    }

    fn acute_injury(snapshot: &CurrentStateSnapshot) -> Option<(EmergencyTrigger, Decision)> {
        let acute = snapshot.constraints.injuries.iter().find(|injury| {
            let lowered = injury.to_lowercase();
            ACUTE_INJURY_MARKERS
                .iter()
                .any(|marker| lowered.contains(marker))
        })?;

        Some((
            EmergencyTrigger::AcuteInjury,
            Decision {
                action: DecisionAction::MedicalReferral,
                priority: DecisionPriority::Critical,
                reason: "Acute injury reported".to_owned(),
                factors: vec![format!("Injury on file: {acute}")],
                modifiers: None,
                recommendation:
                    "Stop training and consult a physician before resuming. Only passive work is allowed."
                        .to_owned(),
                actionable_steps: vec![
                    "Book a medical assessment".to_owned(),
                    "Avoid loading the affected area entirely".to_owned(),
                ],
                session_constraints: Some(SessionConstraints {
                    allowed_activities: vec![
                        RecoveryActivity::StretchingPassive,
                        RecoveryActivity::Breathing,
                    ],
                    forbidden_practices: Vec::new(),
                    max_duration_minutes: None,
                    volume_reduction: None,
                    intensity_reduction: None,
                }),
            },
        ))
    }

    fn critical_energy(
        &self,
        snapshot: &CurrentStateSnapshot,
    ) -> Option<(EmergencyTrigger, Decision)> {
        let subjective = snapshot.subjective()?;
        let critical = subjective.energy <= self.thresholds.critical_energy
            || (subjective.soreness >= self.thresholds.high_soreness
                && subjective.energy <= self.thresholds.depleted_energy);
        if !critical {
            return None;
        }

        Some((
            EmergencyTrigger::CriticalEnergy,
            Decision {
                action: DecisionAction::CompleteRest,
                priority: DecisionPriority::Critical,
                reason: "Critically low energy".to_owned(),
                factors: vec![format!(
                    "Energy {}/10, soreness {}/10",
                    subjective.energy, subjective.soreness
                )],
                modifiers: None,
                recommendation: "Complete rest today. Resume only after energy recovers.".to_owned(),
                actionable_steps: Vec::new(),
                session_constraints: Some(SessionConstraints {
                    allowed_activities: vec![
                        RecoveryActivity::Rest,
                        RecoveryActivity::LightWalk,
                        RecoveryActivity::Sleep,
                    ],
                    forbidden_practices: Vec::new(),
                    max_duration_minutes: None,
                    volume_reduction: None,
                    intensity_reduction: None,
                }),
            },
        ))
    }

    fn critical_sleep(
        &self,
        snapshot: &CurrentStateSnapshot,
    ) -> Option<(EmergencyTrigger, Decision)> {
        let subjective = snapshot.subjective()?;
        if subjective.sleep > self.thresholds.critical_sleep {
            return None;
        }

        Some((
            EmergencyTrigger::CriticalSleep,
            Decision {
                action: DecisionAction::MinimalSession,
                priority: DecisionPriority::High,
                reason: "Critically poor sleep".to_owned(),
                factors: vec![format!("Sleep {}/10 last night", subjective.sleep)],
                modifiers: None,
                recommendation: "Mobility and light activation only, capped duration.".to_owned(),
                actionable_steps: Vec::new(),
                session_constraints: Some(SessionConstraints {
                    allowed_activities: vec![
                        RecoveryActivity::Mobility,
                        RecoveryActivity::LightActivation,
                        RecoveryActivity::Stretching,
                    ],
                    forbidden_practices: Vec::new(),
                    max_duration_minutes: Some(self.thresholds.minimal_session_cap_minutes),
                    volume_reduction: None,
                    intensity_reduction: None,
                }),
            },
        ))
    }

    fn competition_tomorrow(
        snapshot: &CurrentStateSnapshot,
    ) -> Option<(EmergencyTrigger, Decision)> {
        let days = snapshot.calendar.as_ref()?.days_to_match?;
        if days != 1 {
            return None;
        }

        Some((
            EmergencyTrigger::CompetitionTomorrow,
            Decision {
                action: DecisionAction::PreCompetitionActivation,
                priority: DecisionPriority::High,
                reason: "Competition tomorrow".to_owned(),
                factors: vec!["Match in 1 day".to_owned()],
                modifiers: None,
                recommendation: "Neural activation only. Stay fresh for the event.".to_owned(),
                actionable_steps: Vec::new(),
                session_constraints: Some(SessionConstraints {
                    allowed_activities: vec![
                        RecoveryActivity::NeuralActivation,
                        RecoveryActivity::Mobility,
                        RecoveryActivity::Visualization,
                    ],
                    forbidden_practices: vec![
                        ForbiddenPractice::HeavyLifting,
                        ForbiddenPractice::HighVolume,
                        ForbiddenPractice::NewExercises,
                        ForbiddenPractice::DomsInducing,
                    ],
                    max_duration_minutes: Some(30),
                    volume_reduction: None,
                    intensity_reduction: None,
                }),
            },
        ))
    }

    fn cns_critical(&self, snapshot: &CurrentStateSnapshot) -> Option<(EmergencyTrigger, Decision)> {
        let cns = snapshot.cns()?;
        if cns >= self.thresholds.critical_cns {
            return None;
        }

        Some((
            EmergencyTrigger::CnsCritical,
            Decision {
                action: DecisionAction::ActiveRecovery,
                priority: DecisionPriority::High,
                reason: "CNS readiness critically low".to_owned(),
                factors: vec![format!("CNS score {cns:.0}/100")],
                modifiers: None,
                recommendation: "Active recovery only until CNS readiness rebounds.".to_owned(),
                actionable_steps: Vec::new(),
                session_constraints: Some(SessionConstraints {
                    allowed_activities: vec![
                        RecoveryActivity::Mobility,
                        RecoveryActivity::LightCardio,
                        RecoveryActivity::Stretching,
                        RecoveryActivity::Massage,
                    ],
                    forbidden_practices: Vec::new(),
                    max_duration_minutes: None,
                    volume_reduction: None,
                    intensity_reduction: None,
                }),
            },
        ))
    }

    fn mental_burnout(
        &self,
        snapshot: &CurrentStateSnapshot,
    ) -> Option<(EmergencyTrigger, Decision)> {
        let subjective = snapshot.subjective()?;
        let average_rpe = snapshot.patterns.as_ref()?.average_rpe?;
        if subjective.motivation > self.thresholds.burnout_motivation
            || average_rpe <= self.thresholds.burnout_average_rpe
        {
            return None;
        }

        Some((
            EmergencyTrigger::MentalBurnout,
            Decision {
                action: DecisionAction::ForcedDeload,
                priority: DecisionPriority::High,
                reason: "Mental burnout signature".to_owned(),
                factors: vec![format!(
                    "Motivation {}/10 with historical average RPE {average_rpe:.1}",
                    subjective.motivation
                )],
                modifiers: None,
                recommendation: "Forced deload week: cut volume and intensity, no performance goals."
                    .to_owned(),
                actionable_steps: vec!["Schedule a full deload week starting now".to_owned()],
                session_constraints: Some(SessionConstraints {
                    allowed_activities: Vec::new(),
                    forbidden_practices: Vec::new(),
                    max_duration_minutes: None,
                    volume_reduction: Some(self.thresholds.forced_deload_volume),
                    intensity_reduction: Some(self.thresholds.forced_deload_intensity),
                }),
            },
        ))
    }
}

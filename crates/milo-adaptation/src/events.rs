// ABOUTME: Special-event overlay mapping a closed event set to fixed action protocols
// ABOUTME: Unknown event types fail with an explicit error instead of silently defaulting
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Milo Coaching Intelligence

use milo_core::errors::{AppError, AppResult};
use milo_core::models::{AthleteContext, EventRecord, InjurySeverity};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::debug;

/// Default pause for an illness with no reported duration, days
const DEFAULT_ILLNESS_PAUSE_DAYS: u32 = 7;

/// Default expected duration of a high-stress period, weeks
const DEFAULT_STRESS_WEEKS: u32 = 2;

/// Default lead time for a competition with no reported date, weeks
const DEFAULT_COMPETITION_WEEKS: u32 = 2;

/// The closed set of recognized special events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpecialEvent {
    /// Athlete is ill and unavailable
    Illness,
    /// Planned time away from training
    Vacation,
    /// Non-acute injury to train around
    Injury,
    /// Sustained life-stress period
    HighStressPeriod,
    /// Upcoming competition needing a taper
    Competition,
    /// Deliberate shock week to break a plateau
    PlateauBreak,
}

impl FromStr for SpecialEvent {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "illness" => Ok(Self::Illness),
            "vacation" => Ok(Self::Vacation),
            "injury" => Ok(Self::Injury),
            "high_stress_period" => Ok(Self::HighStressPeriod),
            "competition" => Ok(Self::Competition),
            "plateau_break" => Ok(Self::PlateauBreak),
            other => Err(AppError::unrecognized_event(other)),
        }
    }
}

/// Action class attached to each event protocol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventAction {
    /// Pause the plan, deload on return
    PauseAndDeload,
    /// Keep moving with optional light work
    MaintenanceMode,
    /// Work around the limitation
    ModifyAndContinue,
    /// Cut volume, keep intensity
    ReduceVolume,
    /// Progressive pre-competition reduction
    TaperProtocol,
    /// One high-volume shock week
    ShockWeek,
}

/// Plan status changes an event may require; applied by the external
/// plan-mutation component, not by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanStatus {
    /// Plan running normally
    Active,
    /// Plan suspended until further notice
    Paused,
}

/// Taper prescription selected by weeks until the event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaperProtocol {
    /// Volume multiplier
    pub volume: f64,
    /// Intensity multiplier
    pub intensity: f64,
    /// Session frequency multiplier
    pub frequency: f64,
    /// Focus note for the block
    pub focus: String,
}

/// Fixed protocol attached to each recognized event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EventProtocol {
    /// Illness: pause, then a reduced re-entry week
    PauseAndDeload {
        /// Days to pause training
        pause_days: u32,
        /// Volume factor for the first week back
        resume_volume_factor: f64,
        /// Weeks the reduced re-entry lasts
        resume_weeks: u32,
    },
    /// Vacation: optional light sessions, reduced first week back
    Maintenance {
        /// Optional light sessions per week while away
        sessions_per_week: u32,
        /// Volume factor for the first week back
        resume_volume_factor: f64,
    },
    /// Injury: substitutions around the affected area
    ModifyAndContinue {
        /// Body part to exclude from programming
        excluded_body_part: Option<String>,
        /// Reported severity
        severity: InjurySeverity,
        /// Recovery prescription for the area
        recovery_protocol: String,
        /// Substitution guidance
        substitution: String,
    },
    /// High-stress period: volume cut, intensity kept
    ReduceVolume {
        /// Volume multiplier for the period
        volume_factor: f64,
        /// Intensity is deliberately preserved
        keep_intensity: bool,
        /// Expected duration, weeks
        duration_weeks: u32,
        /// Session-construction guidance
        recommendation: String,
    },
    /// Competition: taper by weeks out
    Taper(TaperProtocol),
    /// Plateau break: one shock week, then deload
    ShockWeek {
        /// Volume multiplier for the shock week
        volume_factor: f64,
        /// Intensity multiplier for the shock week
        intensity_factor: f64,
        /// Shock duration, weeks
        duration_weeks: u32,
        /// A deload must follow the shock week
        follow_with_deload: bool,
        /// Guidance note
        recommendation: String,
    },
}

/// Outcome of handling a special event: a decision-shaped override
/// outside the weekly cadence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventOutcome {
    /// The recognized event
    pub event: SpecialEvent,
    /// Action class
    pub action: EventAction,
    /// The fixed protocol to apply
    pub protocol: EventProtocol,
    /// Plan status change for the external tracker, if any
    pub plan_status_change: Option<PlanStatus>,
    /// Coach-facing message
    pub message: String,
}

/// Handle an out-of-band special event.
///
/// # Errors
/// Returns `AppError::UnrecognizedEvent` when `event.event_type` is
/// outside the closed set; the error is surfaced to the caller, never
/// recovered locally.
pub fn handle_event(event: &EventRecord, ctx: &AthleteContext) -> AppResult<EventOutcome> {
    let recognized = SpecialEvent::from_str(&event.event_type)?;
    debug!(
        athlete = %ctx.athlete_id,
        week = ctx.current_week,
        event = ?recognized,
        "handling special event"
    );

    let outcome = match recognized {
        SpecialEvent::Illness => {
            let pause_days = event.pause_days.unwrap_or(DEFAULT_ILLNESS_PAUSE_DAYS);
            EventOutcome {
                event: recognized,
                action: EventAction::PauseAndDeload,
                protocol: EventProtocol::PauseAndDeload {
                    pause_days,
                    resume_volume_factor: 0.5,
                    resume_weeks: 1,
                },
                plan_status_change: Some(PlanStatus::Paused),
                message: format!(
                    "Illness recorded. Pause {pause_days} days; resume at 50% volume for 1 week."
                ),
            }
        }
        SpecialEvent::Vacation => EventOutcome {
            event: recognized,
            action: EventAction::MaintenanceMode,
            protocol: EventProtocol::Maintenance {
                sessions_per_week: 2,
                resume_volume_factor: 0.8,
            },
            plan_status_change: None,
            message: "Vacation recorded. Optional light training 2x/week; resume at 80% volume \
                      for the first week back."
                .to_owned(),
        },
        SpecialEvent::Injury => {
            let severity = event.severity.unwrap_or(InjurySeverity::Moderate);
            let recovery_protocol = match severity {
                InjurySeverity::Severe => "Complete rest for the affected area".to_owned(),
                InjurySeverity::Moderate | InjurySeverity::Mild => "Light rehab work".to_owned(),
            };
            EventOutcome {
                event: recognized,
                action: EventAction::ModifyAndContinue,
                protocol: EventProtocol::ModifyAndContinue {
                    excluded_body_part: event.body_part.clone(),
                    severity,
                    recovery_protocol: recovery_protocol.clone(),
                    substitution: "Work around the injury with alternative exercises".to_owned(),
                },
                plan_status_change: None,
                message: format!(
                    "Injury recorded. {recovery_protocol}. Work around it with substitutions."
                ),
            }
        }
        SpecialEvent::HighStressPeriod => {
            let duration_weeks = event.expected_weeks.unwrap_or(DEFAULT_STRESS_WEEKS);
            EventOutcome {
                event: recognized,
                action: EventAction::ReduceVolume,
                protocol: EventProtocol::ReduceVolume {
                    volume_factor: 0.7,
                    keep_intensity: true,
                    duration_weeks,
                    recommendation: "Prioritize compound movements, cut accessories".to_owned(),
                },
                plan_status_change: None,
                message: format!(
                    "High-stress period. Volume cut to 70% for {duration_weeks} weeks; \
                     intensity kept."
                ),
            }
        }
        SpecialEvent::Competition => {
            let weeks_until = event.weeks_until.unwrap_or(DEFAULT_COMPETITION_WEEKS);
            EventOutcome {
                event: recognized,
                action: EventAction::TaperProtocol,
                protocol: EventProtocol::Taper(taper_protocol(weeks_until)),
                plan_status_change: None,
                message: format!(
                    "Competition in {weeks_until} week(s). Taper protocol activated."
                ),
            }
        }
        SpecialEvent::PlateauBreak => EventOutcome {
            event: recognized,
            action: EventAction::ShockWeek,
            protocol: EventProtocol::ShockWeek {
                volume_factor: 1.4,
                intensity_factor: 0.85,
                duration_weeks: 1,
                follow_with_deload: true,
                recommendation: "High volume shock followed by a mini-deload".to_owned(),
            },
            plan_status_change: None,
            message: "Shock week scheduled: volume +40%, then deload.".to_owned(),
        },
    };

    Ok(outcome)
}

/// Taper prescription by weeks until the event.
#[must_use]
pub fn taper_protocol(weeks_until: u32) -> TaperProtocol {
    if weeks_until <= 1 {
        TaperProtocol {
            volume: 0.4,
            intensity: 1.0,
            frequency: 0.5,
            focus: "Activation only, stay fresh".to_owned(),
        }
    } else if weeks_until <= 2 {
        TaperProtocol {
            volume: 0.6,
            intensity: 0.95,
            frequency: 0.7,
            focus: "Reduce volume, maintain intensity".to_owned(),
        }
    } else {
        TaperProtocol {
            volume: 0.8,
            intensity: 0.90,
            frequency: 0.85,
            focus: "Gradual reduction begins".to_owned(),
        }
    }
}

// ABOUTME: Out-of-band event records and the minimal athlete context for handling them
// ABOUTME: Event types stay open strings at the boundary and are validated by the engine
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Milo Coaching Intelligence

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Severity grading for a reported injury
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InjurySeverity {
    /// Train around it with light adjustments
    Mild,
    /// Needs substitutions and rehab work
    Moderate,
    /// Complete rest for the affected area
    Severe,
}

/// An out-of-band special event reported by the athlete or coach.
///
/// `event_type` is an open string at this boundary; the engine
/// validates it against its closed set and rejects anything else.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    /// Event type name (e.g. "illness", "competition")
    pub event_type: String,
    /// When the caller recorded the event
    pub recorded_at: DateTime<Utc>,
    /// Days the athlete expects to be unavailable (illness)
    pub pause_days: Option<u32>,
    /// Affected body part (injury)
    pub body_part: Option<String>,
    /// Injury severity (injury)
    pub severity: Option<InjurySeverity>,
    /// Weeks until the competition (competition)
    pub weeks_until: Option<u32>,
    /// Expected duration in weeks (high-stress period)
    pub expected_weeks: Option<u32>,
}

/// Minimal athlete context passed alongside event records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AthleteContext {
    /// Athlete identifier
    pub athlete_id: Uuid,
    /// Current week index in the macro plan
    pub current_week: u32,
}

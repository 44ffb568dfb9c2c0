// ABOUTME: Athlete-state input models consumed by the adaptation engine
// ABOUTME: Weekly summaries, accumulated signals, snapshots, and event records
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Milo Coaching Intelligence

//! Input models for the adaptation engine.
//!
//! All types here are plain data: the engine reads them and never
//! mutates them. History and signals are owned by the external
//! tracking component; snapshots are supplied fresh per evaluation.

mod event;
mod snapshot;
mod summary;

pub use event::{AthleteContext, EventRecord, InjurySeverity};
pub use snapshot::{
    CalendarContext, CurrentStateSnapshot, HistoricalPatterns, RecoveryState, SubjectiveRecovery,
    TrainingConstraints,
};
pub use summary::{AdaptationSignals, PerformanceTrend, SleepQuality, WeeklySummary};

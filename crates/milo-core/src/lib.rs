// ABOUTME: Core types for the Milo adaptive coaching platform
// ABOUTME: Foundation crate with error handling and athlete-state input models
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Milo Coaching Intelligence

//! # Milo Core
//!
//! Foundation crate providing the shared types consumed by the Milo
//! adaptation engine. This crate is designed to change infrequently,
//! enabling incremental compilation benefits in the workspace.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError` and `AppResult`
//! - **models**: Athlete-state input models (`WeeklySummary`,
//!   `CurrentStateSnapshot`, `AdaptationSignals`, event records)

/// Unified error handling for the platform
pub mod errors;

/// Athlete-state input models shared across the workspace
pub mod models;

pub use errors::{AppError, AppResult};
pub use models::{
    AdaptationSignals, AthleteContext, CalendarContext, CurrentStateSnapshot, EventRecord,
    HistoricalPatterns, InjurySeverity, PerformanceTrend, RecoveryState, SleepQuality,
    SubjectiveRecovery, TrainingConstraints, WeeklySummary,
};

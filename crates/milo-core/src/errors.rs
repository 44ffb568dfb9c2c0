// ABOUTME: Unified error types for the Milo platform with structured variants
// ABOUTME: Provides AppError, the AppResult alias, and helper constructors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Milo Coaching Intelligence

//! # Unified Error Handling
//!
//! Structured error types shared across the workspace. Errors carry the
//! offending value so callers can surface actionable messages without
//! string parsing.

use thiserror::Error;

/// Result alias used throughout the platform
pub type AppResult<T> = Result<T, AppError>;

/// Platform-wide error type
#[derive(Debug, Clone, Error)]
pub enum AppError {
    /// An event record named a type outside the closed special-event set.
    /// Not recovered locally; the caller decides how to surface it.
    #[error("unrecognized event type: {event_type}")]
    UnrecognizedEvent {
        /// The offending event type string as received
        event_type: String,
    },

    /// A boundary value failed validation (e.g., fatigue outside 0-10)
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A numeric field is outside its documented range
    #[error("value out of range: {field} (expected {expected})")]
    ValueOutOfRange {
        /// Name of the offending field
        field: &'static str,
        /// Human-readable description of the accepted range
        expected: &'static str,
    },
}

impl AppError {
    /// Build an `InvalidInput` error from any displayable message
    #[must_use]
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Build an `UnrecognizedEvent` error for the given type string
    #[must_use]
    pub fn unrecognized_event(event_type: impl Into<String>) -> Self {
        Self::UnrecognizedEvent {
            event_type: event_type.into(),
        }
    }
}

// ABOUTME: Configuration error types for engine threshold validation
// ABOUTME: Defines error variants for invalid ranges and inconsistent cutoffs
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Milo Coaching Intelligence

//! Configuration error types for engine threshold validation.

use thiserror::Error;

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Value outside acceptable range (e.g., a 0-10 scale threshold above 10)
    #[error("Invalid range: {0}")]
    InvalidRange(&'static str),

    /// Two thresholds that must be ordered are not (e.g., medium >= high)
    #[error("Inconsistent cutoffs: {0}")]
    InconsistentCutoffs(&'static str),

    /// Confidence weights produce an impossible interval
    #[error("Invalid weights: {0}")]
    InvalidWeights(&'static str),
}

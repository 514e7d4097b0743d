// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use thiserror::Error;

/// Rejected chart configuration. Raised when settings are loaded or changed,
/// never while laying out a chart.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("min font size {min} is larger than max font size {max}")]
    FontRange { min: f64, max: f64 },
    #[error("font sizes must be positive, got {0}")]
    NonPositiveFont(f64),
    #[error("label radius must be within 0.0..=1.0, got {0}")]
    LabelRadius(f64),
    #[error("reference fraction must be within (0.0, 1.0], got {0}")]
    ReferenceFraction(f64),
    #[error("legend top-N cannot be negative, got {0}")]
    NegativeLegendTop(i64),
    #[error("unknown font curve '{0}' (use linear|sqrt)")]
    UnknownCurve(String),
    #[error("unknown config key '{0}'")]
    UnknownKey(String),
    #[error("invalid value '{value}' for {key}")]
    InvalidValue { key: String, value: String },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ClientError {
    #[error("{0} is required")]
    Missing(&'static str),
    #[error("invalid email '{0}'")]
    Email(String),
    #[error("phone number must have 10 digits (e.g. 224-829-2014), got '{0}'")]
    Phone(String),
    #[error("state must be a 2-letter abbreviation (e.g. IL), got '{0}'")]
    State(String),
    #[error("client {0} not found")]
    NotFound(i64),
}

//! Error types for Fasting Flux

use chrono::TimeDelta;
use thiserror::Error;

/// Errors that can occur while deriving fasting metrics
#[derive(Debug, Error)]
pub enum FastingError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Discrete log contains no fasts")]
    EmptyLog,

    #[error("Invalid JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Failed to parse fasting log: {0}")]
    ParseError(String),
}

impl FastingError {
    /// The validation failure behind this error, if any
    pub fn validation(&self) -> Option<&ValidationError> {
        match self {
            FastingError::Validation(e) => Some(e),
            _ => None,
        }
    }
}

/// Validation errors for discrete logs and continuous signals.
///
/// Row numbers index into the caller's discrete log; positions index into
/// the samples of a continuous signal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Discrete logs must contain start and end datetimes; missing at rows {rows:?}")]
    MissingEndpoint { rows: Vec<usize> },

    #[error("Start datetime must be before its end datetime; conflicting rows {rows:?}")]
    Order { rows: Vec<usize> },

    #[error("Overlapping fasts found; rows {rows:?} start before a previous fast ends")]
    Overlap { rows: Vec<usize> },

    #[error(
        "Sampling interval must be {}; found {} at positions {positions:?}",
        describe_interval(.expected),
        describe_spacing(.found)
    )]
    Frequency {
        expected: TimeDelta,
        found: Option<TimeDelta>,
        positions: Vec<usize>,
    },

    #[error("Continuous signal must contain only 0 or 1; invalid or missing values at positions {positions:?}")]
    InvalidValue { positions: Vec<usize> },
}

/// Discriminant of a [`ValidationError`], stable across payload changes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationErrorKind {
    MissingEndpoint,
    Order,
    Overlap,
    Frequency,
    InvalidValue,
}

impl ValidationErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValidationErrorKind::MissingEndpoint => "missing_endpoint",
            ValidationErrorKind::Order => "order",
            ValidationErrorKind::Overlap => "overlap",
            ValidationErrorKind::Frequency => "frequency",
            ValidationErrorKind::InvalidValue => "invalid_value",
        }
    }
}

impl ValidationError {
    pub fn kind(&self) -> ValidationErrorKind {
        match self {
            ValidationError::MissingEndpoint { .. } => ValidationErrorKind::MissingEndpoint,
            ValidationError::Order { .. } => ValidationErrorKind::Order,
            ValidationError::Overlap { .. } => ValidationErrorKind::Overlap,
            ValidationError::Frequency { .. } => ValidationErrorKind::Frequency,
            ValidationError::InvalidValue { .. } => ValidationErrorKind::InvalidValue,
        }
    }

    /// Offending row numbers or sample positions carried by the error
    pub fn offending(&self) -> &[usize] {
        match self {
            ValidationError::MissingEndpoint { rows }
            | ValidationError::Order { rows }
            | ValidationError::Overlap { rows } => rows,
            ValidationError::Frequency { positions, .. }
            | ValidationError::InvalidValue { positions } => positions,
        }
    }
}

fn describe_spacing(spacing: &Option<TimeDelta>) -> String {
    match spacing {
        Some(delta) => describe_interval(delta),
        None => "no inferable spacing".to_string(),
    }
}

fn describe_interval(delta: &TimeDelta) -> String {
    if delta.num_seconds() % 60 == 0 && delta.subsec_nanos() == 0 {
        format!("{} min", delta.num_minutes())
    } else {
        format!("{} ms", delta.num_milliseconds())
    }
}

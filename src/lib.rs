//! Fasting Flux - Derived time-series metrics for fasting logs
//!
//! Flux turns a discrete log of completed fasts into continuous metrics through
//! a deterministic pipeline: interval validation → per-minute signal → signal
//! validation → streaks → daily aggregates.
//!
//! ## Modules
//!
//! - **Validation**: discrete logs ([`interval`]) and continuous signals ([`signal`])
//! - **Signals**: continuous signal construction ([`builder`]) and streaks ([`streak`])
//! - **Aggregation**: per-calendar-day statistics ([`aggregate`])
//! - **Pipeline**: one-shot summaries and JSON reports ([`pipeline`], [`encoder`])

pub mod adapter;
pub mod aggregate;
pub mod builder;
pub mod encoder;
pub mod error;
pub mod interval;
pub mod pipeline;
pub mod signal;
pub mod streak;
pub mod types;

use chrono::NaiveDateTime;

pub use adapter::LogAdapter;
pub use aggregate::DailyAggregator;
pub use builder::ContinuousSignalBuilder;
pub use encoder::ReportEncoder;
pub use error::{FastingError, ValidationError, ValidationErrorKind};
pub use interval::IntervalValidator;
pub use pipeline::{fast_durations, summarize};
pub use signal::SignalValidator;
pub use streak::StreakComputer;
pub use types::{
    ContinuousSignal, DailySeries, DailyValue, FastDuration, FastRecord, FastingState,
    FastingSummary, Sample, Series, StreakSignal, SAMPLING_INTERVAL,
};

/// Flux version embedded in all reports
pub const FASTING_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Producer name for reports
pub const PRODUCER_NAME: &str = "fasting-flux";

/// Validate a discrete log of fasts
pub fn validate_discrete(events: &[FastRecord]) -> Result<(), ValidationError> {
    IntervalValidator::validate(events)
}

/// Validate a discrete log of any record type, reading endpoints through the given keys
pub fn validate_discrete_by<T, S, E>(
    events: &[T],
    start_key: S,
    end_key: E,
) -> Result<(), ValidationError>
where
    S: Fn(&T) -> Option<NaiveDateTime>,
    E: Fn(&T) -> Option<NaiveDateTime>,
{
    IntervalValidator::validate_by(events, start_key, end_key)
}

/// Expand a discrete log into a per-minute fasting signal
pub fn build_continuous(events: &[FastRecord]) -> Result<ContinuousSignal, FastingError> {
    ContinuousSignalBuilder::build(events)
}

/// Validate a continuous fasting signal
pub fn validate_continuous(signal: &ContinuousSignal) -> Result<(), ValidationError> {
    SignalValidator::validate(signal)
}

/// Consecutive fasting samples ending at each sample
pub fn streaks(signal: &ContinuousSignal) -> Result<StreakSignal, FastingError> {
    StreakComputer::streaks(signal)
}

/// Hours fasted per calendar day
pub fn cumulative_hours_per_day(signal: &ContinuousSignal) -> Result<DailySeries, FastingError> {
    DailyAggregator::cumulative_hours_per_day(signal)
}

/// Longest consecutive fast observed per calendar day, in hours
pub fn max_consecutive_hours_per_day(
    signal: &ContinuousSignal,
) -> Result<DailySeries, FastingError> {
    DailyAggregator::max_consecutive_hours_per_day(signal)
}

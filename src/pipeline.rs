//! Pipeline orchestration
//!
//! This module provides the high-level API for Fasting Flux. It runs a
//! discrete log through every stage and collects the results.

use crate::aggregate::DailyAggregator;
use crate::builder::ContinuousSignalBuilder;
use crate::error::FastingError;
use crate::interval::{sorted_intervals, IntervalValidator};
use crate::streak::StreakComputer;
use crate::types::{FastDuration, FastRecord, FastingSummary};
use log::debug;

const SECONDS_PER_HOUR: f64 = 3600.0;

/// Duration of every fast in the log, in start order.
///
/// # Arguments
/// * `events` - Discrete log of fasts (any order)
///
/// # Returns
/// One entry per fast with its start, end and length in hours
pub fn fast_durations(events: &[FastRecord]) -> Result<Vec<FastDuration>, FastingError> {
    IntervalValidator::validate(events)?;

    Ok(sorted_intervals(events)
        .into_iter()
        .map(|i| FastDuration {
            start: i.start,
            end: i.end,
            hours: (i.end - i.start).num_seconds() as f64 / SECONDS_PER_HOUR,
        })
        .collect())
}

/// Derive every fasting metric from a discrete log.
///
/// Pipeline stages:
/// 1. IntervalValidator - Check endpoints, ordering and overlap
/// 2. ContinuousSignalBuilder - Expand fasts into a per-minute signal
/// 3. StreakComputer - Consecutive fasting minutes per sample
/// 4. DailyAggregator - Cumulative and maximum consecutive hours per day
///
/// # Example
/// ```ignore
/// let summary = summarize(&records)?;
/// println!("{} fasts, {:.1} h", summary.fast_count, summary.total_hours);
/// ```
pub fn summarize(events: &[FastRecord]) -> Result<FastingSummary, FastingError> {
    // Stage 1: Validate and measure each fast
    let fasts = fast_durations(events)?;

    // Stage 2: Continuous signal
    let signal = ContinuousSignalBuilder::build(events)?;

    // Stage 3: Streaks
    let streaks = StreakComputer::streaks(&signal)?;

    // Stage 4: Daily series
    let cumulative_hours = DailyAggregator::cumulative_hours_per_day(&signal)?;
    let max_consecutive_hours = DailyAggregator::max_consecutive_hours_per_day(&signal)?;

    let total_hours: f64 = fasts.iter().map(|f| f.hours).sum();
    let longest_fast_hours = fasts.iter().map(|f| f.hours).fold(0.0, f64::max);

    debug!(
        "summarized {} fasts over {} days",
        fasts.len(),
        cumulative_hours.len()
    );

    Ok(FastingSummary {
        signal,
        streaks,
        cumulative_hours,
        max_consecutive_hours,
        fast_count: fasts.len(),
        fasts,
        total_hours,
        longest_fast_hours,
    })
}

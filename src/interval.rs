//! Discrete log validation
//!
//! Checks a log of (start, end) fasts before it is expanded into a signal:
//! - every fast has both endpoints
//! - every start is strictly before its end
//! - no two fasts overlap (a shared boundary is allowed)

use crate::error::ValidationError;
use crate::types::FastRecord;
use chrono::NaiveDateTime;
use log::{debug, warn};

/// Validator for discrete fasting logs
pub struct IntervalValidator;

impl IntervalValidator {
    /// Validate a log of fast records
    pub fn validate(events: &[FastRecord]) -> Result<(), ValidationError> {
        Self::validate_by(events, |r| r.start, |r| r.end)
    }

    /// Validate a log using caller-supplied endpoint accessors.
    ///
    /// Checks run in a fixed order and stop at the first failing check;
    /// missing endpoints are always reported before anything else.
    pub fn validate_by<T, S, E>(
        events: &[T],
        start_key: S,
        end_key: E,
    ) -> Result<(), ValidationError>
    where
        S: Fn(&T) -> Option<NaiveDateTime>,
        E: Fn(&T) -> Option<NaiveDateTime>,
    {
        let intervals = collect_intervals(events, &start_key, &end_key).inspect_err(|e| {
            warn!("discrete log rejected: {e}");
        })?;

        check_order(&intervals).inspect_err(|e| warn!("discrete log rejected: {e}"))?;
        check_overlap(&intervals).inspect_err(|e| warn!("discrete log rejected: {e}"))?;

        debug!("validated discrete log of {} fasts", intervals.len());
        Ok(())
    }
}

/// A complete interval tagged with its row in the caller's log
#[derive(Debug, Clone, Copy)]
pub(crate) struct RowInterval {
    pub row: usize,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

fn collect_intervals<T, S, E>(
    events: &[T],
    start_key: &S,
    end_key: &E,
) -> Result<Vec<RowInterval>, ValidationError>
where
    S: Fn(&T) -> Option<NaiveDateTime>,
    E: Fn(&T) -> Option<NaiveDateTime>,
{
    let mut intervals = Vec::with_capacity(events.len());
    let mut missing = Vec::new();

    for (row, event) in events.iter().enumerate() {
        match (start_key(event), end_key(event)) {
            (Some(start), Some(end)) => intervals.push(RowInterval { row, start, end }),
            _ => missing.push(row),
        }
    }

    if !missing.is_empty() {
        return Err(ValidationError::MissingEndpoint { rows: missing });
    }
    Ok(intervals)
}

fn check_order(intervals: &[RowInterval]) -> Result<(), ValidationError> {
    let rows: Vec<usize> = intervals
        .iter()
        .filter(|i| i.start >= i.end)
        .map(|i| i.row)
        .collect();

    if rows.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::Order { rows })
    }
}

fn check_overlap(intervals: &[RowInterval]) -> Result<(), ValidationError> {
    let sorted = sorted_by_start(intervals);

    // Compare against the latest end seen so far, so a long fast that spans
    // several later ones flags all of them.
    let mut rows = Vec::new();
    let mut latest_end: Option<NaiveDateTime> = None;
    for interval in &sorted {
        if let Some(end) = latest_end {
            if interval.start < end {
                rows.push(interval.row);
            }
        }
        latest_end = Some(latest_end.map_or(interval.end, |end| end.max(interval.end)));
    }

    if rows.is_empty() {
        Ok(())
    } else {
        rows.sort_unstable();
        Err(ValidationError::Overlap { rows })
    }
}

/// Working copy sorted by start; stable, so equal starts keep log order
pub(crate) fn sorted_by_start(intervals: &[RowInterval]) -> Vec<RowInterval> {
    let mut sorted = intervals.to_vec();
    sorted.sort_by_key(|i| i.start);
    sorted
}

/// Complete intervals of an already validated log, sorted by start
pub(crate) fn sorted_intervals(events: &[FastRecord]) -> Vec<RowInterval> {
    let intervals: Vec<RowInterval> = events
        .iter()
        .enumerate()
        .filter_map(|(row, r)| {
            r.as_fast().map(|f| RowInterval {
                row,
                start: f.start,
                end: f.end,
            })
        })
        .collect();
    sorted_by_start(&intervals)
}

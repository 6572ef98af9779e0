//! Core types for the Fasting Flux pipeline
//!
//! This module defines the data structures that flow through each stage of the
//! pipeline: discrete fast records, uniformly sampled signals, daily series, and
//! the summary/report output.

use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use serde::{Deserialize, Serialize};

/// Spacing between consecutive samples of a continuous signal
pub const SAMPLING_INTERVAL: TimeDelta = TimeDelta::minutes(1);

/// Number of samples that make up one hour at [`SAMPLING_INTERVAL`]
pub const SAMPLES_PER_HOUR: u32 = 60;

/// A single fast as it arrives from ingestion.
///
/// Either endpoint may be missing; the interval validator reports those rows
/// instead of the parser rejecting them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FastRecord {
    /// Fast start (naive, no timezone)
    #[serde(default)]
    pub start: Option<NaiveDateTime>,
    /// Fast end (naive, no timezone)
    #[serde(default)]
    pub end: Option<NaiveDateTime>,
}

impl FastRecord {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
        }
    }

    /// Both endpoints, when present
    pub fn as_fast(&self) -> Option<Fast> {
        match (self.start, self.end) {
            (Some(start), Some(end)) => Some(Fast { start, end }),
            _ => None,
        }
    }
}

/// A completed fast with both endpoints known
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fast {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl Fast {
    pub fn duration(&self) -> TimeDelta {
        self.end - self.start
    }
}

impl From<Fast> for FastRecord {
    fn from(fast: Fast) -> Self {
        FastRecord::new(fast.start, fast.end)
    }
}

/// Fasting state of a single sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FastingState {
    Fed,
    Fasting,
}

impl FastingState {
    /// Interpret a raw sample value; only exactly 0 or 1 are states
    pub fn from_value(value: Option<f64>) -> Option<Self> {
        match value {
            Some(v) if v == 0.0 => Some(FastingState::Fed),
            Some(v) if v == 1.0 => Some(FastingState::Fasting),
            _ => None,
        }
    }

    pub fn value(&self) -> f64 {
        match self {
            FastingState::Fed => 0.0,
            FastingState::Fasting => 1.0,
        }
    }

    pub fn is_fasting(&self) -> bool {
        matches!(self, FastingState::Fasting)
    }
}

/// One timestamped sample of a series
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample<T> {
    pub time: NaiveDateTime,
    pub value: T,
}

/// Time-indexed series of samples, kept in the order given
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Series<T> {
    samples: Vec<Sample<T>>,
}

impl<T> Series<T> {
    pub fn new(samples: Vec<Sample<T>>) -> Self {
        Self { samples }
    }

    pub fn from_parts(index: Vec<NaiveDateTime>, values: Vec<T>) -> Option<Self> {
        if index.len() != values.len() {
            return None;
        }
        Some(Self {
            samples: index
                .into_iter()
                .zip(values)
                .map(|(time, value)| Sample { time, value })
                .collect(),
        })
    }

    /// Samples at `interval` spacing starting from `start`
    pub fn regular(start: NaiveDateTime, interval: TimeDelta, values: Vec<T>) -> Self {
        let mut time = start;
        let mut samples = Vec::with_capacity(values.len());
        for value in values {
            samples.push(Sample { time, value });
            time += interval;
        }
        Self { samples }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn samples(&self) -> &[Sample<T>] {
        &self.samples
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Sample<T>> {
        self.samples.iter()
    }

    pub fn index(&self) -> impl Iterator<Item = NaiveDateTime> + '_ {
        self.samples.iter().map(|s| s.time)
    }

    pub fn values(&self) -> impl Iterator<Item = &T> + '_ {
        self.samples.iter().map(|s| &s.value)
    }

    pub fn first_time(&self) -> Option<NaiveDateTime> {
        self.samples.first().map(|s| s.time)
    }

    pub fn last_time(&self) -> Option<NaiveDateTime> {
        self.samples.last().map(|s| s.time)
    }

    pub fn into_samples(self) -> Vec<Sample<T>> {
        self.samples
    }
}

impl<'a, T> IntoIterator for &'a Series<T> {
    type Item = &'a Sample<T>;
    type IntoIter = std::slice::Iter<'a, Sample<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}

/// Per-minute fasting signal; values are 0 (fed) or 1 (fasting) once validated
pub type ContinuousSignal = Series<Option<f64>>;

/// Consecutive fasting samples ending at each index
pub type StreakSignal = Series<u32>;

impl ContinuousSignal {
    /// Build a signal from typed states at the fixed sampling interval
    pub fn from_states(start: NaiveDateTime, states: &[FastingState]) -> Self {
        Series::regular(
            start,
            SAMPLING_INTERVAL,
            states.iter().map(|s| Some(s.value())).collect(),
        )
    }
}

/// Value for one calendar day
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyValue {
    pub date: NaiveDate,
    pub hours: f64,
}

/// Chronological per-day values, one entry per calendar day
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DailySeries {
    entries: Vec<DailyValue>,
}

impl DailySeries {
    pub fn new(entries: Vec<DailyValue>) -> Self {
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[DailyValue] {
        &self.entries
    }

    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.entries.iter().map(|e| e.date)
    }

    pub fn hours(&self) -> Vec<f64> {
        self.entries.iter().map(|e| e.hours).collect()
    }

    pub fn get(&self, date: NaiveDate) -> Option<f64> {
        self.entries
            .binary_search_by_key(&date, |e| e.date)
            .ok()
            .map(|i| self.entries[i].hours)
    }
}

/// Duration of one completed fast
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FastDuration {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub hours: f64,
}

/// Every metric derived from a discrete log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FastingSummary {
    /// Per-minute fasting state
    pub signal: ContinuousSignal,
    /// Consecutive fasting minutes at each sample
    pub streaks: StreakSignal,
    /// Hours fasted per calendar day
    pub cumulative_hours: DailySeries,
    /// Longest streak observed per calendar day (hours)
    pub max_consecutive_hours: DailySeries,
    /// Per-fast durations, in start order
    pub fasts: Vec<FastDuration>,
    /// Number of fasts in the log
    pub fast_count: usize,
    /// Sum of all fast durations (hours)
    pub total_hours: f64,
    /// Longest single fast (hours)
    pub longest_fast_hours: f64,
}

/// Report producer metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportProducer {
    pub name: String,
    pub version: String,
    pub instance_id: String,
}

/// Time span covered by a report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportCoverage {
    pub first_sample: Option<NaiveDateTime>,
    pub last_sample: Option<NaiveDateTime>,
    pub days: usize,
}

/// Report totals across the whole log
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportTotals {
    pub fast_count: usize,
    pub total_hours: f64,
    pub longest_fast_hours: f64,
    pub fasting_minutes: u64,
}

/// One calendar day of a report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportDay {
    pub date: NaiveDate,
    pub cumulative_hours: f64,
    pub max_consecutive_hours: f64,
}

/// Complete fasting report payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FastingReport {
    pub report_version: String,
    pub producer: ReportProducer,
    pub computed_at_utc: String,
    pub coverage: ReportCoverage,
    pub totals: ReportTotals,
    pub days: Vec<ReportDay>,
    pub fasts: Vec<FastDuration>,
}

//! Continuous signal construction
//!
//! Expands a discrete log of fasts into a per-minute fasting signal covering
//! `[first start, last end]`, with 1 for every sample inside a fast and 0
//! elsewhere.

use crate::error::FastingError;
use crate::interval::{sorted_intervals, IntervalValidator};
use crate::types::{ContinuousSignal, FastRecord, Sample, Series, SAMPLING_INTERVAL};
use log::debug;

/// Builder for continuous fasting signals
pub struct ContinuousSignalBuilder;

impl ContinuousSignalBuilder {
    /// Validate the log and expand it into a continuous signal
    pub fn build(events: &[FastRecord]) -> Result<ContinuousSignal, FastingError> {
        IntervalValidator::validate(events)?;

        let intervals = sorted_intervals(events);
        let (Some(first), Some(span_end)) = (
            intervals.first().map(|i| i.start),
            intervals.iter().map(|i| i.end).max(),
        ) else {
            return Err(FastingError::EmptyLog);
        };

        let mut samples = Vec::new();
        let mut time = first;
        while time <= span_end {
            samples.push(Sample {
                time,
                value: Some(0.0),
            });
            time += SAMPLING_INTERVAL;
        }

        // Samples are sorted, so each fast maps onto one contiguous run
        for interval in &intervals {
            let from = samples.partition_point(|s| s.time < interval.start);
            let to = samples.partition_point(|s| s.time <= interval.end);
            for sample in &mut samples[from..to] {
                sample.value = Some(1.0);
            }
        }

        debug!(
            "built continuous signal of {} samples from {} fasts",
            samples.len(),
            intervals.len()
        );
        Ok(Series::new(samples))
    }
}

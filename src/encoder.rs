//! Report encoding
//!
//! This module encodes a fasting summary into a JSON report with producer
//! metadata. The per-minute signals stay out of the report; it carries the
//! daily series, per-fast durations and totals.

use crate::error::FastingError;
use crate::types::{
    FastingReport, FastingSummary, ReportCoverage, ReportDay, ReportProducer, ReportTotals,
};
use crate::{FASTING_VERSION, PRODUCER_NAME};
use chrono::Utc;
use uuid::Uuid;

/// Current report schema version
pub const REPORT_VERSION: &str = "1.0.0";

/// Encoder for fasting reports
pub struct ReportEncoder {
    instance_id: String,
}

impl Default for ReportEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportEncoder {
    /// Create a new encoder with a unique instance ID
    pub fn new() -> Self {
        Self {
            instance_id: Uuid::new_v4().to_string(),
        }
    }

    /// Create an encoder with a specific instance ID
    pub fn with_instance_id(instance_id: String) -> Self {
        Self { instance_id }
    }

    /// Encode a summary into a report
    pub fn encode(&self, summary: &FastingSummary) -> FastingReport {
        let producer = ReportProducer {
            name: PRODUCER_NAME.to_string(),
            version: FASTING_VERSION.to_string(),
            instance_id: self.instance_id.clone(),
        };

        let coverage = ReportCoverage {
            first_sample: summary.signal.first_time(),
            last_sample: summary.signal.last_time(),
            days: summary.cumulative_hours.len(),
        };

        let fasting_minutes = summary.streaks.values().filter(|v| **v > 0).count() as u64;

        let totals = ReportTotals {
            fast_count: summary.fast_count,
            total_hours: summary.total_hours,
            longest_fast_hours: summary.longest_fast_hours,
            fasting_minutes,
        };

        FastingReport {
            report_version: REPORT_VERSION.to_string(),
            producer,
            computed_at_utc: Utc::now().to_rfc3339(),
            coverage,
            totals,
            days: self.build_days(summary),
            fasts: summary.fasts.clone(),
        }
    }

    /// Encode to JSON string
    pub fn encode_to_json(&self, summary: &FastingSummary) -> Result<String, FastingError> {
        let report = self.encode(summary);
        serde_json::to_string_pretty(&report).map_err(FastingError::JsonError)
    }

    fn build_days(&self, summary: &FastingSummary) -> Vec<ReportDay> {
        // Both series are built from the same signal, so their days line up
        summary
            .cumulative_hours
            .entries()
            .iter()
            .zip(summary.max_consecutive_hours.entries())
            .map(|(cumulative, max)| ReportDay {
                date: cumulative.date,
                cumulative_hours: cumulative.hours,
                max_consecutive_hours: max.hours,
            })
            .collect()
    }
}

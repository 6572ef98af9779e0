//! Log adapter
//!
//! Parses discrete fasting logs and continuous signals from JSON. Records are
//! `{"start": ..., "end": ...}` objects with naive ISO 8601 timestamps
//! (`2021-01-16T20:05:00`). A record with a missing or null endpoint still
//! parses; the interval validator reports it.

use crate::error::FastingError;
use crate::types::{ContinuousSignal, FastRecord};

/// Adapter for JSON fasting logs
pub struct LogAdapter;

impl LogAdapter {
    /// Parse a JSON array of fast records
    pub fn parse_array(json: &str) -> Result<Vec<FastRecord>, FastingError> {
        serde_json::from_str(json).map_err(FastingError::JsonError)
    }

    /// Parse newline-delimited JSON, one fast record per line
    pub fn parse_ndjson(ndjson: &str) -> Result<Vec<FastRecord>, FastingError> {
        let mut records = Vec::new();
        for (line_num, line) in ndjson.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            match serde_json::from_str::<FastRecord>(trimmed) {
                Ok(record) => records.push(record),
                Err(e) => {
                    return Err(FastingError::ParseError(format!(
                        "Failed to parse line {}: {}",
                        line_num + 1,
                        e
                    )));
                }
            }
        }
        Ok(records)
    }

    /// Parse a JSON array of `{"time", "value"}` samples.
    ///
    /// Values may be any number or null; validation happens downstream.
    pub fn parse_signal(json: &str) -> Result<ContinuousSignal, FastingError> {
        serde_json::from_str(json).map_err(FastingError::JsonError)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interval::IntervalValidator;
    use crate::signal::SignalValidator;
    use crate::error::ValidationErrorKind;

    #[test]
    fn test_parse_array() {
        let json = r#"[
            {"start": "2021-01-16T20:05:00", "end": "2021-01-17T10:05:00"},
            {"start": "2021-01-17T12:15:00", "end": "2021-01-18T12:15:00"}
        ]"#;

        let records = LogAdapter::parse_array(json).unwrap();
        assert_eq!(records.len(), 2);
        assert!(IntervalValidator::validate(&records).is_ok());
    }

    #[test]
    fn test_parse_ndjson_skips_blank_lines() {
        let ndjson = "\
{\"start\": \"2021-01-16T20:05:00\", \"end\": \"2021-01-17T10:05:00\"}

{\"start\": \"2021-01-17T12:15:00\", \"end\": null}
";
        let records = LogAdapter::parse_ndjson(ndjson).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].end, None);
        assert_eq!(
            IntervalValidator::validate(&records).unwrap_err().kind(),
            ValidationErrorKind::MissingEndpoint
        );
    }

    #[test]
    fn test_parse_ndjson_reports_line() {
        let ndjson = "{\"start\": \"2021-01-16T20:05:00\"}\nnot json\n";
        let err = LogAdapter::parse_ndjson(ndjson).unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn test_parse_array_invalid_json() {
        assert!(matches!(
            LogAdapter::parse_array("not valid json"),
            Err(FastingError::JsonError(_))
        ));
    }

    #[test]
    fn test_parse_signal_with_null() {
        let json = r#"[
            {"time": "2021-01-01T23:56:00", "value": 1},
            {"time": "2021-01-01T23:57:00", "value": null}
        ]"#;

        let signal = LogAdapter::parse_signal(json).unwrap();
        assert_eq!(signal.len(), 2);
        assert_eq!(
            SignalValidator::validate(&signal).unwrap_err().offending(),
            &[1]
        );
    }
}

//! Continuous signal validation
//!
//! A continuous signal is usable when:
//! - consecutive samples are exactly one sampling interval (1 minute) apart
//! - every value is exactly 0 or 1, with no missing values

use crate::error::ValidationError;
use crate::types::{ContinuousSignal, FastingState, SAMPLING_INTERVAL};
use log::{debug, warn};

/// Validator for continuous fasting signals
pub struct SignalValidator;

impl SignalValidator {
    /// Validate sampling frequency first, then values
    pub fn validate(signal: &ContinuousSignal) -> Result<(), ValidationError> {
        check_frequency(signal)
            .and_then(|()| check_values(signal))
            .inspect_err(|e| warn!("continuous signal rejected: {e}"))?;

        debug!("validated continuous signal of {} samples", signal.len());
        Ok(())
    }

    /// Validate and convert to typed fasting states
    pub fn states(signal: &ContinuousSignal) -> Result<Vec<FastingState>, ValidationError> {
        Self::validate(signal)?;
        Ok(signal
            .values()
            .filter_map(|v| FastingState::from_value(*v))
            .collect())
    }
}

fn check_frequency(signal: &ContinuousSignal) -> Result<(), ValidationError> {
    if signal.len() < 2 {
        return Err(ValidationError::Frequency {
            expected: SAMPLING_INTERVAL,
            found: None,
            positions: Vec::new(),
        });
    }

    let samples = signal.samples();
    let mut found = None;
    let mut positions = Vec::new();
    for (i, pair) in samples.windows(2).enumerate() {
        let spacing = pair[1].time - pair[0].time;
        if spacing != SAMPLING_INTERVAL {
            found.get_or_insert(spacing);
            positions.push(i + 1);
        }
    }

    if positions.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::Frequency {
            expected: SAMPLING_INTERVAL,
            found,
            positions,
        })
    }
}

fn check_values(signal: &ContinuousSignal) -> Result<(), ValidationError> {
    let positions: Vec<usize> = signal
        .values()
        .enumerate()
        .filter(|(_, v)| FastingState::from_value(**v).is_none())
        .map(|(i, _)| i)
        .collect();

    if positions.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::InvalidValue { positions })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Sample, Series};
    use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
    use pretty_assertions::assert_eq;

    fn start() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2021, 1, 1)
            .unwrap()
            .and_hms_opt(23, 56, 0)
            .unwrap()
    }

    fn minute_signal(values: &[Option<f64>]) -> ContinuousSignal {
        Series::regular(start(), SAMPLING_INTERVAL, values.to_vec())
    }

    #[test]
    fn test_valid_signal() {
        let signal = minute_signal(&[Some(1.0), Some(0.0), Some(1.0), Some(1.0)]);
        assert_eq!(SignalValidator::validate(&signal), Ok(()));
    }

    #[test]
    fn test_daily_frequency_rejected() {
        let signal = Series::regular(start(), TimeDelta::days(1), vec![Some(1.0); 3]);

        assert_eq!(
            SignalValidator::validate(&signal),
            Err(ValidationError::Frequency {
                expected: SAMPLING_INTERVAL,
                found: Some(TimeDelta::days(1)),
                positions: vec![1, 2],
            })
        );
    }

    #[test]
    fn test_gap_rejected() {
        let t = start();
        let signal = Series::new(vec![
            Sample { time: t, value: Some(1.0) },
            Sample { time: t + TimeDelta::minutes(1), value: Some(1.0) },
            Sample { time: t + TimeDelta::minutes(3), value: Some(1.0) },
        ]);

        let err = SignalValidator::validate(&signal).unwrap_err();
        assert_eq!(
            err,
            ValidationError::Frequency {
                expected: SAMPLING_INTERVAL,
                found: Some(TimeDelta::minutes(2)),
                positions: vec![2],
            }
        );
    }

    #[test]
    fn test_duplicate_timestamp_rejected() {
        let t = start();
        let signal = Series::new(vec![
            Sample { time: t, value: Some(0.0) },
            Sample { time: t, value: Some(0.0) },
        ]);
        assert!(matches!(
            SignalValidator::validate(&signal),
            Err(ValidationError::Frequency { .. })
        ));
    }

    #[test]
    fn test_too_short_to_infer_frequency() {
        let signal = minute_signal(&[Some(1.0)]);
        assert_eq!(
            SignalValidator::validate(&signal),
            Err(ValidationError::Frequency {
                expected: SAMPLING_INTERVAL,
                found: None,
                positions: vec![],
            })
        );
    }

    #[test]
    fn test_non_binary_values_rejected() {
        let signal = minute_signal(&[Some(2.0), Some(2.0), Some(2.0)]);
        assert_eq!(
            SignalValidator::validate(&signal),
            Err(ValidationError::InvalidValue {
                positions: vec![0, 1, 2]
            })
        );
    }

    #[test]
    fn test_missing_values_rejected() {
        let signal = minute_signal(&[Some(1.0), None, Some(0.0)]);
        assert_eq!(
            SignalValidator::validate(&signal),
            Err(ValidationError::InvalidValue { positions: vec![1] })
        );
    }

    #[test]
    fn test_frequency_checked_before_values() {
        let signal = Series::regular(start(), TimeDelta::hours(1), vec![None, Some(3.0)]);
        let err = SignalValidator::validate(&signal).unwrap_err();
        assert!(matches!(err, ValidationError::Frequency { .. }));
    }

    #[test]
    fn test_states() {
        let signal = minute_signal(&[Some(0.0), Some(1.0)]);
        assert_eq!(
            SignalValidator::states(&signal).unwrap(),
            vec![FastingState::Fed, FastingState::Fasting]
        );
    }
}

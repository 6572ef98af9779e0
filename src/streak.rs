//! Consecutive fasting streaks
//!
//! For every sample, counts the fasting samples in the run ending at that
//! sample. Fed samples are 0.
//!
//! Example:
//! ```text
//! signal  = [1, 0, 1, 1, 1, 1, 1]
//! streaks = [1, 0, 1, 2, 3, 4, 5]
//! ```

use crate::error::FastingError;
use crate::signal::SignalValidator;
use crate::types::{ContinuousSignal, FastingState, Sample, Series, StreakSignal};

/// Streak computation over continuous signals
pub struct StreakComputer;

impl StreakComputer {
    /// Validate the signal and compute the streak at every sample
    pub fn streaks(signal: &ContinuousSignal) -> Result<StreakSignal, FastingError> {
        let states = SignalValidator::states(signal)?;

        let samples = signal
            .index()
            .zip(run_lengths(&states))
            .map(|(time, value)| Sample { time, value })
            .collect();

        Ok(Series::new(samples))
    }
}

/// Length of the fasting run ending at each state
pub(crate) fn run_lengths(states: &[FastingState]) -> Vec<u32> {
    let mut out = Vec::with_capacity(states.len());
    let mut run = 0u32;
    for state in states {
        run = if state.is_fasting() { run + 1 } else { 0 };
        out.push(run);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationErrorKind;
    use crate::types::SAMPLING_INTERVAL;
    use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
    use pretty_assertions::assert_eq;
    use crate::types::FastingState::{Fasting as F, Fed as E};

    fn start() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2021, 1, 1)
            .unwrap()
            .and_hms_opt(23, 56, 0)
            .unwrap()
    }

    #[test]
    fn test_streaks_short_signal() {
        let signal = ContinuousSignal::from_states(start(), &[F, E, F, F, F, F, F]);
        let streaks = StreakComputer::streaks(&signal).unwrap();

        assert_eq!(
            streaks.values().copied().collect::<Vec<_>>(),
            vec![1, 0, 1, 2, 3, 4, 5]
        );
        assert_eq!(
            streaks.index().collect::<Vec<_>>(),
            signal.index().collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_streak_zero_iff_fed() {
        let states = [E, F, F, E, E, F, E, F, F, F];
        let runs = run_lengths(&states);

        for (i, (state, run)) in states.iter().zip(&runs).enumerate() {
            match state {
                FastingState::Fed => assert_eq!(*run, 0),
                FastingState::Fasting => {
                    let previous = if i > 0 { runs[i - 1] } else { 0 };
                    assert_eq!(*run, previous + 1);
                }
            }
        }
    }

    #[test]
    fn test_all_fed() {
        assert_eq!(run_lengths(&[E, E, E]), vec![0, 0, 0]);
    }

    #[test]
    fn test_invalid_signal_rejected() {
        let signal = Series::regular(start(), TimeDelta::days(1), vec![Some(1.0), Some(1.0)]);
        let err = StreakComputer::streaks(&signal).unwrap_err();
        assert_eq!(
            err.validation().map(|e| e.kind()),
            Some(ValidationErrorKind::Frequency)
        );

        let signal = Series::regular(start(), SAMPLING_INTERVAL, vec![Some(1.0), Some(0.5)]);
        let err = StreakComputer::streaks(&signal).unwrap_err();
        assert_eq!(
            err.validation().map(|e| e.kind()),
            Some(ValidationErrorKind::InvalidValue)
        );
    }
}

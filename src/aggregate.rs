//! Daily aggregation
//!
//! Resamples a per-minute fasting signal into calendar days:
//! - cumulative hours fasted per day
//! - longest consecutive streak per day, in hours
//!
//! Days come from each sample's own date; no timezone conversion is applied.
//! A streak that started the previous day still counts toward the day its
//! later samples fall in.

use crate::error::FastingError;
use crate::signal::SignalValidator;
use crate::streak::run_lengths;
use crate::types::{ContinuousSignal, DailySeries, DailyValue, SAMPLES_PER_HOUR};
use chrono::NaiveDate;
use log::debug;

/// Aggregator for per-day fasting statistics
pub struct DailyAggregator;

impl DailyAggregator {
    /// Hours fasted on each calendar day touched by the signal
    pub fn cumulative_hours_per_day(signal: &ContinuousSignal) -> Result<DailySeries, FastingError> {
        let states = SignalValidator::states(signal)?;
        let fasting = states.iter().map(|s| u32::from(s.is_fasting()));

        let days = group_by_day(signal.index().map(|t| t.date()).zip(fasting), |a, b| a + b);
        debug!("aggregated cumulative hours over {} days", days.len());
        Ok(to_hours(days))
    }

    /// Longest streak observed on each calendar day, in hours
    pub fn max_consecutive_hours_per_day(
        signal: &ContinuousSignal,
    ) -> Result<DailySeries, FastingError> {
        let states = SignalValidator::states(signal)?;
        let streaks = run_lengths(&states);

        let days = group_by_day(
            signal.index().map(|t| t.date()).zip(streaks),
            std::cmp::max,
        );
        debug!("aggregated max consecutive hours over {} days", days.len());
        Ok(to_hours(days))
    }
}

/// Fold consecutive samples sharing a date into one value per day
fn group_by_day<I, F>(samples: I, fold: F) -> Vec<(NaiveDate, u32)>
where
    I: IntoIterator<Item = (NaiveDate, u32)>,
    F: Fn(u32, u32) -> u32,
{
    let mut days: Vec<(NaiveDate, u32)> = Vec::new();
    for (date, value) in samples {
        match days.last_mut() {
            Some((day, acc)) if *day == date => *acc = fold(*acc, value),
            _ => days.push((date, value)),
        }
    }
    days
}

fn to_hours(days: Vec<(NaiveDate, u32)>) -> DailySeries {
    DailySeries::new(
        days.into_iter()
            .map(|(date, samples)| DailyValue {
                date,
                hours: f64::from(samples) / f64::from(SAMPLES_PER_HOUR),
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationErrorKind;
    use crate::types::FastingState::{Fasting as F, Fed as E};
    use crate::types::Series;
    use chrono::{NaiveDateTime, TimeDelta};
    use pretty_assertions::assert_eq;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2021, 1, d).unwrap()
    }

    fn at(d: u32, h: u32, m: u32) -> NaiveDateTime {
        day(d).and_hms_opt(h, m, 0).unwrap()
    }

    fn short_signal() -> ContinuousSignal {
        ContinuousSignal::from_states(at(1, 23, 56), &[F, E, F, F, F, F, F])
    }

    #[test]
    fn test_cumulative_hours_short_signal() {
        let daily = DailyAggregator::cumulative_hours_per_day(&short_signal()).unwrap();

        assert_eq!(
            daily,
            DailySeries::new(vec![
                DailyValue { date: day(1), hours: 3.0 / 60.0 },
                DailyValue { date: day(2), hours: 3.0 / 60.0 },
            ])
        );
    }

    #[test]
    fn test_max_consecutive_hours_short_signal() {
        let daily = DailyAggregator::max_consecutive_hours_per_day(&short_signal()).unwrap();

        assert_eq!(daily.dates().collect::<Vec<_>>(), vec![day(1), day(2)]);
        assert_eq!(daily.hours(), vec![2.0 / 60.0, 5.0 / 60.0]);
    }

    #[test]
    fn test_fed_days_are_kept() {
        let mut states = vec![F; 60];
        states.extend(vec![E; 24 * 60]);
        states.push(F);
        let signal = ContinuousSignal::from_states(at(1, 23, 0), &states);

        let daily = DailyAggregator::cumulative_hours_per_day(&signal).unwrap();
        assert_eq!(daily.hours(), vec![1.0, 0.0, 1.0 / 60.0]);
    }

    #[test]
    fn test_full_day_is_24_hours() {
        let signal = ContinuousSignal::from_states(at(1, 0, 0), &vec![F; 48 * 60]);

        let cumulative = DailyAggregator::cumulative_hours_per_day(&signal).unwrap();
        assert_eq!(cumulative.hours(), vec![24.0, 24.0]);
        assert!(cumulative.hours().iter().all(|h| (0.0..=24.0).contains(h)));

        let max = DailyAggregator::max_consecutive_hours_per_day(&signal).unwrap();
        assert_eq!(max.hours(), vec![24.0, 48.0]);
    }

    #[test]
    fn test_invalid_signal_propagates() {
        let signal = Series::regular(at(1, 0, 0), TimeDelta::days(1), vec![Some(1.0); 3]);

        let err = DailyAggregator::cumulative_hours_per_day(&signal).unwrap_err();
        assert_eq!(
            err.validation().map(|e| e.kind()),
            Some(ValidationErrorKind::Frequency)
        );

        let err = DailyAggregator::max_consecutive_hours_per_day(&signal).unwrap_err();
        assert_eq!(
            err.validation().map(|e| e.kind()),
            Some(ValidationErrorKind::Frequency)
        );
    }

    #[test]
    fn test_group_by_day() {
        let grouped = group_by_day(
            vec![(day(1), 1), (day(1), 2), (day(2), 5)],
            |a, b| a + b,
        );
        assert_eq!(grouped, vec![(day(1), 3), (day(2), 5)]);
    }
}

//! Week/month boundaries and clock in/out arithmetic.

use chrono::{Datelike, Days, NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use thiserror::Error;

/// Errors from timeclock calculations.
#[derive(Debug, Error)]
pub enum TimeclockError {
    /// A clock stamp was not a valid `HH:MM` time.
    #[error("invalid time of day: {0}")]
    InvalidTime(String),
}

/// Most recent Sunday at or before `today` (Sun-indexed week).
#[must_use]
pub fn week_start(today: NaiveDate) -> NaiveDate {
    let days_since_sunday = u64::from(today.weekday().num_days_from_sunday());
    today
        .checked_sub_days(Days::new(days_since_sunday))
        .unwrap_or(today)
}

/// First day of the month containing `today`.
#[must_use]
pub fn month_start(today: NaiveDate) -> NaiveDate {
    today.with_day(1).unwrap_or(today)
}

/// Hours worked between two `HH:MM` stamps on the same day, clamped at
/// zero and rounded to two decimal places.
///
/// # Errors
///
/// Returns `TimeclockError::InvalidTime` when either stamp fails to parse.
pub fn worked_hours(clock_in: &str, clock_out: &str) -> Result<Decimal, TimeclockError> {
    let parse = |stamp: &str| {
        NaiveTime::parse_from_str(stamp, "%H:%M")
            .map_err(|_| TimeclockError::InvalidTime(stamp.to_string()))
    };
    let start = parse(clock_in)?;
    let end = parse(clock_out)?;

    let minutes = (end - start).num_minutes().max(0);
    Ok(round_hours(Decimal::from(minutes) / Decimal::from(60)))
}

/// Sums hour values and rounds the total to two decimal places.
#[must_use]
pub fn sum_hours<I>(hours: I) -> Decimal
where
    I: IntoIterator<Item = Decimal>,
{
    round_hours(hours.into_iter().sum())
}

/// Rounds an hour total to two decimal places.
#[must_use]
pub fn round_hours(hours: Decimal) -> Decimal {
    hours.round_dp(2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[rstest]
    #[case("2024-03-13", "2024-03-10")] // Wednesday -> previous Sunday
    #[case("2024-03-10", "2024-03-10")] // Sunday is its own week start
    #[case("2024-03-16", "2024-03-10")] // Saturday, end of the same week
    #[case("2024-01-01", "2023-12-31")] // week spans the year boundary
    fn test_week_start(#[case] today: &str, #[case] expected: &str) {
        assert_eq!(week_start(date(today)), date(expected));
    }

    #[test]
    fn test_month_start() {
        assert_eq!(month_start(date("2024-02-29")), date("2024-02-01"));
        assert_eq!(month_start(date("2024-07-01")), date("2024-07-01"));
    }

    #[rstest]
    #[case("09:00", "17:30", dec!(8.5))]
    #[case("09:00", "09:00", dec!(0))]
    #[case("08:15", "08:35", dec!(0.33))] // 20 minutes
    #[case("22:00", "06:00", dec!(0))] // overnight clamps to zero
    fn test_worked_hours(#[case] clock_in: &str, #[case] clock_out: &str, #[case] expected: Decimal) {
        assert_eq!(worked_hours(clock_in, clock_out).unwrap(), expected);
    }

    #[test]
    fn test_worked_hours_rejects_garbage() {
        assert!(worked_hours("9am", "17:00").is_err());
        assert!(worked_hours("09:00", "25:99").is_err());
    }

    #[test]
    fn test_sum_hours_rounds() {
        let total = sum_hours(vec![dec!(1.005), dec!(2.0)]);
        assert_eq!(total, dec!(3.0)); // 3.005 rounds to even at 2dp
    }
}

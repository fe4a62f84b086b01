//! Clock abstraction.
//!
//! Every date-boundary computation (today, week start, month start) goes
//! through a `Clock` so tests can freeze time deterministically instead of
//! reading the wall clock inside aggregation logic.

use chrono::{DateTime, NaiveDate, Utc};

/// Provides the current time to request handlers.
pub trait Clock: Send + Sync {
    /// Current instant in UTC.
    fn now(&self) -> DateTime<Utc>;

    /// Current calendar date in UTC.
    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }

    /// Current time of day as `HH:MM` (for clock in/out stamps).
    fn time_of_day(&self) -> String {
        self.now().format("%H:%M").to_string()
    }
}

/// Wall-clock implementation used in production.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Frozen clock for tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_fixed_clock_today() {
        let clock = FixedClock(Utc.with_ymd_and_hms(2024, 3, 15, 23, 59, 59).unwrap());
        assert_eq!(
            clock.today(),
            NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
        );
        assert_eq!(clock.time_of_day(), "23:59");
    }

    #[test]
    fn test_midnight_rolls_date() {
        let before = FixedClock(Utc.with_ymd_and_hms(2024, 3, 15, 23, 59, 59).unwrap());
        let after = FixedClock(Utc.with_ymd_and_hms(2024, 3, 16, 0, 0, 1).unwrap());
        assert_ne!(before.today(), after.today());
    }
}

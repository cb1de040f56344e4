//! Time abstraction so date-dependent navigation can be tested
//! deterministically.

use std::sync::{Arc, Mutex};

use chrono::{Local, NaiveDate};

/// Source of "today" for jump-to-today requests.
pub trait Clock: Send + Sync {
    /// Current calendar date in the local timezone.
    fn today(&self) -> NaiveDate;
}

/// Real clock backed by the system time.
#[derive(Debug, Clone, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Mock clock pinned to a settable date, for tests.
#[derive(Debug, Clone)]
pub struct MockClock {
    today: Arc<Mutex<NaiveDate>>,
}

impl MockClock {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            today: Arc::new(Mutex::new(today)),
        }
    }

    pub fn set_today(&self, today: NaiveDate) {
        *self.today.lock().unwrap() = today;
    }
}

impl Clock for MockClock {
    fn today(&self) -> NaiveDate {
        *self.today.lock().unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_clock_returns_todays_date() {
        let clock = SystemClock;
        assert_eq!(clock.today(), Local::now().date_naive());
    }

    #[test]
    fn test_mock_clock_returns_pinned_date() {
        let pinned = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        let clock = MockClock::new(pinned);
        assert_eq!(clock.today(), pinned);
    }

    #[test]
    fn test_mock_clock_can_be_moved() {
        let clock = MockClock::new(NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());
        let later = NaiveDate::from_ymd_opt(2024, 4, 1).unwrap();

        clock.set_today(later);
        assert_eq!(clock.today(), later);
    }
}

//! Clock port
//!
//! The demand multiplier depends on how far away the travel date is, so
//! "today" is injected instead of read from the system inside services.

use chrono::NaiveDate;
#[cfg(test)]
use mockall::automock;

/// Source of the current calendar date
#[cfg_attr(test, automock)]
pub trait ClockPort: Send + Sync {
    /// Today's date in the traveller's local calendar
    fn today(&self) -> NaiveDate;
}

/// Clock that always reports the same date
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl ClockPort for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

//! Wall-clock implementation of the clock port

use application::ports::ClockPort;
use chrono::{Local, NaiveDate};

/// Reads "today" from the local system clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl ClockPort for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

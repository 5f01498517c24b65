//! Source of the current time for request handlers

use chrono::{DateTime, NaiveDate, Utc};

#[derive(Debug, Clone, Copy, Default)]
pub enum Clock {
    /// Wall-clock time
    #[default]
    System,
    /// Frozen instant, for demos against fixture data and tests
    Fixed(DateTime<Utc>),
}

impl Clock {
    pub fn now(&self) -> DateTime<Utc> {
        match self {
            Clock::System => Utc::now(),
            Clock::Fixed(instant) => *instant,
        }
    }

    pub fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

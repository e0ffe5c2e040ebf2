use chrono::{DateTime, Duration, Utc};

use crate::utils::time::elapsed_between;

/// Wall-clock elapsed-time accumulator. Only time spent running is counted.
///
/// Running time is kept at clock precision; whole seconds are taken only when read.
#[derive(Debug, Clone)]
pub struct SessionTimer {
    accumulated: Duration,
    run_started_at: Option<DateTime<Utc>>,
}

impl Default for SessionTimer {
    fn default() -> Self {
        Self {
            accumulated: Duration::zero(),
            run_started_at: None,
        }
    }
}

impl SessionTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// A stopped timer seeded with previously recorded time.
    pub fn with_accumulated(seconds: i64) -> Self {
        Self {
            accumulated: Duration::seconds(seconds.max(0)),
            run_started_at: None,
        }
    }

    pub fn start(&mut self, now: DateTime<Utc>) {
        self.resume(now);
    }

    pub fn pause(&mut self, now: DateTime<Utc>) {
        self.accumulated = self.running_total(now);
        self.run_started_at = None;
    }

    pub fn resume(&mut self, now: DateTime<Utc>) {
        if self.run_started_at.is_none() {
            self.run_started_at = Some(now);
        }
    }

    pub fn elapsed(&self, now: DateTime<Utc>) -> i64 {
        self.running_total(now).num_seconds()
    }

    /// Display refresh; reads the clock, changes nothing.
    pub fn tick(&self, now: DateTime<Utc>) -> i64 {
        self.elapsed(now)
    }

    fn running_total(&self, now: DateTime<Utc>) -> Duration {
        match self.run_started_at {
            Some(started) => self.accumulated + elapsed_between(started, now),
            None => self.accumulated,
        }
    }
}

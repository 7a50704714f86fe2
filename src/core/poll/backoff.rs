//! Poll interval schedule
//!
//! The n-th wait is `min(initial * factor^(n-1), max)`. Once the cap is
//! reached every further wait equals `max`.

use crate::config::schema::seconds;
use crate::config::PollingConfig;
use std::time::Duration;

/// Infinite iterator over poll intervals
#[derive(Debug, Clone)]
pub struct Backoff {
    next_secs: f64,
    factor: f64,
    max_secs: f64,
}

impl Backoff {
    pub fn new(initial: Duration, factor: f64, max: Duration) -> Self {
        Self {
            next_secs: initial.as_secs_f64().min(max.as_secs_f64()),
            factor,
            max_secs: max.as_secs_f64(),
        }
    }

    pub fn from_config(config: &PollingConfig) -> Self {
        Self::new(
            config.initial_interval(),
            config.backoff_factor,
            config.max_interval(),
        )
    }
}

impl Iterator for Backoff {
    type Item = Duration;

    fn next(&mut self) -> Option<Duration> {
        let current = self.next_secs;
        self.next_secs = (current * self.factor).min(self.max_secs);
        Some(seconds(current))
    }
}

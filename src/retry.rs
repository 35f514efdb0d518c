//! Bounded exponential backoff.

use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;
pub const DEFAULT_INITIAL_DELAY_MS: u64 = 1000;

/// How many times to try and how long to wait before the first retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryPolicy {
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    #[serde(default = "default_initial_delay_ms")]
    pub initial_delay_ms: u64,
}

fn default_max_attempts() -> u32 {
    DEFAULT_MAX_ATTEMPTS
}

fn default_initial_delay_ms() -> u64 {
    DEFAULT_INITIAL_DELAY_MS
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            initial_delay_ms: DEFAULT_INITIAL_DELAY_MS,
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, initial_delay: Duration) -> Self {
        Self {
            max_attempts,
            initial_delay_ms: u64::try_from(initial_delay.as_millis()).unwrap_or(u64::MAX),
        }
    }

    /// Attempts actually made; a policy of zero still makes one call.
    pub fn effective_attempts(&self) -> u32 {
        self.max_attempts.max(1)
    }

    pub fn initial_delay(&self) -> Duration {
        Duration::from_millis(self.initial_delay_ms)
    }

    /// Fresh per-call state.
    pub fn start(&self) -> RetryState {
        RetryState {
            attempt: 0,
            max_attempts: self.effective_attempts(),
            current_delay: self.initial_delay(),
        }
    }
}

/// Per-call retry bookkeeping. Owned by one invocation and dropped with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryState {
    attempt: u32,
    max_attempts: u32,
    current_delay: Duration,
}

impl RetryState {
    /// Zero-based index of the current attempt.
    pub fn attempt(&self) -> u32 {
        self.attempt
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn current_delay(&self) -> Duration {
        self.current_delay
    }

    pub fn is_final(&self) -> bool {
        self.attempt + 1 >= self.max_attempts
    }

    /// Move to the next attempt after a failure.
    ///
    /// Returns the delay to wait before that attempt, or `None` when the current attempt
    /// was the last one. The delay doubles each time it is handed out.
    pub fn advance(&mut self) -> Option<Duration> {
        if self.is_final() {
            return None;
        }
        let delay = self.current_delay;
        self.current_delay = self.current_delay.saturating_mul(2);
        self.attempt += 1;
        Some(delay)
    }
}

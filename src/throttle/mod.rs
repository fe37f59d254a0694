//! Trigger rate limiter.
//!
//! A [`Throttle`] lets an action through at most once per delay window.
//! It cycles between two states for the life of the session:
//!
//! ```text
//! Idle ──(call)──▶ Throttled ──(delay elapsed)──▶ Idle
//! ```
//!
//! Calls made while throttled are dropped, not queued. The window starts
//! when the action is let through and is independent of how long the
//! action itself takes.

use std::fmt;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use tokio::time::Instant;
use tracing::trace;

use crate::config::ThrottleConfig;

/// Observable state of a [`Throttle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThrottleState {
    /// The next call will run.
    Idle,
    /// Calls are dropped until the window closes.
    Throttled,
}

impl fmt::Display for ThrottleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ThrottleState::Idle => write!(f, "idle"),
            ThrottleState::Throttled => write!(f, "throttled"),
        }
    }
}

/// Leading-edge throttle over a fixed delay.
///
/// The un-throttle is a deadline on tokio's clock rather than a spawned
/// timer, so it needs no runtime to be constructed and follows
/// `tokio::time::pause` in tests.
#[derive(Debug)]
pub struct Throttle {
    delay: Duration,
    /// `Some(deadline)` once a call has been let through.
    throttled_until: Mutex<Option<Instant>>,
}

impl Throttle {
    /// Create an idle throttle with the given window.
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            throttled_until: Mutex::new(None),
        }
    }

    /// Create a throttle from the `[throttle]` config section.
    pub fn from_config(config: &ThrottleConfig) -> Self {
        Self::new(config.delay())
    }

    /// The configured window.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Claim the window if idle.
    ///
    /// Returns `true` and switches to throttled when idle; returns `false`
    /// without touching the deadline when already throttled.
    pub fn try_acquire(&self) -> bool {
        let now = Instant::now();
        let mut until = self
            .throttled_until
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        match *until {
            Some(deadline) if now < deadline => {
                trace!(remaining = ?(deadline - now), "call throttled");
                false
            }
            _ => {
                *until = Some(now + self.delay);
                true
            }
        }
    }

    /// Run `action` now unless throttled.
    ///
    /// Returns `Some` with the action's result when it ran, `None` when the
    /// call was dropped.
    pub fn call<F, R>(&self, action: F) -> Option<R>
    where
        F: FnOnce() -> R,
    {
        self.try_acquire().then(action)
    }

    /// Current state, evaluated against tokio's clock.
    pub fn state(&self) -> ThrottleState {
        let until = self
            .throttled_until
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        match *until {
            Some(deadline) if Instant::now() < deadline => ThrottleState::Throttled,
            _ => ThrottleState::Idle,
        }
    }
}

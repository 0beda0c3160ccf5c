use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::error::PageError;

/// Default timeout for wait operations (30 seconds).
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default poll interval for checking conditions (100ms).
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Configuration for wait operations.
///
/// Acceptance runs in CI usually want a longer timeout; negative tests
/// ("the error never appears") want a much shorter one.
#[derive(Debug, Clone, Copy)]
pub struct WaitConfig {
    /// Maximum time to wait for the condition.
    pub timeout: Duration,

    /// How often to re-evaluate the condition.
    pub poll_interval: Duration,
}

impl WaitConfig {
    pub fn new(timeout: Duration, poll_interval: Duration) -> Self {
        Self {
            timeout,
            poll_interval,
        }
    }

    /// Custom timeout with the default poll interval.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self::new(timeout, DEFAULT_POLL_INTERVAL)
    }
}

impl Default for WaitConfig {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEOUT, DEFAULT_POLL_INTERVAL)
    }
}

/// Poll `check` until it yields a value, or fail with a labeled timeout.
///
/// The closure is evaluated at least once, then re-evaluated every
/// `poll_interval` until it returns `Some` or the budget elapses. The
/// satisfying value is returned to the caller; on timeout the error
/// carries `description` so test failures name the wait that expired.
pub fn wait_until<T, F>(mut check: F, config: WaitConfig, description: &str) -> Result<T, PageError>
where
    F: FnMut() -> Option<T>,
{
    let start = Instant::now();

    loop {
        if let Some(value) = check() {
            debug!(condition = description, elapsed = ?start.elapsed(), "wait satisfied");
            return Ok(value);
        }

        if start.elapsed() >= config.timeout {
            warn!(condition = description, timeout = ?config.timeout, "wait timed out");
            return Err(PageError::WaitTimeout {
                condition: description.to_string(),
                timeout: config.timeout,
            });
        }

        thread::sleep(config.poll_interval);
    }
}

/// Poll a boolean condition until it holds.
pub fn wait_for<F>(mut condition: F, config: WaitConfig, description: &str) -> Result<(), PageError>
where
    F: FnMut() -> bool,
{
    wait_until(
        || if condition() { Some(()) } else { None },
        config,
        description,
    )
}

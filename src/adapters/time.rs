//! Time adapters.
//!
//! - **[`SystemClock`]**: `std::time::Instant` for monotonic time,
//!   `SystemTime` for the wall clock, `thread::sleep` for delays.
//! - **[`SimClock`]**: a shared counter that only moves when somebody
//!   sleeps on it (or a test advances it), so a 10 s confirmation window
//!   runs in microseconds.

use core::sync::atomic::{AtomicU64, Ordering};
use core::time::Duration;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

use crate::app::ports::Clock;

/// Real time for the production server.
pub struct SystemClock {
    start: Instant,
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Clock for SystemClock {
    fn monotonic_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }

    fn unix_secs(&self) -> u64 {
        // A wall clock before 1970 is treated as the epoch itself.
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |d| d.as_secs())
    }

    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Simulated clock. Sleeping advances time instantly.
///
/// Wall-clock seconds are derived from the same counter on top of a fixed
/// epoch offset, so token windows roll over as simulated time passes.
#[derive(Debug, Default)]
pub struct SimClock {
    now_ms: AtomicU64,
    epoch_secs: u64,
}

impl SimClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with the wall clock at `epoch_secs`.
    pub fn at_unix(epoch_secs: u64) -> Self {
        Self {
            now_ms: AtomicU64::new(0),
            epoch_secs,
        }
    }

    pub fn advance(&self, duration: Duration) {
        self.now_ms
            .fetch_add(duration.as_millis() as u64, Ordering::SeqCst);
    }
}

impl Clock for SimClock {
    fn monotonic_ms(&self) -> u64 {
        self.now_ms.load(Ordering::SeqCst)
    }

    fn unix_secs(&self) -> u64 {
        self.epoch_secs + self.monotonic_ms() / 1000
    }

    fn sleep(&self, duration: Duration) {
        self.advance(duration);
    }
}

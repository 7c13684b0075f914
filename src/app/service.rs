//! Door service: the hexagonal core.
//!
//! [`DoorService`] owns the door hardware (behind the [`DoorHardware`]
//! port), the event sink, and the status cache. It is shared across HTTP
//! handlers behind an `Arc`.
//!
//! ```text
//!  DoorHardware ◀──┌─────────────────────────┐──▶ EventSink
//!                  │       DoorService        │
//!         Clock ──▶│  Mutex<DoorCore> · FSM   │──▶ StatusCache (RwLock)
//!                  └─────────────────────────┘
//! ```
//!
//! Every hardware touch, first-time PWM allocation included, happens under
//! the one `core` mutex, so two requests can never drive the motor in
//! opposite directions at once. The status cache sits behind its own lock
//! and stays readable while an actuation is in flight.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock, TryLockError};

use log::debug;
use serde::Serialize;

use crate::config::Timing;
use crate::drivers::status_led::Color;
use crate::error::Result;
use crate::fsm::{self, DoorState, Outcome};
use crate::sensors::position::SensorReading;

use super::commands::DoorIntent;
use super::events::DoorEvent;
use super::ports::{Clock, DoorHardware, EventSink};

// ───────────────────────────────────────────────────────────────
// Status cache
// ───────────────────────────────────────────────────────────────

/// Last confirmed door state. Not live: only a confirmed actuation writes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusSnapshot {
    pub is_open: bool,
    /// Unix seconds of the last confirmation (or of process start).
    pub last_updated: u64,
}

struct DoorCore {
    hw: Box<dyn DoorHardware>,
    sink: Box<dyn EventSink>,
}

// ───────────────────────────────────────────────────────────────
// DoorService
// ───────────────────────────────────────────────────────────────

pub struct DoorService {
    core: Mutex<DoorCore>,
    cache: RwLock<StatusSnapshot>,
    clock: Arc<dyn Clock>,
    timing: Timing,
}

impl DoorService {
    /// The cache starts closed, stamped with the current time. Hardware is
    /// untouched until [`initialize`](Self::initialize).
    pub fn new(
        hw: Box<dyn DoorHardware>,
        sink: Box<dyn EventSink>,
        clock: Arc<dyn Clock>,
        timing: Timing,
    ) -> Self {
        let cache = StatusSnapshot {
            is_open: false,
            last_updated: clock.unix_secs(),
        };
        Self {
            core: Mutex::new(DoorCore { hw, sink }),
            cache: RwLock::new(cache),
            clock,
            timing,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Claim the hardware if needed, re-read the sensor and re-apply the
    /// indicator. Blocks while an actuation is in flight.
    pub fn initialize(&self) -> Result<SensorReading> {
        let mut core = self.lock_core();
        Self::init_locked(&mut core)
    }

    /// Like [`initialize`](Self::initialize) but never waits: returns
    /// `None` when the door is busy.
    pub fn refresh(&self) -> Option<Result<SensorReading>> {
        let mut core = match self.core.try_lock() {
            Ok(core) => core,
            Err(TryLockError::Poisoned(p)) => p.into_inner(),
            Err(TryLockError::WouldBlock) => {
                debug!("door: busy, hardware refresh skipped");
                return None;
            }
        };
        Some(Self::init_locked(&mut core))
    }

    /// Release every pin and PWM channel. The next initialize starts afresh.
    pub fn shutdown(&self) {
        let mut core = self.lock_core();
        core.hw.shutdown();
        core.sink.emit(&DoorEvent::HardwareReleased);
    }

    // ── Commands ──────────────────────────────────────────────

    /// Run one authenticated command to its terminal state.
    ///
    /// Blocks the calling thread for up to the confirmation timeout; call
    /// it from a blocking worker.
    pub fn actuate(&self, intent: DoorIntent) -> Result<Outcome> {
        let mut core = self.lock_core();
        core.sink.emit(&DoorEvent::CommandIssued(intent));

        let outcome = fsm::run(core.hw.as_mut(), self.clock.as_ref(), self.timing, intent)?;

        match outcome.state {
            DoorState::Confirmed(_) => {
                let snapshot = StatusSnapshot {
                    is_open: intent.target_is_open(),
                    last_updated: self.clock.unix_secs(),
                };
                *self.cache.write().unwrap_or_else(PoisonError::into_inner) = snapshot;
                core.sink.emit(&DoorEvent::Confirmed {
                    intent,
                    elapsed_ms: outcome.elapsed_ms,
                });
            }
            _ => core.sink.emit(&DoorEvent::TimedOut {
                intent,
                elapsed_ms: outcome.elapsed_ms,
            }),
        }
        Ok(outcome)
    }

    /// Drive the motor without waiting for confirmation. Debug routes only;
    /// the status cache is not touched.
    pub fn force_drive(&self, intent: DoorIntent) -> Result<()> {
        let mut core = self.lock_core();
        core.hw.drive(intent)?;
        core.sink.emit(&DoorEvent::ForcedDrive(intent));
        Ok(())
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn status(&self) -> StatusSnapshot {
        *self.cache.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Colour last written to the indicator, `None` while the hardware is
    /// released or the door is busy.
    pub fn indicator(&self) -> Option<Color> {
        self.core.try_lock().ok()?.hw.indicator_state()
    }

    fn lock_core(&self) -> MutexGuard<'_, DoorCore> {
        self.core.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn init_locked(core: &mut DoorCore) -> Result<SensorReading> {
        let reading = core.hw.initialize()?;
        core.sink.emit(&DoorEvent::HardwareReady(reading));
        Ok(reading)
    }
}

//! Door command/confirmation state machine.
//!
//! ```text
//!            intent accepted              sensor matches intent
//!   Idle ───────────────────▶ Actuating ─────────────────────────▶ Confirmed
//!    ▲                            │                                    │
//!    │                            │ elapsed ≥ confirm_timeout          │
//!    │                            ▼                                    │
//!    └──────────────────────── TimedOut ◀──────────────────────────────┘
//!                      (both terminal; next request starts at Idle)
//! ```
//!
//! One call to [`run`] walks a single request from `Idle` to a terminal
//! state. The drive command is issued exactly once; afterwards the sensor
//! is polled at `poll_interval`, and each reading is mirrored onto the
//! indicator before it is checked. Time comes from the injected [`Clock`],
//! so a simulated clock runs the full 10 s window instantly.
//!
//! The motor is left energized after either outcome, and an intent that is
//! already satisfied is driven and polled again like any other.
//!
//! Callers serialize runs per door (see
//! [`DoorService`](crate::app::service::DoorService)); the machine itself
//! holds no state between requests.

use log::{debug, trace};

use crate::app::commands::DoorIntent;
use crate::app::ports::{ActuatorPort, Clock, IndicatorPort, SensorPort};
use crate::config::Timing;
use crate::error::Result;

// ---------------------------------------------------------------------------
// State identity
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DoorState {
    Idle,
    Actuating(DoorIntent),
    Confirmed(DoorIntent),
    TimedOut(DoorIntent),
}

impl DoorState {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Confirmed(_) | Self::TimedOut(_))
    }

    pub fn intent(self) -> Option<DoorIntent> {
        match self {
            Self::Idle => None,
            Self::Actuating(i) | Self::Confirmed(i) | Self::TimedOut(i) => Some(i),
        }
    }
}

// ---------------------------------------------------------------------------
// Outcome
// ---------------------------------------------------------------------------

/// Terminal state of one request and how long it took to get there.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outcome {
    pub state: DoorState,
    /// Monotonic milliseconds from the drive command to the deciding poll.
    pub elapsed_ms: u64,
    /// Number of sensor reads taken.
    pub polls: u32,
}

impl Outcome {
    pub fn confirmed(&self) -> bool {
        matches!(self.state, DoorState::Confirmed(_))
    }
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// Drive toward `intent` and wait for the sensor to agree.
///
/// Hardware errors abort the run immediately and propagate; a missed
/// confirmation is an ordinary [`DoorState::TimedOut`] outcome.
pub fn run<H>(hw: &mut H, clock: &dyn Clock, timing: Timing, intent: DoorIntent) -> Result<Outcome>
where
    H: ?Sized + ActuatorPort + SensorPort + IndicatorPort,
{
    let mut state = DoorState::Idle;
    let timeout_ms = timing.confirm_timeout.as_millis() as u64;

    let start = clock.monotonic_ms();
    hw.drive(intent)?;
    state = transition(state, DoorState::Actuating(intent));

    let mut polls = 0u32;
    loop {
        let reading = hw.read_open_confirmed()?;
        polls += 1;
        hw.show_reading(reading)?;

        let elapsed_ms = clock.monotonic_ms().saturating_sub(start);
        trace!("fsm: poll #{polls} at {elapsed_ms} ms: {reading:?}");

        let next = if intent.is_confirmed_by(reading) {
            Some(DoorState::Confirmed(intent))
        } else if elapsed_ms >= timeout_ms {
            Some(DoorState::TimedOut(intent))
        } else {
            None
        };

        if let Some(next) = next {
            state = transition(state, next);
            return Ok(Outcome {
                state,
                elapsed_ms,
                polls,
            });
        }

        clock.sleep(timing.poll_interval);
    }
}

fn transition(from: DoorState, to: DoorState) -> DoorState {
    debug!("fsm: {from:?} -> {to:?}");
    to
}

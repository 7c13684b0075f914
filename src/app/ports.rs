//! Port traits: the hexagonal boundary between door logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ DoorService (domain)
//! ```
//!
//! Driven adapters (GPIO backends, clocks, event sinks) implement these
//! traits. The orchestrator consumes them via generics, the service via
//! trait objects, so the domain core never touches hardware directly.

use core::time::Duration;

use embedded_hal::digital::{InputPin, OutputPin};
use embedded_hal::pwm::SetDutyCycle;

use crate::app::commands::DoorIntent;
use crate::drivers::status_led::Color;
use crate::error::{HardwareFault, Result};
use crate::sensors::position::SensorReading;

// ───────────────────────────────────────────────────────────────
// Actuator port (domain → motor)
// ───────────────────────────────────────────────────────────────

/// Write-side port: the domain calls this to command the motor.
pub trait ActuatorPort {
    /// Energize the motor in the opening direction.
    fn drive_open(&mut self) -> Result<()>;

    /// Energize the motor in the closing direction.
    fn drive_close(&mut self) -> Result<()>;

    /// Dispatch on `intent`.
    fn drive(&mut self, intent: DoorIntent) -> Result<()> {
        match intent {
            DoorIntent::Open => self.drive_open(),
            DoorIntent::Close => self.drive_close(),
        }
    }
}

// ───────────────────────────────────────────────────────────────
// Sensor port (hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port. Reads are pure: they never touch the indicator.
pub trait SensorPort {
    fn read_open_confirmed(&mut self) -> Result<SensorReading>;
}

// ───────────────────────────────────────────────────────────────
// Indicator port (domain → RGB LED)
// ───────────────────────────────────────────────────────────────

pub trait IndicatorPort {
    /// Show `color`. Repeating the current colour is a no-op on hardware.
    fn set_color(&mut self, color: Color) -> Result<()>;

    /// Last applied colour, `None` while no PWM channels are allocated.
    fn indicator_state(&self) -> Option<Color>;

    /// Show the colour matching a sensor reading (green open, red otherwise).
    fn show_reading(&mut self, reading: SensorReading) -> Result<()> {
        self.set_color(Color::for_reading(reading))
    }
}

// ───────────────────────────────────────────────────────────────
// Lifecycle port
// ───────────────────────────────────────────────────────────────

pub trait LifecyclePort {
    /// Claim pins and PWM channels if not yet held, then read the sensor and
    /// force the matching indicator colour. Returns that reading.
    fn initialize(&mut self) -> Result<SensorReading>;

    /// Stop PWM output and release every claim. Safe when never initialized.
    fn shutdown(&mut self);
}

/// Everything the door service needs from one physical door.
pub trait DoorHardware: ActuatorPort + SensorPort + IndicatorPort + LifecyclePort + Send {}

impl<T> DoorHardware for T where T: ActuatorPort + SensorPort + IndicatorPort + LifecyclePort + Send {}

// ───────────────────────────────────────────────────────────────
// GPIO backend port (drivers → platform)
// ───────────────────────────────────────────────────────────────

/// Hands out pin handles for one board.
///
/// Handles implement the `embedded-hal` 1.0 traits so the drivers stay
/// platform-agnostic. Dropping a handle returns the pin to the backend;
/// [`release_all`](Self::release_all) additionally resets whatever the
/// platform keeps global (the equivalent of a GPIO cleanup).
pub trait GpioBackend: Send {
    type Output: OutputPin + Send;
    type Input: InputPin + Send;
    type Pwm: SetDutyCycle + Send;

    /// Claim `pin` as a push-pull output, initially LOW.
    fn output(&mut self, pin: u8) -> core::result::Result<Self::Output, HardwareFault>;

    /// Claim `pin` as an input with the internal pull-up enabled.
    fn input_pull_up(&mut self, pin: u8) -> core::result::Result<Self::Input, HardwareFault>;

    /// Allocate a PWM channel on `pin`, started at 0 % duty.
    fn pwm(&mut self, pin: u8, frequency_hz: u32) -> core::result::Result<Self::Pwm, HardwareFault>;

    /// Reset every pin this backend touched.
    fn release_all(&mut self);
}

// ───────────────────────────────────────────────────────────────
// Clock port
// ───────────────────────────────────────────────────────────────

/// Time source injected into the orchestrator and the token service so
/// tests can simulate elapsed time without real delay.
pub trait Clock: Send + Sync {
    /// Monotonic milliseconds since an arbitrary origin.
    fn monotonic_ms(&self) -> u64;

    /// Wall-clock seconds since the Unix epoch.
    fn unix_secs(&self) -> u64;

    /// Block the calling thread for `duration`.
    fn sleep(&self, duration: Duration);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (domain → logging)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`DoorEvent`](super::events::DoorEvent)s
/// through this port.
pub trait EventSink: Send {
    fn emit(&mut self, event: &super::events::DoorEvent);
}

//! RGB status LED driver.
//!
//! Three PWM channels drive discrete R/G/B LEDs (or a common-cathode RGB
//! LED). Channel intensities 0–255 map linearly onto duty cycle:
//! `duty% = value / 255 * 100`.
//!
//! The driver remembers the last applied colour; [`StatusIndicator::set_colour`]
//! skips the hardware write when nothing changes, [`StatusIndicator::apply`]
//! always writes.

use embedded_hal::pwm::SetDutyCycle;
use serde::Serialize;

use crate::error::HardwareFault;
use crate::sensors::position::SensorReading;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const OFF: Self = Self::new(0, 0, 0);
    /// Door confirmed fully open.
    pub const OPEN: Self = Self::new(0, 255, 0);
    /// Anything but fully open.
    pub const CLOSED: Self = Self::new(255, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn for_reading(reading: SensorReading) -> Self {
        if reading.is_open() { Self::OPEN } else { Self::CLOSED }
    }

    pub fn channels(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Duty cycle per channel in percent.
    pub fn duty_percent(self) -> [f32; 3] {
        self.channels().map(|v| f32::from(v) / 255.0 * 100.0)
    }
}

impl From<(u8, u8, u8)> for Color {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self::new(r, g, b)
    }
}

/// A PWM channel and the GPIO it drives.
pub struct Channel<P: SetDutyCycle> {
    pwm: P,
    gpio: u8,
}

impl<P: SetDutyCycle> Channel<P> {
    pub fn new(pwm: P, gpio: u8) -> Self {
        Self { pwm, gpio }
    }

    fn write(&mut self, value: u8) -> Result<(), HardwareFault> {
        self.pwm
            .set_duty_cycle_fraction(u16::from(value), 255)
            .map_err(|_| HardwareFault::PwmWriteFailed(self.gpio))
    }
}

pub struct StatusIndicator<P: SetDutyCycle> {
    channels: [Channel<P>; 3],
    current: Color,
}

impl<P: SetDutyCycle> StatusIndicator<P> {
    /// Takes freshly allocated channels in R, G, B order and starts them dark.
    pub fn start(channels: [Channel<P>; 3]) -> Result<Self, HardwareFault> {
        let mut led = Self {
            channels,
            current: Color::OFF,
        };
        led.apply(Color::OFF)?;
        Ok(led)
    }

    pub fn set_colour(&mut self, colour: Color) -> Result<(), HardwareFault> {
        if colour == self.current {
            return Ok(());
        }
        self.apply(colour)
    }

    /// Write all three channels unconditionally.
    pub fn apply(&mut self, colour: Color) -> Result<(), HardwareFault> {
        for (ch, value) in self.channels.iter_mut().zip(colour.channels()) {
            ch.write(value)?;
        }
        self.current = colour;
        Ok(())
    }

    pub fn off(&mut self) -> Result<(), HardwareFault> {
        self.apply(Color::OFF)
    }

    pub fn current_colour(&self) -> Color {
        self.current
    }
}

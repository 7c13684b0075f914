//! End-stop position sensor.
//!
//! A normally-open switch to ground on a pull-up input: the line reads LOW
//! only while the door sits at its fully-open stop.
//!
//! Reads are pure. Mapping a reading to an indicator colour is the
//! caller's job (see [`IndicatorPort::show_reading`]).
//!
//! [`IndicatorPort::show_reading`]: crate::app::ports::IndicatorPort::show_reading

use embedded_hal::digital::InputPin;
use serde::Serialize;

use crate::error::HardwareFault;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SensorReading {
    FullyOpen,
    NotFullyOpen,
}

impl SensorReading {
    pub fn is_open(self) -> bool {
        matches!(self, Self::FullyOpen)
    }
}

impl From<bool> for SensorReading {
    fn from(open: bool) -> Self {
        if open { Self::FullyOpen } else { Self::NotFullyOpen }
    }
}

pub struct PositionSensor<P: InputPin> {
    pin: P,
    gpio: u8,
}

impl<P: InputPin> PositionSensor<P> {
    pub fn new(pin: P, gpio: u8) -> Self {
        Self { pin, gpio }
    }

    pub fn read(&mut self) -> Result<SensorReading, HardwareFault> {
        let asserted = self
            .pin
            .is_low()
            .map_err(|_| HardwareFault::GpioReadFailed(self.gpio))?;
        Ok(SensorReading::from(asserted))
    }
}

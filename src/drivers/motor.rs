//! Door motor driver (L298N H-bridge, one channel).
//!
//! Two direction lines plus an enable line. Open drives IN1 LOW / IN2 HIGH,
//! close drives IN1 HIGH / IN2 LOW; enable is asserted first and stays
//! asserted after the command, so the motor remains energized in the last
//! commanded direction until the next command.
//!
//! ## Safety contract
//!
//! This driver is a dumb actuator. Confirmation against the end-stop and
//! the bounded wait live in the orchestrator.

use embedded_hal::digital::OutputPin;

use crate::error::HardwareFault;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Open,
    Close,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotorState {
    Stopped,
    Driving(Direction),
}

/// A claimed output line and the GPIO it sits on (for fault reporting).
pub struct Line<P: OutputPin> {
    pin: P,
    gpio: u8,
}

impl<P: OutputPin> Line<P> {
    pub fn new(pin: P, gpio: u8) -> Self {
        Self { pin, gpio }
    }

    fn set(&mut self, high: bool) -> Result<(), HardwareFault> {
        let res = if high {
            self.pin.set_high()
        } else {
            self.pin.set_low()
        };
        res.map_err(|_| HardwareFault::GpioWriteFailed(self.gpio))
    }
}

pub struct MotorDriver<P: OutputPin> {
    in1: Line<P>,
    in2: Line<P>,
    enable: Line<P>,
    state: MotorState,
}

impl<P: OutputPin> MotorDriver<P> {
    pub fn new(in1: Line<P>, in2: Line<P>, enable: Line<P>) -> Self {
        Self {
            in1,
            in2,
            enable,
            state: MotorState::Stopped,
        }
    }

    pub fn drive(&mut self, direction: Direction) -> Result<(), HardwareFault> {
        self.enable.set(true)?;
        let (in1, in2) = match direction {
            Direction::Open => (false, true),
            Direction::Close => (true, false),
        };
        self.in1.set(in1)?;
        self.in2.set(in2)?;
        self.state = MotorState::Driving(direction);
        Ok(())
    }

    /// De-energize. Only the hardware release path calls this.
    pub fn stop(&mut self) -> Result<(), HardwareFault> {
        self.enable.set(false)?;
        self.in1.set(false)?;
        self.in2.set(false)?;
        self.state = MotorState::Stopped;
        Ok(())
    }

    pub fn state(&self) -> MotorState {
        self.state
    }

    pub fn is_driving(&self) -> bool {
        !matches!(self.state, MotorState::Stopped)
    }
}

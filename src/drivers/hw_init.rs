//! Hardware lifecycle: claim, refresh, release.
//!
//! [`HardwareLifecycle`] exclusively owns every pin and PWM handle of the
//! door (the hardware handle). The motor, sensor and indicator drivers are
//! only reachable through it, and it implements the domain port traits.
//!
//! `initialize()` is idempotent and cheap: pins and PWM channels are claimed
//! only while absent, but the sensor is re-read and the indicator colour
//! re-applied on every call so the LED never shows a stale state.
//! `shutdown()` drops everything; the next `initialize()` starts afresh.

use log::{debug, info, warn};

use crate::app::ports::{
    ActuatorPort, GpioBackend, IndicatorPort, LifecyclePort, SensorPort,
};
use crate::drivers::motor::{Direction, Line, MotorDriver};
use crate::drivers::status_led::{Channel, Color, StatusIndicator};
use crate::error::{HardwareFault, Result};
use crate::pins::PinMap;
use crate::sensors::position::{PositionSensor, SensorReading};

pub struct HardwareLifecycle<B: GpioBackend> {
    backend: B,
    pins: PinMap,
    pwm_frequency_hz: u32,
    motor: Option<MotorDriver<B::Output>>,
    sensor: Option<PositionSensor<B::Input>>,
    indicator: Option<StatusIndicator<B::Pwm>>,
}

impl<B: GpioBackend> HardwareLifecycle<B> {
    /// Nothing is claimed until the first [`initialize`](LifecyclePort::initialize).
    pub fn new(backend: B, pins: PinMap, pwm_frequency_hz: u32) -> Self {
        Self {
            backend,
            pins,
            pwm_frequency_hz,
            motor: None,
            sensor: None,
            indicator: None,
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.motor.is_some() && self.sensor.is_some() && self.indicator.is_some()
    }

    fn claim_pins(&mut self) -> Result<()> {
        if self.motor.is_none() {
            let p = self.pins;
            let in1 = Line::new(self.backend.output(p.motor_in1)?, p.motor_in1);
            let in2 = Line::new(self.backend.output(p.motor_in2)?, p.motor_in2);
            let ena = Line::new(self.backend.output(p.motor_enable)?, p.motor_enable);
            self.motor = Some(MotorDriver::new(in1, in2, ena));
            debug!(
                "hw: motor outputs claimed (in1={}, in2={}, ena={})",
                p.motor_in1, p.motor_in2, p.motor_enable
            );
        }
        if self.sensor.is_none() {
            let gpio = self.pins.position_sensor;
            self.sensor = Some(PositionSensor::new(self.backend.input_pull_up(gpio)?, gpio));
            debug!("hw: position sensor claimed (GPIO{gpio}, pull-up)");
        }
        Ok(())
    }

    fn allocate_pwm(&mut self) -> Result<()> {
        if self.indicator.is_some() {
            return Ok(());
        }
        let [r, g, b] = self.pins.led();
        let freq = self.pwm_frequency_hz;
        let channels = [
            Channel::new(self.backend.pwm(r, freq)?, r),
            Channel::new(self.backend.pwm(g, freq)?, g),
            Channel::new(self.backend.pwm(b, freq)?, b),
        ];
        self.indicator = Some(StatusIndicator::start(channels)?);
        info!("hw: PWM channels allocated (R={r}, G={g}, B={b} @ {freq} Hz)");
        Ok(())
    }

    fn motor(&mut self) -> Result<&mut MotorDriver<B::Output>> {
        self.motor
            .as_mut()
            .ok_or(HardwareFault::NotInitialized.into())
    }
}

// ── LifecyclePort ─────────────────────────────────────────────

impl<B: GpioBackend> LifecyclePort for HardwareLifecycle<B> {
    fn initialize(&mut self) -> Result<SensorReading> {
        self.claim_pins()?;
        self.allocate_pwm()?;

        let reading = self.read_open_confirmed()?;
        let colour = Color::for_reading(reading);
        self.indicator
            .as_mut()
            .ok_or(HardwareFault::NotInitialized)?
            .apply(colour)?;
        Ok(reading)
    }

    fn shutdown(&mut self) {
        if let Some(mut led) = self.indicator.take() {
            if let Err(e) = led.off() {
                warn!("hw: indicator off failed during shutdown: {e}");
            }
        }
        if let Some(mut motor) = self.motor.take() {
            if let Err(e) = motor.stop() {
                warn!("hw: motor stop failed during shutdown: {e}");
            }
        }
        self.sensor = None;
        self.backend.release_all();
        info!("hw: all pins released");
    }
}

// ── ActuatorPort ──────────────────────────────────────────────

impl<B: GpioBackend> ActuatorPort for HardwareLifecycle<B> {
    fn drive_open(&mut self) -> Result<()> {
        self.motor()?.drive(Direction::Open)?;
        Ok(())
    }

    fn drive_close(&mut self) -> Result<()> {
        self.motor()?.drive(Direction::Close)?;
        Ok(())
    }
}

// ── SensorPort ────────────────────────────────────────────────

impl<B: GpioBackend> SensorPort for HardwareLifecycle<B> {
    fn read_open_confirmed(&mut self) -> Result<SensorReading> {
        let sensor = self.sensor.as_mut().ok_or(HardwareFault::NotInitialized)?;
        Ok(sensor.read()?)
    }
}

// ── IndicatorPort ─────────────────────────────────────────────

impl<B: GpioBackend> IndicatorPort for HardwareLifecycle<B> {
    fn set_color(&mut self, color: Color) -> Result<()> {
        let led = self.indicator.as_mut().ok_or(HardwareFault::NotInitialized)?;
        led.set_colour(color)?;
        Ok(())
    }

    fn indicator_state(&self) -> Option<Color> {
        self.indicator.as_ref().map(StatusIndicator::current_colour)
    }
}

impl<B: GpioBackend> Drop for HardwareLifecycle<B> {
    fn drop(&mut self) {
        if self.is_initialized() {
            self.shutdown();
        }
    }
}

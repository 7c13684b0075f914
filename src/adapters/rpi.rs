//! Raspberry Pi GPIO backend (rppal).
//!
//! Pins are addressed by BCM number. Outputs start LOW, the sensor input
//! gets the SoC pull-up, and the RGB channels use rppal's software PWM.
//! rppal resets every pin to its original mode when the handle drops, so
//! [`release_all`](GpioBackend::release_all) only has to make sure nothing
//! is still held.

use core::convert::Infallible;

use embedded_hal::digital::{self, ErrorType};
use embedded_hal::pwm::{self, ErrorKind, SetDutyCycle};
use log::{debug, error};
use rppal::gpio::Gpio;

use crate::app::ports::GpioBackend;
use crate::error::HardwareFault;

const PWM_MAX_DUTY: u16 = 255;

pub struct RpiGpio {
    gpio: Gpio,
}

impl RpiGpio {
    /// Open `/dev/gpiomem`. Fails off-Pi or without permission.
    pub fn open() -> anyhow::Result<Self> {
        let gpio = Gpio::new()?;
        Ok(Self { gpio })
    }

    fn pin(&self, pin: u8) -> Result<rppal::gpio::Pin, HardwareFault> {
        self.gpio.get(pin).map_err(|e| {
            error!("rpi: GPIO{pin} unavailable: {e}");
            HardwareFault::PinUnavailable(pin)
        })
    }
}

impl GpioBackend for RpiGpio {
    type Output = RpiOutput;
    type Input = RpiInput;
    type Pwm = RpiPwm;

    fn output(&mut self, pin: u8) -> Result<RpiOutput, HardwareFault> {
        Ok(RpiOutput(self.pin(pin)?.into_output_low()))
    }

    fn input_pull_up(&mut self, pin: u8) -> Result<RpiInput, HardwareFault> {
        Ok(RpiInput(self.pin(pin)?.into_input_pullup()))
    }

    fn pwm(&mut self, pin: u8, frequency_hz: u32) -> Result<RpiPwm, HardwareFault> {
        let mut out = self.pin(pin)?.into_output_low();
        let frequency = f64::from(frequency_hz);
        out.set_pwm_frequency(frequency, 0.0).map_err(|e| {
            error!("rpi: PWM start on GPIO{pin} failed: {e}");
            HardwareFault::PwmWriteFailed(pin)
        })?;
        Ok(RpiPwm { out, frequency })
    }

    fn release_all(&mut self) {
        debug!("rpi: pins returned to their boot state");
    }
}

// ── Handles ───────────────────────────────────────────────────

pub struct RpiOutput(rppal::gpio::OutputPin);

impl ErrorType for RpiOutput {
    type Error = Infallible;
}

impl digital::OutputPin for RpiOutput {
    fn set_low(&mut self) -> Result<(), Infallible> {
        self.0.set_low();
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        self.0.set_high();
        Ok(())
    }
}

pub struct RpiInput(rppal::gpio::InputPin);

impl ErrorType for RpiInput {
    type Error = Infallible;
}

impl digital::InputPin for RpiInput {
    fn is_high(&mut self) -> Result<bool, Infallible> {
        Ok(self.0.is_high())
    }

    fn is_low(&mut self) -> Result<bool, Infallible> {
        Ok(self.0.is_low())
    }
}

#[derive(Debug)]
pub struct RpiPwmError(rppal::gpio::Error);

impl pwm::Error for RpiPwmError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

/// Software PWM on one output. Duty resolution is 1/255.
pub struct RpiPwm {
    out: rppal::gpio::OutputPin,
    frequency: f64,
}

impl pwm::ErrorType for RpiPwm {
    type Error = RpiPwmError;
}

impl SetDutyCycle for RpiPwm {
    fn max_duty_cycle(&self) -> u16 {
        PWM_MAX_DUTY
    }

    fn set_duty_cycle(&mut self, duty: u16) -> Result<(), RpiPwmError> {
        let fraction = f64::from(duty.min(PWM_MAX_DUTY)) / f64::from(PWM_MAX_DUTY);
        self.out
            .set_pwm_frequency(self.frequency, fraction)
            .map_err(RpiPwmError)
    }
}

impl Drop for RpiPwm {
    fn drop(&mut self) {
        if let Err(e) = self.out.clear_pwm() {
            error!("rpi: clearing PWM failed: {e}");
        }
    }
}

//! Simulated board: a [`GpioBackend`] with door physics behind it.
//!
//! Used by the server when built without the `rpi` feature and by every
//! test. Pin handles share one board state; the door position is
//! integrated lazily from the injected [`Clock`] on each pin access, so a
//! [`SimClock`](super::time::SimClock) drives the whole thing without real
//! delay.
//!
//! The door moves at a constant rate while ENA is HIGH and the direction
//! pair is asymmetric (IN1 LOW / IN2 HIGH opens, IN1 HIGH / IN2 LOW
//! closes). The end-stop pulls the sensor line LOW once the door has
//! travelled the full distance, unless the board is jammed.

use core::convert::Infallible;
use core::time::Duration;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use embedded_hal::digital::{self, ErrorKind, ErrorType, InputPin, OutputPin};
use embedded_hal::pwm::{self, SetDutyCycle};

use crate::app::ports::{Clock, GpioBackend};
use crate::drivers::motor::Direction;
use crate::drivers::status_led::Color;
use crate::error::HardwareFault;
use crate::pins::PinMap;

/// Full travel time from closed to open.
pub const DEFAULT_TRAVEL: Duration = Duration::from_millis(3_000);

const PWM_MAX_DUTY: u16 = 255;

struct BoardState {
    pins: PinMap,
    clock: Arc<dyn Clock>,
    travel_ms: u64,
    position_ms: u64,
    last_update_ms: u64,
    jammed: bool,
    fail_reads: bool,
    levels: BTreeMap<u8, bool>,
    duty: BTreeMap<u8, (u16, u16)>,
    claimed: BTreeSet<u8>,
    pwm_allocations: u32,
    duty_writes: u32,
    releases: u32,
}

impl BoardState {
    fn motion(&self) -> Option<Direction> {
        let level = |pin| self.levels.get(&pin).copied().unwrap_or(false);
        if !level(self.pins.motor_enable) {
            return None;
        }
        match (level(self.pins.motor_in1), level(self.pins.motor_in2)) {
            (false, true) => Some(Direction::Open),
            (true, false) => Some(Direction::Close),
            _ => None,
        }
    }

    /// Move the door for the time elapsed since the last pin access.
    fn integrate(&mut self) {
        let now = self.clock.monotonic_ms();
        let dt = now.saturating_sub(self.last_update_ms);
        self.last_update_ms = now;
        match self.motion() {
            Some(Direction::Open) => {
                self.position_ms = (self.position_ms + dt).min(self.travel_ms);
            }
            Some(Direction::Close) => {
                self.position_ms = self.position_ms.saturating_sub(dt);
            }
            None => {}
        }
    }

    fn sensor_asserted(&self) -> bool {
        !self.jammed && self.position_ms >= self.travel_ms
    }
}

/// Cloneable handle to the simulated board.
#[derive(Clone)]
pub struct SimBoard {
    state: Arc<Mutex<BoardState>>,
}

impl SimBoard {
    /// A closed door on `pins`, timed by `clock`.
    pub fn new(pins: PinMap, clock: Arc<dyn Clock>) -> Self {
        let last_update_ms = clock.monotonic_ms();
        Self {
            state: Arc::new(Mutex::new(BoardState {
                pins,
                clock,
                travel_ms: DEFAULT_TRAVEL.as_millis() as u64,
                position_ms: 0,
                last_update_ms,
                jammed: false,
                fail_reads: false,
                levels: BTreeMap::new(),
                duty: BTreeMap::new(),
                claimed: BTreeSet::new(),
                pwm_allocations: 0,
                duty_writes: 0,
                releases: 0,
            })),
        }
    }

    pub fn with_travel(self, travel: Duration) -> Self {
        {
            let mut s = self.lock();
            s.travel_ms = travel.as_millis() as u64;
            s.position_ms = s.position_ms.min(s.travel_ms);
        }
        self
    }

    /// Place the door against its open end-stop.
    pub fn start_open(self) -> Self {
        {
            let mut s = self.lock();
            s.position_ms = s.travel_ms;
        }
        self
    }

    /// Block the end-stop: the door still moves but the sensor never asserts.
    pub fn set_jammed(&self, jammed: bool) {
        self.lock().jammed = jammed;
    }

    /// Make every sensor read fail until cleared.
    pub fn set_fail_reads(&self, fail: bool) {
        self.lock().fail_reads = fail;
    }

    pub fn level(&self, pin: u8) -> Option<bool> {
        self.lock().levels.get(&pin).copied()
    }

    /// Colour currently shown on the RGB channels, `None` while unallocated.
    pub fn led_colour(&self) -> Option<Color> {
        let s = self.lock();
        let [r, g, b] = s.pins.led().map(|pin| {
            s.duty
                .get(&pin)
                .map(|&(duty, max)| (u32::from(duty) * 255 / u32::from(max.max(1))) as u8)
        });
        Some(Color::new(r?, g?, b?))
    }

    pub fn motion(&self) -> Option<Direction> {
        self.lock().motion()
    }

    pub fn is_fully_open(&self) -> bool {
        let mut s = self.lock();
        s.integrate();
        s.sensor_asserted()
    }

    /// Door position from 0.0 (closed) to 1.0 (open).
    pub fn position(&self) -> f32 {
        let mut s = self.lock();
        s.integrate();
        s.position_ms as f32 / s.travel_ms.max(1) as f32
    }

    pub fn pwm_allocations(&self) -> u32 {
        self.lock().pwm_allocations
    }

    pub fn duty_writes(&self) -> u32 {
        self.lock().duty_writes
    }

    pub fn releases(&self) -> u32 {
        self.lock().releases
    }

    fn lock(&self) -> MutexGuard<'_, BoardState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn claim(&self, pin: u8) -> Result<(), HardwareFault> {
        let mut s = self.lock();
        if !s.claimed.insert(pin) {
            return Err(HardwareFault::PinUnavailable(pin));
        }
        Ok(())
    }

    fn unclaim(&self, pin: u8) {
        self.lock().claimed.remove(&pin);
    }
}

impl GpioBackend for SimBoard {
    type Output = SimOutput;
    type Input = SimInput;
    type Pwm = SimPwm;

    fn output(&mut self, pin: u8) -> Result<SimOutput, HardwareFault> {
        self.claim(pin)?;
        let mut s = self.lock();
        s.integrate();
        s.levels.insert(pin, false);
        drop(s);
        Ok(SimOutput {
            board: self.clone(),
            pin,
        })
    }

    fn input_pull_up(&mut self, pin: u8) -> Result<SimInput, HardwareFault> {
        self.claim(pin)?;
        Ok(SimInput {
            board: self.clone(),
            pin,
        })
    }

    fn pwm(&mut self, pin: u8, _frequency_hz: u32) -> Result<SimPwm, HardwareFault> {
        self.claim(pin)?;
        let mut s = self.lock();
        s.pwm_allocations += 1;
        s.duty.insert(pin, (0, PWM_MAX_DUTY));
        drop(s);
        Ok(SimPwm {
            board: self.clone(),
            pin,
        })
    }

    fn release_all(&mut self) {
        let mut s = self.lock();
        s.integrate();
        s.levels.clear();
        s.duty.clear();
        s.claimed.clear();
        s.releases += 1;
    }
}

// ── Pin handles ───────────────────────────────────────────────

pub struct SimOutput {
    board: SimBoard,
    pin: u8,
}

impl ErrorType for SimOutput {
    type Error = Infallible;
}

impl OutputPin for SimOutput {
    fn set_low(&mut self) -> Result<(), Infallible> {
        let mut s = self.board.lock();
        s.integrate();
        s.levels.insert(self.pin, false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        let mut s = self.board.lock();
        s.integrate();
        s.levels.insert(self.pin, true);
        Ok(())
    }
}

impl Drop for SimOutput {
    fn drop(&mut self) {
        self.board.unclaim(self.pin);
    }
}

/// Injected read failure.
#[derive(Debug, Clone, Copy)]
pub struct SimReadError;

impl digital::Error for SimReadError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

pub struct SimInput {
    board: SimBoard,
    pin: u8,
}

impl SimInput {
    fn level(&mut self) -> Result<bool, SimReadError> {
        let mut s = self.board.lock();
        if s.fail_reads {
            return Err(SimReadError);
        }
        s.integrate();
        if self.pin == s.pins.position_sensor {
            Ok(!s.sensor_asserted())
        } else {
            // Floating inputs sit at the pull-up.
            Ok(true)
        }
    }
}

impl ErrorType for SimInput {
    type Error = SimReadError;
}

impl InputPin for SimInput {
    fn is_high(&mut self) -> Result<bool, SimReadError> {
        self.level()
    }

    fn is_low(&mut self) -> Result<bool, SimReadError> {
        self.level().map(|high| !high)
    }
}

impl Drop for SimInput {
    fn drop(&mut self) {
        self.board.unclaim(self.pin);
    }
}

pub struct SimPwm {
    board: SimBoard,
    pin: u8,
}

impl pwm::ErrorType for SimPwm {
    type Error = Infallible;
}

impl SetDutyCycle for SimPwm {
    fn max_duty_cycle(&self) -> u16 {
        PWM_MAX_DUTY
    }

    fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Infallible> {
        let mut s = self.board.lock();
        s.duty.insert(self.pin, (duty, PWM_MAX_DUTY));
        s.duty_writes += 1;
        Ok(())
    }
}

impl Drop for SimPwm {
    fn drop(&mut self) {
        self.board.unclaim(self.pin);
    }
}

//! GPIO pin assignments for the door controller board (BCM numbering).
//!
//! Single source of truth: every driver references [`PinMap`] rather than
//! hard-coding pin numbers. The defaults match the wiring of the L298N motor
//! board and the common-cathode RGB LED on the Raspberry Pi header.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Motor driver (L298N H-bridge, channel A)
// ---------------------------------------------------------------------------

/// Direction line 1. HIGH while closing.
pub const MOTOR_IN1_GPIO: u8 = 10;
/// Direction line 2. HIGH while opening.
pub const MOTOR_IN2_GPIO: u8 = 9;
/// Motor enable (active HIGH).
pub const MOTOR_ENABLE_GPIO: u8 = 25;

// ---------------------------------------------------------------------------
// Position sensor
// ---------------------------------------------------------------------------

/// End-stop switch, wired to ground. Pull-up input: LOW = door fully open.
pub const POSITION_SENSOR_GPIO: u8 = 14;

// ---------------------------------------------------------------------------
// Status LED
// ---------------------------------------------------------------------------

pub const LED_R_GPIO: u8 = 17;
pub const LED_G_GPIO: u8 = 27;
pub const LED_B_GPIO: u8 = 22;

/// Software PWM frequency for the RGB channels.
pub const LED_PWM_FREQ_HZ: u32 = 100;

/// Role-to-pin mapping handed to the hardware lifecycle manager and the
/// simulated board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PinMap {
    pub motor_in1: u8,
    pub motor_in2: u8,
    pub motor_enable: u8,
    pub position_sensor: u8,
    pub led_r: u8,
    pub led_g: u8,
    pub led_b: u8,
}

impl PinMap {
    /// Every assigned pin, in role order.
    pub fn all(&self) -> [u8; 7] {
        [
            self.motor_in1,
            self.motor_in2,
            self.motor_enable,
            self.position_sensor,
            self.led_r,
            self.led_g,
            self.led_b,
        ]
    }

    /// The indicator channels in R, G, B order.
    pub fn led(&self) -> [u8; 3] {
        [self.led_r, self.led_g, self.led_b]
    }

    /// True when no pin is assigned to two roles.
    pub fn is_unique(&self) -> bool {
        let pins = self.all();
        pins.iter()
            .enumerate()
            .all(|(i, p)| !pins[i + 1..].contains(p))
    }
}

impl Default for PinMap {
    fn default() -> Self {
        Self {
            motor_in1: MOTOR_IN1_GPIO,
            motor_in2: MOTOR_IN2_GPIO,
            motor_enable: MOTOR_ENABLE_GPIO,
            position_sensor: POSITION_SENSOR_GPIO,
            led_r: LED_R_GPIO,
            led_g: LED_G_GPIO,
            led_b: LED_B_GPIO,
        }
    }
}

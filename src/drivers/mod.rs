//! Actuator drivers and the hardware lifecycle that owns them.

pub mod hw_init;
pub mod motor;
pub mod status_led;

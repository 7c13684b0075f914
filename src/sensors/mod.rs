//! Sensor subsystem.
//!
//! The door has a single input: the end-stop that reports "fully open".

pub mod position;

//! Outbound door events.
//!
//! The [`DoorService`](super::service::DoorService) emits these through the
//! [`EventSink`](super::ports::EventSink) port. Adapters on the other side
//! decide what to do with them. Today that means log lines.

use super::commands::DoorIntent;
use crate::sensors::position::SensorReading;

/// Structured events emitted by the door core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DoorEvent {
    /// Hardware (re)initialized; carries the sensor reading taken right after.
    HardwareReady(SensorReading),

    /// Pins and PWM channels released.
    HardwareReleased,

    /// An authenticated command started driving the motor.
    CommandIssued(DoorIntent),

    /// The sensor confirmed the intended end state.
    Confirmed { intent: DoorIntent, elapsed_ms: u64 },

    /// The confirmation window elapsed without the intended end state.
    TimedOut { intent: DoorIntent, elapsed_ms: u64 },

    /// A debug route drove the motor directly, bypassing confirmation.
    ForcedDrive(DoorIntent),
}

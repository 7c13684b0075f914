//! Inbound commands to the door service.
//!
//! A [`DoorIntent`] is built per request by the HTTP layer and consumed by
//! the orchestrator. It never outlives the request.

use core::fmt;

use crate::sensors::position::SensorReading;

/// Which end state the caller asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DoorIntent {
    Open,
    Close,
}

impl DoorIntent {
    /// Whether `reading` is the end state this intent drives toward.
    ///
    /// Open is confirmed by the end-stop reporting fully open; Close is
    /// confirmed as soon as it no longer does.
    pub fn is_confirmed_by(self, reading: SensorReading) -> bool {
        match self {
            Self::Open => reading.is_open(),
            Self::Close => !reading.is_open(),
        }
    }

    /// The `is_open` value the status cache takes after confirmation.
    pub fn target_is_open(self) -> bool {
        matches!(self, Self::Open)
    }
}

impl fmt::Display for DoorIntent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open => write!(f, "open"),
            Self::Close => write!(f, "close"),
        }
    }
}

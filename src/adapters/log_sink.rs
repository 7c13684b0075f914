//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing door events through the `log`
//! facade. The server binary bridges `log` into its tracing subscriber, so
//! these lines end up on stderr and in the optional log file.

use log::{info, warn};

use crate::app::events::DoorEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`DoorEvent`].
#[derive(Debug, Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &DoorEvent) {
        match event {
            DoorEvent::HardwareReady(reading) => {
                info!("HW    | ready, sensor={:?}", reading);
            }
            DoorEvent::HardwareReleased => {
                info!("HW    | released");
            }
            DoorEvent::CommandIssued(intent) => {
                info!("DOOR  | {} commanded", intent);
            }
            DoorEvent::Confirmed { intent, elapsed_ms } => {
                info!("DOOR  | {} confirmed after {} ms", intent, elapsed_ms);
            }
            DoorEvent::TimedOut { intent, elapsed_ms } => {
                warn!("DOOR  | {} not confirmed after {} ms", intent, elapsed_ms);
            }
            DoorEvent::ForcedDrive(intent) => {
                warn!("DEBUG | forced {} drive, no confirmation", intent);
            }
        }
    }
}

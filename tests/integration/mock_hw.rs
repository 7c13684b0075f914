//! Mock hardware adapter for integration tests.
//!
//! Records every port call so tests can assert on the full command history
//! without a GPIO backend. The sensor is scripted by poll count: it reports
//! fully open from the `n`-th read after a drive-open onward.

use std::sync::{Arc, Mutex};

use door_opener::app::events::DoorEvent;
use door_opener::app::ports::{ActuatorPort, EventSink, IndicatorPort, LifecyclePort, SensorPort};
use door_opener::drivers::status_led::Color;
use door_opener::error::{HardwareFault, Result};
use door_opener::sensors::position::SensorReading;

// ── Call record ───────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum HwCall {
    Initialize,
    Shutdown,
    DriveOpen,
    DriveClose,
    Read(SensorReading),
    SetColor(Color),
}

pub type CallLog = Arc<Mutex<Vec<HwCall>>>;

// ── MockHardware ──────────────────────────────────────────────

pub struct MockHardware {
    pub calls: CallLog,
    /// Reads after drive-open until the sensor asserts; `None` = never.
    open_after_reads: Option<u32>,
    reads_since_open: Option<u32>,
    open: bool,
    colour: Option<Color>,
    fail_reads: bool,
}

#[allow(dead_code)]
impl MockHardware {
    pub fn new(open_after_reads: Option<u32>) -> Self {
        Self {
            calls: CallLog::default(),
            open_after_reads,
            reads_since_open: None,
            open: false,
            colour: None,
            fail_reads: false,
        }
    }

    pub fn failing_reads() -> Self {
        Self {
            fail_reads: true,
            ..Self::new(None)
        }
    }

    pub fn log(&self) -> CallLog {
        self.calls.clone()
    }

    fn push(&self, call: HwCall) {
        self.calls.lock().unwrap().push(call);
    }
}

impl ActuatorPort for MockHardware {
    fn drive_open(&mut self) -> Result<()> {
        self.push(HwCall::DriveOpen);
        self.reads_since_open = Some(0);
        Ok(())
    }

    fn drive_close(&mut self) -> Result<()> {
        self.push(HwCall::DriveClose);
        self.reads_since_open = None;
        self.open = false;
        Ok(())
    }
}

impl SensorPort for MockHardware {
    fn read_open_confirmed(&mut self) -> Result<SensorReading> {
        if self.fail_reads {
            return Err(HardwareFault::GpioReadFailed(14).into());
        }
        if let Some(n) = self.reads_since_open.as_mut() {
            *n += 1;
            if self.open_after_reads.is_some_and(|after| *n >= after) {
                self.open = true;
            }
        }
        let reading = SensorReading::from(self.open);
        self.push(HwCall::Read(reading));
        Ok(reading)
    }
}

impl IndicatorPort for MockHardware {
    fn set_color(&mut self, color: Color) -> Result<()> {
        self.push(HwCall::SetColor(color));
        self.colour = Some(color);
        Ok(())
    }

    fn indicator_state(&self) -> Option<Color> {
        self.colour
    }
}

impl LifecyclePort for MockHardware {
    fn initialize(&mut self) -> Result<SensorReading> {
        self.push(HwCall::Initialize);
        let reading = SensorReading::from(self.open);
        self.colour = Some(Color::for_reading(reading));
        Ok(reading)
    }

    fn shutdown(&mut self) {
        self.push(HwCall::Shutdown);
        self.colour = None;
    }
}

// ── Event sink ────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct RecordingSink {
    pub events: Arc<Mutex<Vec<DoorEvent>>>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> Vec<DoorEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &DoorEvent) {
        self.events.lock().unwrap().push(event.clone());
    }
}

//! DoorService: status cache, events, serialization, lifecycle.

use core::time::Duration;
use std::sync::Arc;
use std::thread;

use door_opener::adapters::sim_board::SimBoard;
use door_opener::adapters::time::SimClock;
use door_opener::app::commands::DoorIntent;
use door_opener::app::events::DoorEvent;
use door_opener::app::ports::Clock;
use door_opener::app::service::{DoorService, StatusSnapshot};
use door_opener::config::Timing;
use door_opener::drivers::hw_init::HardwareLifecycle;
use door_opener::drivers::status_led::Color;
use door_opener::pins::PinMap;
use door_opener::sensors::position::SensorReading;

use crate::mock_hw::{HwCall, MockHardware, RecordingSink};

const EPOCH: u64 = 1_700_000_000;

fn mock_service(hw: MockHardware) -> (DoorService, RecordingSink, Arc<SimClock>) {
    let clock = Arc::new(SimClock::at_unix(EPOCH));
    let sink = RecordingSink::new();
    let svc = DoorService::new(
        Box::new(hw),
        Box::new(sink.clone()),
        clock.clone(),
        Timing::default(),
    );
    (svc, sink, clock)
}

fn sim_service(board_setup: impl FnOnce(SimBoard) -> SimBoard) -> (DoorService, SimBoard, Arc<SimClock>) {
    let clock = Arc::new(SimClock::at_unix(EPOCH));
    let board = board_setup(SimBoard::new(PinMap::default(), clock.clone()));
    let hw = HardwareLifecycle::new(board.clone(), PinMap::default(), 100);
    let svc = DoorService::new(
        Box::new(hw),
        Box::new(RecordingSink::new()),
        clock.clone(),
        Timing::default(),
    );
    (svc, board, clock)
}

// ── Status cache ──────────────────────────────────────────────

#[test]
fn open_confirmed_two_seconds_after_drive() {
    let (svc, board, _) = sim_service(|b| b.with_travel(Duration::from_secs(2)));
    svc.initialize().unwrap();

    let out = svc.actuate(DoorIntent::Open).unwrap();
    assert!(out.confirmed());
    assert_eq!(out.elapsed_ms, 2_000);
    assert_eq!(
        svc.status(),
        StatusSnapshot {
            is_open: true,
            last_updated: EPOCH + 2
        }
    );
    assert_eq!(board.led_colour(), Some(Color::OPEN));
}

#[test]
fn jammed_door_times_out_and_cache_keeps_prior_value() {
    let (svc, board, clock) = sim_service(|b| b.with_travel(Duration::from_secs(2)));
    svc.initialize().unwrap();
    svc.actuate(DoorIntent::Open).unwrap();
    svc.actuate(DoorIntent::Close).unwrap();
    let before = svc.status();

    board.set_jammed(true);
    let start = clock.unix_secs();
    let out = svc.actuate(DoorIntent::Open).unwrap();

    assert!(!out.confirmed());
    assert!(out.elapsed_ms >= 10_000 && out.elapsed_ms < 10_020);
    assert_eq!(clock.unix_secs(), start + 10);
    assert_eq!(svc.status(), before);
}

#[test]
fn close_confirmation_clears_open_flag() {
    let (svc, _, _) = sim_service(|b| b.start_open());
    assert_eq!(svc.initialize().unwrap(), SensorReading::FullyOpen);
    let out = svc.actuate(DoorIntent::Close).unwrap();
    assert!(out.confirmed());
    assert!(!svc.status().is_open);
}

// ── Events ────────────────────────────────────────────────────

#[test]
fn confirmed_command_emits_issue_then_confirm() {
    let (svc, sink, _) = mock_service(MockHardware::new(Some(1)));
    svc.actuate(DoorIntent::Open).unwrap();
    assert_eq!(
        sink.snapshot(),
        vec![
            DoorEvent::CommandIssued(DoorIntent::Open),
            DoorEvent::Confirmed {
                intent: DoorIntent::Open,
                elapsed_ms: 0
            },
        ]
    );
}

#[test]
fn timeout_emits_timed_out_event() {
    let (svc, sink, _) = mock_service(MockHardware::new(None));
    let before = svc.status();
    svc.actuate(DoorIntent::Open).unwrap();
    assert!(matches!(
        sink.snapshot().last(),
        Some(DoorEvent::TimedOut { intent: DoorIntent::Open, .. })
    ));
    assert_eq!(svc.status(), before);
}

#[test]
fn force_drive_skips_confirmation() {
    let hw = MockHardware::new(None);
    let log = hw.log();
    let (svc, sink, _) = mock_service(hw);
    svc.force_drive(DoorIntent::Close).unwrap();
    assert_eq!(*log.lock().unwrap(), vec![HwCall::DriveClose]);
    assert_eq!(sink.snapshot(), vec![DoorEvent::ForcedDrive(DoorIntent::Close)]);
}

#[test]
fn hardware_fault_propagates_and_leaves_cache() {
    let (svc, _, _) = mock_service(MockHardware::failing_reads());
    let before = svc.status();
    assert!(svc.actuate(DoorIntent::Open).is_err());
    assert_eq!(svc.status(), before);
}

// ── Lifecycle ─────────────────────────────────────────────────

#[test]
fn repeated_initialize_allocates_pwm_once_but_reapplies_colour() {
    let (svc, board, _) = sim_service(|b| b);
    svc.initialize().unwrap();
    let writes_after_first = board.duty_writes();
    svc.initialize().unwrap();

    assert_eq!(board.pwm_allocations(), 3);
    assert_eq!(board.duty_writes(), writes_after_first + 3);
    assert_eq!(board.led_colour(), Some(Color::CLOSED));
}

#[test]
fn reset_then_refresh_claims_again() {
    let (svc, board, _) = sim_service(|b| b);
    svc.initialize().unwrap();
    svc.shutdown();
    assert_eq!(board.releases(), 1);
    assert_eq!(board.led_colour(), None);

    assert!(matches!(svc.refresh(), Some(Ok(SensorReading::NotFullyOpen))));
    assert_eq!(board.led_colour(), Some(Color::CLOSED));
}

#[test]
fn actuate_after_reset_is_a_hardware_fault() {
    let (svc, _, _) = sim_service(|b| b);
    svc.initialize().unwrap();
    svc.shutdown();
    assert!(svc.actuate(DoorIntent::Open).is_err());
}

// ── Concurrency ───────────────────────────────────────────────

#[test]
fn concurrent_commands_are_serialized() {
    let (svc, board, _) = sim_service(|b| b.with_travel(Duration::from_millis(500)));
    svc.initialize().unwrap();
    let svc = Arc::new(svc);

    let handles: Vec<_> = [DoorIntent::Open, DoorIntent::Close, DoorIntent::Open]
        .into_iter()
        .map(|intent| {
            let svc = svc.clone();
            thread::spawn(move || svc.actuate(intent).unwrap())
        })
        .collect();
    for h in handles {
        assert!(h.join().unwrap().confirmed());
    }

    // Whatever order the runs took, the cache agrees with the last one and
    // with the physical door.
    assert_eq!(svc.status().is_open, board.is_fully_open());
}

//! Orchestrator against the recording mock: call ordering and bounds.

use core::time::Duration;

use door_opener::adapters::time::SimClock;
use door_opener::app::commands::DoorIntent;
use door_opener::app::ports::Clock;
use door_opener::config::Timing;
use door_opener::drivers::status_led::Color;
use door_opener::fsm::{self, DoorState};
use door_opener::sensors::position::SensorReading;

use crate::mock_hw::{HwCall, MockHardware};

fn timing() -> Timing {
    Timing {
        confirm_timeout: Duration::from_secs(10),
        poll_interval: Duration::from_millis(20),
    }
}

#[test]
fn drive_is_issued_once_before_the_first_read() {
    let clock = SimClock::new();
    let mut hw = MockHardware::new(Some(3));
    let out = fsm::run(&mut hw, &clock, timing(), DoorIntent::Open).unwrap();

    assert_eq!(out.state, DoorState::Confirmed(DoorIntent::Open));
    let calls = hw.calls.lock().unwrap().clone();
    assert_eq!(calls[0], HwCall::DriveOpen);
    assert_eq!(
        calls.iter().filter(|c| **c == HwCall::DriveOpen).count(),
        1,
        "drive command must be issued exactly once"
    );
}

#[test]
fn each_read_is_followed_by_its_colour() {
    let clock = SimClock::new();
    let mut hw = MockHardware::new(Some(4));
    fsm::run(&mut hw, &clock, timing(), DoorIntent::Open).unwrap();

    let calls = hw.calls.lock().unwrap().clone();
    for pair in calls[1..].chunks(2) {
        match pair {
            [HwCall::Read(r), HwCall::SetColor(c)] => assert_eq!(*c, Color::for_reading(*r)),
            other => panic!("unexpected call sequence {other:?}"),
        }
    }
    assert_eq!(calls.last(), Some(&HwCall::SetColor(Color::OPEN)));
}

#[test]
fn confirmation_latency_tracks_poll_interval() {
    let clock = SimClock::new();
    let mut hw = MockHardware::new(Some(101));
    let out = fsm::run(&mut hw, &clock, timing(), DoorIntent::Open).unwrap();
    // 101st read happens after 100 sleeps of 20 ms.
    assert_eq!(out.elapsed_ms, 2_000);
    assert_eq!(clock.monotonic_ms(), 2_000);
}

#[test]
fn timeout_is_reached_within_one_poll() {
    let clock = SimClock::new();
    let mut hw = MockHardware::new(None);
    let t = Timing {
        confirm_timeout: Duration::from_millis(1_000),
        poll_interval: Duration::from_millis(30),
    };
    let out = fsm::run(&mut hw, &clock, t, DoorIntent::Open).unwrap();
    assert_eq!(out.state, DoorState::TimedOut(DoorIntent::Open));
    assert!(out.elapsed_ms >= 1_000 && out.elapsed_ms < 1_030);
}

#[test]
fn close_from_open_confirms_once_sensor_releases() {
    let clock = SimClock::new();
    let mut hw = MockHardware::new(Some(1));
    fsm::run(&mut hw, &clock, timing(), DoorIntent::Open).unwrap();
    hw.calls.lock().unwrap().clear();

    let out = fsm::run(&mut hw, &clock, timing(), DoorIntent::Close).unwrap();
    assert!(out.confirmed());
    let calls = hw.calls.lock().unwrap().clone();
    assert_eq!(
        calls,
        vec![
            HwCall::DriveClose,
            HwCall::Read(SensorReading::NotFullyOpen),
            HwCall::SetColor(Color::CLOSED),
        ]
    );
}

#[test]
fn read_fault_aborts_the_run() {
    let clock = SimClock::new();
    let mut hw = MockHardware::failing_reads();
    assert!(fsm::run(&mut hw, &clock, timing(), DoorIntent::Open).is_err());
    assert_eq!(clock.monotonic_ms(), 0, "no waiting after a fault");
}

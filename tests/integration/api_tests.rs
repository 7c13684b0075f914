//! HTTP surface against the simulated board, driven with `oneshot`.

use core::time::Duration;
use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use door_opener::adapters::log_sink::LogEventSink;
use door_opener::adapters::sim_board::SimBoard;
use door_opener::adapters::time::SimClock;
use door_opener::api::{create_router, AppState};
use door_opener::app::service::DoorService;
use door_opener::auth::TokenService;
use door_opener::config::DoorConfig;
use door_opener::drivers::hw_init::HardwareLifecycle;
use door_opener::drivers::motor::Direction;
use door_opener::drivers::status_led::Color;

const EPOCH: u64 = 1_700_000_000;

struct Rig {
    router: Router,
    board: SimBoard,
    tokens: Arc<TokenService>,
    door: Arc<DoorService>,
}

fn rig(setup: impl FnOnce(SimBoard) -> SimBoard) -> Rig {
    let config = DoorConfig::default();
    let clock = Arc::new(SimClock::at_unix(EPOCH));
    let board = setup(
        SimBoard::new(config.pins, clock.clone()).with_travel(Duration::from_secs(2)),
    );
    let hw = HardwareLifecycle::new(board.clone(), config.pins, config.pwm_frequency_hz);
    let door = Arc::new(DoorService::new(
        Box::new(hw),
        Box::new(LogEventSink::new()),
        clock.clone(),
        config.timing(),
    ));
    door.initialize().unwrap();
    let tokens = Arc::new(TokenService::new("test-secret", 60, clock).unwrap());

    let state = AppState {
        door: door.clone(),
        tokens: tokens.clone(),
        config: Arc::new(config),
    };
    Rig {
        router: create_router(state),
        board,
        tokens,
        door,
    }
}

async fn get(router: &Router, uri: &str) -> (StatusCode, String) {
    let response = router
        .clone()
        .oneshot(Request::get(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

async fn get_json(router: &Router, uri: &str) -> (StatusCode, Value) {
    let (status, body) = get(router, uri).await;
    (status, serde_json::from_str(&body).unwrap())
}

// ── Auth ──────────────────────────────────────────────────────

#[tokio::test]
async fn key_route_returns_current_token() {
    let rig = rig(|b| b);
    let (status, body) = get(&rig.router, "/key").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, rig.tokens.current().as_str());
}

#[tokio::test]
async fn wrong_or_missing_key_is_401_and_leaves_state() {
    let rig = rig(|b| b);
    let before = rig.door.status();

    for uri in ["/api/open?key=nope", "/api/close", "/api/status?key="] {
        let (status, body) = get_json(&rig.router, uri).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{uri}");
        assert_eq!(body, serde_json::json!({"success": false, "error": "unauthorized"}));
    }
    assert_eq!(rig.door.status(), before);
    assert_eq!(rig.board.motion(), None, "rejected requests never drive");
}

// ── Commands ──────────────────────────────────────────────────

#[tokio::test]
async fn open_then_status_reports_open() {
    let rig = rig(|b| b);
    let key = rig.tokens.current();

    let (status, body) = get_json(&rig.router, &format!("/api/open?key={key}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, serde_json::json!({"success": true}));

    // Two simulated seconds passed; the window is unchanged.
    let (status, body) = get_json(&rig.router, &format!("/api/status?key={key}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        serde_json::json!({
            "api": true,
            "opened": true,
            "position": 100,
            "power_supply": 100,
            "wifi_network": "staff-net",
            "last_updated": EPOCH + 2,
        })
    );
    assert_eq!(rig.board.led_colour(), Some(Color::OPEN));
}

#[tokio::test]
async fn jammed_open_returns_success_false() {
    let rig = rig(|b| {
        b.set_jammed(true);
        b
    });
    let key = rig.tokens.current();
    let (status, body) = get_json(&rig.router, &format!("/api/open?key={key}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, serde_json::json!({"success": false}));
    assert!(!rig.door.status().is_open);
}

#[tokio::test]
async fn close_from_open_confirms() {
    let rig = rig(SimBoard::start_open);
    let key = rig.tokens.current();
    let (status, body) = get_json(&rig.router, &format!("/api/close?key={key}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(rig.board.motion(), Some(Direction::Close));
}

#[tokio::test]
async fn sensor_fault_is_a_500() {
    let rig = rig(|b| b);
    rig.board.set_fail_reads(true);
    let key = rig.tokens.current();
    let (status, body) = get_json(&rig.router, &format!("/api/open?key={key}")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "hardware fault: GPIO14 read failed");
}

// ── Debug routes ──────────────────────────────────────────────

#[tokio::test]
async fn fopen_and_fclose_drive_without_waiting() {
    let rig = rig(|b| b);
    assert_eq!(get(&rig.router, "/fopen").await, (StatusCode::OK, "ok".to_string()));
    assert_eq!(rig.board.motion(), Some(Direction::Open));
    assert_eq!(get(&rig.router, "/fclose").await, (StatusCode::OK, "ok".to_string()));
    assert_eq!(rig.board.motion(), Some(Direction::Close));
    assert!(!rig.door.status().is_open);
}

#[tokio::test]
async fn freset_releases_and_next_request_reclaims() {
    let rig = rig(|b| b);
    assert_eq!(get(&rig.router, "/freset").await.1, "ok");
    assert_eq!(rig.board.releases(), 1);
    assert_eq!(rig.board.led_colour(), None);

    // Any request re-initializes first.
    get(&rig.router, "/key").await;
    assert_eq!(rig.board.pwm_allocations(), 6);
    assert_eq!(rig.board.led_colour(), Some(Color::CLOSED));
}

#[tokio::test]
async fn home_page_is_html() {
    let rig = rig(|b| b);
    let (status, body) = get(&rig.router, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("<h1>Door Opener</h1>"));
}

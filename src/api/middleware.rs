//! Per-request middleware: access log and hardware refresh.

use std::net::SocketAddr;

use axum::body::Body;
use axum::extract::{ConnectInfo, State};
use axum::http::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use log::info;

use super::error::ApiError;
use super::AppState;

/// One line per request at target `access`:
/// `<client-ip> "<METHOD> <uri>" <status>`.
///
/// The peer address is only known when the router is served with
/// `into_make_service_with_connect_info`; otherwise `-` is logged.
pub async fn access_log(
    peer: Option<ConnectInfo<SocketAddr>>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let ip = peer.map_or_else(|| "-".to_string(), |ConnectInfo(addr)| addr.ip().to_string());
    let method = request.method().clone();
    let uri = request.uri().clone();

    let response = next.run(request).await;

    info!(
        target: "access",
        "{} \"{} {}\" {}",
        ip,
        method,
        uri,
        response.status().as_u16()
    );
    response
}

/// Re-initialize the hardware before every request: claims pins on the
/// first request after a reset, re-reads the sensor and re-applies the
/// indicator. Skipped while an actuation holds the door.
pub async fn refresh_hardware(
    State(state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    if let Some(Err(e)) = state.door.refresh() {
        return ApiError::from(e).into_response();
    }
    next.run(request).await
}

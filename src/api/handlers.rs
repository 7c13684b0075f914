//! Request handlers.
//!
//! The authenticated routes check `?key=` before touching anything, so a
//! rejected request never reaches the door. Actuations run on a blocking
//! worker because the confirmation wait parks the thread.

use axum::extract::{Query, State};
use axum::response::Html;
use axum::Json;

use super::error::{ApiError, PlainError};
use super::models::{CommandResponse, KeyQuery, StatusResponse};
use super::AppState;
use crate::app::commands::DoorIntent;

const HOME_PAGE: &str = include_str!("home.html");

pub async fn home() -> Html<&'static str> {
    Html(HOME_PAGE)
}

/// Current rotating token, plaintext. Unauthenticated.
pub async fn key(State(state): State<AppState>) -> String {
    state.tokens.current().as_str().to_owned()
}

pub async fn open(
    State(state): State<AppState>,
    Query(query): Query<KeyQuery>,
) -> Result<Json<CommandResponse>, ApiError> {
    command(state, query, DoorIntent::Open).await
}

pub async fn close(
    State(state): State<AppState>,
    Query(query): Query<KeyQuery>,
) -> Result<Json<CommandResponse>, ApiError> {
    command(state, query, DoorIntent::Close).await
}

async fn command(
    state: AppState,
    query: KeyQuery,
    intent: DoorIntent,
) -> Result<Json<CommandResponse>, ApiError> {
    state.tokens.validate_opt(query.key.as_deref())?;

    let door = state.door.clone();
    let outcome = tokio::task::spawn_blocking(move || door.actuate(intent)).await??;
    Ok(Json(CommandResponse {
        success: outcome.confirmed(),
    }))
}

pub async fn status(
    State(state): State<AppState>,
    Query(query): Query<KeyQuery>,
) -> Result<Json<StatusResponse>, ApiError> {
    state.tokens.validate_opt(query.key.as_deref())?;

    let snapshot = state.door.status();
    Ok(Json(StatusResponse {
        api: true,
        opened: snapshot.is_open,
        position: 100,
        power_supply: state.config.power_supply_percent,
        wifi_network: state.config.wifi_network.clone(),
        last_updated: snapshot.last_updated,
    }))
}

// ── Debug routes (unauthenticated, plaintext) ─────────────────

pub async fn force_open(State(state): State<AppState>) -> Result<&'static str, PlainError> {
    force(state, DoorIntent::Open).await
}

pub async fn force_close(State(state): State<AppState>) -> Result<&'static str, PlainError> {
    force(state, DoorIntent::Close).await
}

async fn force(state: AppState, intent: DoorIntent) -> Result<&'static str, PlainError> {
    let door = state.door.clone();
    tokio::task::spawn_blocking(move || door.force_drive(intent)).await??;
    Ok("ok")
}

pub async fn reset(State(state): State<AppState>) -> Result<&'static str, PlainError> {
    let door = state.door.clone();
    tokio::task::spawn_blocking(move || door.shutdown()).await?;
    Ok("ok")
}

//! HTTP error mapping.
//!
//! | Error                  | JSON routes                     | Debug routes    |
//! |------------------------|---------------------------------|-----------------|
//! | `Auth(Unauthorized)`   | 401 `{"success":false,...}`     | n/a             |
//! | `Hardware(_)`          | 500 `{"success":false,...}`     | 500 plaintext   |
//! | worker panicked        | 500                             | 500 plaintext   |
//!
//! A confirmation timeout never shows up here; it is a 200 with
//! `success: false`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use log::error;
use tokio::task::JoinError;

use super::models::ErrorResponse;
use crate::error::{AuthError, Error};

#[derive(Debug)]
pub enum ApiError {
    Door(Error),
    /// The blocking worker running the request died.
    Worker(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Door(Error::Auth(_)) => StatusCode::UNAUTHORIZED,
            Self::Door(Error::Config(_) | Error::Hardware(_)) | Self::Worker(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn message(&self) -> String {
        match self {
            Self::Door(e @ (Error::Hardware(_) | Error::Config(_))) => e.to_string(),
            Self::Door(Error::Auth(e)) => e.to_string(),
            Self::Worker(msg) => msg.clone(),
        }
    }

    /// Same status, plaintext body. Used by the debug routes.
    pub fn into_plain(self) -> Response {
        let status = self.status();
        self.log();
        (status, self.message()).into_response()
    }

    fn log(&self) {
        if self.status().is_server_error() {
            error!("api: {}", self.message());
        }
    }
}

impl From<Error> for ApiError {
    fn from(e: Error) -> Self {
        Self::Door(e)
    }
}

impl From<AuthError> for ApiError {
    fn from(e: AuthError) -> Self {
        Self::Door(e.into())
    }
}

impl From<JoinError> for ApiError {
    fn from(e: JoinError) -> Self {
        Self::Worker(format!("worker failed: {e}"))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        self.log();
        (status, Json(ErrorResponse::new(self.message()))).into_response()
    }
}

/// Wrapper for debug routes: any error renders as plaintext.
pub struct PlainError(pub ApiError);

impl From<Error> for PlainError {
    fn from(e: Error) -> Self {
        Self(e.into())
    }
}

impl From<JoinError> for PlainError {
    fn from(e: JoinError) -> Self {
        Self(e.into())
    }
}

impl IntoResponse for PlainError {
    fn into_response(self) -> Response {
        self.0.into_plain()
    }
}

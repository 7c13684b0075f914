//! Request and response bodies for the HTTP surface.

use serde::{Deserialize, Serialize};

/// `?key=<token>` on the authenticated routes. A missing key is rejected
/// by the token check, not by the extractor.
#[derive(Debug, Default, Deserialize)]
pub struct KeyQuery {
    pub key: Option<String>,
}

/// Body of `/api/open` and `/api/close`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandResponse {
    pub success: bool,
}

/// Body of every JSON error (401, 500).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
        }
    }
}

/// Body of `/api/status`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusResponse {
    pub api: bool,
    pub opened: bool,
    /// Always 100: the hardware has no intermediate position feedback.
    pub position: u8,
    pub power_supply: u8,
    pub wifi_network: String,
    pub last_updated: u64,
}

//! HTTP surface.
//!
//! | Route          | Auth  | Body                         |
//! |----------------|-------|------------------------------|
//! | `/`            | no    | static landing page          |
//! | `/key`         | no    | current token, plaintext     |
//! | `/api/open`    | `key` | `{"success": bool}`          |
//! | `/api/close`   | `key` | `{"success": bool}`          |
//! | `/api/status`  | `key` | last confirmed state         |
//! | `/fopen`       | no    | `ok` (drive open, no wait)   |
//! | `/fclose`      | no    | `ok` (drive close, no wait)  |
//! | `/freset`      | no    | `ok` (release hardware)      |

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod server;

use std::sync::Arc;

use crate::app::service::DoorService;
use crate::auth::TokenService;
use crate::config::DoorConfig;

pub use routes::create_router;
pub use server::HttpServer;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub door: Arc<DoorService>,
    pub tokens: Arc<TokenService>,
    pub config: Arc<DoorConfig>,
}

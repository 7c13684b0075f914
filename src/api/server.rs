//! HTTP server: bind, serve, shut down.

use std::future::Future;
use std::net::SocketAddr;

use axum::Router;
use log::info;
use tokio::net::TcpListener;

use super::{create_router, AppState};
use crate::config::ServerConfig;

pub struct HttpServer {
    config: ServerConfig,
    router: Router,
}

impl HttpServer {
    pub fn new(config: ServerConfig, state: AppState) -> Self {
        Self {
            config,
            router: create_router(state),
        }
    }

    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Serve until `shutdown` resolves. In-flight requests are drained
    /// before this returns.
    pub async fn run(self, shutdown: impl Future<Output = ()> + Send + 'static) -> std::io::Result<()> {
        let listener = TcpListener::bind(self.config.socket_addr()).await?;
        info!("http: listening on {}", listener.local_addr()?);

        axum::serve(
            listener,
            self.router
                .into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(shutdown)
        .await
    }
}

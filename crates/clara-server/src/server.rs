use std::net::SocketAddr;

use tokio::net::TcpListener;

use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};
use crate::router::build_router;
use crate::state::AppState;

/// Clara compliance-platform server.
pub struct ClaraServer {
    config: ServerConfig,
    state: AppState,
}

impl ClaraServer {
    pub fn new(config: ServerConfig) -> Self {
        let state = AppState::new(&config);
        Self { config, state }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Build the router (useful for testing).
    pub fn router(&self) -> axum::Router {
        build_router(self.state.clone())
    }

    /// Start serving requests.
    pub async fn serve(self) -> ServerResult<()> {
        let app = build_router(self.state);
        let listener = TcpListener::bind(&self.config.bind_addr).await?;
        tracing::info!("Clara server listening on {}", self.config.bind_addr);
        axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .await
        .map_err(|e| ServerError::Internal(e.to_string()))
    }
}

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use frontdesk_channels::Channel;
use frontdesk_core::config::FrontdeskConfig;
use frontdesk_sessions::SessionEngine;

/// Outbound sender chosen at startup (bridge or log-only).
pub type DynChannel = Arc<dyn Channel>;

/// Central shared state, passed as Arc<AppState> to all Axum handlers.
pub struct AppState {
    pub config: FrontdeskConfig,
    pub engine: SessionEngine<DynChannel>,
}

impl AppState {
    pub fn new(config: FrontdeskConfig, channel: DynChannel) -> Self {
        let engine = SessionEngine::new(channel, &config);
        Self { config, engine }
    }
}

/// Assemble the gateway router.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(crate::http::health::health_handler))
        .route(
            "/webhooks/inbound",
            post(crate::http::webhooks::inbound_handler),
        )
        .with_state(state)
        .layer(tower_http::trace::TraceLayer::new_for_http())
}

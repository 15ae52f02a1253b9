use axum::{extract::State, Json};
use serde_json::{json, Value};
use std::sync::Arc;

use frontdesk_channels::Channel;

use crate::app::AppState;

/// Short commit hash embedded by build.rs.
pub const GIT_SHA: &str = env!("FRONTDESK_GIT_SHA");

/// GET /health: liveness probe, returns server metadata.
pub async fn health_handler(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "commit": GIT_SHA,
        "channel": state.engine.channel().name(),
        "sessions": state.engine.store().len(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use frontdesk_channels::LogChannel;
    use frontdesk_core::FrontdeskConfig;

    #[tokio::test]
    async fn reports_session_count() {
        let state = Arc::new(AppState::new(
            FrontdeskConfig::default(),
            Arc::new(LogChannel),
        ));
        let Json(body) = health_handler(State(state)).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["sessions"], 0);
        assert_eq!(body["channel"], "log");
    }
}

//! Plain-text liveness responder: any request on the heartbeat port gets
//! `200 Bot Online`. Failing to bind is logged and never stops the bot.

use std::io::ErrorKind;

use axum::Router;
use tokio::{net::TcpListener, sync::watch};
use tracing::{error, info, warn};

use frontdesk_core::FrontdeskError;

pub const ONLINE: &str = "Bot Online";

pub fn router() -> Router {
    Router::new().fallback(online)
}

async fn online() -> &'static str {
    ONLINE
}

/// Serve the heartbeat until `shutdown` fires. Returns early, without
/// error, when the port cannot be bound.
pub async fn serve(bind: String, port: u16, shutdown: watch::Receiver<bool>) {
    let listener = match TcpListener::bind((bind.as_str(), port)).await {
        Ok(listener) => listener,
        Err(e) if e.kind() == ErrorKind::AddrInUse => {
            warn!(port, "heartbeat port already in use, continuing without it");
            return;
        }
        Err(e) => {
            let err = FrontdeskError::from(e);
            error!(port, error = %err, code = err.code(), "heartbeat server failed to start");
            return;
        }
    };

    info!(port, "heartbeat listening");
    if let Err(e) = axum::serve(listener, router())
        .with_graceful_shutdown(crate::shutdown::wait(shutdown))
        .await
    {
        error!(error = %e, "heartbeat server stopped with error");
    }
}

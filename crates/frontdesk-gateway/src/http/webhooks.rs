//! Inbound message ingress: POST /webhooks/inbound.
//!
//! The WhatsApp Web bridge posts one JSON event per received message. The
//! request is authenticated according to `[inbound].auth_mode`, then the
//! message is handed to the session engine inside its own task so a panic
//! while handling one contact cannot take the server down.

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    Json,
};
use hmac::{Hmac, Mac};
use serde::Deserialize;
use serde_json::{json, Value};
use sha2::Sha256;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use frontdesk_channels::{Channel, InboundMessage};
use frontdesk_core::{config::WebhookAuthMode, EventId, FrontdeskError};
use frontdesk_sessions::Outcome;

use crate::app::AppState;

type HmacSha256 = Hmac<Sha256>;

/// Bridge event name for a received message.
const MESSAGE_EVENT: &str = "onmessage";

/// Webhook envelope: the bridge puts the event name next to the message
/// fields. Payloads without `event` are treated as messages.
#[derive(Debug, Deserialize)]
struct InboundEvent {
    #[serde(default)]
    event: Option<String>,
    #[serde(flatten)]
    message: InboundMessage,
}

// ── Public handler ────────────────────────────────────────────────────────────

/// POST /webhooks/inbound
///
/// Returns 200 once the message has been processed. Delivery failures are
/// acknowledged with `"ok": false` so the bridge does not redeliver; 401 on
/// auth failure, 400 on a malformed body.
pub async fn inbound_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let cfg = &state.config.inbound;
    debug!(bytes = body.len(), "inbound webhook arrived");

    match &cfg.auth_mode {
        WebhookAuthMode::HmacSha256 => {
            verify_hmac_sha256(&headers, &body, cfg.secret.as_deref())
                .map_err(|e| auth_error(&e))?;
        }
        WebhookAuthMode::BearerToken => {
            verify_bearer_token(&headers, cfg.secret.as_deref()).map_err(|e| auth_error(&e))?;
        }
        WebhookAuthMode::None => {}
    }

    let payload: InboundEvent = serde_json::from_slice(&body).map_err(|e| {
        let err = FrontdeskError::from(e);
        warn!(error = %err, "invalid inbound webhook body");
        (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "invalid JSON body", "code": err.code()})),
        )
    })?;

    if let Some(event) = payload.event.as_deref().filter(|e| *e != MESSAGE_EVENT) {
        debug!(event = %event, "ignoring non-message bridge event");
        return Ok(Json(json!({"ok": true, "ignored": true})));
    }

    let event_id = EventId::new();
    let message = payload.message;
    let from = message.from.clone();

    let task_state = Arc::clone(&state);
    let joined = tokio::spawn(async move { task_state.engine.handle(&message).await }).await;

    let err = match joined {
        Ok(Ok(outcome)) => {
            debug!(event_id = %event_id, from = %from, outcome = ?outcome, "inbound message handled");
            return Ok(Json(ack(&event_id, &outcome)));
        }
        Ok(Err(e)) => {
            let err = FrontdeskError::Channel {
                channel: state.engine.channel().name().to_string(),
                reason: e.to_string(),
            };
            warn!(event_id = %event_id, from = %from, error = %err, "reply delivery failed");
            err
        }
        Err(e) => {
            let err = FrontdeskError::Internal(format!("message task failed: {e}"));
            error!(event_id = %event_id, from = %from, error = %err, "inbound message aborted");
            err
        }
    };

    info!(event_id = %event_id, code = err.code(), "inbound message acknowledged with error");
    Ok(Json(json!({
        "ok": false,
        "event_id": event_id,
        "code": err.code(),
        "error": err.to_string(),
    })))
}

fn ack(event_id: &EventId, outcome: &Outcome) -> Value {
    match outcome {
        Outcome::Rejected(reason) => json!({
            "ok": true,
            "event_id": event_id,
            "outcome": "rejected",
            "reason": reason.to_string(),
        }),
        Outcome::Dropped { step, reset } => json!({
            "ok": true,
            "event_id": event_id,
            "outcome": "dropped",
            "step": step,
            "reset": reset,
        }),
        Outcome::Replied { step, reset } => json!({
            "ok": true,
            "event_id": event_id,
            "outcome": "replied",
            "step": step,
            "reset": reset,
        }),
    }
}

// ── Auth helpers ──────────────────────────────────────────────────────────────

/// Verify HMAC-SHA256 of the raw body: `sha256=<hex>` in X-Hub-Signature-256.
fn verify_hmac_sha256(
    headers: &HeaderMap,
    body: &Bytes,
    secret: Option<&str>,
) -> Result<(), String> {
    let secret = secret.ok_or_else(|| "no HMAC secret configured".to_string())?;

    let sig_header = headers
        .get("x-hub-signature-256")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| "missing X-Hub-Signature-256 header".to_string())?;

    let sig_hex = sig_header
        .strip_prefix("sha256=")
        .ok_or_else(|| "malformed X-Hub-Signature-256 header".to_string())?;

    let expected =
        hex::decode(sig_hex).map_err(|_| "X-Hub-Signature-256 is not valid hex".to_string())?;

    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|_| "invalid HMAC key length".to_string())?;
    mac.update(body);

    mac.verify_slice(&expected)
        .map_err(|_| "HMAC signature mismatch".to_string())
}

/// Verify a static bearer token in the `Authorization: Bearer <token>` header.
fn verify_bearer_token(headers: &HeaderMap, secret: Option<&str>) -> Result<(), String> {
    let expected = secret.ok_or_else(|| "no bearer token configured".to_string())?;

    let auth_header = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| "missing Authorization header".to_string())?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| "Authorization header must use Bearer scheme".to_string())?;

    if token == expected {
        Ok(())
    } else {
        Err("bearer token mismatch".to_string())
    }
}

fn auth_error(reason: &str) -> (StatusCode, Json<Value>) {
    warn!(reason = %reason, "inbound webhook authentication failed");
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({"error": "authentication failed", "reason": reason})),
    )
}

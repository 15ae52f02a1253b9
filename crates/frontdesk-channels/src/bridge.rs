//! Outbound channel backed by the WhatsApp Web bridge REST API.
//!
//! The bridge owns the browser session and QR pairing; we only call its
//! `send-message` endpoint: `POST {base_url}/api/{session}/send-message`
//! with `{"phone": <address>, "isGroup": false, "message": <text>}`.

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use tracing::debug;

use frontdesk_core::config::BridgeConfig;

use crate::{channel::Channel, error::ChannelError, types::OutboundMessage};

/// Maximum number of response-body bytes quoted in an error.
const ERROR_BODY_MAX: usize = 512;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SendMessageRequest<'a> {
    phone: &'a str,
    is_group: bool,
    message: &'a str,
}

/// HTTP client for the bridge's send endpoint.
pub struct BridgeChannel {
    client: reqwest::Client,
    endpoint: String,
    token: Option<String>,
    timeout_ms: u64,
}

impl BridgeChannel {
    pub fn new(config: &BridgeConfig) -> Result<Self, ChannelError> {
        let base = config.base_url.trim_end_matches('/');
        if base.is_empty() {
            return Err(ChannelError::ConfigError("bridge.base_url is empty".into()));
        }
        if config.session.is_empty() {
            return Err(ChannelError::ConfigError("bridge.session is empty".into()));
        }
        if config.timeout_secs == 0 {
            return Err(ChannelError::ConfigError("bridge.timeout_secs must be positive".into()));
        }

        let timeout = Duration::from_secs(config.timeout_secs);
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ChannelError::ConfigError(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: format!("{base}/api/{}/send-message", config.session),
            token: config.token.clone(),
            timeout_ms: timeout.as_millis() as u64,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl Channel for BridgeChannel {
    fn name(&self) -> &str {
        "bridge"
    }

    async fn send(&self, msg: &OutboundMessage) -> Result<(), ChannelError> {
        let payload = SendMessageRequest {
            phone: msg.recipient.as_str(),
            is_group: false,
            message: &msg.content,
        };

        let mut request = self.client.post(&self.endpoint).json(&payload);
        if let Some(ref token) = self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                ChannelError::Timeout {
                    ms: self.timeout_ms,
                }
            } else {
                ChannelError::SendFailed(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let mut body = response.text().await.unwrap_or_default();
            if body.len() > ERROR_BODY_MAX {
                let mut cut = ERROR_BODY_MAX;
                while !body.is_char_boundary(cut) {
                    cut -= 1;
                }
                body.truncate(cut);
            }
            return Err(ChannelError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        debug!(recipient = %msg.recipient, status = status.as_u16(), "bridge accepted message");
        Ok(())
    }
}

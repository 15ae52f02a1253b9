use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

pub const DEFAULT_GATEWAY_PORT: u16 = 8088;
pub const DEFAULT_GATEWAY_BIND: &str = "0.0.0.0";
pub const DEFAULT_HEARTBEAT_PORT: u16 = 9090;
pub const DEFAULT_SESSION_EXPIRY_SECS: u64 = 3 * 60 * 60; // 3 hours
pub const DEFAULT_ORGANIZATION: &str = "CISPN/SENASP";
pub const DEFAULT_BRIDGE_TIMEOUT_SECS: u64 = 30;

/// Top-level config (frontdesk.toml + FRONTDESK_* env overrides).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FrontdeskConfig {
    #[serde(default)]
    pub gateway: GatewayConfig,
    #[serde(default)]
    pub heartbeat: HeartbeatConfig,
    #[serde(default)]
    pub sessions: SessionsConfig,
    #[serde(default)]
    pub bot: BotConfig,
    #[serde(default)]
    pub inbound: InboundConfig,
    /// Outbound bridge. When absent, replies are only logged.
    pub bridge: Option<BridgeConfig>,
}

/// HTTP server that receives inbound message webhooks from the bridge.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    #[serde(default = "default_gateway_port")]
    pub port: u16,
    #[serde(default = "default_gateway_bind")]
    pub bind: String,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_GATEWAY_PORT,
            bind: DEFAULT_GATEWAY_BIND.to_string(),
        }
    }
}

/// Plain-text liveness responder ("Bot Online" on any request).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeartbeatConfig {
    #[serde(default = "bool_true")]
    pub enabled: bool,
    #[serde(default = "default_heartbeat_port")]
    pub port: u16,
}

impl Default for HeartbeatConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            port: DEFAULT_HEARTBEAT_PORT,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionsConfig {
    /// Inactivity after which a conversation starts over from the menu.
    #[serde(default = "default_expiry_secs")]
    pub expiry_secs: u64,
}

impl SessionsConfig {
    pub fn expiry(&self) -> chrono::Duration {
        i64::try_from(self.expiry_secs)
            .ok()
            .and_then(chrono::Duration::try_seconds)
            .unwrap_or(chrono::Duration::MAX)
    }
}

impl Default for SessionsConfig {
    fn default() -> Self {
        Self {
            expiry_secs: DEFAULT_SESSION_EXPIRY_SECS,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BotConfig {
    /// Name used in the greeting line of the menu.
    #[serde(default = "default_organization")]
    pub organization: String,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            organization: DEFAULT_ORGANIZATION.to_string(),
        }
    }
}

/// Authentication mode for the inbound webhook.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum WebhookAuthMode {
    /// HMAC-SHA256 over the raw request body (X-Hub-Signature-256).
    HmacSha256,
    /// Static bearer token in the Authorization header.
    BearerToken,
    /// No authentication. Use only when the bridge runs on a trusted network.
    #[default]
    None,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InboundConfig {
    #[serde(default)]
    pub auth_mode: WebhookAuthMode,
    /// HMAC signing secret or bearer token value.
    pub secret: Option<String>,
}

/// WhatsApp Web bridge REST API used for outbound sends.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BridgeConfig {
    /// Base URL without trailing slash, e.g. `http://localhost:21465`.
    pub base_url: String,
    /// Bridge session name the paired phone is attached to.
    pub session: String,
    /// Bearer token issued by the bridge for `session`.
    pub token: Option<String>,
    #[serde(default = "default_bridge_timeout_secs")]
    pub timeout_secs: u64,
}

fn bool_true() -> bool {
    true
}
fn default_gateway_port() -> u16 {
    DEFAULT_GATEWAY_PORT
}
fn default_gateway_bind() -> String {
    DEFAULT_GATEWAY_BIND.to_string()
}
fn default_heartbeat_port() -> u16 {
    DEFAULT_HEARTBEAT_PORT
}
fn default_expiry_secs() -> u64 {
    DEFAULT_SESSION_EXPIRY_SECS
}
fn default_organization() -> String {
    DEFAULT_ORGANIZATION.to_string()
}
fn default_bridge_timeout_secs() -> u64 {
    DEFAULT_BRIDGE_TIMEOUT_SECS
}

impl FrontdeskConfig {
    /// Load config from a TOML file with FRONTDESK_* env var overrides.
    ///
    /// Nested keys use a double underscore:
    /// `FRONTDESK_SESSIONS__EXPIRY_SECS=60` sets `sessions.expiry_secs`.
    /// A missing file is not an error; every section has defaults. A file
    /// that exists but does not parse is.
    pub fn load(config_path: Option<&str>) -> crate::error::Result<Self> {
        let path = config_path
            .map(String::from)
            .unwrap_or_else(default_config_path);

        Self::from_figment(
            Figment::new()
                .merge(Toml::file(&path))
                .merge(Env::prefixed("FRONTDESK_").split("__")),
        )
    }

    pub fn from_figment(figment: Figment) -> crate::error::Result<Self> {
        figment
            .extract()
            .map_err(|e| crate::error::FrontdeskError::Config(e.to_string()))
    }
}

fn default_config_path() -> String {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    format!("{}/.frontdesk/frontdesk.toml", home)
}

use thiserror::Error;

/// Errors that can occur within any outbound channel.
#[derive(Debug, Error)]
pub enum ChannelError {
    /// A message could not be delivered to the remote endpoint.
    #[error("Send failed: {0}")]
    SendFailed(String),

    /// The bridge answered with a non-success HTTP status.
    #[error("Bridge returned HTTP {status}: {body}")]
    Rejected { status: u16, body: String },

    /// An operation exceeded its allowed time budget.
    #[error("Operation timed out after {ms}ms")]
    Timeout { ms: u64 },

    /// The channel-specific configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

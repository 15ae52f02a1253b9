use thiserror::Error;

#[derive(Debug, Error)]
pub enum FrontdeskError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Channel error ({channel}): {reason}")]
    Channel { channel: String, reason: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl FrontdeskError {
    /// Short error code string returned in webhook error bodies.
    pub fn code(&self) -> &'static str {
        match self {
            FrontdeskError::Config(_) => "CONFIG_ERROR",
            FrontdeskError::Channel { .. } => "CHANNEL_ERROR",
            FrontdeskError::Serialization(_) => "SERIALIZATION_ERROR",
            FrontdeskError::Io(_) => "IO_ERROR",
            FrontdeskError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

pub type Result<T> = std::result::Result<T, FrontdeskError>;

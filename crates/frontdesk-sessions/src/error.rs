use thiserror::Error;

use frontdesk_channels::ChannelError;

use crate::types::Step;

/// Errors that can occur while processing a message for a session.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The reply could not be delivered. The session already moved to `step`
    /// and is not rolled back.
    #[error("failed to deliver reply to {user} at {step}: {source}")]
    Send {
        user: String,
        step: Step,
        #[source]
        source: ChannelError,
    },
}

pub type Result<T> = std::result::Result<T, SessionError>;

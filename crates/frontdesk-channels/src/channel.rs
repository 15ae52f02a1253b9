use async_trait::async_trait;

use crate::{error::ChannelError, types::OutboundMessage};

/// Outbound side of a messaging transport.
///
/// Implementations must be `Send + Sync` so a single instance can be shared
/// by every per-user task through an `Arc`.
#[async_trait]
pub trait Channel: Send + Sync {
    /// Stable lowercase identifier for this channel (e.g. `"bridge"`).
    fn name(&self) -> &str;

    /// Deliver a single text message.
    ///
    /// Failures are returned as-is; callers decide whether to log or retry.
    async fn send(&self, msg: &OutboundMessage) -> Result<(), ChannelError>;
}

#[async_trait]
impl<T: Channel + ?Sized> Channel for std::sync::Arc<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    async fn send(&self, msg: &OutboundMessage) -> Result<(), ChannelError> {
        (**self).send(msg).await
    }
}

//! Dry-run channel: writes every reply to the log instead of sending it.
//! Selected when no `[bridge]` section is configured.

use async_trait::async_trait;
use tracing::info;

use crate::{channel::Channel, error::ChannelError, types::OutboundMessage};

#[derive(Debug, Default)]
pub struct LogChannel;

#[async_trait]
impl Channel for LogChannel {
    fn name(&self) -> &str {
        "log"
    }

    async fn send(&self, msg: &OutboundMessage) -> Result<(), ChannelError> {
        info!(recipient = %msg.recipient, content = %msg.content, "outbound message (dry run)");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn always_succeeds() {
        let msg = OutboundMessage::text("1@c.us".into(), "hello");
        assert!(LogChannel.send(&msg).await.is_ok());
        assert_eq!(LogChannel.name(), "log");
    }
}

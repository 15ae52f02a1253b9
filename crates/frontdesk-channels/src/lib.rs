pub mod bridge;
pub mod channel;
pub mod classify;
pub mod error;
pub mod log;
pub mod types;

pub use bridge::BridgeChannel;
pub use channel::Channel;
pub use classify::{classify, Classification, RejectReason};
pub use error::ChannelError;
pub use log::LogChannel;
pub use types::{InboundMessage, OutboundMessage};

use serde::{Deserialize, Serialize};

use frontdesk_core::UserAddress;

/// A message event received from the WhatsApp Web bridge.
///
/// Field names follow the bridge's webhook payload (`isGroupMsg`, `fromMe`,
/// `chatId`). Only the fields the router looks at are kept.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InboundMessage {
    /// Sender address, e.g. `5561999990000@c.us`, `1203630…@g.us`,
    /// `status@broadcast`.
    pub from: String,

    /// Message text. The bridge sends `null` or omits it for media.
    #[serde(default)]
    pub body: Option<String>,

    #[serde(default, rename = "isGroupMsg")]
    pub is_group: bool,

    #[serde(default)]
    pub from_me: bool,

    /// Conversation identifier. Status updates arrive on a `status` chat.
    #[serde(default)]
    pub chat_id: Option<String>,

    /// Bridge message type (`chat`, `image`, `ptt`, …), logged only.
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
}

impl InboundMessage {
    /// A plain one-to-one text message.
    pub fn new(from: impl Into<String>, body: impl Into<String>) -> Self {
        let from = from.into();
        Self {
            chat_id: Some(from.clone()),
            from,
            body: Some(body.into()),
            is_group: false,
            from_me: false,
            kind: Some("chat".to_string()),
        }
    }

    pub fn with_chat_id(mut self, chat_id: impl Into<String>) -> Self {
        self.chat_id = Some(chat_id.into());
        self
    }

    pub fn in_group(mut self) -> Self {
        self.is_group = true;
        self
    }

    pub fn sent_by_self(mut self) -> Self {
        self.from_me = true;
        self
    }

    /// Trimmed body text; empty when the bridge sent none.
    pub fn text(&self) -> &str {
        self.body.as_deref().unwrap_or("").trim()
    }

    pub fn sender(&self) -> UserAddress {
        UserAddress::from(self.from.as_str())
    }
}

/// A text reply to be delivered to a single contact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutboundMessage {
    pub recipient: UserAddress,
    pub content: String,
}

impl OutboundMessage {
    pub fn text(recipient: UserAddress, content: impl Into<String>) -> Self {
        Self {
            recipient,
            content: content.into(),
        }
    }
}

//! Eligibility filter for inbound bridge events.
//!
//! Only one-to-one chats with a contact reach the session engine. Groups,
//! our own echoes, status updates and anything that is not a contact address
//! are dropped here, before any session lookup.

use std::fmt;

use crate::types::InboundMessage;

/// Personal WhatsApp account suffix.
pub const PERSONAL_SUFFIX: &str = "@c.us";
/// Business accounts and the newer linked-id address form.
pub const LINKED_ID_SUFFIX: &str = "@lid";

const BROADCAST_MARKER: &str = "@broadcast";
const STATUS_MARKER: &str = "status";

/// Why an inbound event was not routed to a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    Group,
    FromSelf,
    Broadcast,
    StatusChat,
    UnsupportedAddress,
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Group => write!(f, "group message"),
            Self::FromSelf => write!(f, "sent by this account"),
            Self::Broadcast => write!(f, "broadcast sender"),
            Self::StatusChat => write!(f, "status chat"),
            Self::UnsupportedAddress => write!(f, "not a contact address"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Accept,
    Reject(RejectReason),
}

impl Classification {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Classification::Accept)
    }
}

/// Decide whether `msg` may enter session processing.
///
/// Checks run in a fixed order so the reported reason is stable:
/// group, self, broadcast sender, status chat, address suffix.
pub fn classify(msg: &InboundMessage) -> Classification {
    if msg.is_group {
        return Classification::Reject(RejectReason::Group);
    }
    if msg.from_me {
        return Classification::Reject(RejectReason::FromSelf);
    }
    if msg.from.contains(BROADCAST_MARKER) {
        return Classification::Reject(RejectReason::Broadcast);
    }
    if msg
        .chat_id
        .as_deref()
        .is_some_and(|chat| chat.contains(STATUS_MARKER))
    {
        return Classification::Reject(RejectReason::StatusChat);
    }
    if !(msg.from.ends_with(PERSONAL_SUFFIX) || msg.from.ends_with(LINKED_ID_SUFFIX)) {
        return Classification::Reject(RejectReason::UnsupportedAddress);
    }
    Classification::Accept
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reason(msg: &InboundMessage) -> Option<RejectReason> {
        match classify(msg) {
            Classification::Accept => None,
            Classification::Reject(r) => Some(r),
        }
    }

    #[test]
    fn accepts_personal_contact() {
        let msg = InboundMessage::new("5561999990000@c.us", "oi");
        assert!(classify(&msg).is_accepted());
    }

    #[test]
    fn accepts_linked_id_contact() {
        let msg = InboundMessage::new("184467440737095@lid", "oi");
        assert!(classify(&msg).is_accepted());
    }

    #[test]
    fn rejects_group_message() {
        let msg = InboundMessage::new("5561999990000@c.us", "oi").in_group();
        assert_eq!(reason(&msg), Some(RejectReason::Group));
    }

    #[test]
    fn rejects_own_message() {
        let msg = InboundMessage::new("5561999990000@c.us", "oi").sent_by_self();
        assert_eq!(reason(&msg), Some(RejectReason::FromSelf));
    }

    #[test]
    fn rejects_broadcast_sender() {
        let msg = InboundMessage::new("status@broadcast", "story");
        assert_eq!(reason(&msg), Some(RejectReason::Broadcast));
    }

    #[test]
    fn rejects_status_chat_id() {
        let msg = InboundMessage::new("5561999990000@c.us", "story").with_chat_id("status@c.us");
        assert_eq!(reason(&msg), Some(RejectReason::StatusChat));
    }

    #[test]
    fn missing_chat_id_is_not_a_status_chat() {
        let mut msg = InboundMessage::new("5561999990000@c.us", "oi");
        msg.chat_id = None;
        assert!(classify(&msg).is_accepted());
    }

    #[test]
    fn rejects_group_address_without_flag() {
        let msg = InboundMessage::new("120363025246125888@g.us", "oi");
        assert_eq!(reason(&msg), Some(RejectReason::UnsupportedAddress));
    }

    #[test]
    fn rejects_suffix_in_the_middle() {
        let msg = InboundMessage::new("5561@c.us.example", "oi");
        assert_eq!(reason(&msg), Some(RejectReason::UnsupportedAddress));
    }

    #[test]
    fn group_flag_wins_over_later_checks() {
        let msg = InboundMessage::new("status@broadcast", "x").in_group().sent_by_self();
        assert_eq!(reason(&msg), Some(RejectReason::Group));
    }

    #[test]
    fn self_wins_over_broadcast() {
        let msg = InboundMessage::new("status@broadcast", "x").sent_by_self();
        assert_eq!(reason(&msg), Some(RejectReason::FromSelf));
    }
}

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Messaging address of a contact, exactly as the bridge reports it
/// (e.g. `5561999990000@c.us`). Used as the session key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserAddress(pub String);

impl UserAddress {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for UserAddress {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for UserAddress {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Per-event identifier (random UUID, not persisted) for log correlation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EventId(pub String);

impl EventId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for EventId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

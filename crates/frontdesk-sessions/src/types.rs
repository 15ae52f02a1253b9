use std::fmt;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Where a conversation currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Step {
    /// Fresh conversation; the next message gets the menu.
    Menu,
    /// Menu reply in flight. Only observable after a failed menu send.
    SendingMenu,
    AwaitingSelection,
    AwaitingDetails,
    /// Terminal: further messages are ignored until the session expires.
    Completed,
}

impl Step {
    pub const ALL: [Step; 5] = [
        Step::Menu,
        Step::SendingMenu,
        Step::AwaitingSelection,
        Step::AwaitingDetails,
        Step::Completed,
    ];

    /// State to settle in once the reply produced by entering `self` was sent.
    pub fn after_send(self) -> Step {
        match self {
            Step::SendingMenu => Step::AwaitingSelection,
            other => other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Step::Menu => "MENU",
            Step::SendingMenu => "SENDING_MENU",
            Step::AwaitingSelection => "AWAITING_SELECTION",
            Step::AwaitingDetails => "AWAITING_DETAILS",
            Step::Completed => "COMPLETED",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// In-memory conversation record for one contact.
#[derive(Debug, Clone)]
pub struct Session {
    pub step: Step,
    pub last_interaction_at: DateTime<Local>,
    /// Title of the chosen area, once selected.
    pub selected_area: Option<String>,
    /// Greeting used in this conversation's menu.
    pub greeting: Option<String>,
}

impl Session {
    pub fn new(now: DateTime<Local>) -> Self {
        Self {
            step: Step::Menu,
            last_interaction_at: now,
            selected_area: None,
            greeting: None,
        }
    }

    /// `true` when more than `expiry` has passed since the last accepted message.
    pub fn is_expired(&self, now: DateTime<Local>, expiry: chrono::Duration) -> bool {
        now.signed_duration_since(self.last_interaction_at) > expiry
    }

    /// Record activity at `now`. Never moves the timestamp backwards.
    pub fn touch(&mut self, now: DateTime<Local>) {
        if now > self.last_interaction_at {
            self.last_interaction_at = now;
        }
    }

    /// Replace this record in place with a fresh `Menu` session.
    pub fn reset(&mut self, now: DateTime<Local>) {
        *self = Session::new(now);
    }
}

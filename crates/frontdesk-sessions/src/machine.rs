//! Pure transition function of the conversation.
//!
//! `advance` never touches the session or the network: it looks at the
//! current record and the incoming text and returns the next step, the reply
//! to send and the fields to record. The engine applies the result.

use chrono::{DateTime, Local, Timelike};

use crate::menu::{self, Script};
use crate::types::{Session, Step};

/// Outcome of feeding one message to a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub next: Step,
    pub reply: Option<String>,
    pub greeting: Option<String>,
    pub selected_area: Option<String>,
}

impl Transition {
    pub(crate) fn stay(step: Step) -> Self {
        Self {
            next: step,
            reply: None,
            greeting: None,
            selected_area: None,
        }
    }

    fn to(next: Step, reply: String) -> Self {
        Self {
            next,
            reply: Some(reply),
            greeting: None,
            selected_area: None,
        }
    }

    /// Write the new step and recorded fields into `session`, returning the
    /// reply to deliver (if any).
    pub fn apply(self, session: &mut Session) -> Option<String> {
        session.step = self.next;
        if let Some(greeting) = self.greeting {
            session.greeting = Some(greeting);
        }
        if let Some(area) = self.selected_area {
            session.selected_area = Some(area);
        }
        self.reply
    }
}

/// Compute the single legal move for `session` given the message `text`.
///
/// | step               | input            | reply        | next               |
/// |--------------------|------------------|--------------|--------------------|
/// | MENU               | any              | menu         | SENDING_MENU       |
/// | SENDING_MENU       | any              | (none)       | SENDING_MENU       |
/// | AWAITING_SELECTION | option 1–6       | confirmation | AWAITING_DETAILS   |
/// | AWAITING_SELECTION | anything else    | re-prompt    | AWAITING_SELECTION |
/// | AWAITING_DETAILS   | any              | closing      | COMPLETED          |
/// | COMPLETED          | any              | (none)       | COMPLETED          |
pub fn advance(session: &Session, text: &str, now: DateTime<Local>, script: &Script) -> Transition {
    match session.step {
        Step::Menu => {
            let greeting = menu::greeting_for_hour(now.hour());
            Transition {
                greeting: Some(greeting.to_string()),
                ..Transition::to(Step::SendingMenu, script.menu(greeting))
            }
        }
        Step::SendingMenu => Transition::stay(Step::SendingMenu),
        Step::AwaitingSelection => match menu::parse_option(text) {
            Some(option) => Transition {
                selected_area: Some(option.title.to_string()),
                ..Transition::to(Step::AwaitingDetails, script.confirmation(option))
            },
            None => Transition::to(Step::AwaitingSelection, menu::REPROMPT.to_string()),
        },
        Step::AwaitingDetails => Transition::to(Step::Completed, menu::CLOSING.to_string()),
        Step::Completed => Transition::stay(Step::Completed),
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::menu::MENU_OPTIONS;

    fn at(h: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(2026, 3, 10, h, 30, 0).unwrap()
    }

    fn session(step: Step) -> Session {
        let mut s = Session::new(at(9));
        s.step = step;
        s
    }

    fn script() -> Script {
        Script::new("CISPN/SENASP")
    }

    #[test]
    fn menu_sends_greeting_and_catalog() {
        let t = advance(&session(Step::Menu), "oi", at(9), &script());
        assert_eq!(t.next, Step::SendingMenu);
        assert_eq!(t.greeting.as_deref(), Some("Bom dia"));
        let reply = t.reply.unwrap();
        assert!(reply.starts_with("Bom dia!"));
        assert!(reply.contains(MENU_OPTIONS[5].title));
    }

    #[test]
    fn menu_greeting_follows_local_hour() {
        let afternoon = advance(&session(Step::Menu), "", at(15), &script());
        assert_eq!(afternoon.greeting.as_deref(), Some("Boa tarde"));
        let evening = advance(&session(Step::Menu), "", at(20), &script());
        assert_eq!(evening.greeting.as_deref(), Some("Boa noite"));
    }

    #[test]
    fn sending_menu_drops_input() {
        let t = advance(&session(Step::SendingMenu), "1", at(9), &script());
        assert_eq!(t, Transition::stay(Step::SendingMenu));
    }

    #[test]
    fn valid_selection_records_area() {
        let t = advance(&session(Step::AwaitingSelection), "quero a opção 3 agora", at(9), &script());
        assert_eq!(t.next, Step::AwaitingDetails);
        assert_eq!(t.selected_area.as_deref(), Some(MENU_OPTIONS[2].title));
        assert!(t.reply.unwrap().contains(MENU_OPTIONS[2].title));
    }

    #[test]
    fn invalid_selection_reprompts_without_moving() {
        let t = advance(&session(Step::AwaitingSelection), "13", at(9), &script());
        assert_eq!(t.next, Step::AwaitingSelection);
        assert_eq!(t.reply.as_deref(), Some(menu::REPROMPT));
        assert!(t.selected_area.is_none());
    }

    #[test]
    fn details_close_the_conversation() {
        let t = advance(&session(Step::AwaitingDetails), "preciso de ajuda", at(9), &script());
        assert_eq!(t.next, Step::Completed);
        assert_eq!(t.reply.as_deref(), Some(menu::CLOSING));
    }

    #[test]
    fn completed_absorbs_everything() {
        for text in ["oi", "1", "", "menu"] {
            let t = advance(&session(Step::Completed), text, at(9), &script());
            assert_eq!(t, Transition::stay(Step::Completed));
        }
    }

    #[test]
    fn every_step_maps_into_the_closed_set() {
        for step in Step::ALL {
            for text in ["", "oi", "2", "12"] {
                let t = advance(&session(step), text, at(9), &script());
                assert!(Step::ALL.contains(&t.next));
            }
        }
    }

    #[test]
    fn apply_writes_fields_and_returns_reply() {
        let mut s = session(Step::AwaitingSelection);
        s.greeting = Some("Bom dia".into());
        let reply = advance(&s, "2", at(9), &script()).apply(&mut s);
        assert_eq!(s.step, Step::AwaitingDetails);
        assert_eq!(s.selected_area.as_deref(), Some(MENU_OPTIONS[1].title));
        // greeting recorded on the menu turn is kept
        assert_eq!(s.greeting.as_deref(), Some("Bom dia"));
        assert!(reply.is_some());
    }
}

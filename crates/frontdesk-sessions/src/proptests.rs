//! Property-based tests for the conversation state machine
//!
//! These check that the step invariants hold for arbitrary text and timing.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Local, TimeZone, Timelike};
use proptest::prelude::*;

use frontdesk_channels::{Channel, ChannelError, InboundMessage, OutboundMessage};
use frontdesk_core::UserAddress;

use crate::engine::{Outcome, SessionEngine};
use crate::machine::{advance, Transition};
use crate::menu::{greeting_for_hour, parse_option, Script, MENU_OPTIONS};
use crate::types::{Session, Step};

const USER: &str = "5561999990000@c.us";
const EXPIRY_SECS: i64 = 3 * 60 * 60;

// ============================================================================
// Test Helpers
// ============================================================================

#[derive(Default)]
struct Recorder {
    sent: Mutex<Vec<OutboundMessage>>,
}

#[async_trait]
impl Channel for Recorder {
    fn name(&self) -> &str {
        "recorder"
    }

    async fn send(&self, msg: &OutboundMessage) -> Result<(), ChannelError> {
        self.sent.lock().unwrap().push(msg.clone());
        Ok(())
    }
}

fn script() -> Script {
    Script::new("CISPN/SENASP")
}

fn start() -> DateTime<Local> {
    Local.with_ymd_and_hms(2026, 3, 10, 8, 0, 0).unwrap()
}

fn session_at(step: Step, now: DateTime<Local>) -> Session {
    let mut session = Session::new(now);
    session.step = step;
    session
}

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
}

/// First token, splitting on anything that is not an ASCII word character,
/// that is a single digit 1 to 6.
fn first_bounded_digit(text: &str) -> Option<&str> {
    text.split(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .find(|token| token.len() == 1 && ("1"..="6").contains(token))
}

// ============================================================================
// Arbitrary Generators
// ============================================================================

fn arb_step() -> impl Strategy<Value = Step> {
    prop::sample::select(Step::ALL.to_vec())
}

/// Chat-like text: digits next to letters, punctuation, accents and blanks,
/// plus fully arbitrary unicode.
fn arb_text() -> impl Strategy<Value = String> {
    prop_oneof![
        "[0-9a-zA-Z _.,:!?()çãé-]{0,24}",
        any::<String>(),
    ]
}

/// Seconds between two messages, both inside and past the expiry window.
fn arb_gap() -> impl Strategy<Value = i64> {
    prop_oneof![0i64..=EXPIRY_SECS, (EXPIRY_SECS + 1)..(EXPIRY_SECS * 16)]
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn prop_advance_stays_in_closed_set(
        step in arb_step(),
        text in arb_text(),
        hour in 0u32..24,
    ) {
        let now = start().with_hour(hour).unwrap();
        let t = advance(&session_at(step, now), &text, now, &script());
        prop_assert!(Step::ALL.contains(&t.next), "left the closed set: {:?}", t.next);
    }

    #[test]
    fn prop_completed_absorbs_any_text(text in arb_text()) {
        let now = start();
        let t = advance(&session_at(Step::Completed, now), &text, now, &script());
        prop_assert_eq!(t, Transition::stay(Step::Completed));
    }

    #[test]
    fn prop_parse_option_matches_first_bounded_digit(text in arb_text()) {
        let parsed = parse_option(&text).map(|o| o.id);
        prop_assert_eq!(parsed, first_bounded_digit(&text));
    }

    #[test]
    fn prop_message_sequences_stay_in_closed_set(
        turns in proptest::collection::vec((arb_text(), arb_gap()), 1..12),
    ) {
        let engine = SessionEngine::with_settings(
            Recorder::default(),
            script(),
            Duration::seconds(EXPIRY_SECS),
        );
        let user = UserAddress::from(USER);

        runtime().block_on(async {
            let mut now = start();
            for (text, gap) in &turns {
                now += Duration::seconds(*gap);
                engine.handle_at(&InboundMessage::new(USER, text.as_str()), now).await.unwrap();
                let step = engine.store().snapshot(&user).await.unwrap().step;
                assert!(Step::ALL.contains(&step), "left the closed set: {step:?}");
            }
        });
    }

    #[test]
    fn prop_gap_past_expiry_restarts_with_menu(
        history in proptest::collection::vec(arb_text(), 1..6),
        gap in (EXPIRY_SECS + 1)..(EXPIRY_SECS * 16),
        text in arb_text(),
    ) {
        let engine = SessionEngine::with_settings(
            Recorder::default(),
            script(),
            Duration::seconds(EXPIRY_SECS),
        );

        let (outcome, last_reply, now) = runtime().block_on(async {
            let mut now = start();
            for earlier in &history {
                engine.handle_at(&InboundMessage::new(USER, earlier.as_str()), now).await.unwrap();
                now += Duration::seconds(1);
            }
            now += Duration::seconds(gap);
            let outcome = engine.handle_at(&InboundMessage::new(USER, text.as_str()), now).await.unwrap();
            let last = engine.channel().sent.lock().unwrap().last().cloned();
            (outcome, last, now)
        });

        prop_assert_eq!(outcome, Outcome::Replied { step: Step::AwaitingSelection, reset: true });
        let reply = last_reply.expect("menu was sent").content;
        prop_assert!(reply.starts_with(greeting_for_hour(now.hour())));
        prop_assert!(reply.contains(MENU_OPTIONS[0].title));
    }
}

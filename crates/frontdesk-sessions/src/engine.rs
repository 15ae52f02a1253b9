//! Message-to-reply driver: classifier, expiry, transition, send.

use chrono::{DateTime, Local};
use tracing::{debug, info, warn};

use frontdesk_channels::{classify, Channel, Classification, InboundMessage, OutboundMessage, RejectReason};
use frontdesk_core::config::FrontdeskConfig;

use crate::error::{Result, SessionError};
use crate::machine;
use crate::menu::Script;
use crate::store::SessionStore;
use crate::types::Step;

/// What happened to one inbound message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Filtered before any session lookup.
    Rejected(RejectReason),
    /// Accepted but no reply was due (busy or finished conversation).
    Dropped { step: Step, reset: bool },
    /// A reply was delivered; `step` is where the session settled.
    Replied { step: Step, reset: bool },
}

/// Owns the session store and the outbound channel.
pub struct SessionEngine<C: Channel> {
    channel: C,
    store: SessionStore,
    script: Script,
    expiry: chrono::Duration,
}

impl<C: Channel> SessionEngine<C> {
    pub fn new(channel: C, config: &FrontdeskConfig) -> Self {
        Self::with_settings(
            channel,
            Script::new(config.bot.organization.clone()),
            config.sessions.expiry(),
        )
    }

    pub fn with_settings(channel: C, script: Script, expiry: chrono::Duration) -> Self {
        Self {
            channel,
            store: SessionStore::new(),
            script,
            expiry,
        }
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    pub fn channel(&self) -> &C {
        &self.channel
    }

    /// Process `msg` at the current local time.
    pub async fn handle(&self, msg: &InboundMessage) -> Result<Outcome> {
        self.handle_at(msg, Local::now()).await
    }

    /// Process `msg` as if it arrived at `now`.
    ///
    /// The contact's session lock is held from the expiry check until the
    /// reply has been sent, so a second message from the same contact waits
    /// and then sees the settled state.
    pub async fn handle_at(&self, msg: &InboundMessage, now: DateTime<Local>) -> Result<Outcome> {
        if let Classification::Reject(reason) = classify(msg) {
            debug!(from = %msg.from, reason = %reason, "inbound message rejected");
            return Ok(Outcome::Rejected(reason));
        }

        let user = msg.sender();
        let text = msg.text();

        let handle = self.store.get_or_create(&user, now);
        let mut session = handle.lock().await;

        let reset = session.is_expired(now, self.expiry);
        if reset {
            info!(user = %user, previous = %session.step, "session expired, starting over");
            session.reset(now);
        } else {
            session.touch(now);
        }

        let previous = session.step;
        if previous == Step::AwaitingDetails {
            info!(
                user = %user,
                area = session.selected_area.as_deref().unwrap_or(""),
                details = %text,
                "details received"
            );
        }

        let reply = machine::advance(&session, text, now, &self.script).apply(&mut session);
        let Some(content) = reply else {
            debug!(user = %user, step = %session.step, "no reply due, message dropped");
            return Ok(Outcome::Dropped {
                step: session.step,
                reset,
            });
        };

        let outbound = OutboundMessage::text(user.clone(), content);
        if let Err(source) = self.channel.send(&outbound).await {
            warn!(user = %user, step = %session.step, error = %source, "reply not delivered");
            return Err(SessionError::Send {
                user: user.to_string(),
                step: session.step,
                source,
            });
        }

        session.step = session.step.after_send();
        info!(user = %user, from_step = %previous, to_step = %session.step, "reply sent");
        Ok(Outcome::Replied {
            step: session.step,
            reset,
        })
    }
}

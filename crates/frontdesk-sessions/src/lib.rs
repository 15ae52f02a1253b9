pub mod engine;
pub mod error;
pub mod machine;
pub mod menu;
pub mod store;
pub mod types;

#[cfg(test)]
mod proptests;

pub use engine::{Outcome, SessionEngine};
pub use error::SessionError;
pub use machine::{advance, Transition};
pub use menu::{MenuOption, Script, MENU_OPTIONS};
pub use store::{SessionHandle, SessionStore};
pub use types::{Session, Step};

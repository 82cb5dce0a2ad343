//! roster-bot: conversation roster bot
//!
//! Listens for connector activities on a webhook, fetches the member list of
//! the conversation it was addressed in, and posts the roster back. Also
//! announces members joining or leaving.

pub mod bot;
pub mod handler;
pub mod notify;
pub mod webhook;

pub use bot::RosterBot;

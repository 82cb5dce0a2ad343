//! roster-core: Bot Connector core library
//!
//! Configuration, wire types, token acquisition and the per-conversation
//! connector REST client shared by the roster bot crates.

pub mod auth;
pub mod config;
pub mod connector;
pub mod error;
pub mod types;

pub use auth::{BearerToken, TokenClient};
pub use config::{AuthConfig, Config, ServerConfig};
pub use connector::ConnectorClient;
pub use error::{Error, Result};
pub use types::{Activity, Address, ChannelAccount, ConversationAccount};

//! Anonymous one-to-one matchmaking and WebRTC signaling relay.
//!
//! Connections are admitted through the [`Gateway`], queued by the [`Hub`]
//! and paired in arrival order. Each pair shares a room; offers, answers,
//! ICE candidates and chat are relayed to the other member until one side
//! disconnects.

pub mod config;
pub mod connection;
pub mod error;
pub mod hub;
pub mod server;
pub mod signaling;
pub mod transport;

pub use config::{Config, ConfigError};
pub use connection::Connection;
pub use error::{HubError, IdentityError, TransportError};
pub use hub::*;
pub use server::{router, serve};
pub use signaling::*;
pub use transport::*;

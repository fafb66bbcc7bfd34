//! Error types for the matchmaking server.
//!
//! None of these ever stop the hub: transport faults end one participant's
//! session, everything else is logged and dropped.

use thiserror::Error;

/// Failure on a participant's duplex stream. Always fatal to that session.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// The peer closed the stream or it ended.
    #[error("Connection closed")]
    Closed,

    /// The underlying socket reported an error.
    #[error("Transport protocol error: {0}")]
    Protocol(String),
}

/// The hub event loop is gone and can no longer accept events.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HubError {
    #[error("Hub event loop has shut down")]
    Closed,
}

/// Identity resolution failed for an inbound connection.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IdentityError {
    /// The bearer credential was present but could not be validated.
    #[error("Invalid token: {0}")]
    InvalidToken(String),
}

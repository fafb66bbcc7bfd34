//! Integration tests for pairline-server.
//!
//! Tests are organized by functionality:
//! - `connection_tests` - admission, disconnect and teardown
//! - `messaging_tests` - relaying between matched participants
//! - `multi_peer_tests` - matchmaking order across many participants

pub mod messaging_tests;
pub mod multi_peer_tests;

use std::sync::Arc;
use tracing::Level;

use pairline_server::{Gateway, Hub, HubHandle, JwtIdentityResolver};

/// Initialize tracing for tests (call once per test).
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(Level::DEBUG)
        .with_test_writer()
        .try_init();
}

/// Spawn a hub event loop for one test.
pub fn create_test_hub() -> HubHandle {
    Hub::spawn(64)
}

/// Gateway over a fresh hub, with the default 256-frame outbound buffer.
pub fn create_test_gateway() -> Gateway {
    let identity = Arc::new(JwtIdentityResolver::new(None, "Anonymous", true));
    Gateway::new(create_test_hub(), identity, 256)
}

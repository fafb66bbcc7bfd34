use pairline_core::RoomId;
use std::sync::atomic::{AtomicU64, Ordering};

/// Hands out "1", "2", "3", ... for the lifetime of the generator.
///
/// Identifiers are never reused, even after the room they named is gone.
#[derive(Debug, Default)]
pub struct RoomIdGenerator {
    counter: AtomicU64,
}

impl RoomIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&self) -> RoomId {
        RoomId::from(self.counter.fetch_add(1, Ordering::Relaxed) + 1)
    }
}

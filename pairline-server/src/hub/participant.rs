use crate::signaling::Identity;
use pairline_core::{ParticipantId, RoomId};
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tracing::{debug, warn};

/// One admitted connection as the hub sees it.
///
/// The hub holds the only sender of the outbound buffer, so dropping the
/// participant closes the buffer and lets its write loop finish.
#[derive(Debug)]
pub struct Participant {
    id: ParticipantId,
    display_name: String,
    account_id: Option<u64>,
    room_id: Option<RoomId>,
    outbound: mpsc::Sender<String>,
}

impl Participant {
    pub fn new(id: ParticipantId, identity: Identity, outbound: mpsc::Sender<String>) -> Self {
        Self {
            id,
            display_name: identity.display_name,
            account_id: identity.account_id,
            room_id: None,
            outbound,
        }
    }

    pub fn id(&self) -> &ParticipantId {
        &self.id
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn account_id(&self) -> Option<u64> {
        self.account_id
    }

    pub fn room_id(&self) -> Option<&RoomId> {
        self.room_id.as_ref()
    }

    pub(crate) fn assign_room(&mut self, room_id: RoomId) {
        self.room_id = Some(room_id);
    }

    pub(crate) fn clear_room(&mut self) {
        self.room_id = None;
    }

    /// Non-blocking enqueue. A full buffer drops the frame.
    pub(crate) fn try_deliver(&self, frame: String) -> bool {
        match self.outbound.try_send(frame) {
            Ok(()) => true,
            Err(TrySendError::Full(_)) => {
                warn!("Outbound buffer full for {}, dropping frame", self.id);
                false
            }
            Err(TrySendError::Closed(_)) => {
                debug!("Write loop for {} already gone, dropping frame", self.id);
                false
            }
        }
    }
}

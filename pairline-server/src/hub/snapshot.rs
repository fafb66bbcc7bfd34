use crate::hub::Room;
use pairline_core::{ParticipantId, RoomId};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoomSnapshot {
    pub id: RoomId,
    pub initiator: ParticipantId,
    pub responder: ParticipantId,
}

impl From<&Room> for RoomSnapshot {
    fn from(room: &Room) -> Self {
        Self {
            id: room.id.clone(),
            initiator: room.initiator.clone(),
            responder: room.responder.clone(),
        }
    }
}

/// State of the hub as observed between two events.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HubSnapshot {
    pub participants: usize,
    /// Waiting queue, oldest first.
    pub waiting: Vec<ParticipantId>,
    pub rooms: Vec<RoomSnapshot>,
}

impl HubSnapshot {
    pub fn room(&self, room_id: &RoomId) -> Option<&RoomSnapshot> {
        self.rooms.iter().find(|room| room.id == *room_id)
    }

    pub fn is_waiting(&self, participant: &ParticipantId) -> bool {
        self.waiting.contains(participant)
    }
}

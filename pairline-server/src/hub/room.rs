use pairline_core::{ParticipantId, RoomId};

/// Two matched participants. Exists only while both are connected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Room {
    pub id: RoomId,
    /// Dequeued first; creates the offer.
    pub initiator: ParticipantId,
    pub responder: ParticipantId,
}

impl Room {
    pub fn new(id: RoomId, initiator: ParticipantId, responder: ParticipantId) -> Self {
        Self {
            id,
            initiator,
            responder,
        }
    }

    /// The member that is not `participant`, or `None` if `participant` is not in this room.
    pub fn other(&self, participant: &ParticipantId) -> Option<&ParticipantId> {
        if *participant == self.initiator {
            Some(&self.responder)
        } else if *participant == self.responder {
            Some(&self.initiator)
        } else {
            None
        }
    }
}

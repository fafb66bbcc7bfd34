mod participant;
mod room;
mod signaling;

pub use participant::ParticipantId;
pub use room::RoomId;
pub use signaling::{MessageType, SignalMessage};

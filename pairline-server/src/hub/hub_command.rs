use crate::hub::{HubSnapshot, Participant};
use pairline_core::{ParticipantId, SignalMessage};
use tokio::sync::oneshot;

/// Events delivered into the hub's serialized loop.
#[derive(Debug)]
pub enum HubCommand {
    /// A freshly connected participant: register, queue, notify, match.
    Admit(Participant),

    /// The participant's stream failed. No-op if it is already gone.
    Remove(ParticipantId),

    /// A signaling or chat message to relay to the sender's room peer.
    /// `from` is already stamped by the connection actor.
    Route(SignalMessage),

    /// Point-in-time copy of the hub state.
    Snapshot(oneshot::Sender<HubSnapshot>),
}

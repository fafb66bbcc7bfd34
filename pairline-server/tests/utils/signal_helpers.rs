use pairline_core::{ParticipantId, SignalMessage};
use pairline_server::{Identity, Participant};
use tokio::sync::mpsc;

/// A participant admitted straight into the hub, without a connection
/// actor. Nothing drains its outbound buffer except the test.
pub fn test_participant(id: &str, buffer: usize) -> (Participant, mpsc::Receiver<String>) {
    let (tx, rx) = mpsc::channel(buffer);
    let participant = Participant::new(ParticipantId::from(id), Identity::anonymous(id), tx);
    (participant, rx)
}

/// Everything currently sitting in an outbound buffer, parsed.
///
/// Call after `HubHandle::snapshot` so every earlier event has been processed.
pub fn drain(rx: &mut mpsc::Receiver<String>) -> Vec<SignalMessage> {
    let mut messages = Vec::new();
    while let Ok(frame) = rx.try_recv() {
        match serde_json::from_str(&frame) {
            Ok(msg) => messages.push(msg),
            Err(e) => panic!("Unparseable frame {frame}: {e}"),
        }
    }
    messages
}

/// True once the hub has dropped the participant's buffer.
pub fn is_closed(rx: &mut mpsc::Receiver<String>) -> bool {
    matches!(
        rx.try_recv(),
        Err(mpsc::error::TryRecvError::Disconnected)
    )
}

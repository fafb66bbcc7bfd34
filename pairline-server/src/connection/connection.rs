use crate::hub::HubHandle;
use crate::transport::{Transport, TransportSink, TransportStream};
use pairline_core::{ParticipantId, SignalMessage};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Read and write loops bridging one participant's transport to the hub.
///
/// Either loop failing on the transport unregisters the participant. The
/// write loop otherwise runs until the hub drops the participant and with
/// it the outbound buffer.
pub struct Connection<T: Transport> {
    participant_id: ParticipantId,
    transport: T,
    outbound_rx: mpsc::Receiver<String>,
    hub: HubHandle,
}

impl<T: Transport> Connection<T> {
    pub fn new(
        participant_id: ParticipantId,
        transport: T,
        outbound_rx: mpsc::Receiver<String>,
        hub: HubHandle,
    ) -> Self {
        Self {
            participant_id,
            transport,
            outbound_rx,
            hub,
        }
    }

    pub fn spawn(self) {
        let (sink, stream) = self.transport.split();

        tokio::spawn(write_loop(
            self.participant_id.clone(),
            sink,
            self.outbound_rx,
            self.hub.clone(),
        ));
        tokio::spawn(read_loop(self.participant_id, stream, self.hub));
    }
}

async fn read_loop<S: TransportStream>(
    participant_id: ParticipantId,
    mut stream: S,
    hub: HubHandle,
) {
    loop {
        let frame = match stream.recv().await {
            Ok(frame) => frame,
            Err(e) => {
                info!("Read from {} ended: {}", participant_id, e);
                break;
            }
        };

        let mut message = match serde_json::from_str::<SignalMessage>(&frame) {
            Ok(message) => message,
            Err(e) => {
                warn!("Invalid SignalMessage from {}: {}", participant_id, e);
                continue;
            }
        };

        message.from = Some(participant_id.clone());

        if !message.kind.is_routable() {
            warn!(
                "Unknown message type '{}' from {}, dropping",
                message.kind, participant_id
            );
            continue;
        }

        if hub.route(message).await.is_err() {
            warn!("Hub is gone, closing read loop for {}", participant_id);
            break;
        }
    }

    let _ = hub.remove(participant_id).await;
}

async fn write_loop<K: TransportSink>(
    participant_id: ParticipantId,
    mut sink: K,
    mut outbound_rx: mpsc::Receiver<String>,
    hub: HubHandle,
) {
    while let Some(frame) = outbound_rx.recv().await {
        if let Err(e) = sink.send(frame).await {
            warn!("Failed to write to {}: {}", participant_id, e);
            sink.close().await;
            // The read half may stay blocked, so unregister from here too.
            let _ = hub.remove(participant_id.clone()).await;
            debug!("Write loop for {} aborted", participant_id);
            return;
        }
    }

    sink.close().await;
    debug!("Write loop for {} finished", participant_id);
}

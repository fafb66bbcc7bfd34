use crate::connection::Connection;
use crate::error::IdentityError;
use crate::hub::{HubHandle, Participant};
use crate::signaling::{Identity, IdentityResolver};
use crate::transport::Transport;
use pairline_core::ParticipantId;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{error, info};

struct GatewayInner {
    identity: Arc<dyn IdentityResolver>,
    outbound_buffer: usize,
}

/// Admission point for new connections.
#[derive(Clone)]
pub struct Gateway {
    inner: Arc<GatewayInner>,
    hub: HubHandle,
}

impl Gateway {
    pub fn new(hub: HubHandle, identity: Arc<dyn IdentityResolver>, outbound_buffer: usize) -> Self {
        Self {
            inner: Arc::new(GatewayInner {
                identity,
                outbound_buffer: outbound_buffer.max(1),
            }),
            hub,
        }
    }

    pub fn hub(&self) -> &HubHandle {
        &self.hub
    }

    pub async fn resolve_identity(
        &self,
        credential: Option<&str>,
        requested_name: Option<&str>,
    ) -> Result<Identity, IdentityError> {
        self.inner.identity.resolve(credential, requested_name).await
    }

    /// Register a connection with the hub and start its read and write loops.
    ///
    /// The admission is queued before the read loop starts, so every message
    /// the participant sends is processed after it is registered. If the hub
    /// is gone the participant is dropped, which closes the transport.
    pub async fn admit<T: Transport>(&self, identity: Identity, transport: T) -> ParticipantId {
        let participant_id = ParticipantId::new();
        let (outbound_tx, outbound_rx) = mpsc::channel(self.inner.outbound_buffer);

        info!(
            "New connection {} as '{}'",
            participant_id, identity.display_name
        );

        let participant = Participant::new(participant_id.clone(), identity, outbound_tx);
        if let Err(e) = self.hub.admit(participant).await {
            error!("Failed to admit {}: {}", participant_id, e);
        }

        Connection::new(
            participant_id.clone(),
            transport,
            outbound_rx,
            self.hub.clone(),
        )
        .spawn();

        participant_id
    }
}

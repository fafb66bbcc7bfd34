use anyhow::{Context, Result, bail};
use pairline_core::{MessageType, ParticipantId, SignalMessage};
use pairline_server::{Gateway, Identity, TransportError};
use serde_json::Value;
use std::sync::atomic::Ordering;
use std::time::Duration;

use super::mock_transport::{MockRemote, MockTransport};

/// Timeout for a frame the test expects to arrive (ms).
pub const RECV_TIMEOUT_MS: u64 = 2000;

/// How long to listen before concluding nothing will arrive (ms).
pub const SILENCE_MS: u64 = 200;

/// A participant driven by the test through a [`MockTransport`].
pub struct TestClient {
    /// Identifier the gateway assigned on admission.
    pub id: ParticipantId,
    remote: MockRemote,
}

impl TestClient {
    /// Admit a new anonymous participant through the gateway.
    pub async fn connect(gateway: &Gateway, name: &str) -> Self {
        let (transport, remote) = MockTransport::pair();
        let id = gateway.admit(Identity::anonymous(name), transport).await;
        tracing::debug!("[TestClient] {} connected as {}", name, id);
        Self { id, remote }
    }

    /// Send a JSON frame as the browser would.
    pub fn send_json(&self, value: Value) {
        self.send_raw(&value.to_string());
    }

    pub fn send_raw(&self, frame: &str) {
        let _ = self.remote.inbound_tx.send(Ok(frame.to_owned()));
    }

    /// Make the next read fail, as if the socket dropped.
    pub fn fail_read(&self) {
        let _ = self
            .remote
            .inbound_tx
            .send(Err(TransportError::Protocol("connection reset".to_owned())));
    }

    /// Make every later write to this client fail.
    pub fn fail_writes(&self) {
        self.remote.closed.store(true, Ordering::SeqCst);
    }

    /// Next frame written to this client, parsed.
    pub async fn recv(&mut self) -> Result<SignalMessage> {
        let frame = tokio::time::timeout(
            Duration::from_millis(RECV_TIMEOUT_MS),
            self.remote.outbound_rx.recv(),
        )
        .await
        .context("Timed out waiting for a frame")?
        .context("Write loop closed")?;

        serde_json::from_str(&frame).with_context(|| format!("Unparseable frame: {frame}"))
    }

    /// Next frame, which must have the given type.
    pub async fn expect(&mut self, kind: MessageType) -> Result<SignalMessage> {
        let msg = self.recv().await?;
        if msg.kind != kind {
            bail!("Expected {}, got {:?}", kind, msg);
        }
        Ok(msg)
    }

    /// True if nothing is delivered within [`SILENCE_MS`].
    pub async fn is_silent(&mut self) -> bool {
        matches!(
            tokio::time::timeout(
                Duration::from_millis(SILENCE_MS),
                self.remote.outbound_rx.recv()
            )
            .await,
            Err(_) | Ok(None)
        )
    }

    pub fn is_closed(&self) -> bool {
        self.remote.closed.load(Ordering::SeqCst)
    }

    /// Wait until the write loop has closed the transport.
    pub async fn wait_closed(&self) -> bool {
        let deadline = tokio::time::Instant::now() + Duration::from_millis(RECV_TIMEOUT_MS);
        while tokio::time::Instant::now() < deadline {
            if self.is_closed() {
                return true;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        false
    }
}

use crate::error::TransportError;
use async_trait::async_trait;

/// A message-framed duplex stream to one participant.
///
/// The connection actor reads and writes from two independent tasks, so a
/// transport is split into its halves before use.
pub trait Transport: Send + 'static {
    type Sink: TransportSink;
    type Stream: TransportStream;

    fn split(self) -> (Self::Sink, Self::Stream);
}

/// Receiving half. Any error is terminal for the session.
#[async_trait]
pub trait TransportStream: Send + 'static {
    /// Wait for the next text frame.
    async fn recv(&mut self) -> Result<String, TransportError>;
}

/// Sending half.
#[async_trait]
pub trait TransportSink: Send + 'static {
    async fn send(&mut self, frame: String) -> Result<(), TransportError>;

    /// Close the stream. Errors are ignored, the session is over either way.
    async fn close(&mut self);
}

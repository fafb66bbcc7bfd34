use crate::error::TransportError;
use crate::transport::{Transport, TransportSink, TransportStream};
use async_trait::async_trait;
use axum::extract::ws::{Message, WebSocket};
use futures::stream::{SplitSink, SplitStream};
use futures::{SinkExt, StreamExt};
use tracing::trace;

/// [`Transport`] over an upgraded axum websocket.
pub struct WsTransport {
    socket: WebSocket,
}

impl WsTransport {
    pub fn new(socket: WebSocket) -> Self {
        Self { socket }
    }
}

impl Transport for WsTransport {
    type Sink = WsSink;
    type Stream = WsStream;

    fn split(self) -> (WsSink, WsStream) {
        let (sender, receiver) = self.socket.split();
        (WsSink { sender }, WsStream { receiver })
    }
}

pub struct WsSink {
    sender: SplitSink<WebSocket, Message>,
}

pub struct WsStream {
    receiver: SplitStream<WebSocket>,
}

#[async_trait]
impl TransportStream for WsStream {
    async fn recv(&mut self) -> Result<String, TransportError> {
        loop {
            let msg = match self.receiver.next().await {
                Some(Ok(msg)) => msg,
                Some(Err(e)) => return Err(TransportError::Protocol(e.to_string())),
                None => return Err(TransportError::Closed),
            };

            match msg {
                Message::Text(text) => return Ok(text.as_str().to_owned()),
                // Binary payloads are not part of the protocol; let the parser reject them.
                Message::Binary(data) => return Ok(String::from_utf8_lossy(&data).into_owned()),
                Message::Close(frame) => {
                    trace!("Close frame received: {:?}", frame);
                    return Err(TransportError::Closed);
                }
                Message::Ping(_) | Message::Pong(_) => continue,
            }
        }
    }
}

#[async_trait]
impl TransportSink for WsSink {
    async fn send(&mut self, frame: String) -> Result<(), TransportError> {
        self.sender
            .send(Message::Text(frame.into()))
            .await
            .map_err(|e| TransportError::Protocol(e.to_string()))
    }

    async fn close(&mut self) {
        let _ = self.sender.close().await;
    }
}

use crate::model::participant::ParticipantId;
use crate::model::room::RoomId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The `type` tag of a [`SignalMessage`].
///
/// Unknown tags survive parsing as [`MessageType::Other`] so the receiver can
/// log what it is dropping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MessageType {
    /// Server → client, sent right after admission.
    Lobby,
    /// Server → client, the participant must create the offer.
    SendOffer,
    /// Server → client, the participant must wait for the offer.
    MatchFound,
    Offer,
    Answer,
    AddIceCandidate,
    Chat,
    Typing,
    /// Server → client, the room peer went away.
    UserDisconnected,
    Other(String),
}

impl MessageType {
    pub fn as_str(&self) -> &str {
        match self {
            MessageType::Lobby => "lobby",
            MessageType::SendOffer => "send-offer",
            MessageType::MatchFound => "match-found",
            MessageType::Offer => "offer",
            MessageType::Answer => "answer",
            MessageType::AddIceCandidate => "add-ice-candidate",
            MessageType::Chat => "chat",
            MessageType::Typing => "typing",
            MessageType::UserDisconnected => "user-disconnected",
            MessageType::Other(tag) => tag,
        }
    }

    /// Signaling and conversational types, relayed verbatim to the room peer.
    pub fn is_routable(&self) -> bool {
        matches!(
            self,
            MessageType::Offer
                | MessageType::Answer
                | MessageType::AddIceCandidate
                | MessageType::Chat
                | MessageType::Typing
        )
    }
}

impl From<String> for MessageType {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "lobby" => MessageType::Lobby,
            "send-offer" => MessageType::SendOffer,
            "match-found" => MessageType::MatchFound,
            "offer" => MessageType::Offer,
            "answer" => MessageType::Answer,
            "add-ice-candidate" => MessageType::AddIceCandidate,
            "chat" => MessageType::Chat,
            "typing" => MessageType::Typing,
            "user-disconnected" => MessageType::UserDisconnected,
            _ => MessageType::Other(tag),
        }
    }
}

impl From<MessageType> for String {
    fn from(kind: MessageType) -> Self {
        match kind {
            MessageType::Other(tag) => tag,
            known => known.as_str().to_owned(),
        }
    }
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Signaling envelope exchanged over the websocket as a JSON object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignalMessage {
    #[serde(rename = "type")]
    pub kind: MessageType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room_id: Option<RoomId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sdp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub candidate: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cand_type: Option<String>,
    /// Always stamped by the server; whatever the client puts here is overwritten.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<ParticipantId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl SignalMessage {
    pub fn new(kind: MessageType) -> Self {
        Self {
            kind,
            room_id: None,
            sdp: None,
            candidate: None,
            cand_type: None,
            from: None,
            text: None,
        }
    }

    pub fn lobby() -> Self {
        Self::new(MessageType::Lobby)
    }

    pub fn send_offer(room_id: RoomId) -> Self {
        Self {
            room_id: Some(room_id),
            ..Self::new(MessageType::SendOffer)
        }
    }

    pub fn match_found(room_id: RoomId) -> Self {
        Self {
            room_id: Some(room_id),
            ..Self::new(MessageType::MatchFound)
        }
    }

    pub fn user_disconnected() -> Self {
        Self::new(MessageType::UserDisconnected)
    }
}

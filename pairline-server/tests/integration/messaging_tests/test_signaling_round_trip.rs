use pairline_core::MessageType;
use serde_json::json;

use crate::integration::{create_test_gateway, init_tracing};
use crate::utils::TestClient;

#[tokio::test]
async fn test_signaling_round_trip() {
    init_tracing();

    let gateway = create_test_gateway();
    let mut alice = TestClient::connect(&gateway, "alice").await;
    let mut bob = TestClient::connect(&gateway, "bob").await;

    alice.expect(MessageType::Lobby).await.unwrap();
    alice.expect(MessageType::SendOffer).await.unwrap();
    bob.expect(MessageType::Lobby).await.unwrap();
    bob.expect(MessageType::MatchFound).await.unwrap();

    alice.send_json(json!({"type": "offer", "roomId": "1", "sdp": "offer-sdp"}));
    bob.expect(MessageType::Offer).await.unwrap();

    bob.send_json(json!({"type": "answer", "roomId": "1", "sdp": "answer-sdp"}));
    let answer = alice.expect(MessageType::Answer).await.unwrap();
    assert_eq!(answer.sdp.as_deref(), Some("answer-sdp"));

    let candidate = json!({
        "candidate": "candidate:842163049 1 udp 1677729535 203.0.113.7 46154 typ srflx",
        "sdpMid": "0",
        "sdpMLineIndex": 0
    });
    bob.send_json(json!({
        "type": "add-ice-candidate",
        "roomId": "1",
        "candidate": candidate.clone(),
        "candType": "receiver"
    }));
    let ice = alice.expect(MessageType::AddIceCandidate).await.unwrap();
    assert_eq!(ice.candidate, Some(candidate));
    assert_eq!(ice.cand_type.as_deref(), Some("receiver"));
    assert_eq!(ice.from, Some(bob.id.clone()));

    alice.send_json(json!({"type": "typing", "roomId": "1"}));
    bob.expect(MessageType::Typing).await.unwrap();

    bob.send_json(json!({"type": "chat", "roomId": "1", "text": "hey there"}));
    let chat = alice.expect(MessageType::Chat).await.unwrap();
    assert_eq!(chat.text.as_deref(), Some("hey there"));

    assert!(alice.is_silent().await);
    assert!(bob.is_silent().await);
}

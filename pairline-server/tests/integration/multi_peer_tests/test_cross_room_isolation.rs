use pairline_core::{MessageType, ParticipantId, RoomId, SignalMessage};

use crate::integration::{create_test_hub, init_tracing};
use crate::utils::{drain, test_participant};

#[tokio::test]
async fn test_message_to_foreign_room_is_dropped() {
    init_tracing();

    let hub = create_test_hub();
    let (a, mut a_rx) = test_participant("a", 16);
    let (b, mut b_rx) = test_participant("b", 16);
    let (c, _c_rx) = test_participant("c", 16);
    let (d, mut d_rx) = test_participant("d", 16);

    for participant in [a, b, c, d] {
        hub.admit(participant).await.unwrap();
    }
    hub.snapshot().await.unwrap();
    drain(&mut a_rx);
    drain(&mut b_rx);
    drain(&mut d_rx);

    // c belongs to room 2 but addresses room 1.
    let intrusion = SignalMessage {
        room_id: Some(RoomId::from(1)),
        from: Some(ParticipantId::from("c")),
        sdp: Some("bogus".to_owned()),
        ..SignalMessage::new(MessageType::Offer)
    };
    hub.route(intrusion).await.unwrap();

    let nowhere = SignalMessage {
        room_id: Some(RoomId::from(42)),
        from: Some(ParticipantId::from("c")),
        ..SignalMessage::new(MessageType::Chat)
    };
    hub.route(nowhere).await.unwrap();

    hub.snapshot().await.unwrap();
    assert!(drain(&mut a_rx).is_empty());
    assert!(drain(&mut b_rx).is_empty());
    assert!(drain(&mut d_rx).is_empty());
}

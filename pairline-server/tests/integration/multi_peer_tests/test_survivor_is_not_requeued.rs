use pairline_core::{MessageType, ParticipantId, RoomId};

use crate::integration::{create_test_hub, init_tracing};
use crate::utils::{drain, is_closed, test_participant};

#[tokio::test]
async fn test_survivor_is_not_requeued() {
    init_tracing();

    let hub = create_test_hub();
    let (a, mut a_rx) = test_participant("a", 16);
    let (b, mut b_rx) = test_participant("b", 16);
    let (c, mut c_rx) = test_participant("c", 16);

    hub.admit(a).await.unwrap();
    hub.admit(b).await.unwrap();
    hub.snapshot().await.unwrap();
    drain(&mut a_rx);
    drain(&mut b_rx);

    hub.remove(ParticipantId::from("a")).await.unwrap();
    let snapshot = hub.snapshot().await.unwrap();

    assert!(snapshot.room(&RoomId::from(1)).is_none());
    assert!(snapshot.waiting.is_empty(), "Survivor stays out of the queue");
    assert_eq!(snapshot.participants, 1);

    let b_frames = drain(&mut b_rx);
    assert_eq!(b_frames.len(), 1);
    assert_eq!(b_frames[0].kind, MessageType::UserDisconnected);
    assert!(is_closed(&mut a_rx));

    // A newcomer waits alone instead of pairing with the survivor.
    hub.admit(c).await.unwrap();
    let snapshot = hub.snapshot().await.unwrap();
    assert_eq!(snapshot.waiting, vec![ParticipantId::from("c")]);
    assert!(snapshot.rooms.is_empty());

    let c_kinds: Vec<_> = drain(&mut c_rx).into_iter().map(|m| m.kind).collect();
    assert_eq!(c_kinds, vec![MessageType::Lobby]);

    // The survivor leaving later notifies nobody.
    hub.remove(ParticipantId::from("b")).await.unwrap();
    hub.snapshot().await.unwrap();
    assert!(drain(&mut c_rx).is_empty());
}

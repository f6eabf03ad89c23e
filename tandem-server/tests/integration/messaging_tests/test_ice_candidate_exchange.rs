use serde_json::json;
use tandem_core::{ClientEvent, PeerId, RoomId, ServerEvent};

use crate::integration::{create_test_relay, init_tracing};
use crate::utils::{pair, settle};

fn candidate(n: u32) -> serde_json::Value {
    json!({
        "candidate": format!("candidate:{} 1 udp 2122260223 192.168.1.{} 5000{} typ host", n, n, n),
        "sdpMid": "0",
        "sdpMLineIndex": 0
    })
}

#[tokio::test]
async fn test_ice_candidate_exchange() {
    init_tracing();

    let (relay, signaling, _signal_rx) = create_test_relay();
    let (a, b) = (PeerId::new(), PeerId::new());
    let room = RoomId::from("ice");

    pair(&relay, &a, &b, "ice").await.unwrap();

    for n in 1..=3 {
        relay
            .dispatch(
                a.clone(),
                ClientEvent::IceCandidate {
                    room_id: room.clone(),
                    candidate: candidate(n),
                },
            )
            .await
            .unwrap();
    }
    relay
        .dispatch(
            b.clone(),
            ClientEvent::IceCandidate {
                room_id: room.clone(),
                candidate: candidate(9),
            },
        )
        .await
        .unwrap();
    settle(&relay).await.unwrap();

    let to_b: Vec<_> = signaling
        .events_for(&b)
        .await
        .into_iter()
        .filter(|e| matches!(e, ServerEvent::IceCandidate(_)))
        .collect();
    assert_eq!(
        to_b,
        vec![
            ServerEvent::IceCandidate(candidate(1)),
            ServerEvent::IceCandidate(candidate(2)),
            ServerEvent::IceCandidate(candidate(3)),
        ],
        "Candidates must arrive in the order they were sent"
    );

    let to_a: Vec<_> = signaling
        .events_for(&a)
        .await
        .into_iter()
        .filter(|e| matches!(e, ServerEvent::IceCandidate(_)))
        .collect();
    assert_eq!(to_a, vec![ServerEvent::IceCandidate(candidate(9))]);
}

use serde_json::json;
use tandem_core::{ClientEvent, RoomId, ServerEvent};
use tandem_server::{ServerConfig, serve_with_listener};
use tokio::net::TcpListener;
use tokio::sync::oneshot;

use crate::integration::init_tracing;
use crate::utils::{connect, next_event, send_event, send_raw};

#[tokio::test]
async fn test_websocket_session() {
    init_tracing();

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().unwrap();
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    let server = tokio::spawn(serve_with_listener(
        listener,
        ServerConfig::new(addr),
        async move {
            let _ = shutdown_rx.await;
        },
    ));

    let (mut alice, alice_id) = connect(addr).await.expect("Alice failed to connect");
    let (mut bob, bob_id) = connect(addr).await.expect("Bob failed to connect");
    assert_ne!(alice_id, bob_id);

    let room = RoomId::from("r1");
    send_event(&mut alice, &ClientEvent::Join(room.clone()))
        .await
        .unwrap();
    send_event(&mut bob, &ClientEvent::Join(room.clone()))
        .await
        .unwrap();

    let ServerEvent::Ready(initiator) = next_event(&mut alice).await.unwrap() else {
        panic!("Alice expected ready");
    };
    assert_eq!(
        next_event(&mut bob).await.unwrap(),
        ServerEvent::Ready(initiator.clone())
    );
    assert!(initiator == alice_id || initiator == bob_id);

    let (caller, callee) = if initiator == alice_id {
        (&mut alice, &mut bob)
    } else {
        (&mut bob, &mut alice)
    };

    // Junk frames are skipped without closing the socket.
    send_raw(callee, "not json").await.unwrap();

    let offer = json!({"type": "offer", "sdp": "SDP1"});
    send_event(
        caller,
        &ClientEvent::Offer {
            room_id: room.clone(),
            offer: offer.clone(),
        },
    )
    .await
    .unwrap();
    assert_eq!(next_event(callee).await.unwrap(), ServerEvent::Offer(offer));

    let answer = json!({"type": "answer", "sdp": "SDP2"});
    send_event(
        callee,
        &ClientEvent::Answer {
            room_id: room.clone(),
            answer: answer.clone(),
        },
    )
    .await
    .unwrap();
    assert_eq!(
        next_event(caller).await.unwrap(),
        ServerEvent::Answer(answer)
    );

    let (mut carol, _) = connect(addr).await.expect("Carol failed to connect");
    send_event(&mut carol, &ClientEvent::Join(room.clone()))
        .await
        .unwrap();
    assert_eq!(next_event(&mut carol).await.unwrap(), ServerEvent::RoomFull);

    caller.close(None).await.unwrap();
    assert_eq!(
        next_event(callee).await.unwrap(),
        ServerEvent::PeerDisconnected
    );

    drop(alice);
    drop(bob);
    drop(carol);
    let _ = shutdown_tx.send(());
    let _ = tokio::time::timeout(std::time::Duration::from_secs(5), server).await;
}

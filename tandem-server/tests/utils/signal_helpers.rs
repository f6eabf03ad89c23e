use anyhow::Result;
use tandem_core::{ClientEvent, PeerId, RoomId, ServerEvent};
use tandem_server::RelayHandle;
use tokio::sync::mpsc;

use super::mock_signaling::Delivered;

/// Timeout for a single expected delivery (ms).
pub const SIGNAL_TIMEOUT_MS: u64 = 5000;

/// Waits for the next event delivered to `peer_id`, skipping other peers' traffic.
pub async fn wait_for_event(
    rx: &mut mpsc::UnboundedReceiver<Delivered>,
    peer_id: &PeerId,
) -> Result<ServerEvent> {
    let timeout = std::time::Duration::from_millis(SIGNAL_TIMEOUT_MS);

    tokio::time::timeout(timeout, async {
        loop {
            match rx.recv().await {
                Some(Delivered { peer_id: id, event }) if &id == peer_id => return Ok(event),
                Some(_) => continue,
                None => anyhow::bail!("Signal channel closed"),
            }
        }
    })
    .await
    .map_err(|_| anyhow::anyhow!("Timeout waiting for event to {}", peer_id))?
}

/// Returns once the relay has handled every command queued before this call.
pub async fn settle(relay: &RelayHandle) -> Result<()> {
    relay.participants(RoomId::from("")).await?;
    Ok(())
}

pub async fn join(relay: &RelayHandle, peer_id: &PeerId, room: &str) -> Result<()> {
    relay
        .dispatch(peer_id.clone(), ClientEvent::Join(RoomId::from(room)))
        .await?;
    Ok(())
}

/// Joins `a` then `b` to `room` and waits until both are seated.
pub async fn pair(relay: &RelayHandle, a: &PeerId, b: &PeerId, room: &str) -> Result<()> {
    join(relay, a, room).await?;
    join(relay, b, room).await?;
    settle(relay).await
}

use async_trait::async_trait;
use tandem_core::{PeerId, ServerEvent};

/// Outbound side of the relay: delivers one event to one connection.
///
/// Implemented over WebSockets by [`crate::SignalingService`]; the relay
/// never learns how a peer is reached.
#[async_trait]
pub trait SignalingOutput: Send + Sync {
    async fn send(&self, peer_id: PeerId, event: ServerEvent);
}

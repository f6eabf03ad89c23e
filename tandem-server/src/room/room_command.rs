use tandem_core::{ClientEvent, PeerId, RoomId, ServerEvent};
use tokio::sync::oneshot;

/// Commands sent from the signaling connections to the relay event loop.
#[derive(Debug)]
pub enum RoomCommand {
    /// A connection asks for a seat in a room.
    Join { peer_id: PeerId, room_id: RoomId },

    /// Offer, answer or ICE candidate addressed to the other seat of a room.
    Forward {
        peer_id: PeerId,
        room_id: RoomId,
        event: ServerEvent,
    },

    /// The connection is gone. Sent exactly once per connection.
    Disconnect { peer_id: PeerId },

    /// Snapshot of a room's seats in join order.
    Participants {
        room_id: RoomId,
        reply: oneshot::Sender<Vec<PeerId>>,
    },
}

impl RoomCommand {
    pub fn from_client_event(peer_id: PeerId, event: ClientEvent) -> Self {
        match event {
            ClientEvent::Join(room_id) => RoomCommand::Join { peer_id, room_id },
            ClientEvent::Offer { room_id, offer } => RoomCommand::Forward {
                peer_id,
                room_id,
                event: ServerEvent::Offer(offer),
            },
            ClientEvent::Answer { room_id, answer } => RoomCommand::Forward {
                peer_id,
                room_id,
                event: ServerEvent::Answer(answer),
            },
            ClientEvent::IceCandidate { room_id, candidate } => RoomCommand::Forward {
                peer_id,
                room_id,
                event: ServerEvent::IceCandidate(candidate),
            },
        }
    }
}

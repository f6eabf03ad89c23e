use crate::model::peer::PeerId;
use crate::model::room::RoomId;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Events a client sends over its signaling socket.
///
/// Session descriptions and candidates are opaque to the relay and are
/// kept as raw JSON values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data")]
pub enum ClientEvent {
    #[serde(rename = "join")]
    Join(RoomId),
    #[serde(rename = "offer")]
    Offer {
        #[serde(rename = "roomId")]
        room_id: RoomId,
        offer: Value,
    },
    #[serde(rename = "answer")]
    Answer {
        #[serde(rename = "roomId")]
        room_id: RoomId,
        answer: Value,
    },
    #[serde(rename = "ice-candidate")]
    IceCandidate {
        #[serde(rename = "roomId")]
        room_id: RoomId,
        candidate: Value,
    },
}

/// Events the relay delivers to a single client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data")]
pub enum ServerEvent {
    /// First frame on every connection: the id the relay assigned to it.
    #[serde(rename = "welcome")]
    Welcome(PeerId),
    /// Both seats are taken; carries the id of the peer that must send the offer.
    #[serde(rename = "ready")]
    Ready(PeerId),
    #[serde(rename = "room_full")]
    RoomFull,
    #[serde(rename = "offer")]
    Offer(Value),
    #[serde(rename = "answer")]
    Answer(Value),
    #[serde(rename = "ice-candidate")]
    IceCandidate(Value),
    #[serde(rename = "peer-disconnected")]
    PeerDisconnected,
}

impl ServerEvent {
    pub fn name(&self) -> &'static str {
        match self {
            ServerEvent::Welcome(_) => "welcome",
            ServerEvent::Ready(_) => "ready",
            ServerEvent::RoomFull => "room_full",
            ServerEvent::Offer(_) => "offer",
            ServerEvent::Answer(_) => "answer",
            ServerEvent::IceCandidate(_) => "ice-candidate",
            ServerEvent::PeerDisconnected => "peer-disconnected",
        }
    }
}

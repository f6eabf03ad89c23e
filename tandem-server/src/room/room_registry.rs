use crate::room::Room;
use std::collections::HashMap;
use tandem_core::{PeerId, RoomId};

/// Outcome of [`RoomRegistry::join`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JoinResult {
    /// The peer took a seat. `initiator` is set once the second seat is filled.
    Joined {
        count: usize,
        initiator: Option<PeerId>,
    },
    /// Both seats were already taken by others; the peer was not added.
    RoomFull,
    /// The peer already holds a seat in this room and was not added twice.
    AlreadyJoined,
}

/// Which peers occupy which rooms.
///
/// `memberships` mirrors `rooms` so that a disconnect does not need to scan
/// every room; it lists each peer's rooms in join order. Both maps are only
/// ever changed together.
#[derive(Debug, Default)]
pub struct RoomRegistry {
    rooms: HashMap<RoomId, Room>,
    memberships: HashMap<PeerId, Vec<RoomId>>,
}

impl RoomRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn join(&mut self, room_id: &RoomId, peer_id: PeerId) -> JoinResult {
        let room = self.rooms.entry(room_id.clone()).or_default();
        if room.contains(&peer_id) {
            return JoinResult::AlreadyJoined;
        }
        if room.is_full() {
            return JoinResult::RoomFull;
        }

        room.push(peer_id.clone());
        self.memberships
            .entry(peer_id)
            .or_default()
            .push(room_id.clone());

        let count = room.len();
        let initiator = if room.is_full() {
            room.initiator().cloned()
        } else {
            None
        };

        JoinResult::Joined { count, initiator }
    }

    /// Removes the peer from the first room it joined, and only that one.
    ///
    /// Returns the room and the member still seated there, or `None` if the
    /// peer was alone or not seated anywhere.
    pub fn leave(&mut self, peer_id: &PeerId) -> Option<(RoomId, PeerId)> {
        let joined = self.memberships.get_mut(peer_id)?;
        let room_id = joined.remove(0);
        if joined.is_empty() {
            self.memberships.remove(peer_id);
        }

        let room = self.rooms.get_mut(&room_id)?;
        room.remove(peer_id);

        let remaining = room.initiator().cloned();
        if room.is_empty() {
            self.rooms.remove(&room_id);
        }

        remaining.map(|other| (room_id, other))
    }

    /// Whether the peer still holds a seat in any room.
    pub fn is_seated(&self, peer_id: &PeerId) -> bool {
        self.memberships.contains_key(peer_id)
    }

    /// Members of `room_id` in join order. Empty for unknown rooms.
    pub fn participants(&self, room_id: &RoomId) -> &[PeerId] {
        self.rooms
            .get(room_id)
            .map(Room::participants)
            .unwrap_or_default()
    }

    /// The counterpart of `peer_id` in `room_id`.
    ///
    /// `None` unless `peer_id` is seated in that room and someone else is too.
    pub fn peer_of(&self, room_id: &RoomId, peer_id: &PeerId) -> Option<&PeerId> {
        let room = self.rooms.get(room_id)?;
        if !room.contains(peer_id) {
            return None;
        }
        room.other(peer_id)
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }
}

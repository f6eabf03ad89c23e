use tandem_core::PeerId;

/// Number of seats in a room: one caller and one callee.
pub const ROOM_CAPACITY: usize = 2;

/// Participants of one room in join order. The first entry is the initiator.
#[derive(Debug, Default, Clone)]
pub struct Room {
    participants: Vec<PeerId>,
}

impl Room {
    pub fn len(&self) -> usize {
        self.participants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.participants.len() >= ROOM_CAPACITY
    }

    pub fn contains(&self, peer_id: &PeerId) -> bool {
        self.participants.contains(peer_id)
    }

    pub fn participants(&self) -> &[PeerId] {
        &self.participants
    }

    pub fn initiator(&self) -> Option<&PeerId> {
        self.participants.first()
    }

    /// The member that is not `peer_id`, if any.
    pub fn other(&self, peer_id: &PeerId) -> Option<&PeerId> {
        self.participants.iter().find(|id| *id != peer_id)
    }

    pub(crate) fn push(&mut self, peer_id: PeerId) {
        self.participants.push(peer_id);
    }

    /// Returns `false` if the peer was not seated here.
    pub(crate) fn remove(&mut self, peer_id: &PeerId) -> bool {
        let before = self.participants.len();
        self.participants.retain(|id| id != peer_id);
        self.participants.len() != before
    }
}

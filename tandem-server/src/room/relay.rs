use crate::error::RelayError;
use crate::room::room_command::RoomCommand;
use crate::room::room_registry::{JoinResult, RoomRegistry};
use crate::signaling::SignalingOutput;
use std::sync::Arc;
use tandem_core::{ClientEvent, PeerId, RoomId, ServerEvent};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Single owner of the [`RoomRegistry`].
///
/// Commands from every connection go through one queue, so joins and leaves
/// are applied one at a time and each connection's events keep their order.
pub struct Relay {
    registry: RoomRegistry,
    command_rx: mpsc::Receiver<RoomCommand>,
    signaling: Arc<dyn SignalingOutput>,
}

impl Relay {
    pub fn new(
        command_rx: mpsc::Receiver<RoomCommand>,
        signaling: Arc<dyn SignalingOutput>,
    ) -> Self {
        Self {
            registry: RoomRegistry::new(),
            command_rx,
            signaling,
        }
    }

    /// Starts the event loop on the current runtime.
    pub fn spawn(
        buffer: usize,
        signaling: Arc<dyn SignalingOutput>,
    ) -> (RelayHandle, JoinHandle<()>) {
        let (tx, rx) = mpsc::channel(buffer.max(1));
        let relay = Self::new(rx, signaling);
        let task = tokio::spawn(relay.run());

        (RelayHandle::new(tx), task)
    }

    pub async fn run(mut self) {
        info!("Relay event loop started");

        while let Some(cmd) = self.command_rx.recv().await {
            self.handle_command(cmd).await;
        }

        info!(
            "Command channel closed. Relay finished with {} open rooms",
            self.registry.room_count()
        );
    }

    async fn handle_command(&mut self, cmd: RoomCommand) {
        match cmd {
            RoomCommand::Join { peer_id, room_id } => self.handle_join(peer_id, room_id).await,

            RoomCommand::Forward {
                peer_id,
                room_id,
                event,
            } => {
                let Some(other) = self.registry.peer_of(&room_id, &peer_id).cloned() else {
                    debug!(
                        "Dropping {} from {} in room '{}': no counterpart",
                        event.name(),
                        peer_id,
                        room_id
                    );
                    return;
                };
                self.signaling.send(other, event).await;
            }

            RoomCommand::Disconnect { peer_id } => {
                // Each leave frees one seat; a peer may hold seats in several rooms.
                while self.registry.is_seated(&peer_id) {
                    let Some((room_id, remaining)) = self.registry.leave(&peer_id) else {
                        continue;
                    };
                    info!(
                        "Peer {} left room '{}', notifying {}",
                        peer_id, room_id, remaining
                    );
                    self.signaling
                        .send(remaining, ServerEvent::PeerDisconnected)
                        .await;
                }
            }

            RoomCommand::Participants { room_id, reply } => {
                let _ = reply.send(self.registry.participants(&room_id).to_vec());
            }
        }
    }

    async fn handle_join(&mut self, peer_id: PeerId, room_id: RoomId) {
        match self.registry.join(&room_id, peer_id.clone()) {
            JoinResult::RoomFull => {
                info!("Room '{}' is full, rejecting {}", room_id, peer_id);
                self.signaling.send(peer_id, ServerEvent::RoomFull).await;
            }

            JoinResult::AlreadyJoined => {
                warn!(
                    "Peer {} is already seated in room '{}', ignoring join",
                    peer_id, room_id
                );
            }

            JoinResult::Joined {
                initiator: None, ..
            } => {
                info!(
                    "Peer {} joined room '{}', waiting for a partner",
                    peer_id, room_id
                );
            }

            JoinResult::Joined {
                initiator: Some(initiator),
                ..
            } => {
                info!("Room '{}' is ready, initiator {}", room_id, initiator);
                let members = self.registry.participants(&room_id).to_vec();
                for member in members {
                    self.signaling
                        .send(member, ServerEvent::Ready(initiator.clone()))
                        .await;
                }
            }
        }
    }
}

/// Cloneable sender side of the relay, one clone per connection.
#[derive(Clone)]
pub struct RelayHandle {
    command_tx: mpsc::Sender<RoomCommand>,
}

impl RelayHandle {
    pub fn new(command_tx: mpsc::Sender<RoomCommand>) -> Self {
        Self { command_tx }
    }

    pub async fn dispatch(&self, peer_id: PeerId, event: ClientEvent) -> Result<(), RelayError> {
        self.send(RoomCommand::from_client_event(peer_id, event)).await
    }

    pub async fn disconnect(&self, peer_id: PeerId) -> Result<(), RelayError> {
        self.send(RoomCommand::Disconnect { peer_id }).await
    }

    /// Current seats of `room_id`, after every command queued before this one.
    pub async fn participants(&self, room_id: RoomId) -> Result<Vec<PeerId>, RelayError> {
        let (reply, rx) = oneshot::channel();
        self.send(RoomCommand::Participants { room_id, reply }).await?;
        rx.await.map_err(|_| RelayError::NoReply)
    }

    async fn send(&self, cmd: RoomCommand) -> Result<(), RelayError> {
        self.command_tx
            .send(cmd)
            .await
            .map_err(|_| RelayError::Closed)
    }
}

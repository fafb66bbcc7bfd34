use crate::error::HubError;
use crate::hub::{HubCommand, HubSnapshot, Participant, Room, RoomIdGenerator, RoomSnapshot};
use pairline_core::{ParticipantId, RoomId, SignalMessage};
use std::collections::{HashMap, VecDeque};
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, error, info, warn};

/// Owner of every participant, the waiting queue and the room table.
///
/// All of it is mutated from [`Hub::run`] only. Everything else talks to the
/// hub through a [`HubHandle`], so admission, removal and routing never
/// interleave.
pub struct Hub {
    participants: HashMap<ParticipantId, Participant>,
    waiting: VecDeque<ParticipantId>,
    rooms: HashMap<RoomId, Room>,
    room_ids: RoomIdGenerator,
    command_rx: mpsc::Receiver<HubCommand>,
}

/// Cloneable mailbox address of a running [`Hub`].
#[derive(Clone, Debug)]
pub struct HubHandle {
    command_tx: mpsc::Sender<HubCommand>,
}

impl Hub {
    pub fn new(mailbox: usize) -> (Self, HubHandle) {
        let (command_tx, command_rx) = mpsc::channel(mailbox.max(1));

        let hub = Self {
            participants: HashMap::new(),
            waiting: VecDeque::new(),
            rooms: HashMap::new(),
            room_ids: RoomIdGenerator::new(),
            command_rx,
        };

        (hub, HubHandle { command_tx })
    }

    /// Start the event loop on the current runtime.
    pub fn spawn(mailbox: usize) -> HubHandle {
        let (hub, handle) = Self::new(mailbox);
        tokio::spawn(hub.run());
        handle
    }

    /// Runs until every [`HubHandle`] is dropped.
    pub async fn run(mut self) {
        info!("Hub event loop started");

        while let Some(cmd) = self.command_rx.recv().await {
            self.handle_command(cmd);
        }

        info!("Hub event loop finished");
    }

    fn handle_command(&mut self, cmd: HubCommand) {
        match cmd {
            HubCommand::Admit(participant) => self.admit(participant),
            HubCommand::Remove(participant_id) => self.remove(&participant_id),
            HubCommand::Route(message) => self.route(message),
            HubCommand::Snapshot(reply) => {
                let _ = reply.send(self.snapshot());
            }
        }
    }

    fn admit(&mut self, participant: Participant) {
        let id = participant.id().clone();

        if self.participants.contains_key(&id) {
            error!("Participant {} is already registered, ignoring admission", id);
            return;
        }

        info!(
            "Participant registered: {} ({}, account {:?}), queue size: {}",
            id,
            participant.display_name(),
            participant.account_id(),
            self.waiting.len() + 1
        );

        self.participants.insert(id.clone(), participant);
        self.waiting.push_back(id.clone());

        self.notify(&id, &SignalMessage::lobby());
        self.match_waiting();
    }

    fn remove(&mut self, participant_id: &ParticipantId) {
        let Some(participant) = self.participants.remove(participant_id) else {
            debug!("Participant {} already removed", participant_id);
            return;
        };

        let room_id = participant.room_id().cloned();
        // Last sender of the outbound buffer; its write loop ends once drained.
        drop(participant);

        self.waiting.retain(|queued| queued != participant_id);

        if let Some(room_id) = room_id {
            self.teardown_room(participant_id, &room_id);
        }

        info!("Participant unregistered: {}", participant_id);

        self.match_waiting();
    }

    fn teardown_room(&mut self, leaving: &ParticipantId, room_id: &RoomId) {
        let Some(room) = self.rooms.remove(room_id) else {
            return;
        };

        let Some(survivor) = room.other(leaving) else {
            return;
        };

        if let Some(participant) = self.participants.get_mut(survivor) {
            participant.clear_room();
        }

        info!(
            "Room {} closed, notifying {} that {} left",
            room_id, survivor, leaving
        );
        self.notify(survivor, &SignalMessage::user_disconnected());
    }

    /// Strict FIFO: the two longest-waiting participants are paired and the
    /// first of them creates the offer.
    fn match_waiting(&mut self) {
        while self.waiting.len() >= 2 {
            let (Some(first), Some(second)) = (self.waiting.pop_front(), self.waiting.pop_front())
            else {
                break;
            };

            let first_live = self.participants.contains_key(&first);
            let second_live = self.participants.contains_key(&second);

            // Remove purges the queue itself; this only catches ids that
            // outlived their registry entry.
            if !first_live || !second_live {
                warn!(
                    "Match failed: participant gone (first {}: {}, second {}: {})",
                    first, first_live, second, second_live
                );
                if second_live {
                    self.waiting.push_front(second);
                }
                if first_live {
                    self.waiting.push_front(first);
                }
                continue;
            }

            let room_id = self.room_ids.next_id();

            for id in [&first, &second] {
                if let Some(participant) = self.participants.get_mut(id) {
                    participant.assign_room(room_id.clone());
                }
            }

            info!(
                "Matched {} (initiator) and {} in room {}",
                first, second, room_id
            );

            self.notify(&first, &SignalMessage::send_offer(room_id.clone()));
            self.notify(&second, &SignalMessage::match_found(room_id.clone()));

            self.rooms
                .insert(room_id.clone(), Room::new(room_id, first, second));
        }
    }

    fn route(&self, message: SignalMessage) {
        let Some(room_id) = message.room_id.as_ref() else {
            warn!("Dropping {} message without a room id", message.kind);
            return;
        };

        let Some(room) = self.rooms.get(room_id) else {
            warn!("Room {} not found, dropping {} message", room_id, message.kind);
            return;
        };

        let Some(sender) = message.from.as_ref() else {
            error!("Dropping unstamped {} message for room {}", message.kind, room_id);
            return;
        };

        let Some(recipient) = room.other(sender) else {
            warn!(
                "{} is not a member of room {}, dropping {} message",
                sender, room_id, message.kind
            );
            return;
        };

        if self.notify(recipient, &message) {
            debug!(
                "Routed {} from {} to {} in room {}",
                message.kind, sender, recipient, room_id
            );
        }
    }

    fn notify(&self, recipient: &ParticipantId, message: &SignalMessage) -> bool {
        let Some(participant) = self.participants.get(recipient) else {
            warn!("Attempted to send {} to unknown {}", message.kind, recipient);
            return false;
        };

        match serde_json::to_string(message) {
            Ok(frame) => participant.try_deliver(frame),
            Err(e) => {
                error!("Failed to serialize {} message: {}", message.kind, e);
                false
            }
        }
    }

    fn snapshot(&self) -> HubSnapshot {
        HubSnapshot {
            participants: self.participants.len(),
            waiting: self.waiting.iter().cloned().collect(),
            rooms: self.rooms.values().map(RoomSnapshot::from).collect(),
        }
    }
}

impl HubHandle {
    pub async fn admit(&self, participant: Participant) -> Result<(), HubError> {
        self.send(HubCommand::Admit(participant)).await
    }

    pub async fn remove(&self, participant_id: ParticipantId) -> Result<(), HubError> {
        self.send(HubCommand::Remove(participant_id)).await
    }

    pub async fn route(&self, message: SignalMessage) -> Result<(), HubError> {
        self.send(HubCommand::Route(message)).await
    }

    /// Observes the state after every event sent before this call.
    pub async fn snapshot(&self) -> Result<HubSnapshot, HubError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.send(HubCommand::Snapshot(reply_tx)).await?;
        reply_rx.await.map_err(|_| HubError::Closed)
    }

    async fn send(&self, cmd: HubCommand) -> Result<(), HubError> {
        self.command_tx.send(cmd).await.map_err(|_| HubError::Closed)
    }
}

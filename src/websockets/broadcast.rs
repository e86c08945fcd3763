use std::sync::Arc;
use tracing::{debug, warn};

use crate::room::service::RoomService;
use crate::websockets::{connection_manager::ConnectionManager, messages::WebSocketMessage};

/// Delivers messages to the members of a room.
///
/// Membership comes from the room registry; delivery goes through the
/// connection manager. Clients without a live connection are skipped.
#[derive(Clone)]
pub struct RoomBroadcaster {
    room_service: Arc<RoomService>,
    connection_manager: Arc<dyn ConnectionManager>,
}

impl RoomBroadcaster {
    pub fn new(
        room_service: Arc<RoomService>,
        connection_manager: Arc<dyn ConnectionManager>,
    ) -> Self {
        Self {
            room_service,
            connection_manager,
        }
    }

    fn encode(message: &WebSocketMessage) -> Option<String> {
        match serde_json::to_string(message) {
            Ok(json) => Some(json),
            Err(e) => {
                warn!(
                    message_type = ?message.message_type,
                    error = %e,
                    "Failed to serialize message"
                );
                None
            }
        }
    }

    /// Sends a message to one client
    pub async fn send_to_client(&self, client_id: &str, message: &WebSocketMessage) {
        if let Some(json) = Self::encode(message) {
            self.connection_manager.send_to_client(client_id, &json).await;
        }
    }

    /// Sends a message to an explicit list of clients
    pub async fn send_to_clients(&self, client_ids: &[String], message: &WebSocketMessage) {
        if client_ids.is_empty() {
            return;
        }
        if let Some(json) = Self::encode(message) {
            self.connection_manager.send_to_clients(client_ids, &json).await;
        }
    }

    /// Sends a message to every current member of a room
    pub async fn broadcast_to_room(&self, room: &str, message: &WebSocketMessage) {
        let members = self.room_service.room_members(room);

        debug!(
            room = %room,
            recipients = members.len(),
            message_type = ?message.message_type,
            "Broadcasting to room"
        );
        self.send_to_clients(&members, message).await;
    }

    /// Tells a room that a client joined, the new member included
    pub async fn announce_joined(&self, room: &str, client_id: &str) {
        self.broadcast_to_room(room, &WebSocketMessage::joined(room, client_id))
            .await;
    }

    /// Tells the leaver and the remaining members that a client left
    pub async fn announce_left(&self, room: &str, client_id: &str) {
        let message = WebSocketMessage::left(room, client_id);
        self.broadcast_to_room(room, &message).await;
        self.send_to_client(client_id, &message).await;
    }

    /// Tells the remaining members of each room that a disconnected client is gone
    pub async fn announce_disconnect(&self, rooms: &[String], client_id: &str) {
        for room in rooms {
            self.broadcast_to_room(room, &WebSocketMessage::left(room, client_id))
                .await;
        }
    }

    /// Tells former members that their room was deleted
    pub async fn announce_room_deleted(&self, room: &str, former_members: &[String]) {
        self.send_to_clients(former_members, &WebSocketMessage::room_deleted(room))
            .await;
    }
}

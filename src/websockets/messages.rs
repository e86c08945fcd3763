use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use strum_macros::AsRefStr;

/// Message types for WebSocket communication
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, AsRefStr)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum MessageType {
    // Client -> Server
    Join,
    Leave,
    ListRooms,

    // Both directions
    RoomMessage,

    // Server -> Client
    Connected,
    Joined,
    Left,
    Rooms,
    RoomDeleted,
    Error,
}

/// Metadata for WebSocket messages
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebSocketMessageMeta {
    pub timestamp: DateTime<Utc>,
    pub client_id: Option<String>,
}

/// Base structure for WebSocket messages
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebSocketMessage {
    #[serde(rename = "type")]
    pub message_type: MessageType,
    #[serde(default)]
    pub payload: serde_json::Value,
    pub meta: Option<WebSocketMessageMeta>,
}

/// Client-to-Server message payloads
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomPayload {
    pub room: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomMessagePayload {
    pub room: String,
    pub content: String,
}

/// Helper functions for creating messages
impl WebSocketMessage {
    pub fn new(message_type: MessageType, payload: serde_json::Value) -> Self {
        Self {
            message_type,
            payload,
            meta: Some(WebSocketMessageMeta {
                timestamp: Utc::now(),
                client_id: None,
            }),
        }
    }

    /// Stamps the message with the client it concerns
    pub fn for_client(mut self, client_id: &str) -> Self {
        if let Some(meta) = self.meta.as_mut() {
            meta.client_id = Some(client_id.to_string());
        }
        self
    }

    /// Create a CONNECTED message carrying the id assigned to the connection
    pub fn connected(client_id: &str) -> Self {
        Self::new(MessageType::Connected, json!({ "client_id": client_id })).for_client(client_id)
    }

    /// Create a JOINED message
    pub fn joined(room: &str, client_id: &str) -> Self {
        Self::new(
            MessageType::Joined,
            json!({ "room": room, "client_id": client_id }),
        )
    }

    /// Create a LEFT message
    pub fn left(room: &str, client_id: &str) -> Self {
        Self::new(
            MessageType::Left,
            json!({ "room": room, "client_id": client_id }),
        )
    }

    /// Create a ROOM_MESSAGE message as relayed to room members
    pub fn room_message(room: &str, sender: &str, content: &str) -> Self {
        Self::new(
            MessageType::RoomMessage,
            json!({ "room": room, "sender": sender, "content": content }),
        )
    }

    /// Create a ROOMS message listing a client's rooms
    pub fn rooms(rooms: Vec<String>) -> Self {
        Self::new(MessageType::Rooms, json!({ "rooms": rooms }))
    }

    /// Create a ROOM_DELETED message
    pub fn room_deleted(room: &str) -> Self {
        Self::new(MessageType::RoomDeleted, json!({ "room": room }))
    }

    /// Create an ERROR message
    pub fn error(message: String) -> Self {
        Self::new(MessageType::Error, json!({ "message": message }))
    }

    /// Create a JOIN request, as a client would send it
    pub fn join(room: &str) -> Self {
        Self::new(MessageType::Join, json!({ "room": room }))
    }

    /// Create a LEAVE request, as a client would send it
    pub fn leave(room: &str) -> Self {
        Self::new(MessageType::Leave, json!({ "room": room }))
    }

    /// Create a ROOM_MESSAGE request, as a client would send it
    pub fn send_to_room(room: &str, content: &str) -> Self {
        Self::new(
            MessageType::RoomMessage,
            json!({ "room": room, "content": content }),
        )
    }

    /// Decode the payload into a typed struct
    pub fn payload_as<T: serde::de::DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_value(self.payload.clone())
    }
}

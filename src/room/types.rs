use serde::{Deserialize, Serialize};
use std::fmt;

/// Registry operation and the identifiers it was called with, named the way
/// it reads in error messages
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoomOperation {
    CreateRoom { room: String },
    DeleteRoom { room: String },
    AddClientToRoom { client_id: String, room: String },
    RemoveClientFromRoom { client_id: String, room: String },
    GetClientRooms { client_id: String },
    IsClientInRoom { client_id: String, room: String },
    GetRoomClients { room: String },
    RemoveClient { client_id: String },
}

// Blank identifiers are rejected by the registry; keep them visible in the message
fn shown(id: &str) -> &str {
    if id.trim().is_empty() {
        "<empty>"
    } else {
        id
    }
}

impl fmt::Display for RoomOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoomOperation::CreateRoom { room } => write!(f, "create room {}", shown(room)),
            RoomOperation::DeleteRoom { room } => write!(f, "delete room {}", shown(room)),
            RoomOperation::AddClientToRoom { client_id, room } => write!(
                f,
                "add client {} to room {}",
                shown(client_id),
                shown(room)
            ),
            RoomOperation::RemoveClientFromRoom { client_id, room } => write!(
                f,
                "remove client {} from room {}",
                shown(client_id),
                shown(room)
            ),
            RoomOperation::GetClientRooms { client_id } => {
                write!(f, "get rooms for client {}", shown(client_id))
            }
            RoomOperation::IsClientInRoom { client_id, room } => write!(
                f,
                "check whether client {} is in room {}",
                shown(client_id),
                shown(room)
            ),
            RoomOperation::GetRoomClients { room } => {
                write!(f, "get clients in room {}", shown(room))
            }
            RoomOperation::RemoveClient { client_id } => {
                write!(f, "remove client {}", shown(client_id))
            }
        }
    }
}

/// Request payload for creating a room
#[derive(Debug, Deserialize)]
pub struct RoomCreateRequest {
    pub name: String,
}

/// Members of a single room
#[derive(Debug, Serialize, Deserialize)]
pub struct RoomClientsResponse {
    pub room: String,
    pub clients: Vec<String>,
}

/// Rooms a single client belongs to
#[derive(Debug, Serialize, Deserialize)]
pub struct ClientRoomsResponse {
    pub client_id: String,
    pub rooms: Vec<String>,
}

/// Answer to a membership check
#[derive(Debug, Serialize, Deserialize)]
pub struct MembershipResponse {
    pub room: String,
    pub client_id: String,
    pub member: bool,
}

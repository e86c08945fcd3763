use serde::{Deserialize, Serialize};

/// How the registry treats rooms that are missing or have emptied out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegistryPolicy {
    /// Joining a room that does not exist creates it instead of failing
    pub create_on_join: bool,
    /// A room is dropped as soon as its last client leaves
    pub prune_empty_rooms: bool,
}

impl Default for RegistryPolicy {
    fn default() -> Self {
        Self {
            create_on_join: true,
            prune_empty_rooms: false,
        }
    }
}

/// Snapshot of a single room
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomSummary {
    pub name: String,
    pub client_count: usize,
}

/// Result of adding a client to a room
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinOutcome {
    /// Client was added; `room_created` is set when the join created the room
    Joined { room_created: bool },
    /// Client was already a member, nothing changed
    AlreadyMember,
}

/// Result of removing a client from a room
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeaveOutcome {
    /// Client was removed; `room_pruned` is set when the room was dropped as empty
    Left { room_pruned: bool },
    /// Client was not a member (or the room does not exist), nothing changed
    NotMember,
}

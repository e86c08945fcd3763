use std::sync::Arc;
use tracing::{debug, error, info, instrument};

use super::{
    errors::RegistryError,
    models::{JoinOutcome, LeaveOutcome, RoomSummary},
    registry::RoomRegistry,
    types::RoomOperation,
};
use crate::shared::AppError;

/// Service layer over the room registry.
///
/// Logs every outcome and attaches the failed operation to registry errors.
pub struct RoomService {
    registry: Arc<dyn RoomRegistry + Send + Sync>,
}

impl RoomService {
    pub fn new(registry: Arc<dyn RoomRegistry + Send + Sync>) -> Self {
        Self { registry }
    }

    #[instrument(skip(self))]
    pub fn create_room(&self, room: &str) -> Result<(), AppError> {
        self.registry.create_room(room).map_err(|source| {
            error!(room = %room, error = %source, "Error creating room");
            AppError::registry(RoomOperation::CreateRoom { room: room.to_string() }, source)
        })?;

        info!(room = %room, "Room created");
        Ok(())
    }

    /// Deletes a room and returns the clients that were in it
    #[instrument(skip(self))]
    pub fn delete_room(&self, room: &str) -> Result<Vec<String>, AppError> {
        let former_members = self.registry.delete_room(room).map_err(|source| {
            error!(room = %room, error = %source, "Error deleting room");
            AppError::registry(RoomOperation::DeleteRoom { room: room.to_string() }, source)
        })?;

        info!(
            room = %room,
            former_members = former_members.len(),
            "Room deleted"
        );
        Ok(former_members)
    }

    #[instrument(skip(self))]
    pub fn add_client_to_room(&self, client_id: &str, room: &str) -> Result<JoinOutcome, AppError> {
        let outcome = self
            .registry
            .add_client_to_room(client_id, room)
            .map_err(|source| {
                error!(client_id = %client_id, room = %room, error = %source, "Error adding client to room");
                AppError::registry(
                    RoomOperation::AddClientToRoom {
                        client_id: client_id.to_string(),
                        room: room.to_string(),
                    },
                    source,
                )
            })?;

        match outcome {
            JoinOutcome::Joined { room_created } => {
                info!(client_id = %client_id, room = %room, room_created, "Client added to room")
            }
            JoinOutcome::AlreadyMember => {
                info!(client_id = %client_id, room = %room, "Client already in room")
            }
        }
        Ok(outcome)
    }

    #[instrument(skip(self))]
    pub fn remove_client_from_room(
        &self,
        client_id: &str,
        room: &str,
    ) -> Result<LeaveOutcome, AppError> {
        let outcome = self
            .registry
            .remove_client_from_room(client_id, room)
            .map_err(|source| {
                error!(client_id = %client_id, room = %room, error = %source, "Error removing client from room");
                AppError::registry(
                    RoomOperation::RemoveClientFromRoom {
                        client_id: client_id.to_string(),
                        room: room.to_string(),
                    },
                    source,
                )
            })?;

        match outcome {
            LeaveOutcome::Left { room_pruned } => {
                info!(client_id = %client_id, room = %room, room_pruned, "Client removed from room")
            }
            LeaveOutcome::NotMember => {
                info!(client_id = %client_id, room = %room, "Client was not in room")
            }
        }
        Ok(outcome)
    }

    pub fn get_all_rooms(&self) -> Vec<String> {
        self.registry.get_all_rooms()
    }

    pub fn room_summaries(&self) -> Vec<RoomSummary> {
        self.registry.room_summaries()
    }

    pub fn get_client_rooms(&self, client_id: &str) -> Result<Vec<String>, AppError> {
        self.registry.get_client_rooms(client_id).map_err(|source| {
            error!(client_id = %client_id, error = %source, "Error getting rooms for client");
            AppError::registry(
                RoomOperation::GetClientRooms {
                    client_id: client_id.to_string(),
                },
                source,
            )
        })
    }

    pub fn is_client_in_room(&self, client_id: &str, room: &str) -> Result<bool, AppError> {
        self.registry
            .is_client_in_room(client_id, room)
            .map_err(|source| {
                error!(client_id = %client_id, room = %room, error = %source, "Error checking room membership");
                AppError::registry(
                    RoomOperation::IsClientInRoom {
                        client_id: client_id.to_string(),
                        room: room.to_string(),
                    },
                    source,
                )
            })
    }

    pub fn get_room_clients(&self, room: &str) -> Result<Vec<String>, AppError> {
        self.registry.get_room_clients(room).map_err(|source| {
            error!(room = %room, error = %source, "Error getting clients in room");
            AppError::registry(RoomOperation::GetRoomClients { room: room.to_string() }, source)
        })
    }

    /// Current members of a room for delivery; a missing room has none
    pub fn room_members(&self, room: &str) -> Vec<String> {
        match self.registry.get_room_clients(room) {
            Ok(members) => members,
            Err(e) => {
                debug!(room = %room, error = %e, "No members to deliver to");
                Vec::new()
            }
        }
    }

    /// Drops a disconnected client from every room, returning the rooms it left
    #[instrument(skip(self))]
    pub fn remove_client(&self, client_id: &str) -> Result<Vec<String>, AppError> {
        let rooms = self.registry.remove_client(client_id).map_err(|source| {
            error!(client_id = %client_id, error = %source, "Error removing client");
            AppError::registry(
                RoomOperation::RemoveClient {
                    client_id: client_id.to_string(),
                },
                source,
            )
        })?;

        info!(client_id = %client_id, rooms_left = rooms.len(), "Client removed from all rooms");
        Ok(rooms)
    }

    /// Tears the registry down at shutdown
    pub fn shutdown(&self) {
        let room_count = self.registry.clear();
        info!(room_count, "Room registry torn down");
    }
}

impl AppError {
    pub fn registry(operation: RoomOperation, source: RegistryError) -> Self {
        AppError::Registry { operation, source }
    }
}

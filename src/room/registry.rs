use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::{debug, instrument};

use super::errors::{validate_identifier, RegistryError};
use super::models::{JoinOutcome, LeaveOutcome, RegistryPolicy, RoomSummary};

/// Membership registry: which clients are in which rooms.
///
/// Implementations never do I/O. Every method is a single atomic transition,
/// and a failed call leaves the registry unchanged.
pub trait RoomRegistry {
    /// Registers an empty room; fails if the name is already tracked
    fn create_room(&self, room: &str) -> Result<(), RegistryError>;

    /// Drops a room and all of its memberships, returning the former members
    fn delete_room(&self, room: &str) -> Result<Vec<String>, RegistryError>;

    /// Adds a client to a room. Adding an existing member is a no-op
    fn add_client_to_room(&self, client_id: &str, room: &str)
        -> Result<JoinOutcome, RegistryError>;

    /// Removes a client from a room. Removing a non-member is a no-op
    fn remove_client_from_room(
        &self,
        client_id: &str,
        room: &str,
    ) -> Result<LeaveOutcome, RegistryError>;

    /// Names of every tracked room, in no particular order
    fn get_all_rooms(&self) -> Vec<String>;

    /// Every tracked room with its member count, in no particular order
    fn room_summaries(&self) -> Vec<RoomSummary>;

    /// Names of the rooms a client belongs to, in no particular order
    fn get_client_rooms(&self, client_id: &str) -> Result<Vec<String>, RegistryError>;

    /// False when the room does not exist
    fn is_client_in_room(&self, client_id: &str, room: &str) -> Result<bool, RegistryError>;

    /// Members of a room, in no particular order
    fn get_room_clients(&self, room: &str) -> Result<Vec<String>, RegistryError>;

    /// Removes a client from every room it belongs to, returning those rooms
    fn remove_client(&self, client_id: &str) -> Result<Vec<String>, RegistryError>;

    /// Drops every room, returning how many were tracked
    fn clear(&self) -> usize;
}

type RoomMap = HashMap<String, HashSet<String>>;

/// In-memory registry guarded by a single mutex
pub struct InMemoryRoomRegistry {
    rooms: Mutex<RoomMap>,
    policy: RegistryPolicy,
}

impl Default for InMemoryRoomRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryRoomRegistry {
    /// Creates an empty registry with the default policy
    pub fn new() -> Self {
        Self::with_policy(RegistryPolicy::default())
    }

    pub fn with_policy(policy: RegistryPolicy) -> Self {
        Self {
            rooms: Mutex::new(HashMap::new()),
            policy,
        }
    }

    // Mutations validate before touching the map, so a poisoned guard never
    // holds a half-applied update.
    fn lock_rooms(&self) -> MutexGuard<'_, RoomMap> {
        self.rooms.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl RoomRegistry for InMemoryRoomRegistry {
    #[instrument(skip(self))]
    fn create_room(&self, room: &str) -> Result<(), RegistryError> {
        validate_identifier("room name", room)?;

        let mut rooms = self.lock_rooms();
        if rooms.contains_key(room) {
            debug!(room = %room, "Room already tracked");
            return Err(RegistryError::already_exists(room));
        }
        rooms.insert(room.to_string(), HashSet::new());

        debug!(room = %room, room_count = rooms.len(), "Room registered");
        Ok(())
    }

    #[instrument(skip(self))]
    fn delete_room(&self, room: &str) -> Result<Vec<String>, RegistryError> {
        validate_identifier("room name", room)?;

        let mut rooms = self.lock_rooms();
        let members = rooms
            .remove(room)
            .ok_or_else(|| RegistryError::not_found(room))?;

        debug!(room = %room, former_members = members.len(), "Room removed");
        Ok(members.into_iter().collect())
    }

    #[instrument(skip(self))]
    fn add_client_to_room(
        &self,
        client_id: &str,
        room: &str,
    ) -> Result<JoinOutcome, RegistryError> {
        validate_identifier("client id", client_id)?;
        validate_identifier("room name", room)?;

        let mut rooms = self.lock_rooms();

        let room_created = !rooms.contains_key(room);
        if room_created && !self.policy.create_on_join {
            debug!(room = %room, "Join rejected, room not tracked");
            return Err(RegistryError::not_found(room));
        }

        let members = rooms.entry(room.to_string()).or_default();
        if !members.insert(client_id.to_string()) {
            debug!(room = %room, client_id = %client_id, "Client already a member");
            return Ok(JoinOutcome::AlreadyMember);
        }

        debug!(
            room = %room,
            client_id = %client_id,
            member_count = members.len(),
            room_created,
            "Client added"
        );
        Ok(JoinOutcome::Joined { room_created })
    }

    #[instrument(skip(self))]
    fn remove_client_from_room(
        &self,
        client_id: &str,
        room: &str,
    ) -> Result<LeaveOutcome, RegistryError> {
        validate_identifier("client id", client_id)?;
        validate_identifier("room name", room)?;

        let mut rooms = self.lock_rooms();

        let Some(members) = rooms.get_mut(room) else {
            debug!(room = %room, "Room not tracked, nothing to leave");
            return Ok(LeaveOutcome::NotMember);
        };

        if !members.remove(client_id) {
            debug!(room = %room, client_id = %client_id, "Client not a member");
            return Ok(LeaveOutcome::NotMember);
        }

        let room_pruned = members.is_empty() && self.policy.prune_empty_rooms;
        if room_pruned {
            rooms.remove(room);
            debug!(room = %room, "Room empty, pruned");
        }

        debug!(room = %room, client_id = %client_id, room_pruned, "Client removed");
        Ok(LeaveOutcome::Left { room_pruned })
    }

    fn get_all_rooms(&self) -> Vec<String> {
        self.lock_rooms().keys().cloned().collect()
    }

    fn room_summaries(&self) -> Vec<RoomSummary> {
        self.lock_rooms()
            .iter()
            .map(|(name, members)| RoomSummary {
                name: name.clone(),
                client_count: members.len(),
            })
            .collect()
    }

    fn get_client_rooms(&self, client_id: &str) -> Result<Vec<String>, RegistryError> {
        validate_identifier("client id", client_id)?;

        let rooms = self.lock_rooms();
        Ok(rooms
            .iter()
            .filter(|(_, members)| members.contains(client_id))
            .map(|(name, _)| name.clone())
            .collect())
    }

    fn is_client_in_room(&self, client_id: &str, room: &str) -> Result<bool, RegistryError> {
        validate_identifier("client id", client_id)?;
        validate_identifier("room name", room)?;

        let rooms = self.lock_rooms();
        Ok(rooms
            .get(room)
            .is_some_and(|members| members.contains(client_id)))
    }

    fn get_room_clients(&self, room: &str) -> Result<Vec<String>, RegistryError> {
        validate_identifier("room name", room)?;

        let rooms = self.lock_rooms();
        rooms
            .get(room)
            .map(|members| members.iter().cloned().collect())
            .ok_or_else(|| RegistryError::not_found(room))
    }

    #[instrument(skip(self))]
    fn remove_client(&self, client_id: &str) -> Result<Vec<String>, RegistryError> {
        validate_identifier("client id", client_id)?;

        let mut rooms = self.lock_rooms();
        let mut left = Vec::new();
        for (name, members) in rooms.iter_mut() {
            if members.remove(client_id) {
                left.push(name.clone());
            }
        }

        if self.policy.prune_empty_rooms {
            rooms.retain(|name, members| !(members.is_empty() && left.contains(name)));
        }

        debug!(client_id = %client_id, rooms_left = left.len(), "Client purged");
        Ok(left)
    }

    #[instrument(skip(self))]
    fn clear(&self) -> usize {
        let mut rooms = self.lock_rooms();
        let count = rooms.len();
        rooms.clear();
        debug!(room_count = count, "Registry cleared");
        count
    }
}

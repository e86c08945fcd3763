use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tracing::{info, instrument};

use super::{
    models::{JoinOutcome, LeaveOutcome, RoomSummary},
    types::{ClientRoomsResponse, MembershipResponse, RoomClientsResponse, RoomCreateRequest},
};
use crate::shared::{AppError, AppState};
use crate::websockets::RoomBroadcaster;

fn broadcaster(state: &AppState) -> RoomBroadcaster {
    RoomBroadcaster::new(state.room_service.clone(), state.connection_manager.clone())
}

/// HTTP handler for creating a new room
///
/// POST /rooms
#[instrument(name = "create_room", skip(state))]
pub async fn create_room(
    State(state): State<AppState>,
    Json(request): Json<RoomCreateRequest>,
) -> Result<(StatusCode, Json<RoomSummary>), AppError> {
    state.room_service.create_room(&request.name)?;

    Ok((
        StatusCode::CREATED,
        Json(RoomSummary {
            name: request.name,
            client_count: 0,
        }),
    ))
}

/// HTTP handler for listing all rooms
///
/// GET /rooms
#[instrument(name = "list_rooms", skip(state))]
pub async fn list_rooms(State(state): State<AppState>) -> Json<Vec<RoomSummary>> {
    let rooms = state.room_service.room_summaries();
    info!(room_count = rooms.len(), "Rooms listed");
    Json(rooms)
}

/// HTTP handler for deleting a room; connected former members are told
///
/// DELETE /rooms/{room}
#[instrument(name = "delete_room", skip(state))]
pub async fn delete_room(
    State(state): State<AppState>,
    Path(room): Path<String>,
) -> Result<StatusCode, AppError> {
    let former_members = state.room_service.delete_room(&room)?;
    broadcaster(&state)
        .announce_room_deleted(&room, &former_members)
        .await;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /rooms/{room}/clients
#[instrument(name = "get_room_clients", skip(state))]
pub async fn get_room_clients(
    State(state): State<AppState>,
    Path(room): Path<String>,
) -> Result<Json<RoomClientsResponse>, AppError> {
    let clients = state.room_service.get_room_clients(&room)?;
    Ok(Json(RoomClientsResponse { room, clients }))
}

/// Adds a client to a room; connected members are told about the join.
///
/// The client id is not checked against live connections. A client added here
/// without a WebSocket connection is never purged on disconnect, so it stays a
/// member until it is removed or the room is deleted.
///
/// PUT /rooms/{room}/clients/{client_id}
#[instrument(name = "add_client_to_room", skip(state))]
pub async fn add_client_to_room(
    State(state): State<AppState>,
    Path((room, client_id)): Path<(String, String)>,
) -> Result<StatusCode, AppError> {
    let outcome = state.room_service.add_client_to_room(&client_id, &room)?;
    if let JoinOutcome::Joined { .. } = outcome {
        broadcaster(&state).announce_joined(&room, &client_id).await;
    }
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /rooms/{room}/clients/{client_id}
#[instrument(name = "remove_client_from_room", skip(state))]
pub async fn remove_client_from_room(
    State(state): State<AppState>,
    Path((room, client_id)): Path<(String, String)>,
) -> Result<StatusCode, AppError> {
    let outcome = state
        .room_service
        .remove_client_from_room(&client_id, &room)?;
    if let LeaveOutcome::Left { .. } = outcome {
        broadcaster(&state).announce_left(&room, &client_id).await;
    }
    Ok(StatusCode::NO_CONTENT)
}

/// GET /rooms/{room}/clients/{client_id}
#[instrument(name = "is_client_in_room", skip(state))]
pub async fn is_client_in_room(
    State(state): State<AppState>,
    Path((room, client_id)): Path<(String, String)>,
) -> Result<Json<MembershipResponse>, AppError> {
    let member = state.room_service.is_client_in_room(&client_id, &room)?;
    Ok(Json(MembershipResponse {
        room,
        client_id,
        member,
    }))
}

/// GET /clients/{client_id}/rooms
#[instrument(name = "get_client_rooms", skip(state))]
pub async fn get_client_rooms(
    State(state): State<AppState>,
    Path(client_id): Path<String>,
) -> Result<Json<ClientRoomsResponse>, AppError> {
    let rooms = state.room_service.get_client_rooms(&client_id)?;
    Ok(Json(ClientRoomsResponse { client_id, rooms }))
}

// Library crate for the room membership server
// This file exposes the public API for the binary and integration tests

pub mod config;
pub mod room;
pub mod shared;
pub mod websockets;

use axum::{
    routing::{get, put},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

// Re-export commonly used types for easier access in tests
pub use config::AppConfig;
pub use room::{
    models::{JoinOutcome, LeaveOutcome, RegistryPolicy, RoomSummary},
    registry::{InMemoryRoomRegistry, RoomRegistry},
    service::RoomService,
};
pub use shared::{AppError, AppState};
pub use websockets::{
    ConnectionManager, InMemoryConnectionManager, MessageHandler, MessageType, RoomBroadcaster,
    WebSocketMessage, WebsocketReceiveHandler,
};

/// Builds the HTTP router over the given application state
pub fn router(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/rooms", get(room::list_rooms).post(room::create_room))
        .route("/rooms/:room", axum::routing::delete(room::delete_room))
        .route("/rooms/:room/clients", get(room::get_room_clients))
        .route(
            "/rooms/:room/clients/:client_id",
            put(room::add_client_to_room)
                .delete(room::remove_client_from_room)
                .get(room::is_client_in_room),
        )
        .route("/clients/:client_id/rooms", get(room::get_client_rooms))
        .route("/ws", get(websockets::websocket_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state)
}

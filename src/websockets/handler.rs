use async_trait::async_trait;
use axum::{
    extract::{State, WebSocketUpgrade},
    response::Response,
};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::room::{
    models::{JoinOutcome, LeaveOutcome},
    service::RoomService,
};
use crate::shared::AppState;
use crate::websockets::messages::{
    MessageType, RoomMessagePayload, RoomPayload, WebSocketMessage,
};

use super::broadcast::RoomBroadcaster;
use super::socket::{Connection, MessageHandler};

/// Message handler for receiving WebSocket messages from the client
pub struct WebsocketReceiveHandler {
    room_service: Arc<RoomService>,
    broadcaster: RoomBroadcaster,
}

impl WebsocketReceiveHandler {
    pub fn new(room_service: Arc<RoomService>, broadcaster: RoomBroadcaster) -> Self {
        Self {
            room_service,
            broadcaster,
        }
    }

    async fn reply_error(&self, client_id: &str, message: String) {
        self.broadcaster
            .send_to_client(client_id, &WebSocketMessage::error(message))
            .await;
    }

    async fn handle_join(&self, client_id: &str, room: &str) {
        match self.room_service.add_client_to_room(client_id, room) {
            Ok(JoinOutcome::Joined { .. }) => {
                self.broadcaster.announce_joined(room, client_id).await;
            }
            Ok(JoinOutcome::AlreadyMember) => {
                self.broadcaster
                    .send_to_client(client_id, &WebSocketMessage::joined(room, client_id))
                    .await;
            }
            Err(e) => self.reply_error(client_id, e.to_string()).await,
        }
    }

    async fn handle_leave(&self, client_id: &str, room: &str) {
        match self.room_service.remove_client_from_room(client_id, room) {
            Ok(LeaveOutcome::Left { .. }) => {
                self.broadcaster.announce_left(room, client_id).await;
            }
            Ok(LeaveOutcome::NotMember) => {
                self.broadcaster
                    .send_to_client(client_id, &WebSocketMessage::left(room, client_id))
                    .await;
            }
            Err(e) => self.reply_error(client_id, e.to_string()).await,
        }
    }

    async fn handle_room_message(&self, client_id: &str, payload: RoomMessagePayload) {
        match self.room_service.is_client_in_room(client_id, &payload.room) {
            Ok(true) => {
                self.broadcaster
                    .broadcast_to_room(
                        &payload.room,
                        &WebSocketMessage::room_message(&payload.room, client_id, &payload.content),
                    )
                    .await;
            }
            Ok(false) => {
                warn!(client_id = %client_id, room = %payload.room, "Message to a room the client is not in");
                self.reply_error(
                    client_id,
                    format!("client {} is not in room {}", client_id, payload.room),
                )
                .await;
            }
            Err(e) => self.reply_error(client_id, e.to_string()).await,
        }
    }

    async fn handle_list_rooms(&self, client_id: &str) {
        match self.room_service.get_client_rooms(client_id) {
            Ok(rooms) => {
                self.broadcaster
                    .send_to_client(client_id, &WebSocketMessage::rooms(rooms))
                    .await;
            }
            Err(e) => self.reply_error(client_id, e.to_string()).await,
        }
    }
}

#[async_trait]
impl MessageHandler for WebsocketReceiveHandler {
    async fn handle_message(&self, client_id: &str, message: String) {
        debug!(client_id = %client_id, message = %message, "Received message");

        let ws_message = match serde_json::from_str::<WebSocketMessage>(&message) {
            Ok(ws_message) => ws_message,
            Err(e) => {
                warn!(client_id = %client_id, error = %e, "Failed to parse WebSocket message");
                self.reply_error(client_id, format!("invalid message: {}", e))
                    .await;
                return;
            }
        };

        match &ws_message.message_type {
            MessageType::Join => match ws_message.payload_as::<RoomPayload>() {
                Ok(payload) => self.handle_join(client_id, &payload.room).await,
                Err(e) => {
                    self.reply_error(client_id, format!("invalid JOIN payload: {}", e))
                        .await
                }
            },
            MessageType::Leave => match ws_message.payload_as::<RoomPayload>() {
                Ok(payload) => self.handle_leave(client_id, &payload.room).await,
                Err(e) => {
                    self.reply_error(client_id, format!("invalid LEAVE payload: {}", e))
                        .await
                }
            },
            MessageType::RoomMessage => match ws_message.payload_as::<RoomMessagePayload>() {
                Ok(payload) => self.handle_room_message(client_id, payload).await,
                Err(e) => {
                    self.reply_error(client_id, format!("invalid ROOM_MESSAGE payload: {}", e))
                        .await
                }
            },
            MessageType::ListRooms => self.handle_list_rooms(client_id).await,
            other => {
                let name: &str = other.as_ref();
                debug!(message_type = %name, "Unhandled message type");
                self.reply_error(client_id, format!("unsupported message type {}", name))
                    .await;
            }
        }
    }
}

/// WebSocket endpoint; every upgraded connection gets a fresh client id
/// GET /ws
pub async fn websocket_handler(ws: WebSocketUpgrade, State(app_state): State<AppState>) -> Response {
    let client_id = Uuid::new_v4().to_string();
    info!(client_id = %client_id, "WebSocket connection requested");

    ws.on_upgrade(move |socket| handle_websocket_connection(socket, client_id, app_state))
}

/// Handle the upgraded WebSocket connection
async fn handle_websocket_connection(
    socket: axum::extract::ws::WebSocket,
    client_id: String,
    app_state: AppState,
) {
    info!(client_id = %client_id, "WebSocket connection established");

    // Create the outbound channel (app -> client)
    let (outbound_sender, outbound_receiver) = mpsc::unbounded_channel::<String>();

    app_state
        .connection_manager
        .add_connection(client_id.clone(), outbound_sender)
        .await;

    let broadcaster = RoomBroadcaster::new(
        app_state.room_service.clone(),
        app_state.connection_manager.clone(),
    );
    broadcaster
        .send_to_client(&client_id, &WebSocketMessage::connected(&client_id))
        .await;

    let message_handler = Arc::new(WebsocketReceiveHandler::new(
        app_state.room_service.clone(),
        broadcaster.clone(),
    ));

    let connection = Connection::new(
        client_id.clone(),
        Box::new(socket),
        outbound_receiver,
        message_handler,
    );

    match connection.run().await {
        Ok(()) => info!(client_id = %client_id, "WebSocket connection closed cleanly"),
        Err(e) => warn!(client_id = %client_id, error = %e, "WebSocket connection error"),
    }

    handle_disconnect(&app_state, &broadcaster, &client_id).await;
}

/// Drops a client's connection and purges it from every room it was in
pub async fn handle_disconnect(
    app_state: &AppState,
    broadcaster: &RoomBroadcaster,
    client_id: &str,
) {
    app_state
        .connection_manager
        .remove_connection(client_id)
        .await;

    match app_state.room_service.remove_client(client_id) {
        Ok(rooms) => broadcaster.announce_disconnect(&rooms, client_id).await,
        Err(e) => warn!(client_id = %client_id, error = %e, "Failed to purge disconnected client"),
    }

    info!(client_id = %client_id, "WebSocket client disconnected");
}

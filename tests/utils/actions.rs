use roomhub::{
    websockets::{handle_disconnect, MessageHandler},
    WebSocketMessage,
};

use super::setup::TestSetup;

// ============================================================================
// Action Helpers
// ============================================================================

impl TestSetup {
    /// Send a WebSocket message as the given client
    pub async fn send_message(&self, client_id: &str, message: WebSocketMessage) {
        let message_json = serde_json::to_string(&message).unwrap();
        self.send_raw(client_id, &message_json).await;
    }

    /// Send an arbitrary text frame as the given client
    pub async fn send_raw(&self, client_id: &str, frame: &str) {
        self.input_handler
            .handle_message(client_id, frame.to_string())
            .await;
    }

    /// Clear all recorded messages
    pub async fn clear_messages(&self) {
        self.mock_conn_manager.clear_messages().await;
    }

    // ============================================================================
    // Convenience Action Methods
    // ============================================================================

    pub async fn send_join(&self, client_id: &str, room: &str) {
        self.send_message(client_id, WebSocketMessage::join(room))
            .await;
    }

    pub async fn send_leave(&self, client_id: &str, room: &str) {
        self.send_message(client_id, WebSocketMessage::leave(room))
            .await;
    }

    pub async fn send_room_message(&self, client_id: &str, room: &str, content: &str) {
        self.send_message(client_id, WebSocketMessage::send_to_room(room, content))
            .await;
    }

    pub async fn send_list_rooms(&self, client_id: &str) {
        self.send_raw(client_id, r#"{"type":"LIST_ROOMS","payload":{}}"#)
            .await;
    }

    /// Join every configured client to a room and drop the resulting notifications
    pub async fn join_all(&self, room: &str) {
        for client in self.clients.clone() {
            self.send_join(&client, room).await;
        }
        self.clear_messages().await;
    }

    /// Simulate the transport reporting a closed connection
    pub async fn disconnect(&self, client_id: &str) {
        handle_disconnect(&self.app_state, &self.broadcaster, client_id).await;
    }
}

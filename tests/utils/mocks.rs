use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use tokio::sync::{mpsc, RwLock};

use roomhub::websockets::ConnectionManager;

// ============================================================================
// Mock Infrastructure
// ============================================================================

/// Records outbound frames per client instead of writing to sockets
#[derive(Clone)]
pub struct MockConnectionManager {
    sent_messages: Arc<RwLock<HashMap<String, VecDeque<String>>>>,
    connected_clients: Arc<RwLock<Vec<String>>>,
}

impl MockConnectionManager {
    pub fn new() -> Self {
        Self {
            sent_messages: Arc::new(RwLock::new(HashMap::new())),
            connected_clients: Arc::new(RwLock::new(Vec::new())),
        }
    }

    pub async fn add_connected_client(&self, client_id: &str) {
        self.connected_clients
            .write()
            .await
            .push(client_id.to_string());
    }

    pub async fn is_connected(&self, client_id: &str) -> bool {
        self.connected_clients
            .read()
            .await
            .iter()
            .any(|c| c == client_id)
    }

    pub async fn get_messages_for(&self, client_id: &str) -> Vec<String> {
        self.sent_messages
            .read()
            .await
            .get(client_id)
            .map(|queue| queue.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Pops the oldest undelivered message for a client
    pub async fn consume_message_for(&self, client_id: &str) -> Option<String> {
        self.sent_messages
            .write()
            .await
            .get_mut(client_id)
            .and_then(|queue| queue.pop_front())
    }

    pub async fn clear_messages(&self) {
        self.sent_messages.write().await.clear();
    }
}

#[async_trait]
impl ConnectionManager for MockConnectionManager {
    async fn add_connection(&self, client_id: String, _sender: mpsc::UnboundedSender<String>) {
        self.add_connected_client(&client_id).await;
    }

    async fn remove_connection(&self, client_id: &str) {
        self.connected_clients
            .write()
            .await
            .retain(|c| c != client_id);
    }

    async fn send_to_client(&self, client_id: &str, message: &str) {
        if !self.is_connected(client_id).await {
            return;
        }
        self.sent_messages
            .write()
            .await
            .entry(client_id.to_string())
            .or_default()
            .push_back(message.to_string());
    }

    async fn send_to_clients(&self, client_ids: &[String], message: &str) {
        for client_id in client_ids {
            self.send_to_client(client_id, message).await;
        }
    }
}

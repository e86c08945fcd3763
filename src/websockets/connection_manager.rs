use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{mpsc, RwLock};
use tracing::debug;

/// Tracks live connections and delivers outbound text frames to them
#[async_trait]
pub trait ConnectionManager: Send + Sync {
    async fn add_connection(&self, client_id: String, sender: mpsc::UnboundedSender<String>);

    async fn remove_connection(&self, client_id: &str);

    async fn send_to_client(&self, client_id: &str, message: &str);

    async fn send_to_clients(&self, client_ids: &[String], message: &str);
}

pub struct InMemoryConnectionManager {
    // client_id -> sender
    connections: Arc<RwLock<HashMap<String, mpsc::UnboundedSender<String>>>>,
}

impl Default for InMemoryConnectionManager {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryConnectionManager {
    pub fn new() -> Self {
        Self {
            connections: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub async fn connection_count(&self) -> usize {
        self.connections.read().await.len()
    }
}

#[async_trait]
impl ConnectionManager for InMemoryConnectionManager {
    async fn add_connection(&self, client_id: String, sender: mpsc::UnboundedSender<String>) {
        let mut connections = self.connections.write().await;
        connections.insert(client_id, sender);
    }

    async fn remove_connection(&self, client_id: &str) {
        let mut connections = self.connections.write().await;
        connections.remove(client_id);
    }

    async fn send_to_client(&self, client_id: &str, message: &str) {
        let connections = self.connections.read().await;
        match connections.get(client_id) {
            Some(sender) => {
                // A closed receiver means the connection is tearing down
                let _ = sender.send(message.to_string());
            }
            None => debug!(client_id = %client_id, "No connection for client, dropping message"),
        }
    }

    async fn send_to_clients(&self, client_ids: &[String], message: &str) {
        let connections = self.connections.read().await;
        for client_id in client_ids {
            if let Some(sender) = connections.get(client_id) {
                let _ = sender.send(message.to_string());
            }
        }
    }
}

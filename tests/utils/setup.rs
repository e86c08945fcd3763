use std::sync::Arc;

use roomhub::{
    AppState, InMemoryRoomRegistry, RegistryPolicy, RoomBroadcaster, RoomService,
    WebsocketReceiveHandler,
};

use super::mocks::MockConnectionManager;

// ============================================================================
// Test Setup Infrastructure
// ============================================================================

pub struct TestSetup {
    pub app_state: AppState,
    pub room_service: Arc<RoomService>,
    pub broadcaster: RoomBroadcaster,
    pub mock_conn_manager: Arc<MockConnectionManager>,
    pub input_handler: WebsocketReceiveHandler,
    pub clients: Vec<String>,
}

pub struct TestSetupBuilder {
    clients: Vec<String>,
    policy: RegistryPolicy,
}

impl TestSetupBuilder {
    pub fn new() -> Self {
        Self {
            clients: vec![],
            policy: RegistryPolicy::default(),
        }
    }

    pub fn with_clients(mut self, clients: Vec<&str>) -> Self {
        self.clients = clients.into_iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn with_three_clients(self) -> Self {
        self.with_clients(vec!["alice", "bob", "carol"])
    }

    pub fn with_policy(mut self, policy: RegistryPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub async fn build(self) -> TestSetup {
        let registry = Arc::new(InMemoryRoomRegistry::with_policy(self.policy));
        let room_service = Arc::new(RoomService::new(registry));
        let mock_conn_manager = Arc::new(MockConnectionManager::new());

        for client in &self.clients {
            mock_conn_manager.add_connected_client(client).await;
        }

        let app_state = AppState::new(room_service.clone(), mock_conn_manager.clone());
        let broadcaster = RoomBroadcaster::new(room_service.clone(), mock_conn_manager.clone());
        let input_handler = WebsocketReceiveHandler::new(room_service.clone(), broadcaster.clone());

        TestSetup {
            app_state,
            room_service,
            broadcaster,
            mock_conn_manager,
            input_handler,
            clients: self.clients,
        }
    }
}

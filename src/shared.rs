use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;

use crate::room::{errors::RegistryError, service::RoomService, types::RoomOperation};
use crate::websockets::ConnectionManager;

/// Shared application state containing all dependencies
#[derive(Clone)]
pub struct AppState {
    pub room_service: Arc<RoomService>,
    pub connection_manager: Arc<dyn ConnectionManager>,
}

impl AppState {
    pub fn new(
        room_service: Arc<RoomService>,
        connection_manager: Arc<dyn ConnectionManager>,
    ) -> Self {
        Self {
            room_service,
            connection_manager,
        }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("failed to {operation}: {source}")]
    Registry {
        operation: RoomOperation,
        #[source]
        source: RegistryError,
    },
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Registry { source, .. } => match source {
                RegistryError::AlreadyExists { .. } => StatusCode::CONFLICT,
                RegistryError::NotFound { .. } => StatusCode::NOT_FOUND,
                RegistryError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            },
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
pub mod test_utils {
    use super::*;
    use crate::room::{models::RegistryPolicy, registry::InMemoryRoomRegistry};
    use crate::websockets::InMemoryConnectionManager;

    /// Builder for creating AppState with overrides for testing
    pub struct AppStateBuilder {
        policy: RegistryPolicy,
    }

    impl AppStateBuilder {
        pub fn new() -> Self {
            Self {
                policy: RegistryPolicy::default(),
            }
        }

        pub fn with_policy(mut self, policy: RegistryPolicy) -> Self {
            self.policy = policy;
            self
        }

        pub fn build(self) -> AppState {
            let registry = Arc::new(InMemoryRoomRegistry::with_policy(self.policy));
            AppState {
                room_service: Arc::new(RoomService::new(registry)),
                connection_manager: Arc::new(InMemoryConnectionManager::new()),
            }
        }
    }

    impl Default for AppStateBuilder {
        fn default() -> Self {
            Self::new()
        }
    }
}

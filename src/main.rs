use roomhub::{
    router, AppConfig, AppState, InMemoryConnectionManager, InMemoryRoomRegistry, RoomService,
};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "roomhub=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Invalid configuration");
            std::process::exit(1);
        }
    };

    info!(
        service = "rooms-service",
        create_on_join = config.policy.create_on_join,
        prune_empty_rooms = config.policy.prune_empty_rooms,
        "Starting room server"
    );

    // The registry lives for the whole server run and is torn down below
    let registry = Arc::new(InMemoryRoomRegistry::with_policy(config.policy));
    let room_service = Arc::new(RoomService::new(registry));
    let connection_manager = Arc::new(InMemoryConnectionManager::new());

    let app_state = AppState::new(room_service.clone(), connection_manager);
    let app = router(app_state);

    let listener = match tokio::net::TcpListener::bind(config.bind_addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(bind_addr = %config.bind_addr, error = %e, "Failed to bind listener");
            std::process::exit(1);
        }
    };
    info!(bind_addr = %config.bind_addr, "Server listening");

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!(error = %e, "Server error");
    }

    room_service.shutdown();
    info!("Server stopped");
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

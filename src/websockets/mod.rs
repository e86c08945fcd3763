// Public API
pub use broadcast::RoomBroadcaster;
pub use connection_manager::{ConnectionManager, InMemoryConnectionManager};
pub use handler::{handle_disconnect, websocket_handler, WebsocketReceiveHandler};
pub use messages::{MessageType, WebSocketMessage};
pub use socket::MessageHandler;

// Internal modules
mod broadcast;
mod connection_manager;
mod handler;
mod messages;
mod socket;

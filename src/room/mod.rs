// Public API - what other modules can use
pub use handlers::{
    add_client_to_room, create_room, delete_room, get_client_rooms, get_room_clients,
    is_client_in_room, list_rooms, remove_client_from_room,
};

// Internal modules
pub mod errors;
mod handlers;
pub mod models;
pub mod registry;
pub mod service;
pub mod types;

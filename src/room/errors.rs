use thiserror::Error;

/// Failures the room registry can report.
///
/// Every failure leaves the registry untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("room {room} already exists")]
    AlreadyExists { room: String },

    #[error("room {room} does not exist")]
    NotFound { room: String },

    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl RegistryError {
    pub fn already_exists(room: &str) -> Self {
        Self::AlreadyExists {
            room: room.to_string(),
        }
    }

    pub fn not_found(room: &str) -> Self {
        Self::NotFound {
            room: room.to_string(),
        }
    }
}

/// Rejects identifiers that are empty or only whitespace
pub(crate) fn validate_identifier(kind: &str, value: &str) -> Result<(), RegistryError> {
    if value.trim().is_empty() {
        return Err(RegistryError::InvalidArgument(format!(
            "{} must not be empty",
            kind
        )));
    }
    Ok(())
}

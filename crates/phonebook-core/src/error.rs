//! Error types for the contact store
//!
//! `InvalidArgument` is the only error a client can trigger through the API.
//! The remaining variants only surface while loading seed data at startup.

use thiserror::Error;

/// Main error type for contact store operations
#[derive(Error, Debug)]
pub enum ContactError {
    /// A contact with the same name already exists; `name` is the rejected argument
    #[error("name must be unique")]
    InvalidArgument { name: String },

    /// Seed data could not be accepted
    #[error("Seed error: {0}")]
    Seed(String),

    /// Seed file could not be read
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ContactError {
    /// Create a duplicate-name error
    pub fn invalid_argument(name: impl Into<String>) -> Self {
        ContactError::InvalidArgument { name: name.into() }
    }

    /// Create a seed error
    pub fn seed(msg: impl Into<String>) -> Self {
        ContactError::Seed(msg.into())
    }

    /// The rejected argument, if this error carries one
    pub fn invalid_args(&self) -> Option<&str> {
        match self {
            ContactError::InvalidArgument { name } => Some(name),
            _ => None,
        }
    }

    /// Check if this is a client-facing error (vs startup/internal)
    pub fn is_user_error(&self) -> bool {
        matches!(self, ContactError::InvalidArgument { .. })
    }
}

impl From<serde_json::Error> for ContactError {
    fn from(err: serde_json::Error) -> Self {
        ContactError::Seed(format!("JSON error: {}", err))
    }
}

/// Result type alias for contact store operations
pub type Result<T> = std::result::Result<T, ContactError>;

//! Core error types for Spendwise
use thiserror::Error;

/// Result type alias using `SpendwiseError`
pub type Result<T> = std::result::Result<T, SpendwiseError>;

/// Core error type for Spendwise
#[derive(Error, Debug)]
pub enum SpendwiseError {
    /// A required field was absent or blank
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// A field was present but its value is not acceptable
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// An identifier that does not match the store's id format
    #[error("Invalid {entity} ID: {id}")]
    InvalidId {
        /// Kind of entity the id was meant for
        entity: &'static str,
        /// The id as supplied
        id: String,
    },

    /// Entity not found (or not visible to the caller)
    #[error("{entity} not found: {id}")]
    NotFound {
        /// Kind of entity looked up
        entity: String,
        /// The id looked up
        id: String,
    },

    /// Duplicate entry
    #[error("Duplicate entry: {0}")]
    Duplicate(String),

    /// Storage-related errors
    #[error("Storage error: {0}")]
    Storage(String),
}

impl SpendwiseError {
    /// Create a storage error
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// Create a not found error
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create an invalid id error
    pub fn invalid_id(entity: &'static str, id: impl Into<String>) -> Self {
        Self::InvalidId {
            entity,
            id: id.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_id_keeps_the_raw_value() {
        let err = SpendwiseError::invalid_id("expense", "abc");
        assert_eq!(err.to_string(), "Invalid expense ID: abc");
    }

    #[test]
    fn missing_field_message_names_the_field() {
        let err = SpendwiseError::MissingField("category");
        assert_eq!(err.to_string(), "Missing required field: category");
    }
}

//! Custom error types for the budget planner
//!
//! This module defines the error hierarchy for the engine using thiserror
//! for ergonomic error definitions. Validation and not-found errors are
//! recoverable and get folded into `{success: false, message}` results by
//! the service layer; the rest propagate to the caller.

use thiserror::Error;

/// The main error type for budget planner operations
#[derive(Error, Debug)]
pub enum PlannerError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Validation errors for budget items
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// User name cannot be used as a storage key
    #[error("Invalid user: {0}")]
    InvalidUser(String),

    /// Storage errors (unreadable or corrupt store, failed persist)
    #[error("Storage error: {0}")]
    Storage(String),
}

impl PlannerError {
    /// Create a "not found" error for budget items
    pub fn item_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Budget item",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Whether the service layer reports this error as a failed result
    /// instead of propagating it
    pub fn is_recoverable(&self) -> bool {
        self.is_not_found() || self.is_validation()
    }

    /// Message suitable for a `{success: false, message}` result
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(msg) => msg.clone(),
            other => other.to_string(),
        }
    }
}

impl From<std::io::Error> for PlannerError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for PlannerError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for budget planner operations
pub type PlannerResult<T> = Result<T, PlannerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PlannerError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_not_found_error() {
        let err = PlannerError::item_not_found("item_20250101_120000_0");
        assert_eq!(
            err.to_string(),
            "Budget item not found: item_20250101_120000_0"
        );
        assert!(err.is_not_found());
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_validation_user_message_has_no_prefix() {
        let err = PlannerError::Validation("Missing required field: name".into());
        assert_eq!(err.user_message(), "Missing required field: name");
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_storage_error_is_not_recoverable() {
        let err = PlannerError::Storage("Failed to parse budget.json".into());
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let planner_err: PlannerError = io_err.into();
        assert!(matches!(planner_err, PlannerError::Io(_)));
    }
}

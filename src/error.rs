//! Error types for Chatvault
//!
//! This module defines the error types used throughout the application,
//! using `thiserror` for ergonomic error handling. Storage failures have
//! their own discriminated enum so callers can tell a missing session from
//! a corrupt one without string matching.

use thiserror::Error;

/// Main error type for Chatvault operations
///
/// Covers configuration loading, provider interactions, chat actions and
/// (wrapped) session storage failures.
#[derive(Error, Debug)]
pub enum ChatvaultError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Provider-related errors (network failures, bad status, malformed responses)
    #[error("Provider error: {0}")]
    Provider(String),

    /// Authentication errors (e.g., 401 Unauthorized)
    #[error("Authentication error: {0}")]
    Authentication(String),

    /// The provider rejected the request because of rate limiting
    #[error("Rate limited by provider: {0}")]
    RateLimited(String),

    /// Missing credentials for provider
    #[error("Missing credentials for provider: {0}")]
    MissingCredentials(String),

    /// A summary was requested for a conversation without messages
    #[error("No conversation to summarize yet")]
    EmptyConversation,

    /// The user submitted a prompt containing only whitespace
    #[error("Prompt cannot be empty")]
    EmptyPrompt,

    /// Session storage errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Failures reported by the session store
///
/// Every store operation returns one of these instead of panicking, so the
/// interactive layer can always print the problem and keep running.
#[derive(Error, Debug)]
pub enum StorageError {
    /// No record exists for the requested session id
    #[error("Session not found: {0}")]
    NotFound(String),

    /// A record exists but its bytes are not a valid session document
    #[error("Session {id} is corrupt: {reason}")]
    Corrupt {
        /// Session id of the unreadable record
        id: String,
        /// Parser or decoder message
        reason: String,
    },

    /// The history directory cannot be read or written
    #[error("History location unavailable: {0}")]
    Unavailable(String),

    /// The id cannot be used as a record name
    #[error("Invalid session id: {0:?}")]
    InvalidId(String),
}

/// Result type alias for Chatvault operations
///
/// This is a convenience alias that uses `anyhow::Error` as the error type,
/// allowing for rich error context and easy error propagation.
pub type Result<T> = anyhow::Result<T>;

/// Result type returned by the session store
pub type StorageResult<T> = std::result::Result<T, StorageError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let error = ChatvaultError::Config("invalid format".to_string());
        assert_eq!(error.to_string(), "Configuration error: invalid format");
    }

    #[test]
    fn test_provider_error_display() {
        let error = ChatvaultError::Provider("API timeout".to_string());
        assert_eq!(error.to_string(), "Provider error: API timeout");
    }

    #[test]
    fn test_authentication_error_display() {
        let error = ChatvaultError::Authentication("invalid key".to_string());
        assert_eq!(error.to_string(), "Authentication error: invalid key");
    }

    #[test]
    fn test_rate_limited_error_display() {
        let error = ChatvaultError::RateLimited("slow down".to_string());
        assert_eq!(error.to_string(), "Rate limited by provider: slow down");
    }

    #[test]
    fn test_missing_credentials_error_display() {
        let error = ChatvaultError::MissingCredentials("openrouter".to_string());
        assert_eq!(
            error.to_string(),
            "Missing credentials for provider: openrouter"
        );
    }

    #[test]
    fn test_empty_conversation_display() {
        assert_eq!(
            ChatvaultError::EmptyConversation.to_string(),
            "No conversation to summarize yet"
        );
    }

    #[test]
    fn test_storage_not_found_display() {
        let error = StorageError::NotFound("20240101_120000".to_string());
        assert_eq!(error.to_string(), "Session not found: 20240101_120000");
    }

    #[test]
    fn test_storage_corrupt_display() {
        let error = StorageError::Corrupt {
            id: "abc".to_string(),
            reason: "EOF while parsing".to_string(),
        };
        assert!(error.to_string().contains("abc"));
        assert!(error.to_string().contains("EOF while parsing"));
    }

    #[test]
    fn test_storage_error_wraps_into_chatvault_error() {
        let error: ChatvaultError = StorageError::Unavailable("gone".to_string()).into();
        assert!(matches!(
            error,
            ChatvaultError::Storage(StorageError::Unavailable(_))
        ));
        assert_eq!(
            error.to_string(),
            "Storage error: History location unavailable: gone"
        );
    }

    #[test]
    fn test_storage_error_downcasts_from_anyhow() {
        let err: anyhow::Error = ChatvaultError::from(StorageError::NotFound("x".into())).into();
        let inner = err.downcast_ref::<ChatvaultError>();
        assert!(matches!(
            inner,
            Some(ChatvaultError::Storage(StorageError::NotFound(id))) if id == "x"
        ));
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ChatvaultError>();
        assert_send_sync::<StorageError>();
    }
}

//! Error types for bbviz.
//!
//! Defines the main error enum used throughout the application.

use thiserror::Error;

/// Main error type for bbviz operations.
#[derive(Error, Debug)]
pub enum VizError {
    /// Data source connection errors (endpoint unreachable, database missing, etc.)
    #[error("Connection error: {0}")]
    Connection(String),

    /// Data query errors (bad response, failed statement, etc.)
    #[error("Query error: {0}")]
    Query(String),

    /// Name source errors (roster file unreadable or malformed).
    #[error("Roster error: {0}")]
    Roster(String),

    /// Configuration errors (invalid config file, bad URL, etc.)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal application errors (terminal failures, unexpected states, etc.)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl VizError {
    /// Creates a connection error with the given message.
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::Connection(msg.into())
    }

    /// Creates a query error with the given message.
    pub fn query(msg: impl Into<String>) -> Self {
        Self::Query(msg.into())
    }

    /// Creates a roster error with the given message.
    pub fn roster(msg: impl Into<String>) -> Self {
        Self::Roster(msg.into())
    }

    /// Creates a configuration error with the given message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Creates an internal error with the given message.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Returns the error category as a string for display purposes.
    pub fn category(&self) -> &'static str {
        match self {
            Self::Connection(_) => "Connection Error",
            Self::Query(_) => "Query Error",
            Self::Roster(_) => "Roster Error",
            Self::Config(_) => "Configuration Error",
            Self::Internal(_) => "Internal Error",
        }
    }
}

/// Result type alias using VizError.
pub type Result<T> = std::result::Result<T, VizError>;

//! Error types for Pulse Insights.
//!
//! Defines the main error enum used throughout the application.

use thiserror::Error;

/// Main error type for dashboard operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DashboardError {
    /// Auxiliary file configured but absent. Never fatal.
    #[error("Missing asset: {0}")]
    MissingAsset(String),

    /// Database connection errors (host unreachable, auth failed, etc.)
    #[error("Connection error: {0}")]
    Connection(String),

    /// Query execution errors (syntax errors, missing tables, timeouts, etc.)
    #[error("Query error: {0}")]
    Query(String),

    /// A selector outside its closed domain.
    #[error("Invalid selection: {field} '{value}' is not a valid choice")]
    InvalidSelection { field: &'static str, value: String },

    /// Result shape that cannot be drawn as a bar chart.
    #[error("Unrenderable result: {0}")]
    UnrenderableResult(String),

    /// Configuration errors (invalid config file, missing required fields, etc.)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal application errors (terminal failures, unexpected states, etc.)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl DashboardError {
    /// Creates a missing asset error with the given message.
    pub fn missing_asset(msg: impl Into<String>) -> Self {
        Self::MissingAsset(msg.into())
    }

    /// Creates a connection error with the given message.
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::Connection(msg.into())
    }

    /// Creates a query error with the given message.
    pub fn query(msg: impl Into<String>) -> Self {
        Self::Query(msg.into())
    }

    /// Creates an invalid selection error naming the offending field.
    pub fn invalid_selection(field: &'static str, value: impl Into<String>) -> Self {
        Self::InvalidSelection {
            field,
            value: value.into(),
        }
    }

    /// Creates an unrenderable result error with the given message.
    pub fn unrenderable(msg: impl Into<String>) -> Self {
        Self::UnrenderableResult(msg.into())
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
            Self::MissingAsset(_) => "Missing Asset",
            Self::Connection(_) => "Connection Error",
            Self::Query(_) => "Query Error",
            Self::InvalidSelection { .. } => "Invalid Selection",
            Self::UnrenderableResult(_) => "Unrenderable Result",
            Self::Config(_) => "Configuration Error",
            Self::Internal(_) => "Internal Error",
        }
    }

    /// Returns true for errors that only degrade the display.
    pub fn is_warning(&self) -> bool {
        matches!(self, Self::MissingAsset(_) | Self::UnrenderableResult(_))
    }
}

/// Result type alias using DashboardError.
pub type Result<T> = std::result::Result<T, DashboardError>;

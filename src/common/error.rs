//! Error types for the harness
//!
//! HTTP error status codes are not errors at this level: the client returns
//! them as ordinary outcomes and each step decides which codes it accepts.
//! Only transport failures, configuration problems, and violated step
//! expectations surface through this enum.

use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the harness
#[derive(Error, Debug)]
pub enum Error {
    // === Transport Errors ===
    #[error("Transport failure: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Scenario timed out after {0} seconds")]
    ScenarioTimeout(u64),

    // === Step Expectation Errors ===
    #[error("Unexpected status for {operation}: expected {expected}, got {actual}. Response: {body}")]
    UnexpectedStatus {
        operation: String,
        expected: u16,
        actual: u16,
        body: String,
    },

    #[error("Response field '{field}' missing from {operation} body")]
    MissingField {
        operation: String,
        field: &'static str,
    },

    #[error("Precondition not met: {0}")]
    Precondition(String),

    #[error("Assertion failed: {0}")]
    Assertion(String),

    // === Configuration Errors ===
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid configuration file: {0}")]
    ConfigParse(String),

    #[error("No base URL configured for service '{0}'")]
    UnknownService(String),

    #[error("Unknown scenario '{name}'. Available: {available}")]
    UnknownScenario { name: String, available: String },

    // === IO Errors ===
    #[error("Failed to read file '{path}': {error}")]
    FileRead { path: String, error: String },

    // === Serialization Errors ===
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create an unexpected status error, carrying the response body for
    /// diagnosis
    pub fn unexpected_status(
        operation: &str,
        expected: reqwest::StatusCode,
        actual: reqwest::StatusCode,
        body: &str,
    ) -> Self {
        Self::UnexpectedStatus {
            operation: operation.to_string(),
            expected: expected.as_u16(),
            actual: actual.as_u16(),
            body: body.to_string(),
        }
    }

    /// Create a missing field error for a response that had a success
    /// status but not the expected shape
    pub fn missing_field(operation: &str, field: &'static str) -> Self {
        Self::MissingField {
            operation: operation.to_string(),
            field,
        }
    }

    /// Create a precondition error naming the state slot that was absent
    pub fn precondition(what: impl Into<String>) -> Self {
        Self::Precondition(what.into())
    }

    /// Create an assertion error
    pub fn assertion(what: impl Into<String>) -> Self {
        Self::Assertion(what.into())
    }
}

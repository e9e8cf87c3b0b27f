//! Error types for Stockdesk.
//!
//! This module defines custom error types using `thiserror` for precise error handling.

use thiserror::Error;

/// Errors that can occur when talking to the hosted record store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// Store returned an error status code
    #[error("Store error (status {status}): {message}")]
    ApiError { status: u16, message: String },

    /// Failed to parse JSON response
    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Network timeout
    #[error("Request timeout")]
    Timeout,

    /// Record not found
    #[error("Record not found: {0}")]
    NotFound(String),

    /// Authentication failed
    #[error("Authentication failed")]
    Unauthorized,

    /// Unique constraint or similar conflict
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,
}

/// Failures of the external email verification call.
///
/// These never reach callers of `EmailValidator::validate`; they only select
/// the heuristic fallback.
#[derive(Error, Debug)]
pub enum VerificationError {
    /// Transport-level failure (DNS, connect, TLS, timeout)
    #[error("Verification request failed: {0}")]
    Transport(String),

    /// Endpoint answered with a non-success status
    #[error("Verification API returned status {0}")]
    Status(u16),

    /// Response body could not be decoded
    #[error("Malformed verification response: {0}")]
    MalformedResponse(String),

    /// Blocking task panicked or was cancelled
    #[error("Verification task failed: {0}")]
    Task(String),
}

/// Errors that can occur during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Required environment variable is missing
    #[error("Missing required environment variable: {0}")]
    MissingVar(String),

    /// Environment variable has invalid value
    #[error("Invalid value for {var}: {reason}")]
    InvalidValue { var: String, reason: String },
}

/// Errors raised by membership operations (create/join organization).
#[derive(Error, Debug)]
pub enum MembershipError {
    /// No user id is available to attribute the action to
    #[error("User not authenticated")]
    Unauthenticated,

    /// Organization name was blank
    #[error("Organization name cannot be empty")]
    EmptyName,

    /// Underlying store failure
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Errors raised by product inventory operations.
#[derive(Error, Debug)]
pub enum ProductError {
    #[error("User not authenticated")]
    Unauthenticated,

    #[error("Product name is required")]
    EmptyName,

    /// A quantity field was blank where required, or not a whole number >= 0
    #[error("{field} must be a whole number, got: {value:?}")]
    InvalidQuantity { field: &'static str, value: String },

    #[error("Unknown fabric status: {0}")]
    UnknownFabricStatus(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Convenience type alias for Results with StoreError
pub type StoreResult<T> = Result<T, StoreError>;

/// Convenience type alias for Results with VerificationError
pub type VerificationResult<T> = Result<T, VerificationError>;

/// Convenience type alias for Results with ConfigError
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Convenience type alias for Results with MembershipError
pub type MembershipResult<T> = Result<T, MembershipError>;

pub type ProductResult<T> = Result<T, ProductError>;

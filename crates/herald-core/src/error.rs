//! Unified error types for the Herald core.
//!
//! This module provides standardized error types used across core components.
//! Runtime-level errors (like startup failures) are defined in herald-runtime.

use thiserror::Error;

// =============================================================================
// Connection Errors
// =============================================================================

/// Errors raised while establishing a gateway session.
#[derive(Debug, Clone, Error)]
pub enum ConnectionError {
    /// The credential was rejected by the platform.
    #[error("invalid credential: {reason}")]
    InvalidCredential {
        /// Reason reported by the platform.
        reason: String,
    },

    /// The connection could not be established.
    #[error("connection failed: {reason}")]
    ConnectionFailed {
        /// Reason for failure.
        reason: String,
    },

    /// The connection was closed by the remote side.
    #[error("connection closed: {reason}")]
    ConnectionClosed {
        /// Reason for closure.
        reason: String,
    },
}

// =============================================================================
// API Errors
// =============================================================================

/// Errors raised by API calls against an established connection.
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// The connection is not established.
    #[error("not connected")]
    NotConnected,

    /// The API call timed out.
    #[error("API call timed out")]
    Timeout,

    /// The platform returned an error.
    #[error("API error ({code}): {message}")]
    Api {
        /// Platform error code.
        code: i32,
        /// Platform error message.
        message: String,
    },

    /// The target channel does not exist or is not reachable.
    #[error("unknown channel: {0}")]
    UnknownChannel(String),

    /// Transport-level failure.
    #[error("transport error: {0}")]
    Transport(String),
}

// =============================================================================
// Handler Errors
// =============================================================================

/// Errors raised while invoking a handler entry point.
///
/// These are always contained by the dispatch engine's isolation boundary;
/// they never propagate past it.
#[derive(Debug, Error)]
pub enum HandlerError {
    /// An API call made by the handler failed.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The handler itself reported a failure.
    #[error("handler failed: {0}")]
    Failed(String),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for connection operations.
pub type ConnectionResult<T> = Result<T, ConnectionError>;

/// Result type for API calls.
pub type ApiResult<T> = Result<T, ApiError>;

/// Result type for handler invocations.
pub type HandlerResult<T> = Result<T, HandlerError>;

//! Runtime error types.
//!
//! Load and shape failures are contained where they occur and never reach
//! this type; `RuntimeError` covers only the startup-fatal category.

use thiserror::Error;

use crate::config::ConfigError;
use herald_core::ConnectionError;

/// Errors that terminate startup. Callers should exit non-zero on any of
/// these.
#[derive(Debug, Error)]
pub enum RuntimeError {
    /// No gateway credential could be resolved from the environment.
    #[error("no gateway credential found in the environment")]
    MissingCredential,

    /// The login/connect operation failed.
    #[error("login failed: {0}")]
    Login(#[from] ConnectionError),

    /// Configuration loading failed.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Result type for runtime operations.
pub type RuntimeResult<T> = Result<T, RuntimeError>;

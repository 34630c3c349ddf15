//! # Herald Runtime
//!
//! Orchestration layer of the Herald chat automation client: discovers
//! handler manifests on disk, validates them into descriptors, binds event
//! handlers to a gateway connection, and dispatches command invocations.
//!
//! ```rust,ignore
//! use herald_runtime::HeraldRuntime;
//!
//! #[tokio::main]
//! async fn main() {
//!     let runtime = HeraldRuntime::new();
//!     if let Err(err) = runtime.run(my_connection()).await {
//!         tracing::error!(error = %err, "Startup failed");
//!         std::process::exit(1);
//!     }
//! }
//! ```
//!
//! ## Startup sequence
//!
//! ```text
//! credential ─▶ load commands ─▶ bind events ─▶ fallback binding ─▶ login
//! ```
//!
//! Handler problems (unreadable files, invalid shapes) shrink the handler
//! set and are logged; only a missing credential or a rejected login aborts
//! startup.

pub mod binder;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod loader;
pub mod logging;
pub mod registry;
pub mod runtime;

pub(crate) mod actions;

#[cfg(test)]
mod testkit;

pub use binder::EventBinder;
pub use config::{
    ConfigError, ConfigLoader, HandlerConfig, HeraldConfig, LogFormat, LogOutput, LoggingConfig,
};
pub use dispatch::{DispatchEngine, FAILURE_NOTICE};
pub use error::{RuntimeError, RuntimeResult};
pub use loader::LoadedModule;
pub use registry::CommandRegistry;
pub use runtime::{ActiveSession, HeraldRuntime, TOKEN_VARS, resolve_token};

/// Prelude for common imports.
pub mod prelude {
    pub use super::binder::EventBinder;
    pub use super::config::{ConfigLoader, HeraldConfig};
    pub use super::dispatch::DispatchEngine;
    pub use super::error::{RuntimeError, RuntimeResult};
    pub use super::registry::CommandRegistry;
    pub use super::runtime::{ActiveSession, HeraldRuntime};
    pub use herald_core::prelude::*;
}

//! # Herald
//!
//! A handler-registry and dispatch runtime for chat platform automation
//! clients.
//!
//! ## Overview
//!
//! Herald loads declarative handler manifests from disk, validates them
//! once into typed descriptors, and drives them against a gateway
//! connection supplied by the embedding application:
//!
//! - **Command handlers** are collected into an identifier-keyed registry
//!   and invoked through the dispatch engine when a matching interaction
//!   arrives.
//! - **Event handlers** are bound directly to the connection's event
//!   stream, once or repeating.
//!
//! The gateway transport itself (protocol framing, reconnects,
//! heartbeats) is not part of Herald; applications plug one in by
//! implementing the [`Connection`](herald_core::Connection) and
//! [`Interaction`](herald_core::Interaction) traits over their client
//! library of choice.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────┐    ┌───────────┐    ┌──────────┐    ┌──────────┐
//! │ Loader │───▶│ Validator │───▶│ Registry │───▶│ Dispatch │──▶ replies
//! │ (json) │    │  (shape)  │    └──────────┘    │  engine  │
//! └────────┘    └─────┬─────┘                    └────▲─────┘
//!                     │         ┌──────────┐          │
//!                     └────────▶│  Binder  │──────────┘
//!                               └────┬─────┘   interaction_create
//!                                    ▼
//!                             gateway connection
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use herald::prelude::*;
//!
//! #[tokio::main]
//! async fn main() {
//!     let runtime = HeraldRuntime::new();
//!     let connection = my_gateway_adapter();
//!     if let Err(err) = runtime.run(connection).await {
//!         tracing::error!(error = %err, "Startup failed");
//!         std::process::exit(1);
//!     }
//! }
//! ```
//!
//! A minimal command manifest (`handlers/commands/ping.json`):
//!
//! ```json
//! { "name": "ping", "execute": { "action": "reply", "content": "Pong!" } }
//! ```

pub use herald_core as core;
pub use herald_runtime as runtime;

/// Prelude module for convenient imports.
///
/// ```rust,ignore
/// use herald::prelude::*;
/// ```
pub mod prelude {
    // Runtime - main entry point
    pub use herald_runtime::{ActiveSession, HeraldRuntime};

    // Configuration
    pub use herald_runtime::{ConfigLoader, HeraldConfig};

    // Registry and dispatch - for embedding without the full runtime
    pub use herald_runtime::{CommandRegistry, DispatchEngine, EventBinder};

    // Errors
    pub use herald_runtime::{RuntimeError, RuntimeResult};

    // Connection seams - for writing gateway adapters
    pub use herald_core::prelude::*;
}

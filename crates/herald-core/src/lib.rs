//! # Herald Core
//!
//! Foundation layer of the Herald chat automation client.
//!
//! This crate provides the building blocks shared by the runtime and by
//! gateway adapters:
//!
//! - **Connection seams**: the external gateway collaborator traits
//!   ([`Connection`], [`Interaction`])
//! - **Handler model**: validated descriptors and declarative actions
//!   ([`HandlerDescriptor`], [`Action`])
//! - **Shape validation**: one-time classification of loaded manifests
//!   ([`shape::validate`])
//! - **Invocation context**: the per-dispatch value handed to entry points
//!   ([`InvocationContext`])
//!
//! ## Handler flow
//!
//! ```text
//! ┌─────────┐     ┌───────────┐     ┌──────────────────┐
//! │ Loader  │────▶│ Validator │────▶│ Registry / Binder │
//! │ (files) │     │ (shape)   │     │ (herald-runtime)  │
//! └─────────┘     └───────────┘     └──────────────────┘
//! ```
//!
//! Manifests are validated exactly once at load time into a closed tagged
//! descriptor; dispatch works on the tag thereafter and never re-inspects
//! raw JSON.

pub mod connection;
pub mod context;
pub mod descriptor;
pub mod error;
pub mod shape;

// Re-export foundation types
pub use connection::{
    Connection, GatewayPayload, INTERACTION_CREATE, Interaction, ReplyMessage, SessionInfo,
    SharedConnection,
};
pub use context::InvocationContext;
pub use descriptor::{Action, HandlerDescriptor, HandlerKind};
pub use error::{
    ApiError, ApiResult, ConnectionError, ConnectionResult, HandlerError, HandlerResult,
};
pub use shape::ShapeError;

/// Prelude for common imports.
pub mod prelude {
    pub use super::connection::{
        Connection, GatewayPayload, Interaction, ReplyMessage, SessionInfo, SharedConnection,
    };
    pub use super::context::InvocationContext;
    pub use super::descriptor::{Action, HandlerDescriptor, HandlerKind};
    pub use super::error::{ApiResult, ConnectionResult, HandlerResult};
}

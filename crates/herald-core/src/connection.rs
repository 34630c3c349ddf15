//! Gateway connection and interaction seams.
//!
//! The actual gateway transport (protocol framing, reconnects, heartbeats)
//! is owned by an external client library. Herald only depends on the two
//! traits defined here:
//!
//! - [`Connection`] — login, event subscription, and outbound messaging
//! - [`Interaction`] — one inbound command invocation and its reply surface
//!
//! Event delivery is keyed by event category name (e.g. `"ready"`,
//! [`INTERACTION_CREATE`]). The connection provides a subscribe-once and a
//! subscribe-repeating primitive; the once variant guarantees no delivery
//! after the first, so subscribers never need to unsubscribe themselves.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::{mpsc, oneshot};

use crate::error::{ApiResult, ConnectionResult};

/// The event category that delivers user command invocations.
pub const INTERACTION_CREATE: &str = "interaction_create";

/// Identity information returned by a successful login.
#[derive(Debug, Clone)]
pub struct SessionInfo {
    /// Human-readable account tag (e.g. `"herald#0423"`).
    pub tag: String,
}

/// A message sent back to the invoker of a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplyMessage {
    /// The message text.
    pub content: String,
    /// Whether the message is visible only to the invoker.
    pub ephemeral: bool,
}

impl ReplyMessage {
    /// Creates a regular, publicly visible reply.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ephemeral: false,
        }
    }

    /// Creates a reply visible only to the invoker.
    pub fn ephemeral(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ephemeral: true,
        }
    }
}

/// A single inbound event delivered by the connection.
///
/// Command invocations arrive as [`GatewayPayload::Interaction`]; every
/// other event category carries its raw JSON arguments.
#[derive(Clone)]
pub enum GatewayPayload {
    /// A user-triggered interaction (command invocation subtype included).
    Interaction(Arc<dyn Interaction>),
    /// Raw event arguments for non-interaction categories.
    Raw(Value),
}

impl GatewayPayload {
    /// Returns the interaction if this payload carries one.
    pub fn interaction(&self) -> Option<&Arc<dyn Interaction>> {
        match self {
            Self::Interaction(interaction) => Some(interaction),
            Self::Raw(_) => None,
        }
    }
}

impl std::fmt::Debug for GatewayPayload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Interaction(i) => f
                .debug_struct("Interaction")
                .field("command_name", &i.command_name())
                .finish(),
            Self::Raw(value) => f.debug_tuple("Raw").field(value).finish(),
        }
    }
}

/// One inbound interaction and its reply surface.
///
/// Reply state is observable through [`is_replied`](Interaction::is_replied)
/// and [`is_deferred`](Interaction::is_deferred); the dispatch engine uses
/// these to choose between an initial reply and a follow-up when reporting
/// a handler failure.
#[async_trait]
pub trait Interaction: Send + Sync {
    /// Whether this interaction is a command invocation.
    fn is_command(&self) -> bool;

    /// The identifier of the invoked command.
    fn command_name(&self) -> &str;

    /// Whether an initial reply has already been sent.
    fn is_replied(&self) -> bool;

    /// Whether the response has been deferred.
    fn is_deferred(&self) -> bool;

    /// Sends the initial reply to the invoker.
    async fn reply(&self, message: ReplyMessage) -> ApiResult<()>;

    /// Appends a follow-up message after a reply or deferral.
    async fn follow_up(&self, message: ReplyMessage) -> ApiResult<()>;
}

/// The external gateway connection collaborator.
///
/// Implementations wrap a platform client library. The handle is shared
/// read-many across all concurrent dispatches and event bindings.
#[async_trait]
pub trait Connection: Send + Sync {
    /// Establishes the gateway session with the given credential.
    ///
    /// Fails explicitly on an invalid credential; the runtime treats this
    /// as fatal.
    async fn login(&self, token: &str) -> ConnectionResult<SessionInfo>;

    /// Subscribes to every future delivery of an event category.
    fn subscribe(&self, event: &str) -> mpsc::UnboundedReceiver<GatewayPayload>;

    /// Subscribes to at most one delivery of an event category.
    ///
    /// The connection guarantees no further delivery after the first; the
    /// subscriber does not need to unsubscribe.
    fn subscribe_once(&self, event: &str) -> oneshot::Receiver<GatewayPayload>;

    /// Sends a message to a named channel.
    async fn send_message(&self, channel: &str, content: &str) -> ApiResult<()>;
}

/// A shared connection handle.
pub type SharedConnection = Arc<dyn Connection>;

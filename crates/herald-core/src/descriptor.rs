//! Handler descriptors and declarative actions.
//!
//! Handler manifests are validated once at load time into a
//! [`HandlerDescriptor`]; everything downstream (registry, binder, dispatch)
//! works on the descriptor and never re-inspects raw JSON.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The two accepted handler contracts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandlerKind {
    /// Bound to a command identifier, invoked via the dispatch engine.
    Command,
    /// Bound to an event category on the live connection.
    Event,
}

impl HandlerKind {
    /// Returns the kind name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Command => "command",
            Self::Event => "event",
        }
    }
}

impl std::fmt::Display for HandlerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A handler's entry point, expressed as a closed tagged variant.
///
/// Manifests declare what to do; the runtime interprets the tag at dispatch
/// time. This replaces duck-typed callables with a shape that is validated
/// exactly once at load time.
///
/// ```json
/// { "name": "ping", "execute": { "action": "reply", "content": "Pong!" } }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    /// Reply to the triggering interaction.
    Reply {
        /// The reply text.
        content: String,
        /// Whether the reply is visible only to the invoker.
        #[serde(default)]
        ephemeral: bool,
    },

    /// Send a message to a named channel via the connection.
    Send {
        /// The target channel.
        channel: String,
        /// The message text.
        content: String,
    },

    /// Emit an operator-facing log line.
    Log {
        /// The message to log.
        message: String,
    },

    /// Run each step in order, stopping at the first failure.
    Sequence {
        /// The steps to run.
        steps: Vec<Action>,
    },

    /// Run the built-in command dispatch engine.
    ///
    /// Only valid for event handlers; this is what the fallback
    /// interaction binding uses, and what an explicit `interaction_create`
    /// manifest declares to retain baseline command dispatch.
    Dispatch,
}

/// The normalized result of validating a loaded handler manifest.
///
/// Invariant: `identifier` is non-empty and `action` parsed successfully;
/// manifests failing this are rejected by the validator and never become
/// descriptors.
#[derive(Debug, Clone)]
pub struct HandlerDescriptor {
    kind: HandlerKind,
    identifier: String,
    once: bool,
    action: Action,
    metadata: Option<Value>,
}

impl HandlerDescriptor {
    /// Creates a command descriptor.
    ///
    /// `metadata` carries the manifest's raw `data` object, if present, for
    /// use by an external command-registration collaborator.
    pub fn command(identifier: impl Into<String>, action: Action, metadata: Option<Value>) -> Self {
        Self {
            kind: HandlerKind::Command,
            identifier: identifier.into(),
            once: false,
            action,
            metadata,
        }
    }

    /// Creates an event descriptor.
    pub fn event(identifier: impl Into<String>, once: bool, action: Action) -> Self {
        Self {
            kind: HandlerKind::Event,
            identifier: identifier.into(),
            once,
            action,
            metadata: None,
        }
    }

    /// The handler contract this descriptor satisfies.
    pub fn kind(&self) -> HandlerKind {
        self.kind
    }

    /// The command name or event category name.
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Whether an event binding fires at most once (always `false` for
    /// commands).
    pub fn once(&self) -> bool {
        self.once
    }

    /// The validated entry point.
    pub fn action(&self) -> &Action {
        &self.action
    }

    /// The raw `data` metadata object, if the manifest carried one.
    pub fn metadata(&self) -> Option<&Value> {
        self.metadata.as_ref()
    }
}

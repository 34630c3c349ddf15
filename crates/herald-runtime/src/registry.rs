//! Command registry.
//!
//! A mapping from command identifier to its validated descriptor. The
//! registry is built once during the load phase and then frozen behind an
//! `Arc`; after that it is only ever read, so concurrent dispatches need no
//! locking.

use std::collections::HashMap;

use serde_json::Value;
use tracing::debug;

use herald_core::HandlerDescriptor;

/// Registry of command handlers, keyed by identifier.
#[derive(Debug, Default)]
pub struct CommandRegistry {
    commands: HashMap<String, HandlerDescriptor>,
}

impl CommandRegistry {
    /// Creates a new, empty registry.
    pub fn new() -> Self {
        Self {
            commands: HashMap::new(),
        }
    }

    /// Inserts a descriptor by identifier.
    ///
    /// Two manifests declaring the same identifier are accepted silently;
    /// the later-registered one wins. Load order is sorted by file name, so
    /// the winner is deterministic.
    pub fn register(&mut self, descriptor: HandlerDescriptor) {
        let identifier = descriptor.identifier().to_string();
        if self.commands.insert(identifier.clone(), descriptor).is_some() {
            debug!(command = %identifier, "Duplicate command identifier, keeping the later registration");
        }
    }

    /// Looks up the descriptor for an invoked identifier.
    pub fn lookup(&self, identifier: &str) -> Option<&HandlerDescriptor> {
        self.commands.get(identifier)
    }

    /// Returns the number of registered commands.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Returns whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// The raw `data` metadata objects of every registered command.
    ///
    /// Remote registration of command metadata with the platform API is
    /// owned by an external collaborator; this is its input.
    pub fn command_specs(&self) -> Vec<&Value> {
        self.commands
            .values()
            .filter_map(HandlerDescriptor::metadata)
            .collect()
    }
}

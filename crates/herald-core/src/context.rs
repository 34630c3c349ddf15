//! Per-dispatch invocation context.

use std::sync::Arc;

use crate::connection::{GatewayPayload, Interaction, SharedConnection};

/// Transient value carrying one inbound payload and the shared connection.
///
/// Owned exclusively by the dispatch in progress and discarded when it
/// completes; nothing in here is shared mutable across dispatches.
pub struct InvocationContext {
    payload: GatewayPayload,
    connection: SharedConnection,
}

impl InvocationContext {
    /// Creates a context for one dispatch.
    pub fn new(payload: GatewayPayload, connection: SharedConnection) -> Self {
        Self {
            payload,
            connection,
        }
    }

    /// The inbound payload.
    pub fn payload(&self) -> &GatewayPayload {
        &self.payload
    }

    /// The interaction, if the payload carries one.
    pub fn interaction(&self) -> Option<&Arc<dyn Interaction>> {
        self.payload.interaction()
    }

    /// The shared connection handle, for handlers that issue further calls.
    pub fn connection(&self) -> &SharedConnection {
        &self.connection
    }
}

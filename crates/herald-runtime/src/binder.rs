//! Event binder.
//!
//! Subscribes validated event descriptors to the live connection. A binding
//! with `once = true` uses the connection's subscribe-once primitive and is
//! inert after its first delivery; a repeating binding spawns one task per
//! delivery so a slow handler cannot stall later events.
//!
//! Bindings are torn down implicitly at process exit; [`EventBinder::shutdown`]
//! additionally cancels them for orderly in-process shutdown.

use std::collections::HashSet;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

use herald_core::{
    Action, GatewayPayload, HandlerDescriptor, HandlerKind, INTERACTION_CREATE, InvocationContext,
    SharedConnection,
};

use crate::actions;
use crate::dispatch::DispatchEngine;

/// Binds event descriptors to the connection's event stream.
pub struct EventBinder {
    connection: SharedConnection,
    engine: Arc<DispatchEngine>,
    cancel: CancellationToken,
    bound: HashSet<String>,
}

impl EventBinder {
    /// Creates a binder over the shared connection and dispatch engine.
    pub fn new(connection: SharedConnection, engine: Arc<DispatchEngine>) -> Self {
        Self {
            connection,
            engine,
            cancel: CancellationToken::new(),
            bound: HashSet::new(),
        }
    }

    /// Returns whether any binding exists for an event category.
    pub fn is_bound(&self, event: &str) -> bool {
        self.bound.contains(event)
    }

    /// Subscribes one event descriptor to the connection.
    pub fn bind(&mut self, descriptor: HandlerDescriptor) {
        debug_assert_eq!(descriptor.kind(), HandlerKind::Event);

        let event = descriptor.identifier().to_string();
        self.bound.insert(event.clone());

        let connection = Arc::clone(&self.connection);
        let engine = Arc::clone(&self.engine);
        let cancel = self.cancel.clone();

        if descriptor.once() {
            let rx = self.connection.subscribe_once(&event);
            tokio::spawn(async move {
                tokio::select! {
                    _ = cancel.cancelled() => {}
                    delivery = rx => {
                        if let Ok(payload) = delivery {
                            invoke(&descriptor, payload, connection, engine).await;
                        }
                    }
                }
            });
        } else {
            let mut rx = self.connection.subscribe(&event);
            tokio::spawn(async move {
                loop {
                    tokio::select! {
                        _ = cancel.cancelled() => break,
                        delivery = rx.recv() => {
                            let Some(payload) = delivery else { break };
                            let descriptor = descriptor.clone();
                            let connection = Arc::clone(&connection);
                            let engine = Arc::clone(&engine);
                            // Each delivery gets its own task; dispatches
                            // for distinct payloads run concurrently.
                            tokio::spawn(async move {
                                invoke(&descriptor, payload, connection, engine).await;
                            });
                        }
                    }
                }
                debug!(event = %descriptor.identifier(), "Event binding closed");
            });
        }
    }

    /// Installs the built-in dispatch binding if no manifest bound the
    /// command-invocation category.
    ///
    /// This guarantees baseline command dispatch even when the event
    /// directory supplies nothing.
    pub fn ensure_dispatch_binding(&mut self) {
        if self.is_bound(INTERACTION_CREATE) {
            return;
        }
        info!("No interaction handler supplied, installing built-in dispatch binding");
        self.bind(HandlerDescriptor::event(
            INTERACTION_CREATE,
            false,
            Action::Dispatch,
        ));
    }

    /// Cancels every binding task.
    pub fn shutdown(&self) {
        self.cancel.cancel();
    }
}

/// Runs one delivery inside the isolation boundary.
async fn invoke(
    descriptor: &HandlerDescriptor,
    payload: GatewayPayload,
    connection: SharedConnection,
    engine: Arc<DispatchEngine>,
) {
    let ctx = InvocationContext::new(payload, connection);
    match descriptor.action() {
        // Dispatch bindings hand the payload to the engine, which carries
        // its own isolation and invoker notification.
        Action::Dispatch => engine.dispatch(&ctx).await,
        action => {
            if let Err(err) = actions::run(action, &ctx).await {
                error!(event = %descriptor.identifier(), error = %err, "Event handler failed");
            }
        }
    }
}

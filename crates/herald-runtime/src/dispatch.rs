//! Dispatch engine.
//!
//! The runtime path invoked on every inbound interaction: resolve the
//! invoked identifier in the command registry, run the handler inside an
//! isolation boundary, and convert any failure into a generic notice back
//! to the invoker. Raw error detail goes to the operator log only.
//!
//! State machine per interaction:
//!
//! ```text
//! Received → Resolved{found|not-found}
//!                      │
//!                      └─ found → Invoking → {Succeeded | Failed → Notified}
//! ```
//!
//! Terminal states are not-found (silent), Succeeded and Notified; there
//! are no retries.

use std::sync::Arc;

use tracing::{debug, error, trace};

use herald_core::{Interaction, InvocationContext, ReplyMessage};

use crate::actions;
use crate::registry::CommandRegistry;

/// Generic, non-diagnostic notice sent to the invoker when a handler fails.
pub const FAILURE_NOTICE: &str = "Something went wrong while running that command.";

/// Resolves interactions against the command registry and invokes handlers
/// with error isolation.
///
/// The registry is read-only by the time an engine is constructed, so one
/// engine serves any number of concurrent dispatches without locking.
pub struct DispatchEngine {
    registry: Arc<CommandRegistry>,
}

impl DispatchEngine {
    /// Creates an engine over a frozen registry.
    pub fn new(registry: Arc<CommandRegistry>) -> Self {
        Self { registry }
    }

    /// Returns the registry this engine resolves against.
    pub fn registry(&self) -> &Arc<CommandRegistry> {
        &self.registry
    }

    /// Dispatches one inbound payload.
    ///
    /// Non-command payloads and unknown identifiers return silently; a
    /// handler failure is logged and reported to the invoker, never
    /// propagated.
    pub async fn dispatch(&self, ctx: &InvocationContext) {
        let Some(interaction) = ctx.interaction() else {
            return;
        };
        if !interaction.is_command() {
            return;
        }

        let name = interaction.command_name().to_string();
        let Some(descriptor) = self.registry.lookup(&name) else {
            // The identifier may be registered with the platform while its
            // local handler was dropped in a later deploy; a miss is
            // non-actionable, not a failure.
            trace!(command = %name, "No handler registered for command");
            return;
        };

        if let Err(err) = actions::run(descriptor.action(), ctx).await {
            error!(command = %name, error = %err, "Command handler failed");
            notify_failure(interaction).await;
        }
    }
}

/// Sends the generic failure notice to the invoker.
///
/// Uses a follow-up when the interaction was already replied or deferred,
/// an initial reply otherwise.
async fn notify_failure(interaction: &Arc<dyn Interaction>) {
    let notice = ReplyMessage::ephemeral(FAILURE_NOTICE);
    let delivery = if interaction.is_replied() || interaction.is_deferred() {
        interaction.follow_up(notice).await
    } else {
        interaction.reply(notice).await
    };

    // The notice is best-effort: a secondary failure while reporting the
    // first one is discarded here instead of propagating.
    if let Err(err) = delivery {
        debug!(error = %err, "Failed to deliver failure notice");
    }
}

//! Interpreter for declarative handler actions.
//!
//! The validator guarantees the action tree is well-formed; this module
//! only turns tags into calls against the connection. `Sequence` recursion
//! requires the boxed future.

use futures::future::BoxFuture;
use tracing::info;

use herald_core::{Action, HandlerError, HandlerResult, InvocationContext, ReplyMessage};

/// Runs one action against the invocation context.
pub(crate) fn run<'a>(
    action: &'a Action,
    ctx: &'a InvocationContext,
) -> BoxFuture<'a, HandlerResult<()>> {
    Box::pin(async move {
        match action {
            Action::Reply { content, ephemeral } => {
                let interaction = ctx.interaction().ok_or_else(|| {
                    HandlerError::Failed("reply action requires an interaction payload".into())
                })?;
                let message = ReplyMessage {
                    content: content.clone(),
                    ephemeral: *ephemeral,
                };
                if interaction.is_replied() || interaction.is_deferred() {
                    interaction.follow_up(message).await?;
                } else {
                    interaction.reply(message).await?;
                }
                Ok(())
            }
            Action::Send { channel, content } => {
                ctx.connection().send_message(channel, content).await?;
                Ok(())
            }
            Action::Log { message } => {
                info!("{message}");
                Ok(())
            }
            Action::Sequence { steps } => {
                for step in steps {
                    run(step, ctx).await?;
                }
                Ok(())
            }
            // The binder routes dispatch bindings to the engine before the
            // interpreter is reached; the validator rejects it for commands.
            Action::Dispatch => Err(HandlerError::Failed(
                "dispatch action cannot be invoked as an entry point".into(),
            )),
        }
    })
}

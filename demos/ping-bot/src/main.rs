//! Ping Bot Demo
//!
//! A minimal end-to-end demonstration of the Herald runtime wired to an
//! in-memory gateway: handler manifests are loaded from this crate's
//! `handlers/` directory, a `/ping` interaction is emitted, and the reply
//! is printed.
//!
//! # Usage
//!
//! ```bash
//! HERALD_TOKEN=demo cargo run --package ping-bot
//! ```
//!
//! Run it without `HERALD_TOKEN` to see the startup contract: the runtime
//! refuses to start before any connection attempt and the process exits
//! with a non-zero code.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::{mpsc, oneshot};
use tracing::{error, info};

use herald::core::INTERACTION_CREATE;
use herald::prelude::*;
use herald::runtime::HandlerConfig;

// ============================================================================
// In-memory gateway
// ============================================================================

/// A toy gateway that delivers locally emitted events to its subscribers.
struct DemoConnection {
    subscribers: Mutex<HashMap<String, Vec<mpsc::UnboundedSender<GatewayPayload>>>>,
    once_subscribers: Mutex<HashMap<String, Vec<oneshot::Sender<GatewayPayload>>>>,
}

impl DemoConnection {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            subscribers: Mutex::new(HashMap::new()),
            once_subscribers: Mutex::new(HashMap::new()),
        })
    }

    fn emit(&self, event: &str, payload: GatewayPayload) {
        if let Some(senders) = self.once_subscribers.lock().remove(event) {
            for sender in senders {
                let _ = sender.send(payload.clone());
            }
        }
        if let Some(senders) = self.subscribers.lock().get_mut(event) {
            senders.retain(|sender| sender.send(payload.clone()).is_ok());
        }
    }
}

#[async_trait]
impl Connection for DemoConnection {
    async fn login(&self, _token: &str) -> ConnectionResult<SessionInfo> {
        Ok(SessionInfo {
            tag: "ping-bot#0001".to_string(),
        })
    }

    fn subscribe(&self, event: &str) -> mpsc::UnboundedReceiver<GatewayPayload> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.subscribers
            .lock()
            .entry(event.to_string())
            .or_default()
            .push(tx);
        rx
    }

    fn subscribe_once(&self, event: &str) -> oneshot::Receiver<GatewayPayload> {
        let (tx, rx) = oneshot::channel();
        self.once_subscribers
            .lock()
            .entry(event.to_string())
            .or_default()
            .push(tx);
        rx
    }

    async fn send_message(&self, channel: &str, content: &str) -> ApiResult<()> {
        info!("[#{channel}] {content}");
        Ok(())
    }
}

/// A locally crafted command invocation whose reply surface prints to the
/// log.
struct DemoInteraction {
    name: String,
    replied: AtomicBool,
}

impl DemoInteraction {
    fn command(name: &str) -> Arc<Self> {
        Arc::new(Self {
            name: name.to_string(),
            replied: AtomicBool::new(false),
        })
    }
}

#[async_trait]
impl Interaction for DemoInteraction {
    fn is_command(&self) -> bool {
        true
    }

    fn command_name(&self) -> &str {
        &self.name
    }

    fn is_replied(&self) -> bool {
        self.replied.load(Ordering::SeqCst)
    }

    fn is_deferred(&self) -> bool {
        false
    }

    async fn reply(&self, message: ReplyMessage) -> ApiResult<()> {
        self.replied.store(true, Ordering::SeqCst);
        info!("[reply to /{}] {}", self.name, message.content);
        Ok(())
    }

    async fn follow_up(&self, message: ReplyMessage) -> ApiResult<()> {
        info!("[follow-up to /{}] {}", self.name, message.content);
        Ok(())
    }
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        error!(error = %err, "Startup failed");
        std::process::exit(1);
    }
}

async fn run() -> RuntimeResult<()> {
    // Manifests ship inside this crate, so resolve them relative to it
    // rather than the working directory.
    let root = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let config = HeraldConfig {
        handlers: HandlerConfig {
            commands_dir: root.join("handlers/commands"),
            events_dir: root.join("handlers/events"),
        },
        ..HeraldConfig::default()
    };

    let runtime = HeraldRuntime::from_config(&config);
    let connection = DemoConnection::new();

    let session = runtime
        .start(Arc::clone(&connection) as SharedConnection)
        .await?;
    info!(user = %session.info().tag, "Demo session established");

    connection.emit("ready", GatewayPayload::Raw(serde_json::json!({})));

    let interaction = DemoInteraction::command("ping");
    connection.emit(
        INTERACTION_CREATE,
        GatewayPayload::Interaction(Arc::clone(&interaction) as Arc<dyn Interaction>),
    );

    // Give the spawned bindings a moment to deliver before tearing down.
    tokio::time::sleep(Duration::from_millis(200)).await;
    session.shutdown();
    Ok(())
}

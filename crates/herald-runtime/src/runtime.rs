//! Runtime orchestration.
//!
//! Startup runs once, sequentially: resolve the credential, build the
//! command registry from the command directory, bind event manifests,
//! install the fallback dispatch binding, then log in. Everything after
//! that is driven by the connection's event stream.
//!
//! ```rust,ignore
//! use herald_runtime::HeraldRuntime;
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

use std::sync::Arc;

use tokio::signal;
use tracing::{info, warn};

use herald_core::{HandlerKind, SessionInfo, SharedConnection, shape};

use crate::binder::EventBinder;
use crate::config::{ConfigLoader, HeraldConfig};
use crate::dispatch::DispatchEngine;
use crate::error::{RuntimeError, RuntimeResult};
use crate::loader;
use crate::logging;
use crate::registry::CommandRegistry;

/// Environment variables consulted for the gateway credential, in order.
pub const TOKEN_VARS: [&str; 3] = ["HERALD_TOKEN", "GATEWAY_TOKEN", "BOT_TOKEN"];

/// Resolves the gateway credential from the environment.
pub fn resolve_token() -> Option<String> {
    TOKEN_VARS
        .iter()
        .find_map(|var| std::env::var(var).ok().filter(|token| !token.is_empty()))
}

/// The Herald runtime: loads handlers and drives a gateway session.
pub struct HeraldRuntime {
    config: HeraldConfig,
}

impl HeraldRuntime {
    /// Creates a runtime with automatic configuration loading.
    ///
    /// Searches for `herald.toml` in the working directory and applies
    /// `HERALD_*` environment overrides. Falls back to defaults when
    /// loading fails.
    pub fn new() -> Self {
        let config = ConfigLoader::new().load().unwrap_or_else(|err| {
            eprintln!("Warning: failed to load config ({err}), using defaults");
            HeraldConfig::default()
        });
        Self::from_config(&config)
    }

    /// Creates a runtime from a pre-loaded configuration and initializes
    /// logging from it.
    pub fn from_config(config: &HeraldConfig) -> Self {
        logging::init_from_config(&config.logging);
        Self {
            config: config.clone(),
        }
    }

    /// Returns a reference to the configuration.
    pub fn config(&self) -> &HeraldConfig {
        &self.config
    }

    /// Builds the command registry from the command manifest directory.
    ///
    /// Each accepted command and each rejection is logged; rejections
    /// shrink the handler set but never abort startup.
    pub fn load_commands(&self) -> CommandRegistry {
        let mut registry = CommandRegistry::new();
        for module in loader::load_dir(&self.config.handlers.commands_dir) {
            match shape::validate(HandlerKind::Command, &module.value) {
                Ok(descriptor) => {
                    info!(command = %descriptor.identifier(), file = %module.file, "Loaded command");
                    registry.register(descriptor);
                }
                Err(err) => {
                    warn!(file = %module.file, error = %err, "Invalid command handler");
                }
            }
        }
        registry
    }

    /// Binds every valid event manifest, then guarantees command dispatch
    /// via the fallback binding.
    pub fn bind_events(&self, binder: &mut EventBinder) {
        for module in loader::load_dir(&self.config.handlers.events_dir) {
            match shape::validate(HandlerKind::Event, &module.value) {
                Ok(descriptor) => {
                    info!(event = %descriptor.identifier(), file = %module.file, once = descriptor.once(), "Loaded event handler");
                    binder.bind(descriptor);
                }
                Err(err) => {
                    warn!(file = %module.file, error = %err, "Invalid event handler");
                }
            }
        }
        binder.ensure_dispatch_binding();
    }

    /// Runs startup and establishes the gateway session.
    ///
    /// The credential is resolved before anything touches the connection,
    /// so a missing credential means zero connection attempts.
    pub async fn start(&self, connection: SharedConnection) -> RuntimeResult<ActiveSession> {
        let token = resolve_token().ok_or(RuntimeError::MissingCredential)?;

        let registry = Arc::new(self.load_commands());
        let engine = Arc::new(DispatchEngine::new(Arc::clone(&registry)));
        let mut binder = EventBinder::new(Arc::clone(&connection), engine);
        self.bind_events(&mut binder);

        let info = connection.login(&token).await?;
        info!(user = %info.tag, commands = registry.len(), "Gateway session established");

        Ok(ActiveSession {
            info,
            registry,
            binder,
        })
    }

    /// Runs until a shutdown signal is received.
    pub async fn run(&self, connection: SharedConnection) -> RuntimeResult<()> {
        let session = self.start(connection).await?;

        info!("Herald is now running. Press Ctrl+C to stop.");
        Self::wait_for_shutdown().await;

        session.shutdown();
        info!("Herald stopped");
        Ok(())
    }

    /// Waits for shutdown signals (Ctrl+C or SIGTERM).
    async fn wait_for_shutdown() {
        #[cfg(unix)]
        {
            let mut sigterm = signal::unix::signal(signal::unix::SignalKind::terminate())
                .expect("Failed to register SIGTERM handler");

            tokio::select! {
                _ = signal::ctrl_c() => {
                    info!("Received Ctrl+C, shutting down");
                }
                _ = sigterm.recv() => {
                    info!("Received SIGTERM, shutting down");
                }
            }
        }

        #[cfg(not(unix))]
        {
            signal::ctrl_c().await.expect("Failed to listen for Ctrl+C");
            info!("Received Ctrl+C, shutting down");
        }
    }
}

impl Default for HeraldRuntime {
    fn default() -> Self {
        Self::new()
    }
}

/// An established gateway session with its live bindings.
pub struct ActiveSession {
    info: SessionInfo,
    registry: Arc<CommandRegistry>,
    binder: EventBinder,
}

impl ActiveSession {
    /// Identity information from the login.
    pub fn info(&self) -> &SessionInfo {
        &self.info
    }

    /// The frozen command registry.
    pub fn registry(&self) -> &Arc<CommandRegistry> {
        &self.registry
    }

    /// Cancels all event bindings.
    pub fn shutdown(&self) {
        self.binder.shutdown();
    }
}

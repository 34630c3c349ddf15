//! In-memory connection and interaction doubles shared by the runtime tests.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::{mpsc, oneshot};

use herald_core::{
    ApiError, ApiResult, Connection, ConnectionError, ConnectionResult, GatewayPayload,
    Interaction, ReplyMessage, SessionInfo,
};

/// Polls a condition every 10ms for up to one second.
pub async fn wait_until(condition: impl Fn() -> bool) -> bool {
    for _ in 0..100 {
        if condition() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    condition()
}

/// A scriptable in-memory gateway connection.
pub struct MockConnection {
    pub login_calls: AtomicUsize,
    pub sent: Mutex<Vec<(String, String)>>,
    reject_login: bool,
    fail_sends: bool,
    subscribers: Mutex<HashMap<String, Vec<mpsc::UnboundedSender<GatewayPayload>>>>,
    once_subscribers: Mutex<HashMap<String, Vec<oneshot::Sender<GatewayPayload>>>>,
}

impl MockConnection {
    fn with_flags(reject_login: bool, fail_sends: bool) -> Arc<Self> {
        Arc::new(Self {
            login_calls: AtomicUsize::new(0),
            sent: Mutex::new(Vec::new()),
            reject_login,
            fail_sends,
            subscribers: Mutex::new(HashMap::new()),
            once_subscribers: Mutex::new(HashMap::new()),
        })
    }

    /// A connection that accepts logins and records sends.
    pub fn new() -> Arc<Self> {
        Self::with_flags(false, false)
    }

    /// A connection whose `send_message` always fails.
    pub fn failing_sends() -> Arc<Self> {
        Self::with_flags(false, true)
    }

    /// A connection that rejects every login.
    pub fn rejecting_logins() -> Arc<Self> {
        Self::with_flags(true, false)
    }

    /// Delivers a payload to every live subscriber of an event category.
    ///
    /// Once-subscribers are consumed; closed repeating subscribers are
    /// pruned.
    pub fn emit(&self, event: &str, payload: GatewayPayload) {
        if let Some(senders) = self.once_subscribers.lock().remove(event) {
            for sender in senders {
                let _ = sender.send(payload.clone());
            }
        }
        if let Some(senders) = self.subscribers.lock().get_mut(event) {
            senders.retain(|sender| sender.send(payload.clone()).is_ok());
        }
    }

    /// Number of live subscriptions (repeating and once) for an event.
    pub fn subscriber_count(&self, event: &str) -> usize {
        let repeating = self
            .subscribers
            .lock()
            .get(event)
            .map(|senders| senders.iter().filter(|s| !s.is_closed()).count())
            .unwrap_or(0);
        let once = self
            .once_subscribers
            .lock()
            .get(event)
            .map(|senders| senders.iter().filter(|s| !s.is_closed()).count())
            .unwrap_or(0);
        repeating + once
    }
}

#[async_trait]
impl Connection for MockConnection {
    async fn login(&self, _token: &str) -> ConnectionResult<SessionInfo> {
        self.login_calls.fetch_add(1, Ordering::SeqCst);
        if self.reject_login {
            return Err(ConnectionError::InvalidCredential {
                reason: "credential rejected by mock".to_string(),
            });
        }
        Ok(SessionInfo {
            tag: "mock#0001".to_string(),
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
        if self.fail_sends {
            return Err(ApiError::Transport("mock send failure".to_string()));
        }
        self.sent
            .lock()
            .push((channel.to_string(), content.to_string()));
        Ok(())
    }
}

/// A scriptable inbound interaction.
pub struct MockInteraction {
    pub replies: Mutex<Vec<ReplyMessage>>,
    pub follow_ups: Mutex<Vec<ReplyMessage>>,
    name: String,
    is_command: bool,
    fail_replies: bool,
    replied: AtomicBool,
    deferred: AtomicBool,
}

impl MockInteraction {
    fn build(name: &str, is_command: bool, deferred: bool, fail_replies: bool) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(Vec::new()),
            follow_ups: Mutex::new(Vec::new()),
            name: name.to_string(),
            is_command,
            fail_replies,
            replied: AtomicBool::new(false),
            deferred: AtomicBool::new(deferred),
        })
    }

    /// A fresh command invocation.
    pub fn command(name: &str) -> Arc<Self> {
        Self::build(name, true, false, false)
    }

    /// A command invocation whose response was already deferred.
    pub fn deferred_command(name: &str) -> Arc<Self> {
        Self::build(name, true, true, false)
    }

    /// A command invocation whose reply surface always fails.
    pub fn failing_command(name: &str) -> Arc<Self> {
        Self::build(name, true, false, true)
    }

    /// An interaction that is not a command invocation.
    pub fn non_command() -> Arc<Self> {
        Self::build("", false, false, false)
    }

    /// Wraps this interaction as a gateway payload.
    pub fn payload(self: &Arc<Self>) -> GatewayPayload {
        GatewayPayload::Interaction(Arc::clone(self) as Arc<dyn Interaction>)
    }

    /// Total messages delivered to the invoker across both surfaces.
    pub fn notice_count(&self) -> usize {
        self.replies.lock().len() + self.follow_ups.lock().len()
    }
}

#[async_trait]
impl Interaction for MockInteraction {
    fn is_command(&self) -> bool {
        self.is_command
    }

    fn command_name(&self) -> &str {
        &self.name
    }

    fn is_replied(&self) -> bool {
        self.replied.load(Ordering::SeqCst)
    }

    fn is_deferred(&self) -> bool {
        self.deferred.load(Ordering::SeqCst)
    }

    async fn reply(&self, message: ReplyMessage) -> ApiResult<()> {
        if self.fail_replies {
            return Err(ApiError::Transport("mock reply failure".to_string()));
        }
        self.replied.store(true, Ordering::SeqCst);
        self.replies.lock().push(message);
        Ok(())
    }

    async fn follow_up(&self, message: ReplyMessage) -> ApiResult<()> {
        if self.fail_replies {
            return Err(ApiError::Transport("mock follow-up failure".to_string()));
        }
        self.follow_ups.lock().push(message);
        Ok(())
    }
}

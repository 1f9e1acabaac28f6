//! Event listener registry with isolated dispatch.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use color_eyre::eyre::Result;
use parking_lot::RwLock;
use serde_json::Value;
use tokio::task::JoinHandle;
use tracing::debug;

use super::callback::Callback;
use super::safe_call::{StderrDiagnostics, spawn_safe_with};
use crate::domain::ports::DiagnosticPort;

/// Listener taking the shared event payload.
pub type Listener = Callback<Arc<Value>, Result<()>>;

/// Routes gateway events to registered listeners.
///
/// Every listener invocation runs as its own task; a listener that fails or
/// panics is reported and does not affect the others.
pub struct ListenerDispatcher {
    listeners: RwLock<HashMap<String, Vec<Listener>>>,
    diagnostics: Arc<dyn DiagnosticPort>,
}

impl ListenerDispatcher {
    #[must_use]
    pub fn new() -> Self {
        Self::with_diagnostics(Arc::new(StderrDiagnostics))
    }

    #[must_use]
    pub fn with_diagnostics(diagnostics: Arc<dyn DiagnosticPort>) -> Self {
        Self {
            listeners: RwLock::new(HashMap::new()),
            diagnostics,
        }
    }

    // Gateway event names are upper snake case (`MESSAGE_CREATE`).
    fn event_key(event: &str) -> String {
        event.to_uppercase()
    }

    pub fn on(&self, event: &str, listener: Listener) {
        let key = Self::event_key(event);
        debug!(event = %key, is_async = listener.is_async(), "Registering listener");
        self.listeners.write().entry(key).or_default().push(listener);
    }

    pub fn on_sync<F>(&self, event: &str, f: F)
    where
        F: Fn(Arc<Value>) -> Result<()> + Send + Sync + 'static,
    {
        self.on(event, Callback::from_sync(f));
    }

    pub fn on_async<F, Fut>(&self, event: &str, f: F)
    where
        F: Fn(Arc<Value>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<()>> + Send + 'static,
    {
        self.on(event, Callback::from_async(f));
    }

    #[must_use]
    pub fn listener_count(&self, event: &str) -> usize {
        self.listeners
            .read()
            .get(&Self::event_key(event))
            .map_or(0, Vec::len)
    }

    /// Removes every listener of `event`, returning how many were removed.
    pub fn clear(&self, event: &str) -> usize {
        self.listeners
            .write()
            .remove(&Self::event_key(event))
            .map_or(0, |removed| removed.len())
    }

    /// Fires all listeners of `event` and returns their task handles.
    ///
    /// Must be called from within a tokio runtime.
    pub fn dispatch(&self, event: &str, payload: Value) -> Vec<JoinHandle<()>> {
        let key = Self::event_key(event);
        let listeners = self.listeners.read().get(&key).cloned().unwrap_or_default();
        if listeners.is_empty() {
            return Vec::new();
        }

        debug!(event = %key, count = listeners.len(), "Dispatching event");
        let payload = Arc::new(payload);
        listeners
            .into_iter()
            .map(|listener| {
                let payload = Arc::clone(&payload);
                // The call happens inside the task so sync listeners are guarded too.
                spawn_safe_with(
                    Arc::clone(&self.diagnostics),
                    async move { listener.call(payload).await },
                    Some(format!("Exception in listener {key}")),
                )
            })
            .collect()
    }
}

impl Default for ListenerDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

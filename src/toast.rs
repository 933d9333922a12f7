//! Transient user notifications.
//!
//! A [`ToastQueue`] is an explicit, cloneable handle to the list of visible
//! toasts. Every toast gets its own auto-dismiss timer on the tokio runtime;
//! dismissing a toast early cancels that timer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, Weak};
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::debug;

pub const DEFAULT_TOAST_DURATION: Duration = Duration::from_millis(5000);

pub type ToastId = u64;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Error,
    Warning,
    Info,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: ToastId,
    pub severity: Severity,
    pub title: String,
    pub message: Option<String>,
    pub duration: Duration,
    pub created_at: DateTime<Utc>,
}

#[derive(Default)]
struct Inner {
    next_id: ToastId,
    items: Vec<Toast>,
    timers: HashMap<ToastId, JoinHandle<()>>,
}

impl Inner {
    fn remove(&mut self, id: ToastId) -> bool {
        let before = self.items.len();
        self.items.retain(|t| t.id != id);
        if let Some(timer) = self.timers.remove(&id) {
            timer.abort();
        }
        self.items.len() != before
    }
}

#[derive(Clone)]
pub struct ToastQueue {
    inner: Arc<Mutex<Inner>>,
    default_duration: Duration,
}

impl Default for ToastQueue {
    fn default() -> Self {
        Self::new(DEFAULT_TOAST_DURATION)
    }
}

impl ToastQueue {
    pub fn new(default_duration: Duration) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner::default())),
            default_duration,
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        lock(&self.inner)
    }

    /// Show a toast for `duration`
    ///
    /// Outside a tokio runtime there is nothing to drive the timer, so the
    /// toast stays until dismissed.
    pub fn push(
        &self,
        severity: Severity,
        title: impl Into<String>,
        message: Option<String>,
        duration: Duration,
    ) -> ToastId {
        let mut inner = self.lock();
        inner.next_id += 1;
        let id = inner.next_id;

        inner.items.push(Toast {
            id,
            severity,
            title: title.into(),
            message,
            duration,
            created_at: Utc::now(),
        });

        match tokio::runtime::Handle::try_current() {
            Ok(runtime) => {
                let weak = Arc::downgrade(&self.inner);
                let timer = runtime.spawn(expire(weak, id, duration));
                inner.timers.insert(id, timer);
            }
            Err(_) => debug!("No runtime for toast {}, it will stay until dismissed", id),
        }

        id
    }

    pub fn success(&self, title: impl Into<String>, message: impl Into<String>) -> ToastId {
        self.push(Severity::Success, title, Some(message.into()), self.default_duration)
    }

    pub fn error(&self, title: impl Into<String>, message: impl Into<String>) -> ToastId {
        self.push(Severity::Error, title, Some(message.into()), self.default_duration)
    }

    pub fn warning(&self, title: impl Into<String>, message: impl Into<String>) -> ToastId {
        self.push(Severity::Warning, title, Some(message.into()), self.default_duration)
    }

    pub fn info(&self, title: impl Into<String>, message: impl Into<String>) -> ToastId {
        self.push(Severity::Info, title, Some(message.into()), self.default_duration)
    }

    /// Remove a toast before its timer fires. Returns false if it was already gone.
    pub fn dismiss(&self, id: ToastId) -> bool {
        self.lock().remove(id)
    }

    /// Visible toasts, oldest first
    pub fn snapshot(&self) -> Vec<Toast> {
        self.lock().items.clone()
    }

    pub fn len(&self) -> usize {
        self.lock().items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().items.is_empty()
    }

    /// Drop every toast and cancel all pending timers
    pub fn clear(&self) {
        let mut inner = self.lock();
        for (_, timer) in inner.timers.drain() {
            timer.abort();
        }
        inner.items.clear();
    }
}

fn lock(inner: &Mutex<Inner>) -> MutexGuard<'_, Inner> {
    inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

async fn expire(queue: Weak<Mutex<Inner>>, id: ToastId, after: Duration) {
    tokio::time::sleep(after).await;

    // queue dropped: nothing left to update
    let Some(inner) = queue.upgrade() else {
        return;
    };
    let mut state = lock(&inner);
    state.timers.remove(&id);
    state.items.retain(|t| t.id != id);
}

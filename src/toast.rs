//! Ephemeral user notifications with timed expiry.
//!
//! This module manages the queue of transient messages shown to the user:
//! - Insertion-ordered display of concurrent notifications
//! - Per-toast auto-expiry tasks (duration zero means "until dismissed")
//! - Idempotent removal; expired and dismissed ids are safe to remove again
//! - Bulk clear that aborts every pending expiry task

use std::sync::{Arc, Mutex as StdMutex};
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::adapters::UuidIds;
use crate::traits::IdGenerator;

/// Default display duration for severity convenience methods.
pub const DEFAULT_TOAST_DURATION_MS: u64 = 3_000;

/// Visual weight of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Info,
    Success,
    Warning,
    Error,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Success => "success",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single queued notification.
#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    /// Unique id assigned at creation, used to dismiss the toast
    pub id: String,
    /// Text shown to the user
    pub message: String,
    /// Visual weight
    pub severity: Severity,
    /// How long the toast stays up; zero means until dismissed
    pub duration: Duration,
    /// When the toast was created
    pub created_at: DateTime<Utc>,
}

impl Toast {
    /// Whether this toast stays up until explicitly dismissed.
    pub fn is_persistent(&self) -> bool {
        self.duration.is_zero()
    }
}

/// A queued toast together with its pending expiry task, if any.
struct Entry {
    toast: Toast,
    expiry: Option<JoinHandle<()>>,
}

/// Queue of ephemeral notifications.
///
/// Cloning is cheap; clones share the same queue, so the queue can be handed
/// to every component that wants to surface a message. Readers take
/// snapshots via [`ToastQueue::toasts`] and re-render when the revision
/// channel from [`ToastQueue::subscribe`] changes.
#[derive(Clone)]
pub struct ToastQueue {
    entries: Arc<StdMutex<Vec<Entry>>>,
    ids: Arc<dyn IdGenerator>,
    revision: Arc<watch::Sender<u64>>,
}

impl ToastQueue {
    /// Create an empty queue with UUID ids.
    pub fn new() -> Self {
        Self::with_ids(Arc::new(UuidIds))
    }

    /// Create an empty queue with an injected id source.
    pub fn with_ids(ids: Arc<dyn IdGenerator>) -> Self {
        let (revision, _) = watch::channel(0);
        Self {
            entries: Arc::new(StdMutex::new(Vec::new())),
            ids,
            revision: Arc::new(revision),
        }
    }

    /// Queue a notification and return its id.
    ///
    /// For a non-zero `duration` an expiry task is scheduled that removes
    /// the toast once the duration elapses; dismissing the toast earlier
    /// aborts the task.
    pub fn add(
        &self,
        message: impl Into<String>,
        severity: Severity,
        duration: Duration,
    ) -> String {
        let toast = Toast {
            id: self.ids.generate(),
            message: message.into(),
            severity,
            duration,
            created_at: Utc::now(),
        };
        let id = toast.id.clone();

        let expiry = self.schedule_expiry(&toast);
        {
            let mut entries = self.entries.lock().unwrap();
            entries.push(Entry { toast, expiry });
        }
        tracing::debug!(id = %id, severity = %severity, "toast added");
        self.bump_revision();
        id
    }

    /// Queue an info toast with the default duration.
    pub fn info(&self, message: impl Into<String>) -> String {
        self.add(
            message,
            Severity::Info,
            Duration::from_millis(DEFAULT_TOAST_DURATION_MS),
        )
    }

    /// Queue a success toast with the default duration.
    pub fn success(&self, message: impl Into<String>) -> String {
        self.add(
            message,
            Severity::Success,
            Duration::from_millis(DEFAULT_TOAST_DURATION_MS),
        )
    }

    /// Queue a warning toast with the default duration.
    pub fn warning(&self, message: impl Into<String>) -> String {
        self.add(
            message,
            Severity::Warning,
            Duration::from_millis(DEFAULT_TOAST_DURATION_MS),
        )
    }

    /// Queue an error toast with the default duration.
    pub fn error(&self, message: impl Into<String>) -> String {
        self.add(
            message,
            Severity::Error,
            Duration::from_millis(DEFAULT_TOAST_DURATION_MS),
        )
    }

    /// Dismiss a toast by id, aborting its expiry task.
    ///
    /// Unknown ids (never created, already expired, already dismissed) are a
    /// no-op, not an error.
    pub fn remove(&self, id: &str) {
        let entry = {
            let mut entries = self.entries.lock().unwrap();
            entries
                .iter()
                .position(|e| e.toast.id == id)
                .map(|index| entries.remove(index))
        };
        match entry {
            Some(entry) => {
                if let Some(handle) = entry.expiry {
                    handle.abort();
                }
                tracing::debug!(id = %id, "toast removed");
                self.bump_revision();
            }
            None => {
                tracing::trace!(id = %id, "remove for unknown toast id");
            }
        }
    }

    /// Dismiss every queued toast and abort all pending expiry tasks.
    ///
    /// Toasts added after the clear keep their own fresh timers; nothing
    /// scheduled before the clear can touch them.
    pub fn clear(&self) {
        let drained: Vec<Entry> = {
            let mut entries = self.entries.lock().unwrap();
            std::mem::take(&mut *entries)
        };
        if drained.is_empty() {
            return;
        }
        let count = drained.len();
        for entry in drained {
            if let Some(handle) = entry.expiry {
                handle.abort();
            }
        }
        tracing::debug!(count, "toast queue cleared");
        self.bump_revision();
    }

    /// Snapshot of the queue in insertion order.
    pub fn toasts(&self) -> Vec<Toast> {
        self.entries
            .lock()
            .unwrap()
            .iter()
            .map(|entry| entry.toast.clone())
            .collect()
    }

    /// Whether a toast with this id is currently queued.
    pub fn contains(&self, id: &str) -> bool {
        self.entries
            .lock()
            .unwrap()
            .iter()
            .any(|entry| entry.toast.id == id)
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().unwrap().is_empty()
    }

    /// Watch channel that ticks on every queue change.
    ///
    /// Renderers await `changed()` and then take a fresh [`ToastQueue::toasts`]
    /// snapshot; rapid changes may coalesce into one wakeup.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }

    /// Spawn the expiry task for a toast, if it has a finite duration.
    fn schedule_expiry(&self, toast: &Toast) -> Option<JoinHandle<()>> {
        if toast.is_persistent() {
            return None;
        }
        // Guard: only spawn if a tokio runtime is available (avoids panics in sync tests)
        let Ok(_handle) = tokio::runtime::Handle::try_current() else {
            tracing::warn!(id = %toast.id, "no async runtime, toast will not auto-expire");
            return None;
        };
        let queue = self.clone();
        let id = toast.id.clone();
        let duration = toast.duration;
        Some(tokio::spawn(async move {
            tokio::time::sleep(duration).await;
            queue.expire(&id);
        }))
    }

    /// Removal path taken by expiry tasks.
    ///
    /// Separate from [`ToastQueue::remove`] so the task never aborts its own
    /// handle; if the toast was already dismissed this is a no-op.
    fn expire(&self, id: &str) {
        let expired = {
            let mut entries = self.entries.lock().unwrap();
            let before = entries.len();
            entries.retain(|entry| entry.toast.id != id);
            before != entries.len()
        };
        if expired {
            tracing::debug!(id = %id, "toast expired");
            self.bump_revision();
        }
    }

    fn bump_revision(&self) {
        self.revision.send_modify(|revision| *revision += 1);
    }
}

impl Default for ToastQueue {
    fn default() -> Self {
        Self::new()
    }
}

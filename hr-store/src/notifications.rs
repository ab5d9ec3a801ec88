//! Self-expiring notifications
//!
//! Each pushed notification owns a one-shot tokio timer that removes it after
//! the configured lifetime. Clearing a notification aborts its timer, so
//! manual dismissal and expiry never race on the same id.

use std::collections::HashMap;
use std::sync::{Arc, Weak};
use std::time::Duration;

use parking_lot::Mutex;
use tokio::runtime::Handle;
use tokio::task::AbortHandle;

use shared::models::{Notification, NotificationKind};
use shared::util::generate_id;

/// Lifetime of a notification before it is removed automatically
pub const DEFAULT_NOTIFICATION_TTL: Duration = Duration::from_secs(5);

#[derive(Default)]
struct Inner {
    items: Vec<Notification>,
    timers: HashMap<String, AbortHandle>,
}

/// Ordered list of live notifications
pub struct NotificationQueue {
    inner: Arc<Mutex<Inner>>,
    ttl: Duration,
}

impl Default for NotificationQueue {
    fn default() -> Self {
        Self::new(DEFAULT_NOTIFICATION_TTL)
    }
}

impl std::fmt::Debug for NotificationQueue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.lock();
        f.debug_struct("NotificationQueue")
            .field("items", &inner.items)
            .field("timers", &inner.timers.len())
            .field("ttl", &self.ttl)
            .finish()
    }
}

impl NotificationQueue {
    pub fn new(ttl: Duration) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner::default())),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Append a notification and schedule its removal
    ///
    /// Outside a tokio runtime the notification is kept until cleared.
    pub fn push(&self, message: impl Into<String>, kind: NotificationKind) -> Notification {
        let notification = Notification {
            id: generate_id("notif"),
            message: message.into(),
            kind,
        };

        let mut inner = self.inner.lock();
        inner.items.push(notification.clone());

        match Handle::try_current() {
            Ok(handle) => {
                let task = handle.spawn(expire(
                    Arc::downgrade(&self.inner),
                    notification.id.clone(),
                    self.ttl,
                ));
                inner
                    .timers
                    .insert(notification.id.clone(), task.abort_handle());
            }
            Err(_) => {
                tracing::debug!(id = %notification.id, "No runtime, notification will not expire");
            }
        }

        notification
    }

    /// Remove a notification and cancel its timer. Returns `false` when the
    /// id is unknown (already expired or cleared).
    pub fn clear(&self, id: &str) -> bool {
        let mut inner = self.inner.lock();
        if let Some(timer) = inner.timers.remove(id) {
            timer.abort();
        }
        let before = inner.items.len();
        inner.items.retain(|n| n.id != id);
        inner.items.len() != before
    }

    /// Snapshot of the live notifications, oldest first
    pub fn list(&self) -> Vec<Notification> {
        self.inner.lock().items.clone()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Drop for NotificationQueue {
    fn drop(&mut self) {
        for (_, timer) in self.inner.lock().timers.drain() {
            timer.abort();
        }
    }
}

async fn expire(inner: Weak<Mutex<Inner>>, id: String, ttl: Duration) {
    tokio::time::sleep(ttl).await;

    let Some(inner) = inner.upgrade() else {
        return;
    };
    let mut inner = inner.lock();
    inner.timers.remove(&id);
    inner.items.retain(|n| n.id != id);
    tracing::debug!(id = %id, "Notification expired");
}

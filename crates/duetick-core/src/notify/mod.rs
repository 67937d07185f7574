//! Notification scheduling.
//!
//! The scheduler capability is three calls: permission, one-shot schedule,
//! best-effort cancel. The desktop implementation has no background daemon
//! to hand the schedule to, so it persists its single pending record in the
//! key/value store and relies on a foreground loop to pump
//! [`DesktopScheduler::deliver_due`] once per sample.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::countdown::{now_ms, EpochMillis};
use crate::error::NotifyError;
use crate::storage::KvStore;

/// Storage key for the pending notification record.
pub const PENDING_NOTIFICATION_KEY: &str = "pendingNotification";

/// Outcome of a permission request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Permission {
    Granted,
    Denied,
}

/// Payload of a scheduled notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationContent {
    pub title: String,
}

impl NotificationContent {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }
}

/// One-shot notification scheduling capability.
///
/// At most one notification is ever pending: callers cancel the previous id
/// before relying on a new one. Cancelling an unknown or already-fired id is
/// a silent no-op.
pub trait NotificationScheduler {
    fn request_permission(&mut self) -> Permission;

    /// Schedule a one-shot notification `delay_secs` from now. Returns an
    /// opaque identifier for later cancellation.
    fn schedule(
        &mut self,
        content: &NotificationContent,
        delay_secs: u64,
    ) -> Result<String, NotifyError>;

    /// Best-effort cancellation of a not-yet-fired notification.
    fn cancel(&mut self, id: &str) -> Result<(), NotifyError>;
}

/// Durable record of the single scheduled notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingNotification {
    pub id: String,
    pub title: String,
    pub fire_at_ms: EpochMillis,
}

/// Scheduler backed by the desktop notification daemon.
///
/// Scheduling writes the pending record to the store, so it survives process
/// restarts; delivery happens when a foreground loop calls
/// [`deliver_due`](DesktopScheduler::deliver_due) at or past the fire time.
/// Permission mirrors the notifications config toggle -- the desktop has no
/// OS prompt to delegate to.
#[derive(Debug)]
pub struct DesktopScheduler<S> {
    store: S,
    enabled: bool,
}

impl<S: KvStore> DesktopScheduler<S> {
    pub fn new(store: S, enabled: bool) -> Self {
        Self { store, enabled }
    }

    /// Currently pending record, if any.
    pub fn pending(&self) -> Option<PendingNotification> {
        let value = self.store.get(PENDING_NOTIFICATION_KEY)?;
        if value.is_null() {
            return None;
        }
        match serde_json::from_value(value) {
            Ok(pending) => Some(pending),
            Err(err) => {
                debug!("discarding undecodable pending notification: {err}");
                None
            }
        }
    }

    /// Pending record whose fire time has passed, without delivering it.
    pub fn due_at(&self, now: EpochMillis) -> Option<PendingNotification> {
        self.pending().filter(|p| p.fire_at_ms <= now)
    }

    /// Show the pending notification if it is due, then clear the record.
    /// Call from a foreground sampling loop.
    pub fn deliver_due(&mut self) -> Option<PendingNotification> {
        self.deliver_due_at(now_ms())
    }

    pub fn deliver_due_at(&mut self, now: EpochMillis) -> Option<PendingNotification> {
        let due = self.due_at(now)?;
        if let Err(err) = notify_rust::Notification::new().summary(&due.title).show() {
            warn!("notification delivery failed: {err}");
        }
        if let Err(err) = self.write_pending(None) {
            warn!("failed to clear delivered notification: {err}");
        }
        Some(due)
    }

    fn write_pending(&self, pending: Option<&PendingNotification>) -> Result<(), String> {
        let value = match pending {
            Some(p) => serde_json::to_value(p).map_err(|e| e.to_string())?,
            None => serde_json::Value::Null,
        };
        self.store
            .set(PENDING_NOTIFICATION_KEY, value)
            .map_err(|e| e.to_string())
    }
}

impl<S: KvStore> NotificationScheduler for DesktopScheduler<S> {
    fn request_permission(&mut self) -> Permission {
        if self.enabled {
            Permission::Granted
        } else {
            Permission::Denied
        }
    }

    fn schedule(
        &mut self,
        content: &NotificationContent,
        delay_secs: u64,
    ) -> Result<String, NotifyError> {
        let id = Uuid::new_v4().to_string();
        let pending = PendingNotification {
            id: id.clone(),
            title: content.title.clone(),
            fire_at_ms: now_ms().saturating_add(delay_secs.saturating_mul(1000)),
        };
        self.write_pending(Some(&pending))
            .map_err(NotifyError::ScheduleFailed)?;
        Ok(id)
    }

    fn cancel(&mut self, id: &str) -> Result<(), NotifyError> {
        match self.pending() {
            Some(p) if p.id == id => {
                self.write_pending(None)
                    .map_err(|message| NotifyError::CancelFailed {
                        id: id.to_string(),
                        message,
                    })
            }
            // Unknown or already fired.
            _ => Ok(()),
        }
    }
}

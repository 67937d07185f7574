use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::countdown::EpochMillis;

/// Every observable transition produces an Event.
/// The CLI prints them; an embedding UI can drive feedback from them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    CompletionRecorded {
        completed_at_ms: EpochMillis,
        total_completions: usize,
        at: DateTime<Utc>,
    },
    NotificationScheduled {
        id: String,
        fire_in_secs: u64,
        at: DateTime<Utc>,
    },
    NotificationCancelled {
        id: String,
        at: DateTime<Utc>,
    },
    /// Permission was denied; the completion proceeded without a follow-up
    /// notification. Callers surface this as a user-visible warning.
    PermissionDenied {
        at: DateTime<Utc>,
    },
}

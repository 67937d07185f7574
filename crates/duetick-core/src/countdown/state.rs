use serde::{Deserialize, Serialize};

use super::clock::EpochMillis;

/// Storage key for the persisted countdown record.
pub const COUNTDOWN_STORAGE_KEY: &str = "countdownState";

/// The sole durable record.
///
/// Serialized camelCase under [`COUNTDOWN_STORAGE_KEY`]. Replaced wholesale
/// on every completion -- never mutated in place.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedCountdownState {
    /// Id of the single pending notification, absent if none is scheduled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_notification_id: Option<String>,
    /// Completion times, most recent first. New entries are prepended; the
    /// clock reads only the head, but the full history is retained.
    #[serde(default)]
    pub completed_at_timestamps: Vec<EpochMillis>,
}

impl PersistedCountdownState {
    pub fn last_completed_at(&self) -> Option<EpochMillis> {
        self.completed_at_timestamps.first().copied()
    }

    /// Build the replacement record for a completion at `now`.
    pub fn with_completion(&self, now: EpochMillis, notification_id: Option<String>) -> Self {
        let mut completed = Vec::with_capacity(self.completed_at_timestamps.len() + 1);
        completed.push(now);
        completed.extend_from_slice(&self.completed_at_timestamps);
        Self {
            current_notification_id: notification_id,
            completed_at_timestamps: completed,
        }
    }

    pub fn completions(&self) -> usize {
        self.completed_at_timestamps.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completions_prepend_most_recent_first() {
        let s0 = PersistedCountdownState::default();
        let s1 = s0.with_completion(100, Some("id1".into()));
        let s2 = s1.with_completion(200, Some("id2".into()));
        assert_eq!(s2.completed_at_timestamps, vec![200, 100]);
        assert_eq!(s2.current_notification_id.as_deref(), Some("id2"));
        assert_eq!(s2.completions(), 2);
        assert_eq!(s2.last_completed_at(), Some(200));
        // The replaced record is untouched.
        assert_eq!(s1.completed_at_timestamps, vec![100]);
    }

    #[test]
    fn completion_replaces_the_notification_id() {
        let s = PersistedCountdownState::default()
            .with_completion(100, Some("id1".into()))
            .with_completion(200, None);
        assert_eq!(s.current_notification_id, None);
    }

    #[test]
    fn record_serializes_with_camel_case_keys() {
        let s = PersistedCountdownState {
            current_notification_id: Some("abc".into()),
            completed_at_timestamps: vec![2, 1],
        };
        let json = serde_json::to_value(&s).unwrap();
        assert_eq!(json["currentNotificationId"], "abc");
        assert_eq!(json["completedAtTimestamps"], serde_json::json!([2, 1]));
    }

    #[test]
    fn absent_id_is_omitted_and_deserializes_as_none() {
        let s = PersistedCountdownState {
            current_notification_id: None,
            completed_at_timestamps: vec![5],
        };
        let json = serde_json::to_value(&s).unwrap();
        assert!(json.get("currentNotificationId").is_none());

        let parsed: PersistedCountdownState =
            serde_json::from_str(r#"{"completedAtTimestamps":[5]}"#).unwrap();
        assert_eq!(parsed.current_notification_id, None);
        assert_eq!(parsed.last_completed_at(), Some(5));
    }
}

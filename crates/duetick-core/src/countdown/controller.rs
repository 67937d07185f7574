//! Countdown orchestration.
//!
//! The controller owns the persisted state cell and the two collaborators
//! behind it: the key/value store and the notification scheduler. It is a
//! two-state machine driven by caller-invoked ticks:
//!
//! ```text
//! Counting -> Overdue    (wall clock crosses the target; pure recomputation)
//! Overdue  -> Counting   (completion re-anchors the target)
//! ```
//!
//! There is no terminal state; the machine cycles indefinitely. Completion
//! calls are serialized through `&mut self`.

use chrono::Utc;
use tracing::warn;

use crate::events::Event;
use crate::notify::{NotificationContent, NotificationScheduler, Permission};
use crate::storage::KvStore;

use super::clock::{now_ms, CountdownClock, EpochMillis, Frequency, Sample};
use super::state::PersistedCountdownState;
use super::store::CountdownStateStore;

/// Orchestrates loading, sampling, and completion of the countdown.
pub struct CountdownController<S, N> {
    store: CountdownStateStore<S>,
    scheduler: N,
    clock: CountdownClock,
    content: NotificationContent,
    state: Option<PersistedCountdownState>,
    initialized: bool,
    ready: bool,
}

impl<S: KvStore, N: NotificationScheduler> CountdownController<S, N> {
    pub fn new(
        store: CountdownStateStore<S>,
        scheduler: N,
        frequency: Frequency,
        content: NotificationContent,
    ) -> Self {
        Self {
            store,
            scheduler,
            clock: CountdownClock::new(frequency),
            content,
            state: None,
            initialized: false,
            ready: false,
        }
    }

    /// Load persisted state. An absent or unreadable record is a first run.
    pub fn initialize(&mut self) {
        self.state = self.store.load();
        self.initialized = true;
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> Option<&PersistedCountdownState> {
        self.state.as_ref()
    }

    pub fn last_completed_at(&self) -> Option<EpochMillis> {
        self.state.as_ref().and_then(|s| s.last_completed_at())
    }

    /// True once a sample has been produced after [`initialize`].
    ///
    /// [`initialize`]: CountdownController::initialize
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn scheduler(&self) -> &N {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut N {
        &mut self.scheduler
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Recompute the countdown status at `now`.
    pub fn tick_at(&mut self, now: EpochMillis) -> Sample {
        let sample = self.clock.sample(self.last_completed_at(), now);
        if self.initialized {
            self.ready = true;
        }
        sample
    }

    /// Recompute the countdown status against the wall clock.
    pub fn tick(&mut self) -> Sample {
        self.tick_at(now_ms())
    }

    /// The completion action against the wall clock.
    pub fn on_complete(&mut self) -> Vec<Event> {
        self.on_complete_at(now_ms())
    }

    /// Mark the recurring task done at `now`.
    ///
    /// Order matters: schedule the follow-up first, cancel the stale
    /// notification next, persist last. A crash mid-sequence can leak a
    /// dangling notification but never records a completion that skipped
    /// its scheduling attempt.
    pub fn on_complete_at(&mut self, now: EpochMillis) -> Vec<Event> {
        let mut events = Vec::new();

        let notification_id = match self.scheduler.request_permission() {
            Permission::Granted => {
                let delay_secs = self.clock.frequency().as_secs();
                match self.scheduler.schedule(&self.content, delay_secs) {
                    Ok(id) => {
                        events.push(Event::NotificationScheduled {
                            id: id.clone(),
                            fire_in_secs: delay_secs,
                            at: Utc::now(),
                        });
                        Some(id)
                    }
                    Err(err) => {
                        warn!("scheduling follow-up notification failed: {err}");
                        None
                    }
                }
            }
            Permission::Denied => {
                events.push(Event::PermissionDenied { at: Utc::now() });
                None
            }
        };

        if let Some(previous) = self
            .state
            .as_ref()
            .and_then(|s| s.current_notification_id.clone())
        {
            match self.scheduler.cancel(&previous) {
                Ok(()) => events.push(Event::NotificationCancelled {
                    id: previous,
                    at: Utc::now(),
                }),
                // Not retried; a phantom notification may still fire.
                Err(err) => warn!("cancelling notification '{previous}' failed: {err}"),
            }
        }

        let next = self
            .state
            .take()
            .unwrap_or_default()
            .with_completion(now, notification_id);

        events.push(Event::CompletionRecorded {
            completed_at_ms: now,
            total_completions: next.completions(),
            at: Utc::now(),
        });

        if let Err(err) = self.store.save(&next) {
            // Completion proceeds in memory; the record is lost on exit.
            warn!("persisting countdown state failed: {err}");
        }
        self.state = Some(next);

        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NotifyError;
    use crate::storage::MemoryStore;

    #[derive(Default)]
    struct FakeScheduler {
        deny_permission: bool,
        fail_cancel: bool,
        next_id: u32,
        scheduled: Vec<String>,
        cancelled: Vec<String>,
    }

    impl NotificationScheduler for FakeScheduler {
        fn request_permission(&mut self) -> Permission {
            if self.deny_permission {
                Permission::Denied
            } else {
                Permission::Granted
            }
        }

        fn schedule(
            &mut self,
            _content: &NotificationContent,
            _delay_secs: u64,
        ) -> Result<String, NotifyError> {
            self.next_id += 1;
            let id = format!("id{}", self.next_id);
            self.scheduled.push(id.clone());
            Ok(id)
        }

        fn cancel(&mut self, id: &str) -> Result<(), NotifyError> {
            if self.fail_cancel {
                return Err(NotifyError::CancelFailed {
                    id: id.to_string(),
                    message: "gone".into(),
                });
            }
            self.cancelled.push(id.to_string());
            Ok(())
        }
    }

    const T0: EpochMillis = 1_700_000_000_000;

    fn controller(
        store: MemoryStore,
        scheduler: FakeScheduler,
    ) -> CountdownController<MemoryStore, FakeScheduler> {
        CountdownController::new(
            CountdownStateStore::new(store),
            scheduler,
            Frequency::from_secs(10),
            NotificationContent::new("due"),
        )
    }

    #[test]
    fn completion_schedules_and_persists() {
        let store = MemoryStore::new();
        let mut c = controller(store.clone(), FakeScheduler::default());
        c.initialize();

        let events = c.on_complete_at(T0);
        assert!(matches!(
            events.first(),
            Some(Event::NotificationScheduled { .. })
        ));
        assert!(matches!(
            events.last(),
            Some(Event::CompletionRecorded {
                total_completions: 1,
                ..
            })
        ));

        let persisted = CountdownStateStore::new(store).load().unwrap();
        assert_eq!(persisted.completed_at_timestamps, vec![T0]);
        assert_eq!(persisted.current_notification_id.as_deref(), Some("id1"));
    }

    #[test]
    fn second_completion_cancels_the_previous_notification() {
        let mut c = controller(MemoryStore::new(), FakeScheduler::default());
        c.initialize();
        c.on_complete_at(T0);
        let events = c.on_complete_at(T0 + 15_000);

        assert!(events
            .iter()
            .any(|e| matches!(e, Event::NotificationCancelled { id, .. } if id == "id1")));
        let state = c.state().unwrap();
        assert_eq!(state.current_notification_id.as_deref(), Some("id2"));
        assert_eq!(state.completed_at_timestamps, vec![T0 + 15_000, T0]);
        assert_eq!(c.scheduler().cancelled, vec!["id1"]);
    }

    #[test]
    fn denied_permission_still_records_the_completion() {
        let scheduler = FakeScheduler {
            deny_permission: true,
            ..FakeScheduler::default()
        };
        let store = MemoryStore::new();
        let mut c = controller(store.clone(), scheduler);
        c.initialize();

        let events = c.on_complete_at(T0);
        assert!(events
            .iter()
            .any(|e| matches!(e, Event::PermissionDenied { .. })));

        let persisted = CountdownStateStore::new(store).load().unwrap();
        assert_eq!(persisted.current_notification_id, None);
        assert_eq!(persisted.completed_at_timestamps, vec![T0]);
        assert!(c.scheduler().scheduled.is_empty());
    }

    #[test]
    fn cancel_failure_is_swallowed() {
        let scheduler = FakeScheduler {
            fail_cancel: true,
            ..FakeScheduler::default()
        };
        let mut c = controller(MemoryStore::new(), scheduler);
        c.initialize();
        c.on_complete_at(T0);
        let events = c.on_complete_at(T0 + 1_000);

        assert!(!events
            .iter()
            .any(|e| matches!(e, Event::NotificationCancelled { .. })));
        // The stale id is still replaced, never accumulated.
        assert_eq!(c.state().unwrap().current_notification_id.as_deref(), Some("id2"));
    }

    #[test]
    fn at_most_one_notification_id_is_ever_live() {
        let mut c = controller(MemoryStore::new(), FakeScheduler::default());
        c.initialize();
        for i in 0..3 {
            c.on_complete_at(T0 + i * 1_000);
        }
        assert_eq!(c.state().unwrap().current_notification_id.as_deref(), Some("id3"));
        assert_eq!(c.scheduler().cancelled, vec!["id1", "id2"]);
    }

    #[test]
    fn initialize_adopts_persisted_state() {
        let store = MemoryStore::new();
        let previous = PersistedCountdownState::default().with_completion(T0, Some("old".into()));
        CountdownStateStore::new(store.clone()).save(&previous).unwrap();

        let mut c = controller(store, FakeScheduler::default());
        c.initialize();
        assert_eq!(c.last_completed_at(), Some(T0));
    }

    #[test]
    fn ready_only_after_first_sample_following_initialize() {
        let mut c = controller(MemoryStore::new(), FakeScheduler::default());
        c.tick_at(T0);
        assert!(!c.is_ready());

        c.initialize();
        assert!(!c.is_ready());

        let sample = c.tick_at(T0);
        assert!(!sample.is_anchored());
        assert!(c.is_ready());
    }

    #[test]
    fn overdue_flips_only_via_completion() {
        let mut c = controller(MemoryStore::new(), FakeScheduler::default());
        c.initialize();
        c.on_complete_at(T0);

        assert!(!c.tick_at(T0 + 9_999).status().is_overdue);
        assert!(c.tick_at(T0 + 10_000).status().is_overdue);
        assert!(c.tick_at(T0 + 60_000).status().is_overdue);

        c.on_complete_at(T0 + 60_000);
        assert!(!c.tick_at(T0 + 60_001).status().is_overdue);
    }
}

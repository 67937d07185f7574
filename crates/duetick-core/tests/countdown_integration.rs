//! Integration tests for the full countdown flow.
//!
//! These tests run the controller against in-memory storage and the real
//! desktop scheduler record-keeping (no notifications are shown -- nothing
//! here crosses a fire time against the wall clock).

use duetick_core::{
    CountdownController, CountdownStateStore, DesktopScheduler, Frequency, MemoryStore,
    NotificationContent, Sample,
};

type TestController = CountdownController<MemoryStore, DesktopScheduler<MemoryStore>>;

fn controller(store: MemoryStore) -> TestController {
    CountdownController::new(
        CountdownStateStore::new(store.clone()),
        DesktopScheduler::new(store, true),
        Frequency::from_secs(10),
        NotificationContent::new("The thing is due!"),
    )
}

const BASE: u64 = 1_700_000_000_000;

#[test]
fn completion_history_stays_descending() {
    let store = MemoryStore::new();
    let mut c = controller(store.clone());
    c.initialize();

    for i in 0..5 {
        c.on_complete_at(BASE + i * 15_000);
    }

    let persisted = CountdownStateStore::new(store).load().unwrap();
    assert_eq!(persisted.completed_at_timestamps.len(), 5);
    assert!(persisted
        .completed_at_timestamps
        .windows(2)
        .all(|w| w[0] > w[1]));
    assert!(persisted.current_notification_id.is_some());
}

#[test]
fn each_completion_replaces_the_pending_notification() {
    let store = MemoryStore::new();
    let mut c = controller(store.clone());
    c.initialize();

    c.on_complete_at(BASE);
    let first = DesktopScheduler::new(store.clone(), true).pending().unwrap();

    c.on_complete_at(BASE + 15_000);
    let second = DesktopScheduler::new(store.clone(), true).pending().unwrap();

    assert_ne!(first.id, second.id);
    let persisted = CountdownStateStore::new(store).load().unwrap();
    assert_eq!(persisted.current_notification_id, Some(second.id));
}

#[test]
fn fresh_run_is_unanchored_until_first_completion() {
    let mut c = controller(MemoryStore::new());
    c.initialize();

    let sample = c.tick_at(BASE);
    assert!(matches!(sample, Sample::Unanchored(_)));
    assert!(!sample.status().is_overdue);

    // Still unanchored one full interval later.
    let later = c.tick_at(BASE + 10_001);
    assert!(matches!(later, Sample::Unanchored(_)));
    assert!(!later.status().is_overdue);

    c.on_complete_at(BASE + 20_000);
    let anchored = c.tick_at(BASE + 20_001);
    assert!(matches!(anchored, Sample::Anchored(_)));
}

#[test]
fn overdue_cycle_round_trips() {
    let mut c = controller(MemoryStore::new());
    c.initialize();

    c.on_complete_at(BASE);
    assert!(!c.tick_at(BASE + 5_000).status().is_overdue);
    let overdue = c.tick_at(BASE + 15_000);
    assert!(overdue.status().is_overdue);
    assert_eq!(overdue.status().distance.seconds, 5);

    c.on_complete_at(BASE + 15_000);
    let counting = c.tick_at(BASE + 15_001);
    assert!(!counting.status().is_overdue);
}

#[test]
fn reload_adopts_the_previous_session_state() {
    let store = MemoryStore::new();
    let mut first = controller(store.clone());
    first.initialize();
    first.on_complete_at(BASE);

    let mut second = controller(store);
    second.initialize();
    assert_eq!(second.last_completed_at(), Some(BASE));
    assert!(second.tick_at(BASE + 1_000).is_anchored());
}

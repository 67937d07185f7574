//! # Duetick Core Library
//!
//! This library provides the core logic for Duetick, a recurring-task
//! countdown: the time until a task is next due is derived from persisted
//! completion history, marking the task done re-anchors the countdown, and a
//! one-shot notification fires when the task comes due. It implements a
//! CLI-first philosophy: all operations are available via a standalone CLI
//! binary, with any GUI layer expected to be a thin shell over this crate.
//!
//! ## Architecture
//!
//! - **Countdown**: pure clock math plus a controller state machine; the
//!   caller drives sampling by invoking `tick()` periodically (or through
//!   the [`Ticker`])
//! - **Storage**: single-file JSON key/value state and TOML-based
//!   configuration
//! - **Notifications**: a narrow scheduler capability with a desktop
//!   implementation
//!
//! ## Key Components
//!
//! - [`CountdownController`]: orchestrates load, tick, and completion
//! - [`CountdownClock`]: pure status computation
//! - [`JsonFileStore`]: persistent key/value store
//! - [`DesktopScheduler`]: one-shot due notifications

pub mod countdown;
pub mod error;
pub mod events;
pub mod notify;
pub mod storage;
pub mod ticker;

pub use countdown::{
    CountdownClock, CountdownController, CountdownStateStore, CountdownStatus, Distance,
    EpochMillis, Frequency, PersistedCountdownState, Sample, COUNTDOWN_STORAGE_KEY,
};
pub use error::{ConfigError, CoreError, NotifyError, Result, StorageError};
pub use events::Event;
pub use notify::{
    DesktopScheduler, NotificationContent, NotificationScheduler, PendingNotification, Permission,
    PENDING_NOTIFICATION_KEY,
};
pub use storage::{data_dir, Config, JsonFileStore, KvStore, MemoryStore};
pub use ticker::Ticker;

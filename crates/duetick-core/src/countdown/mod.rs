mod clock;
mod controller;
mod state;
mod store;

pub use clock::{CountdownClock, CountdownStatus, Distance, EpochMillis, Frequency, Sample};
pub use controller::CountdownController;
pub use state::{PersistedCountdownState, COUNTDOWN_STORAGE_KEY};
pub use store::CountdownStateStore;

pub(crate) use clock::now_ms;

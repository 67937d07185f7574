//! Shared construction for CLI commands.

use duetick_core::{
    Config, CountdownController, CountdownStateStore, DesktopScheduler, JsonFileStore,
    NotificationContent, Sample,
};

pub type CliController = CountdownController<JsonFileStore, DesktopScheduler<JsonFileStore>>;

/// Build the controller over the default data directory, with the scheduler
/// sharing the same backing store.
pub fn open_controller() -> Result<CliController, Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let store = JsonFileStore::open()?;
    let scheduler = DesktopScheduler::new(store.clone(), config.notifications.enabled);
    Ok(CountdownController::new(
        CountdownStateStore::new(store),
        scheduler,
        config.frequency(),
        NotificationContent::new(config.notifications.title),
    ))
}

/// One human-readable status line.
pub fn format_status(sample: &Sample) -> String {
    let status = sample.status();
    let d = status.distance;
    let heading = if status.is_overdue {
        "Overdue"
    } else {
        "Countdown"
    };
    let suffix = if sample.is_anchored() {
        ""
    } else {
        " (no completions yet)"
    };
    format!(
        "{heading}: {}d {:02}h {:02}m {:02}s{suffix}",
        d.days, d.hours, d.minutes, d.seconds
    )
}

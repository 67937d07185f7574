use duetick_core::Event;

use super::common::open_controller;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut controller = open_controller()?;
    controller.initialize();

    let events = controller.on_complete();
    if events
        .iter()
        .any(|e| matches!(e, Event::PermissionDenied { .. }))
    {
        eprintln!(
            "Notification permissions denied. Enable notifications in the config to get due reminders."
        );
    }
    println!("{}", serde_json::to_string_pretty(&events)?);
    Ok(())
}

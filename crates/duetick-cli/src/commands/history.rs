use chrono::{DateTime, Utc};

use super::common::open_controller;

pub fn run(json: bool, limit: Option<usize>) -> Result<(), Box<dyn std::error::Error>> {
    let mut controller = open_controller()?;
    controller.initialize();

    let mut timestamps: Vec<u64> = controller
        .state()
        .map(|s| s.completed_at_timestamps.clone())
        .unwrap_or_default();
    if let Some(n) = limit {
        timestamps.truncate(n);
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&timestamps)?);
        return Ok(());
    }

    if timestamps.is_empty() {
        println!("no completions yet");
        return Ok(());
    }
    for ts in &timestamps {
        match DateTime::<Utc>::from_timestamp_millis(*ts as i64) {
            Some(when) => println!("{}", when.to_rfc3339()),
            None => println!("{ts}"),
        }
    }
    Ok(())
}

use super::common::{format_status, open_controller};

pub fn run(json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let mut controller = open_controller()?;
    controller.initialize();
    let sample = controller.tick();

    if json {
        println!("{}", serde_json::to_string_pretty(&sample)?);
    } else {
        println!("{}", format_status(&sample));
    }
    Ok(())
}

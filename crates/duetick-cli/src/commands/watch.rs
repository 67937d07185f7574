//! Foreground countdown loop.
//!
//! Samples once per second, rewrites a single status line, and pumps the
//! scheduler so a due notification is actually shown. Ctrl-C stops the
//! ticker and exits.

use std::io::Write;
use std::time::Duration;

use duetick_core::Ticker;

use super::common::{format_status, open_controller};

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(watch_loop())
}

async fn watch_loop() -> Result<(), Box<dyn std::error::Error>> {
    let mut controller = open_controller()?;
    controller.initialize();

    let (ticker, mut ticks) = Ticker::spawn(Duration::from_secs(1));
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            tick = ticks.recv() => {
                let Some(now) = tick else { break };
                let sample = controller.tick_at(now);
                controller.scheduler_mut().deliver_due();
                print!("\r{}   ", format_status(&sample));
                std::io::stdout().flush()?;
            }
        }
    }
    ticker.stop();
    println!();
    Ok(())
}

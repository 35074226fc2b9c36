//! # Stacked Browser History
//!
//! Five history entries fanned out as a stack of cards:
//! - `Ctrl+H` (or `Cmd+H` where the terminal reports it) opens the stack
//! - `Esc` closes it, `q` or `Ctrl+C` quits, `Ctrl+Z` suspends
//! - clicking a card brings it to the front; the bottom-right button toggles
//!
//! Set `CARDSTACK_LOG=/tmp/cardstack.log` to write `tracing` output to a file.
//!
//! Run with: `cargo run --example history`

use cardstack::history::{History, HistoryFlags};
use cardstack::widgets::CardStackConfig;
use cardstack::{Hotkeys, ProgramOptions};
use std::path::PathBuf;

#[cardstack::tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let options = ProgramOptions {
        log_file: std::env::var_os("CARDSTACK_LOG").map(PathBuf::from),
        ..ProgramOptions::default()
    };
    let flags = HistoryFlags {
        hotkeys: Hotkeys::new(),
        config: CardStackConfig::default()
            .with_reduced_motion(std::env::var_os("CARDSTACK_REDUCED_MOTION").is_some()),
    };

    let model = cardstack::run_with::<History>(flags, options).await?;
    let order: Vec<&str> = model.stack().items().iter().map(|i| i.name.as_str()).collect();
    println!("Final order: {}", order.join(", "));
    Ok(())
}

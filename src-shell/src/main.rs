//! tabkeep - headless shell
//!
//! Reads one command per line from stdin. Lines starting with `:` are shell
//! commands (`:help` lists them); anything else goes through the address bar.
//! The focus timer ticks once a second while it is running.

mod commands;
mod console;

use std::time::Duration;

use tabkeep_core::{Browser, Config, HeadlessEngine};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::MissedTickBehavior;

use commands::Flow;
use console::ConsoleUi;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tabkeep_core::init_logging();

    let config = Config::default();
    tracing::info!(database = %config.database_path.display(), "Opening profile");

    let mut browser = Browser::new(config, Box::new(HeadlessEngine::new()))?;
    browser.initialize()?;

    let mut ui = ConsoleUi::default();
    console::print_events(&mut browser);
    commands::print_tabs(&browser);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut ticker = tokio::time::interval(Duration::from_secs(1));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = ticker.tick(), if browser.pomodoro().is_running() => {
                browser.tick(&mut ui);
            }
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };

                match commands::run(&mut browser, &mut ui, &line) {
                    Ok(Flow::Continue) => {}
                    Ok(Flow::Quit) => break,
                    Err(e) => {
                        tracing::warn!(error = %e, "Command failed");
                        println!("error: {e}");
                    }
                }
            }
        }

        console::print_events(&mut browser);
    }

    browser.shutdown()?;
    Ok(())
}

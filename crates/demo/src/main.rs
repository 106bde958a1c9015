//! Demo driver: builds one tree and polls it until it ends.
mod config;
mod logging;
mod scene;

use std::thread;

use anyhow::Result;
use config::DemoConfig;
use timed_fsm::{AdvancePolicy, Context, Node};
use tracing::{info, warn};

fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = DemoConfig::from_env();
    let _guard = logging::setup_logging(config.log_dir.as_deref())?;

    let policy = if config.drain {
        AdvancePolicy::Drain
    } else {
        AdvancePolicy::Single
    };

    let cx = Context::default();
    let root = scene::build(&cx, config.step, policy);
    info!(
        duration = ?root.duration(),
        tick = ?config.tick,
        ?policy,
        "Starting demo tree"
    );

    root.start();
    let mut ticks: u64 = 0;
    while !root.is_ended() {
        if config.max_ticks.is_some_and(|max| ticks >= max) {
            warn!(ticks, "Tick limit reached, ending tree early");
            root.end();
            break;
        }

        root.update();
        ticks += 1;
        thread::sleep(config.tick);
    }

    info!(ticks, elapsed = ?root.elapsed(), "Demo tree finished");
    Ok(())
}

//! Demo driver configuration structures and loaders.
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Settings for one run of the demo tree.
#[derive(Clone, Debug)]
pub struct DemoConfig {
    pub tick: Duration,
    pub step: Duration,
    pub drain: bool,
    pub max_ticks: Option<u64>,
    pub log_dir: Option<PathBuf>,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            tick: Duration::from_millis(10),
            step: Duration::from_secs(1),
            drain: false,
            max_ticks: None,
            log_dir: None,
        }
    }
}

impl DemoConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `FSM_TICK_MS` - Polling cadence in milliseconds (default: 10)
    /// - `FSM_STEP_SECS` - Duration of each printed step (default: 1)
    /// - `FSM_DRAIN` - Advance through instant children within one tick (default: false)
    /// - `FSM_MAX_TICKS` - Force-end the tree after this many ticks (default: unlimited)
    /// - `FSM_LOG_DIR` - Also write logs to `<dir>/fsm-demo.log` (default: stderr only)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(ms) = read_env::<u64>("FSM_TICK_MS") {
            config.tick = Duration::from_millis(ms.max(1));
        }

        if let Some(secs) = read_env::<u64>("FSM_STEP_SECS") {
            config.step = Duration::from_secs(secs);
        }

        if let Some(drain) = read_env::<bool>("FSM_DRAIN") {
            config.drain = drain;
        } else if env::var("FSM_DRAIN").is_ok() {
            // Also accept just setting the variable without value as "true"
            config.drain = true;
        }

        config.max_ticks = read_env::<u64>("FSM_MAX_TICKS");
        config.log_dir = env::var("FSM_LOG_DIR").ok().map(PathBuf::from);

        config
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}

use std::time::Duration;

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

/// Tick interval of the minute wheel.
pub const MINUTE_TICK_MS: u64 = 60_000;
/// Tick interval of the day wheel.
pub const DAY_TICK_MS: u64 = 86_400_000;

/// Top-level config (jobwatch.toml + JOBWATCH_* env overrides).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WatchConfig {
    #[serde(default)]
    pub scheduler: SchedulerConfig,
}

/// Tick intervals for the two scheduler wheels.
///
/// Production code leaves these at their defaults; tests and accelerated
/// environments shrink them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulerConfig {
    #[serde(default = "default_minute_tick_ms")]
    pub minute_tick_ms: u64,
    #[serde(default = "default_day_tick_ms")]
    pub day_tick_ms: u64,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            minute_tick_ms: MINUTE_TICK_MS,
            day_tick_ms: DAY_TICK_MS,
        }
    }
}

impl SchedulerConfig {
    pub fn minute_interval(&self) -> Duration {
        Duration::from_millis(self.minute_tick_ms)
    }

    pub fn day_interval(&self) -> Duration {
        Duration::from_millis(self.day_tick_ms)
    }
}

fn default_minute_tick_ms() -> u64 {
    MINUTE_TICK_MS
}
fn default_day_tick_ms() -> u64 {
    DAY_TICK_MS
}

impl WatchConfig {
    /// Load config from a TOML file with JOBWATCH_* env var overrides.
    ///
    /// Uses `config_path` when given, otherwise ~/.jobwatch/jobwatch.toml.
    /// A missing file is not an error: every field has a default. Nested keys
    /// are separated by a double underscore in env vars, e.g.
    /// `JOBWATCH_SCHEDULER__MINUTE_TICK_MS=1000`.
    pub fn load(config_path: Option<&str>) -> crate::error::Result<Self> {
        let path = config_path
            .map(String::from)
            .unwrap_or_else(default_config_path);

        let config: WatchConfig = Figment::new()
            .merge(Toml::file(&path))
            .merge(Env::prefixed("JOBWATCH_").split("__"))
            .extract()
            .map_err(|e| crate::error::WatchError::Config(e.to_string()))?;

        Ok(config)
    }
}

fn default_config_path() -> String {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    format!("{}/.jobwatch/jobwatch.toml", home)
}

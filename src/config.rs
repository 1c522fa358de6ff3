use crate::time::DEFAULT_DATE_FORMAT;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const APP_NAME: &str = "postboard";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Seconds between relative-time refreshes in the feed viewer.
    #[serde(default = "default_refresh_secs")]
    pub refresh_secs: u64,

    /// chrono strftime pattern for posts older than a week.
    #[serde(default = "default_date_format")]
    pub date_format: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://127.0.0.1:5000".to_string()
}

fn default_refresh_secs() -> u64 {
    60
}

fn default_date_format() -> String {
    DEFAULT_DATE_FORMAT.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for Config {
    fn default() -> Self {
        Config {
            base_url: default_base_url(),
            refresh_secs: default_refresh_secs(),
            date_format: default_date_format(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Config {
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_secs.max(1))
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }
}

pub fn load() -> miette::Result<Config> {
    let config: Config =
        confy::load(APP_NAME, None).map_err(|e| miette::miette!("Failed to load config: {}", e))?;
    Ok(config)
}

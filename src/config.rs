use anyhow::{Context, Result};
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_database_url")]
    pub database_url: String,

    /// Period between two inactivity sweeps
    #[serde(default = "default_sweep_interval_ms")]
    pub sweep_interval_ms: u64,

    /// Time without heartbeat after which a participant is evicted
    #[serde(default = "default_inactivity_threshold_ms")]
    pub inactivity_threshold_ms: u64,

    #[serde(default = "default_db_acquire_timeout_secs")]
    pub db_acquire_timeout_secs: u64,

    /// Comma separated origin list; any origin is allowed when unset
    #[serde(default)]
    pub cors_allowed_origins: Option<String>,
}

fn default_port() -> u16 {
    5000
}

fn default_database_url() -> String {
    "sqlite://chatroom.db".to_string()
}

fn default_sweep_interval_ms() -> u64 {
    15_000
}

fn default_inactivity_threshold_ms() -> u64 {
    10_000
}

fn default_db_acquire_timeout_secs() -> u64 {
    5
}

impl Config {
    pub fn load() -> Result<Self> {
        // Load .env file if it exists
        dotenvy::dotenv().ok();

        Self::from_source(config::Environment::default().try_parsing(true))
    }

    /// Build the configuration from one source. Unset keys take their
    /// defaults; a value that fails to parse is an error.
    fn from_source<T>(source: T) -> Result<Self>
    where
        T: config::Source + Send + Sync + 'static,
    {
        let settings: Config = config::Config::builder()
            .add_source(source)
            .build()?
            .try_deserialize()
            .context("invalid configuration")?;

        Ok(settings)
    }

    pub fn sweep_interval(&self) -> Duration {
        Duration::from_millis(self.sweep_interval_ms)
    }

    pub fn inactivity_threshold(&self) -> Duration {
        Duration::from_millis(self.inactivity_threshold_ms)
    }

    pub fn db_acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.db_acquire_timeout_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: default_port(),
            database_url: default_database_url(),
            sweep_interval_ms: default_sweep_interval_ms(),
            inactivity_threshold_ms: default_inactivity_threshold_ms(),
            db_acquire_timeout_secs: default_db_acquire_timeout_secs(),
            cors_allowed_origins: None,
        }
    }
}

use eisen_core::error::CoreError;
use eisen_core::promotion::{BufferPolicy, BufferTier};
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE: &str = "eisen.toml";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Config {
    /// SQLite file holding the tasks
    pub database_path: String,
    /// Default `tracing` filter, overridden by `RUST_LOG`
    pub log_level: String,
    /// Replacement for the built-in buffer table
    #[serde(default)]
    pub buffer_tiers: Option<Vec<BufferTier>>,
    /// Buffer used beyond the last tier
    #[serde(default)]
    pub buffer_max_days: Option<i64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: "eisen.db".to_string(),
            log_level: "warn".to_string(),
            buffer_tiers: None,
            buffer_max_days: None,
        }
    }
}

impl Config {
    pub fn new() -> Result<Self, figment::Error> {
        Self::from_figment(
            Figment::new()
                .merge(Toml::file(CONFIG_FILE))
                .merge(Env::prefixed("EISEN_")),
        )
    }

    /// Extracts the configuration from `figment`, filling gaps with defaults.
    pub fn from_figment(figment: Figment) -> Result<Self, figment::Error> {
        Figment::from(Serialized::defaults(Config::default()))
            .merge(figment)
            .extract()
    }

    /// The buffer table promotions run with.
    pub fn buffer_policy(&self) -> Result<BufferPolicy, CoreError> {
        let defaults = BufferPolicy::default();
        if self.buffer_tiers.is_none() && self.buffer_max_days.is_none() {
            return Ok(defaults);
        }

        let tiers = self
            .buffer_tiers
            .clone()
            .unwrap_or_else(|| defaults.tiers().to_vec());
        BufferPolicy::new(tiers, self.buffer_max_days.unwrap_or(defaults.max_days()))
    }
}

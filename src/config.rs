// File: ./src/config.rs
// Handles configuration loading, saving, and defaults.
use crate::context::AppContext;
use crate::diagnostics::Diagnostic;
use crate::model::adapter::{DEFAULT_CALENDAR_NAME, DEFAULT_EVENT_TAG, IcsOptions};
use crate::storage::LocalStorage;
use crate::zone::{DEFAULT_SCHEDULE_TZ, ScheduleZone};
use anyhow::{Error, Result};
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::fs;

fn default_timezone() -> String {
    DEFAULT_SCHEDULE_TZ.to_string()
}

fn default_max_input_bytes() -> usize {
    256 * 1024
}

fn default_event_tag() -> String {
    DEFAULT_EVENT_TAG.to_string()
}

fn default_calendar_name() -> String {
    DEFAULT_CALENDAR_NAME.to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// IANA zone every indicator hour is read in.
    #[serde(default = "default_timezone")]
    pub timezone: String,
    /// Inputs larger than this are refused before parsing.
    #[serde(default = "default_max_input_bytes")]
    pub max_input_bytes: usize,
    #[serde(default = "default_event_tag")]
    pub event_tag: String,
    #[serde(default = "default_calendar_name")]
    pub calendar_name: String,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timezone: default_timezone(),
            max_input_bytes: default_max_input_bytes(),
            event_tag: default_event_tag(),
            calendar_name: default_calendar_name(),
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Load the configuration from disk using an explicit context.
    /// Returns a contextualized error if reading or parsing fails.
    pub fn load(ctx: &dyn AppContext) -> Result<Self> {
        let path = ctx.get_config_file_path()?;

        if !path.exists() {
            return Err(anyhow::anyhow!("Config file not found"));
        }

        let contents = fs::read_to_string(&path).map_err(|e| {
            anyhow::anyhow!("Failed to read config file '{}': {}", path.display(), e)
        })?;

        let config: Config = toml::from_str(&contents).map_err(|e| {
            anyhow::anyhow!("Failed to parse config file '{}': {}", path.display(), e)
        })?;

        Ok(config)
    }

    /// Like `load`, but a missing file yields the defaults.
    pub fn load_or_default(ctx: &dyn AppContext) -> Result<Self> {
        match Self::load(ctx) {
            Ok(config) => Ok(config),
            Err(e) if Self::is_missing_config_error(&e) => {
                log::debug!("No config file, using defaults");
                Ok(Self::default())
            }
            Err(e) => Err(e),
        }
    }

    /// Detects whether an error means the config file was missing, either
    /// via our own message or an IO NotFound anywhere in the chain.
    pub fn is_missing_config_error(err: &Error) -> bool {
        if err.to_string().contains("Config file not found") {
            return true;
        }

        err.chain().any(|cause| {
            cause
                .downcast_ref::<std::io::Error>()
                .is_some_and(|io_err| io_err.kind() == std::io::ErrorKind::NotFound)
        })
    }

    /// Save configuration using an explicit context.
    pub fn save(&self, ctx: &dyn AppContext) -> Result<()> {
        let path = ctx.get_config_file_path()?;
        let toml_str = toml::to_string_pretty(self)?;
        LocalStorage::write_locked(&path, &toml_str)
    }

    pub fn get_path_string(ctx: &dyn AppContext) -> Result<String> {
        let path = ctx.get_config_file_path()?;
        Ok(path.to_string_lossy().to_string())
    }

    /// Resolves `timezone`, falling back to local time. The returned
    /// diagnostic (if any) should be reported once by the caller.
    pub fn schedule_zone(&self) -> (ScheduleZone, Option<Diagnostic>) {
        ScheduleZone::resolve(&self.timezone)
    }

    pub fn ics_options(&self) -> IcsOptions {
        IcsOptions {
            calendar_name: self.calendar_name.clone(),
            tag: self.event_tag.clone(),
        }
    }

    /// Unknown level names read as `Info`.
    pub fn log_level_filter(&self) -> LevelFilter {
        self.log_level.parse().unwrap_or(LevelFilter::Info)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_fills_defaults() {
        let config: Config = toml::from_str("timezone = \"Europe/Brussels\"").unwrap();
        assert_eq!(config.timezone, "Europe/Brussels");
        assert_eq!(config.max_input_bytes, 256 * 1024);
        assert_eq!(config.event_tag, "#postwmt");
    }

    #[test]
    fn log_level_parsing() {
        let mut config = Config::default();
        assert_eq!(config.log_level_filter(), LevelFilter::Info);
        config.log_level = "DEBUG".to_string();
        assert_eq!(config.log_level_filter(), LevelFilter::Debug);
        config.log_level = "chatty".to_string();
        assert_eq!(config.log_level_filter(), LevelFilter::Info);
    }

    #[test]
    fn missing_error_detection() {
        assert!(Config::is_missing_config_error(&anyhow::anyhow!(
            "Config file not found"
        )));
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        assert!(Config::is_missing_config_error(&Error::from(io)));
        assert!(!Config::is_missing_config_error(&anyhow::anyhow!("bad toml")));
    }
}

//! Application settings loading from config.toml
//!
//! Settings cover the scheduler knobs and the cards that should exist on first
//! run. Every field has a default, so an absent file yields a usable
//! configuration.

use crate::core::schedule::{DEFAULT_SOFT_CAPACITY, SchedulerOptions};
use crate::errors::{Error, Result};
use serde::Deserialize;
use std::io::ErrorKind;
use std::path::Path;
use tracing::{debug, info};

/// Environment variable naming the settings file
pub const CONFIG_PATH_ENV: &str = "INVOICE_BUDDY_CONFIG";

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Scheduler knobs
    #[serde(default)]
    pub scheduler: SchedulerSettings,
    /// Cards to seed
    #[serde(default)]
    pub cards: Vec<CardConfig>,
}

/// The `[scheduler]` table
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SchedulerSettings {
    /// Invoices per payday before rebalancing is attempted
    pub soft_capacity: usize,
    /// Write computed priorities back after each run
    pub persist_priorities: bool,
}

impl Default for SchedulerSettings {
    fn default() -> Self {
        Self {
            soft_capacity: DEFAULT_SOFT_CAPACITY,
            persist_priorities: false,
        }
    }
}

impl SchedulerSettings {
    /// Engine options derived from these settings
    #[must_use]
    pub const fn options(&self) -> SchedulerOptions {
        SchedulerOptions {
            soft_capacity: self.soft_capacity,
        }
    }
}

/// Configuration for a single card
#[derive(Debug, Deserialize, Clone)]
pub struct CardConfig {
    /// Name of the card
    pub name: String,
    /// Day of month the statement closes
    pub closing_day: i32,
    /// Day of month the statement is due
    pub due_day: i32,
}

/// Loads settings from a TOML file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
/// - A field has the wrong type
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read config file: {e}"),
    })?;

    parse_config(&contents)
}

/// Parses settings from TOML text
pub fn parse_config(contents: &str) -> Result<Config> {
    toml::from_str(contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })
}

/// Loads settings from the file named by `INVOICE_BUDDY_CONFIG`, or `./config.toml`.
///
/// A missing file is not an error and yields the defaults.
pub fn load_default_config() -> Result<Config> {
    let path = std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| "config.toml".to_string());
    debug!("Attempting to load configuration from: {path}");

    match std::fs::read_to_string(&path) {
        Ok(contents) => parse_config(&contents),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            info!("No configuration file at {path}, using defaults");
            Ok(Config::default())
        }
        Err(e) => Err(Error::Io(e)),
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let toml_str = r#"
            [scheduler]
            soft_capacity = 3
            persist_priorities = true

            [[cards]]
            name = "Visa"
            closing_day = 3
            due_day = 10

            [[cards]]
            name = "Store card"
            closing_day = 25
            due_day = 5
        "#;

        let config = parse_config(toml_str).unwrap();
        assert_eq!(config.scheduler.soft_capacity, 3);
        assert!(config.scheduler.persist_priorities);
        assert_eq!(config.cards.len(), 2);
        assert_eq!(config.cards[0].name, "Visa");
        assert_eq!(config.cards[1].due_day, 5);
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = parse_config("").unwrap();
        assert_eq!(config.scheduler.soft_capacity, DEFAULT_SOFT_CAPACITY);
        assert!(!config.scheduler.persist_priorities);
        assert!(config.cards.is_empty());
        assert_eq!(config.scheduler.options().soft_capacity, 5);
    }

    #[test]
    fn test_partial_scheduler_table() {
        let config = parse_config("[scheduler]\npersist_priorities = true\n").unwrap();
        assert_eq!(config.scheduler.soft_capacity, DEFAULT_SOFT_CAPACITY);
        assert!(config.scheduler.persist_priorities);
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let result = parse_config("[scheduler\nsoft_capacity = ");
        assert!(matches!(result, Err(Error::Config { .. })));
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config("/definitely/not/here/config.toml");
        assert!(matches!(result, Err(Error::Config { .. })));
    }
}

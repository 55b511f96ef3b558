use std::collections::BTreeMap;
use std::env;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use jpbiz::export::{default_labels, EventWindow};
use jpbiz::rules::HolidayRule;
use jpbiz::{Slot, DEFAULT_SCAN_WINDOW_DAYS};
use serde::Deserialize;

/// Environment variable holding extra holiday rules as a JSON array.
pub const ADDITIONAL_RULES_VAR: &str = "JPBIZ_ADDITIONAL_RULES";

/// Top-level jpbiz configuration.
#[derive(Debug, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Calendar days a business-day search may examine.
    pub scan_window_days: u32,

    /// JSON holiday table used instead of the built-in rules.
    pub holiday_file: Option<PathBuf>,

    /// Rules appended to the built-in ones.
    pub additional_rules: Vec<HolidayRule>,

    /// Event summaries for the exported slots.
    pub event_labels: BTreeMap<Slot, String>,

    /// Time of day of exported events.
    pub event_window: EventWindow,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            scan_window_days: DEFAULT_SCAN_WINDOW_DAYS,
            holiday_file: None,
            additional_rules: Vec::new(),
            event_labels: default_labels(),
            event_window: EventWindow::default(),
        }
    }
}

impl Config {
    /// Read the configuration file (if any), then apply the environment.
    pub fn load(path: Option<&Path>) -> Result<Config> {
        let mut config = match path {
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .with_context(|| format!("reading config {}", path.display()))?;
                Config::from_json(&text)
                    .with_context(|| format!("parsing config {}", path.display()))?
            }
            None => Config::default(),
        };
        if let Ok(rules) = env::var(ADDITIONAL_RULES_VAR) {
            config.add_rules_json(&rules)?;
        }
        Ok(config)
    }

    pub fn from_json(text: &str) -> Result<Config> {
        Ok(serde_json::from_str(text)?)
    }

    fn add_rules_json(&mut self, json: &str) -> Result<()> {
        let rules: Vec<HolidayRule> = serde_json::from_str(json)
            .with_context(|| format!("parsing {ADDITIONAL_RULES_VAR}"))?;
        tracing::debug!(count = rules.len(), "additional holiday rules from environment");
        self.additional_rules.extend(rules);
        Ok(())
    }
}

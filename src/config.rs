use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::calculator::constants::{
    DEFAULT_FOOD_SLOTS, DEFAULT_MANGLED_VALUE_THRESHOLD, DEFAULT_MEALS,
};
use crate::calculator::DailyGoals;
use crate::error::Result;

/// Default location of the configuration file.
pub const DEFAULT_CONFIG_FILE: &str = "conta_cibo.toml";

/// Top-level configuration, read from a TOML file.
///
/// Every field has a default, so a partial (or missing) file is fine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub paths: PathsConfig,
    pub goals: DailyGoals,
    pub catalog: CatalogConfig,

    /// Meal slots, in display order.
    pub meals: Vec<String>,

    /// Food slots offered by the interactive calculator.
    pub food_slots: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            paths: PathsConfig::default(),
            goals: DailyGoals::default(),
            catalog: CatalogConfig::default(),
            meals: DEFAULT_MEALS.iter().map(|m| m.to_string()).collect(),
            food_slots: DEFAULT_FOOD_SLOTS,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    pub catalog: PathBuf,
    pub logs: PathBuf,
    pub status: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            catalog: PathBuf::from("foods.csv"),
            logs: PathBuf::from("logs.csv"),
            status: PathBuf::from("status.json"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Values strictly above this are divided by 100 on load.
    /// Zero or less disables the correction.
    pub mangled_value_threshold: f64,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            mangled_value_threshold: DEFAULT_MANGLED_VALUE_THRESHOLD,
        }
    }
}

impl Config {
    /// Parse a configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load from `path`, falling back to defaults when the file does not exist.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            debug!(path = %path.display(), "config file not found, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        let config = Self::from_toml(&content)?;
        info!(path = %path.display(), "loaded config");
        Ok(config)
    }
}

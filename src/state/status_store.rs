use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::Result;

/// Per-day flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyStatus {
    #[serde(default)]
    pub gym: bool,
}

/// JSON-backed map from date to [`DailyStatus`].
pub struct StatusStore {
    path: PathBuf,
    days: BTreeMap<NaiveDate, DailyStatus>,
}

impl StatusStore {
    /// Load the store from `path`. A missing file starts empty.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let days = if path.exists() {
            let content = fs::read_to_string(&path)?;
            serde_json::from_str(&content)?
        } else {
            BTreeMap::new()
        };
        Ok(Self { path, days })
    }

    pub fn is_gym_day(&self, date: NaiveDate) -> bool {
        self.days.get(&date).map(|s| s.gym).unwrap_or(false)
    }

    /// Set the gym flag for `date` and write the file.
    pub fn set_gym_day(&mut self, date: NaiveDate, gym: bool) -> Result<()> {
        self.days.entry(date).or_default().gym = gym;
        self.save()?;
        info!(%date, gym, "updated daily status");
        Ok(())
    }

    fn save(&self) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.days)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

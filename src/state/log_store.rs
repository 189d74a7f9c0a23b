use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::calculator::parse_number;
use crate::error::{CalorieError, Result};
use crate::models::{LogEntry, NewLogEntry};

/// One log row as stored on disk, in the original sheet's column layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct LogRow {
    #[serde(default)]
    id: String,

    #[serde(rename = "fecha", alias = "date", default)]
    date: String,

    #[serde(default)]
    timestamp: String,

    #[serde(default)]
    meal: String,

    #[serde(default)]
    total_kcal: String,

    #[serde(rename = "detalle", alias = "detail", default)]
    detail: String,
}

impl LogRow {
    fn parsed_id(&self) -> Option<u32> {
        self.id.trim().parse().ok()
    }

    fn into_entry(self) -> Result<LogEntry> {
        let id = self
            .parsed_id()
            .ok_or_else(|| CalorieError::InvalidInput(format!("Invalid log id '{}'", self.id)))?;
        let date = NaiveDate::parse_from_str(self.date.trim(), "%Y-%m-%d").map_err(|_| {
            CalorieError::InvalidInput(format!("Invalid log date '{}'", self.date))
        })?;

        Ok(LogEntry {
            id,
            date,
            timestamp: self.timestamp,
            meal: self.meal.trim().to_lowercase(),
            total_kcal: parse_number(&self.total_kcal)?,
            detail: self.detail,
        })
    }

    fn from_entry(entry: &LogEntry) -> Self {
        Self {
            id: entry.id.to_string(),
            date: entry.date.to_string(),
            timestamp: entry.timestamp.clone(),
            meal: entry.meal.clone(),
            total_kcal: entry.total_kcal.to_string(),
            detail: entry.detail.clone(),
        }
    }
}

/// Changes applied by [`LogStore::edit`]. `None` leaves a field untouched.
#[derive(Debug, Clone, Default)]
pub struct LogEdit {
    pub meal: Option<String>,
    pub total_kcal: Option<f64>,
}

/// CSV-backed meal log.
pub struct LogStore {
    path: PathBuf,
}

impl LogStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    fn read_rows(&self) -> Result<Vec<LogRow>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::Headers)
            .from_path(&self.path)?;

        let mut rows = Vec::new();
        for row in reader.deserialize::<LogRow>() {
            rows.push(row?);
        }
        Ok(rows)
    }

    fn write_rows(&self, rows: &[LogRow]) -> Result<()> {
        let mut writer = csv::Writer::from_path(&self.path)?;
        for row in rows {
            writer.serialize(row)?;
        }
        writer.flush()?;
        Ok(())
    }

    /// Read every entry. A missing file is an empty log.
    ///
    /// Rows with a bad id, date or kcal cell are skipped with a warning.
    pub fn load(&self) -> Result<Vec<LogEntry>> {
        let mut entries = Vec::new();
        for row in self.read_rows()? {
            let id = row.id.clone();
            match row.into_entry() {
                Ok(entry) => entries.push(entry),
                Err(e) => warn!(id = %id, error = %e, "skipping log row"),
            }
        }
        Ok(entries)
    }

    /// Persist a pending entry with the next free id and return it.
    pub fn append(&self, entry: NewLogEntry) -> Result<LogEntry> {
        let next_id = self
            .read_rows()?
            .iter()
            .filter_map(LogRow::parsed_id)
            .max()
            .unwrap_or(0)
            .checked_add(1)
            .ok_or_else(|| CalorieError::InvalidInput("log ids exhausted".to_string()))?;
        let entry = LogEntry::from_new(next_id, entry);

        let write_headers = !self.path.exists() || std::fs::metadata(&self.path)?.len() == 0;
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(write_headers)
            .from_writer(file);
        writer.serialize(LogRow::from_entry(&entry))?;
        writer.flush()?;

        info!(id = entry.id, meal = %entry.meal, kcal = entry.total_kcal, "saved log entry");
        Ok(entry)
    }

    /// Remove the entry with `id`.
    pub fn delete(&self, id: u32) -> Result<LogEntry> {
        let mut rows = self.read_rows()?;
        let index = rows
            .iter()
            .position(|r| r.parsed_id() == Some(id))
            .ok_or(CalorieError::EntryNotFound(id))?;

        let removed = rows.remove(index).into_entry()?;
        self.write_rows(&rows)?;
        info!(id, "deleted log entry");
        Ok(removed)
    }

    /// Change the meal and/or total of the entry with `id`.
    pub fn edit(&self, id: u32, edit: LogEdit) -> Result<LogEntry> {
        if let Some(total) = edit.total_kcal {
            if total < 0.0 {
                return Err(CalorieError::InvalidInput(format!(
                    "kcal must be >= 0, got {}",
                    total
                )));
            }
        }

        let mut rows = self.read_rows()?;
        let row = rows
            .iter_mut()
            .find(|r| r.parsed_id() == Some(id))
            .ok_or(CalorieError::EntryNotFound(id))?;

        if let Some(meal) = edit.meal {
            row.meal = meal.trim().to_lowercase();
        }
        if let Some(total) = edit.total_kcal {
            row.total_kcal = total.to_string();
        }

        let updated = row.clone().into_entry()?;
        self.write_rows(&rows)?;
        info!(id, "edited log entry");
        Ok(updated)
    }
}

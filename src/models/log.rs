use chrono::{NaiveDate, NaiveDateTime};

use crate::models::CalculationResult;

/// A calculation the user has asked to save, not yet assigned an id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewLogEntry {
    pub date: NaiveDate,
    pub timestamp: NaiveDateTime,
    pub meal: String,
    pub total_kcal: f64,
    pub detail: String,
}

impl NewLogEntry {
    pub fn from_result(result: &CalculationResult, meal: &str, timestamp: NaiveDateTime) -> Self {
        Self {
            date: timestamp.date(),
            timestamp,
            meal: meal.trim().to_lowercase(),
            total_kcal: result.total,
            detail: result.detail(),
        }
    }
}

/// A saved meal.
#[derive(Debug, Clone, PartialEq)]
pub struct LogEntry {
    pub id: u32,
    pub date: NaiveDate,

    /// Kept as written; only `date` is used for aggregation.
    pub timestamp: String,

    pub meal: String,
    pub total_kcal: f64,
    pub detail: String,
}

impl LogEntry {
    pub fn from_new(id: u32, entry: NewLogEntry) -> Self {
        Self {
            id,
            date: entry.date,
            timestamp: entry.timestamp.format("%Y-%m-%d %H:%M:%S%.6f").to_string(),
            meal: entry.meal,
            total_kcal: entry.total_kcal,
            detail: entry.detail,
        }
    }
}

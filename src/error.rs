use thiserror::Error;

use crate::models::PricingMode;

#[derive(Debug, Error)]
pub enum CalorieError {
    #[error("Invalid number format: '{0}'")]
    InvalidNumberFormat(String),

    #[error("Unknown food: {0}")]
    UnknownItem(String),

    #[error("'{item}' is not measured {expected}")]
    WrongPricingMode { item: String, expected: PricingMode },

    #[error("Could not understand line: '{0}'")]
    UnparsableLine(String),

    #[error("Log entry not found: {0}")]
    EntryNotFound(u32),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),
}

pub type Result<T> = std::result::Result<T, CalorieError>;

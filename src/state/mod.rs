mod catalog_store;
mod log_store;
mod status_store;
mod summary;

pub use catalog_store::{load_catalog, save_catalog};
pub use log_store::{LogEdit, LogStore};
pub use status_store::{DailyStatus, StatusStore};
pub use summary::{summarize, DaySummary, Period, Summary};

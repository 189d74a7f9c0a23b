mod calculation;
mod catalog;
mod log;

pub use calculation::{BreakdownLine, CalculationResult, RequestLine};
pub use catalog::{normalize_name, Catalog, CatalogItem, PricingMode, Upsert};
pub use log::{LogEntry, NewLogEntry};

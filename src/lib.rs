pub mod calculator;
pub mod cli;
pub mod config;
pub mod error;
pub mod interface;
pub mod models;
pub mod state;

pub use calculator::{calculate, calculate_from_text, delta, goal_for, parse_number, safe_int};
pub use error::{CalorieError, Result};
pub use models::{CalculationResult, Catalog, CatalogItem, PricingMode, RequestLine};

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize logging to stderr.
///
/// `RUST_LOG` wins when set; otherwise `debug` if `verbose`, else `warn`.
pub fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();
}

use tracing::debug;

use crate::calculator::constants::FREE_KCAL_LABEL;
use crate::models::{Catalog, CalculationResult, RequestLine};

/// Sum the kcal of `lines` against `catalog`, plus `free_kcal` entered directly.
///
/// Lines with an empty name, a non-positive quantity or a name missing from
/// the catalog are skipped without error.
pub fn calculate(catalog: &Catalog, lines: &[RequestLine], free_kcal: f64) -> CalculationResult {
    let mut result = CalculationResult::default();

    for line in lines {
        let name = line.item_name.trim();
        if name.is_empty() || line.quantity <= 0.0 {
            continue;
        }

        let Some(item) = catalog.get(name) else {
            debug!(item = name, "skipping food missing from catalog");
            continue;
        };

        let amount = item.kcal_for(line.quantity);
        result.push(format!("{}: {:.0} kcal", item.name, amount.round()), amount);
    }

    if free_kcal > 0.0 {
        result.push(
            format!("{}: {} kcal", FREE_KCAL_LABEL, free_kcal.trunc() as i64),
            free_kcal,
        );
    }

    result
}

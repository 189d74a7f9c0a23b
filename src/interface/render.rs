use crate::error::CalorieError;
use crate::models::{CalculationResult, Catalog, LogEntry};
use crate::state::Summary;

/// Display a calculation with its breakdown.
pub fn display_result(result: &CalculationResult, meal: Option<&str>) {
    if result.is_empty() {
        println!("Nothing to count (no foods with a quantity).");
        return;
    }

    println!();
    for line in &result.breakdown {
        println!("  {}", line.label);
    }
    println!();

    match meal {
        Some(meal) => println!("{} = {:.0} kcal", capitalize(meal), result.total.round()),
        None => println!("Total = {:.0} kcal", result.total.round()),
    }
}

/// Display the catalog as an aligned table.
pub fn display_catalog(catalog: &Catalog) {
    if catalog.is_empty() {
        println!("Catalog is empty. Use 'add-food' to add foods.");
        return;
    }

    let width = catalog.names().iter().map(|n| n.len()).max().unwrap_or(10);

    println!();
    println!("=== Foods ({} items) ===", catalog.len());
    println!();
    for item in catalog.items() {
        println!(
            "{:>4}. {:<width$}  {:>7.1} kcal {}",
            item.id,
            item.name,
            item.unit_value,
            item.pricing_mode,
            width = width
        );
    }
    println!();
}

/// Display a summary, one block per day.
pub fn display_summary(summary: &Summary) {
    if summary.days.iter().all(|d| d.meals.is_empty()) {
        println!(
            "No entries: {} ({} to {}).",
            summary.period.to_string().to_lowercase(),
            summary.start,
            summary.end
        );
        if let Some(day) = summary.days.first() {
            println!("Goal: {} kcal{}", day.goal, if day.gym { " (gym day)" } else { "" });
        }
        return;
    }

    println!();
    println!("=== {} ({} to {}) ===", summary.period, summary.start, summary.end);

    for day in &summary.days {
        println!();
        println!(
            "{}{}",
            day.date.format("%a %Y-%m-%d"),
            if day.gym { "  [gym]" } else { "" }
        );
        for (meal, kcal) in &day.meals {
            println!("  {}: {:.0} kcal", capitalize(meal), kcal.round());
        }
        println!(
            "  Total: {:.0} / {} kcal ({})",
            day.total.round(),
            day.goal,
            format_delta(day.delta)
        );
    }

    if summary.days.len() > 1 {
        println!();
        println!("--- Period ---");
        println!("Days logged: {}", summary.days.len());
        println!(
            "Total: {:.0} / {} kcal ({})",
            summary.total_logged.round(),
            summary.total_goal,
            format_delta(summary.delta)
        );
        println!(
            "Daily average: {:.0} kcal",
            summary.total_logged / summary.days.len() as f64
        );
    }
    println!();
}

/// Display a saved log entry.
pub fn display_entry(entry: &LogEntry) {
    println!(
        "#{} {} {}: {:.0} kcal",
        entry.id,
        entry.date,
        entry.meal,
        entry.total_kcal.round()
    );
}

/// Print a "did you mean" hint when `error` is an unknown food.
pub fn display_suggestion(error: &CalorieError, catalog: &Catalog) {
    if let CalorieError::UnknownItem(name) = error {
        if let Some(suggestion) = catalog.suggest(name) {
            eprintln!("Did you mean '{}'?", suggestion);
        }
    }
}

/// `+120 kcal over` or `300 kcal left`
pub fn format_delta(delta: f64) -> String {
    let rounded = delta.round();
    if rounded > 0.0 {
        format!("+{:.0} kcal over", rounded)
    } else {
        format!("{:.0} kcal left", rounded.abs())
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_delta() {
        assert_eq!(format_delta(120.4), "+120 kcal over");
        assert_eq!(format_delta(-300.0), "300 kcal left");
        assert_eq!(format_delta(0.2), "0 kcal left");
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("post entreno"), "Post entreno");
        assert_eq!(capitalize(""), "");
    }
}

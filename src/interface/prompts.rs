use dialoguer::{Confirm, Input, Select};

use crate::calculator::parse_number;
use crate::error::{CalorieError, Result};
use crate::models::{Catalog, PricingMode, RequestLine};

/// Prompt for a non-negative number, accepting `,` or `.` decimals.
pub fn prompt_quantity(prompt: &str) -> Result<f64> {
    let input: String = Input::new()
        .with_prompt(prompt)
        .default("0".to_string())
        .validate_with(|text: &String| -> std::result::Result<(), String> {
            match parse_number(text) {
                Ok(value) if value >= 0.0 => Ok(()),
                Ok(_) => Err("Must be >= 0".to_string()),
                Err(e) => Err(e.to_string()),
            }
        })
        .interact_text()?;

    parse_number(&input)
}

/// Prompt for the meal slot.
pub fn prompt_meal(meals: &[String]) -> Result<String> {
    if meals.is_empty() {
        return Err(CalorieError::InvalidInput(
            "No meals configured".to_string(),
        ));
    }

    let selection = Select::new()
        .with_prompt("Meal")
        .items(meals)
        .default(0)
        .interact()?;

    Ok(meals[selection].clone())
}

/// Prompt for up to `slots` foods and their quantities.
///
/// The first choice of each slot is blank; blank slots are kept so the
/// calculator decides what to skip.
pub fn prompt_food_lines(catalog: &Catalog, slots: usize) -> Result<Vec<RequestLine>> {
    let mut options = vec![String::new()];
    options.extend(catalog.names().into_iter().map(String::from));

    let mut lines = Vec::with_capacity(slots);
    for slot in 1..=slots {
        let selection = Select::new()
            .with_prompt(format!("Food {}", slot))
            .items(&options)
            .default(0)
            .interact()?;

        if selection == 0 {
            lines.push(RequestLine::new("", 0.0));
            continue;
        }

        let name = &options[selection];
        let unit = match catalog.get(name).map(|item| item.pricing_mode) {
            Some(PricingMode::PerHundredGrams) => "grams",
            _ => "units",
        };
        let quantity = prompt_quantity(&format!("Quantity {} ({})", slot, unit))?;
        lines.push(RequestLine::new(name.clone(), quantity));
    }

    Ok(lines)
}

/// Prompt for kcal entered directly.
pub fn prompt_free_kcal() -> Result<f64> {
    prompt_quantity("Free kcal")
}

/// Prompt for a pricing mode.
pub fn prompt_pricing_mode() -> Result<PricingMode> {
    let modes = [PricingMode::PerHundredGrams, PricingMode::PerUnit];
    let labels: Vec<&str> = modes.iter().map(|m| m.label()).collect();

    let selection = Select::new()
        .with_prompt("Type")
        .items(&labels)
        .default(0)
        .interact()?;

    Ok(modes[selection])
}

/// Prompt for yes/no confirmation.
pub fn prompt_yes_no(prompt: &str, default: bool) -> Result<bool> {
    Ok(Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()?)
}

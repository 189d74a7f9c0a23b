use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use chrono::{Local, NaiveDate};
use clap::Parser;
use tracing::debug;

use conta_cibo_rs::calculator::{calculate, calculate_from_text, parse_number};
use conta_cibo_rs::cli::{Cli, Command, LogAction};
use conta_cibo_rs::config::Config;
use conta_cibo_rs::error::{CalorieError, Result};
use conta_cibo_rs::interface::{
    display_catalog, display_entry, display_result, display_suggestion, display_summary,
    prompt_food_lines, prompt_free_kcal, prompt_meal, prompt_pricing_mode, prompt_yes_no,
};
use conta_cibo_rs::models::{CalculationResult, NewLogEntry, PricingMode, Upsert};
use conta_cibo_rs::state::{
    load_catalog, save_catalog, summarize, LogEdit, LogStore, Period, StatusStore,
};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    conta_cibo_rs::init_tracing(cli.verbose);

    let config = Config::load(&cli.config)?;
    debug!(?config, "effective config");

    match cli.command.unwrap_or_default() {
        Command::Calc => cmd_calc(&config),
        Command::Text {
            input,
            file,
            meal,
            save,
        } => cmd_text(&config, input, file, meal, save),
        Command::AddFood { name, mode, kcal } => cmd_add_food(&config, &name, mode, &kcal),
        Command::Foods => cmd_foods(&config),
        Command::Today => cmd_summary(&config, Period::Day),
        Command::Week => cmd_summary(&config, Period::Week),
        Command::Month => cmd_summary(&config, Period::Month),
        Command::Gym { date, off } => cmd_gym(&config, date, !off),
        Command::Log { action } => cmd_log(&config, action),
    }
}

fn parse_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| {
        CalorieError::InvalidInput(format!("Invalid date '{}', expected YYYY-MM-DD", raw))
    })
}

/// Save `result` under `meal` in the log.
fn save_result(config: &Config, result: &CalculationResult, meal: &str) -> Result<()> {
    let store = LogStore::new(&config.paths.logs);
    let pending = NewLogEntry::from_result(result, meal, Local::now().naive_local());
    let entry = store.append(pending)?;
    print!("Saved: ");
    display_entry(&entry);
    Ok(())
}

/// Interactive structured calculation.
fn cmd_calc(config: &Config) -> Result<()> {
    let catalog = load_catalog(&config.paths.catalog, &config.catalog)?;
    if catalog.is_empty() {
        println!("Catalog is empty. Use 'add-food' first.");
        return Ok(());
    }

    let meal = prompt_meal(&config.meals)?;
    let lines = prompt_food_lines(&catalog, config.food_slots)?;
    let free_kcal = prompt_free_kcal()?;

    let result = calculate(&catalog, &lines, free_kcal);
    display_result(&result, Some(&meal));

    if !result.is_empty() && prompt_yes_no("Save?", true)? {
        save_result(config, &result, &meal)?;
    }

    Ok(())
}

/// Free-text calculation.
fn cmd_text(
    config: &Config,
    input: Option<String>,
    file: Option<PathBuf>,
    meal: Option<String>,
    save: bool,
) -> Result<()> {
    let text = match (input, file) {
        (Some(text), _) => text,
        (None, Some(path)) => fs::read_to_string(path)?,
        (None, None) => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };

    let catalog = load_catalog(&config.paths.catalog, &config.catalog)?;

    let result = match calculate_from_text(&catalog, &text) {
        Ok(result) => result,
        Err(e) => {
            display_suggestion(&e, &catalog);
            return Err(e);
        }
    };
    display_result(&result, meal.as_deref());

    if let Some(meal) = meal.filter(|_| save) {
        if result.is_empty() {
            println!("Nothing to save.");
        } else {
            save_result(config, &result, &meal)?;
        }
    }

    Ok(())
}

/// Add or update a catalog food.
fn cmd_add_food(config: &Config, name: &str, mode: Option<String>, kcal: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(CalorieError::InvalidInput("Food name is empty".to_string()));
    }

    let unit_value = parse_number(kcal)?;
    if unit_value < 0.0 {
        return Err(CalorieError::InvalidInput(format!(
            "kcal must be >= 0, got {}",
            unit_value
        )));
    }

    let pricing_mode = match mode {
        Some(label) => PricingMode::from_label(&label).ok_or_else(|| {
            CalorieError::InvalidInput(format!("Unknown mode '{}', use 100g or unidad", label))
        })?,
        None => prompt_pricing_mode()?,
    };

    let mut catalog = load_catalog(&config.paths.catalog, &config.catalog)?;
    let outcome = catalog.upsert(name, pricing_mode, unit_value)?;
    save_catalog(&config.paths.catalog, &catalog)?;

    match outcome {
        Upsert::Inserted(id) => println!("Added #{}: {}", id, name.trim().to_lowercase()),
        Upsert::Updated(id) => println!("Updated #{}: {}", id, name.trim().to_lowercase()),
    }
    Ok(())
}

fn cmd_foods(config: &Config) -> Result<()> {
    let catalog = load_catalog(&config.paths.catalog, &config.catalog)?;
    display_catalog(&catalog);
    Ok(())
}

/// Logged totals against the goal over `period`.
fn cmd_summary(config: &Config, period: Period) -> Result<()> {
    let entries = LogStore::new(&config.paths.logs).load()?;
    let status = StatusStore::load(&config.paths.status)?;
    let today = Local::now().date_naive();

    let summary = summarize(
        &entries,
        |date| status.is_gym_day(date),
        &config.goals,
        &config.meals,
        period,
        today,
    );
    display_summary(&summary);
    Ok(())
}

fn cmd_gym(config: &Config, date: Option<String>, gym: bool) -> Result<()> {
    let date = match date {
        Some(raw) => parse_date(&raw)?,
        None => Local::now().date_naive(),
    };

    let mut status = StatusStore::load(&config.paths.status)?;
    status.set_gym_day(date, gym)?;

    println!(
        "{}: {} (goal {} kcal)",
        date,
        if gym { "gym day" } else { "rest day" },
        config.goals.goal_for(gym)
    );
    Ok(())
}

fn cmd_log(config: &Config, action: LogAction) -> Result<()> {
    let store = LogStore::new(&config.paths.logs);

    match action {
        LogAction::Delete { id } => {
            let removed = store.delete(id)?;
            print!("Deleted: ");
            display_entry(&removed);
        }
        LogAction::Edit { id, meal, kcal } => {
            if meal.is_none() && kcal.is_none() {
                println!("Nothing to change. Use --meal and/or --kcal.");
                return Ok(());
            }
            let total_kcal = kcal.as_deref().map(parse_number).transpose()?;
            let updated = store.edit(id, LogEdit { meal, total_kcal })?;
            print!("Updated: ");
            display_entry(&updated);
        }
    }
    Ok(())
}

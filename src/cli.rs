use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::DEFAULT_CONFIG_FILE;

/// ContaCibo — count the kcal of your meals and track them against a daily goal.
#[derive(Parser, Debug)]
#[command(name = "conta-cibo")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path to the TOML configuration file.
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Log debug output to stderr.
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Pick foods and quantities interactively, then optionally save.
    Calc,

    /// Count kcal from free text, one food per line ("pollo 200 g", "huevo 2", "250 kcal").
    Text {
        /// Text to parse. Reads stdin when neither --input nor --file is given.
        #[arg(short, long, conflicts_with = "file")]
        input: Option<String>,

        /// Read the text from a file.
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Meal slot to log the result under.
        #[arg(short, long)]
        meal: Option<String>,

        /// Save the result to the log (requires --meal).
        #[arg(long, requires = "meal")]
        save: bool,
    },

    /// Add a food to the catalog, or update it if the name exists.
    AddFood {
        /// Food name.
        name: String,

        /// Pricing mode: "100g" or "unidad". Prompts when omitted.
        #[arg(long)]
        mode: Option<String>,

        /// Kcal per 100 g or per unit.
        #[arg(long)]
        kcal: String,
    },

    /// List the catalog.
    Foods,

    /// Today's totals per meal against the goal.
    Today,

    /// Totals for the last 7 days.
    Week,

    /// Totals for the current month.
    Month,

    /// Mark a day as a gym day (or not).
    Gym {
        /// Date as YYYY-MM-DD. Defaults to today.
        #[arg(long)]
        date: Option<String>,

        /// Clear the flag instead of setting it.
        #[arg(long)]
        off: bool,
    },

    /// Edit or delete saved entries.
    Log {
        #[command(subcommand)]
        action: LogAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum LogAction {
    /// Delete an entry by id.
    Delete { id: u32 },

    /// Change the meal or the kcal of an entry.
    Edit {
        id: u32,

        #[arg(long)]
        meal: Option<String>,

        #[arg(long)]
        kcal: Option<String>,
    },
}

impl Default for Command {
    fn default() -> Self {
        Command::Today
    }
}

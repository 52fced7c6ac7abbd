//! CLI command handlers
//!
//! This module contains the implementation of the `budget` subcommands,
//! bridging the clap argument parsing with the planner service. Handlers
//! return whether the operation succeeded so the binary can set its exit
//! status.

pub mod items;
pub mod report;

use clap::Subcommand;
use serde::Serialize;

use crate::config::settings::Settings;
use crate::error::PlannerResult;
use crate::services::BudgetPlanner;

pub use items::{handle_add, handle_delete, handle_info, handle_items, handle_update};
pub use report::{handle_audit, handle_dashboard};

/// Budget subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Show budget items and the years they cover
    Info {
        /// Only items counting towards this year
        #[arg(short, long)]
        year: Option<i32>,
    },

    /// Add a budget item
    Add {
        /// Item name
        #[arg(short, long)]
        name: String,

        /// Scope: "Permanent", "2025" or "2025-12"
        #[arg(short, long)]
        scope: String,

        /// "Monthly" or "NonMonthly"
        #[arg(short, long)]
        time_type: String,

        /// "Income" or "Expense"
        #[arg(short, long)]
        category: String,

        /// Amount (e.g., "5000" or "49.99")
        #[arg(short, long, allow_hyphen_values = true)]
        amount: String,
    },

    /// Change fields of a budget item
    Update {
        /// Item ID
        id: String,

        #[arg(short, long)]
        name: Option<String>,

        #[arg(short, long)]
        scope: Option<String>,

        #[arg(short, long)]
        time_type: Option<String>,

        #[arg(short, long)]
        category: Option<String>,

        #[arg(short, long, allow_hyphen_values = true)]
        amount: Option<String>,
    },

    /// Delete a budget item
    #[command(alias = "rm")]
    Delete {
        /// Item ID
        id: String,
    },

    /// Show the year dashboard
    Dashboard {
        #[arg(short, long)]
        year: i32,
    },

    /// List the items visible in selected months of a year
    Items {
        #[arg(short, long)]
        year: i32,

        /// Comma-separated month numbers, or "all"
        #[arg(short, long, default_value = "all")]
        months: String,
    },

    /// Show recent changes to budget items
    Audit {
        /// Number of entries to show
        #[arg(short = 'n', long, default_value = "20")]
        count: usize,
    },

    /// Show current configuration and paths
    Config,
}

/// Everything a handler needs to run one command for one user
pub struct CommandContext<'a> {
    pub planner: BudgetPlanner<'a>,
    pub settings: &'a Settings,
    pub user: &'a str,
    pub json: bool,
}

impl CommandContext<'_> {
    /// Print a serializable result as pretty JSON
    pub fn print_json<T: Serialize>(&self, value: &T) -> PlannerResult<()> {
        println!("{}", serde_json::to_string_pretty(value)?);
        Ok(())
    }

    /// Format an amount with the configured currency symbol
    pub fn money(&self, amount: rust_decimal::Decimal) -> String {
        format!("{}{:.2}", self.settings.currency_symbol, amount)
    }
}

/// Run a planner command; returns `false` for a `success: false` outcome
///
/// `Config` is handled by the binary, which owns the paths.
pub fn handle_command(ctx: &CommandContext<'_>, cmd: Commands) -> PlannerResult<bool> {
    match cmd {
        Commands::Info { year } => handle_info(ctx, year),
        Commands::Add {
            name,
            scope,
            time_type,
            category,
            amount,
        } => handle_add(ctx, name, scope, time_type, category, amount),
        Commands::Update {
            id,
            name,
            scope,
            time_type,
            category,
            amount,
        } => handle_update(ctx, &id, name, scope, time_type, category, amount),
        Commands::Delete { id } => handle_delete(ctx, &id),
        Commands::Dashboard { year } => handle_dashboard(ctx, year),
        Commands::Items { year, months } => handle_items(ctx, year, &months),
        Commands::Audit { count } => handle_audit(ctx, count),
        Commands::Config => Ok(true),
    }
}

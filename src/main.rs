use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

use budget_planner::cli::{handle_command, CommandContext, Commands};
use budget_planner::config::{paths::PlannerPaths, settings::Settings};
use budget_planner::logging::init_tracing;
use budget_planner::services::BudgetPlanner;
use budget_planner::storage::JsonFileStore;

#[derive(Parser)]
#[command(
    name = "budget",
    version,
    about = "Personal budget planner",
    long_about = "Keeps per-user income and expense items scoped to a year, a month \
                  or permanently, and shows which items apply to a month and what \
                  the year adds up to."
)]
struct Cli {
    /// User whose budget to work on (defaults to the configured default user)
    #[arg(short, long, global = true, env = "BUDGET_PLANNER_USER")]
    user: Option<String>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Initialize paths and settings
    let paths = PlannerPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    let Some(command) = cli.command else {
        println!("budget - personal budget planner");
        println!();
        println!("Run 'budget --help' for usage information.");
        return Ok(ExitCode::SUCCESS);
    };

    if let Commands::Config = command {
        println!("Budget Planner Configuration");
        println!("============================");
        println!("Data directory: {}", paths.base_dir().display());
        println!("Settings file:  {}", paths.settings_file().display());
        println!("Users:          {}", paths.users_dir().display());
        println!();
        println!("Settings:");
        println!("  ID strategy:     {:?}", settings.id_strategy);
        println!("  Currency symbol: {}", settings.currency_symbol);
        println!("  Default user:    {}", settings.default_user);
        return Ok(ExitCode::SUCCESS);
    }

    let user = cli
        .user
        .clone()
        .unwrap_or_else(|| settings.default_user.clone());

    let store = JsonFileStore::new(paths)?;
    let ctx = CommandContext {
        planner: BudgetPlanner::new(&store, settings.id_strategy),
        settings: &settings,
        user: &user,
        json: cli.json,
    };

    match handle_command(&ctx, command) {
        Ok(true) => Ok(ExitCode::SUCCESS),
        Ok(false) => Ok(ExitCode::FAILURE),
        Err(e) if e.is_recoverable() => {
            eprintln!("Error: {}", e.user_message());
            Ok(ExitCode::FAILURE)
        }
        Err(e) => Err(e.into()),
    }
}

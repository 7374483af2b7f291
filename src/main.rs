use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use fintrack::cli::{
    handle_budget_command, handle_import_command, handle_report_command,
    handle_transaction_command, BudgetCommands, TransactionCommands,
};
use fintrack::config::{FinancePaths, Settings};
use fintrack::storage::Storage;

#[derive(Parser)]
#[command(
    name = "fintrack",
    version,
    about = "Terminal personal finance tracker",
    long_about = "fintrack keeps budgets and transactions in a local SQLite database. \
                  Record spending from the command line or the interactive dashboard, \
                  import bank CSV exports and compare spending against your budgets."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch the interactive dashboard
    #[command(alias = "ui")]
    Tui,

    /// Budget management commands
    #[command(subcommand)]
    Budget(BudgetCommands),

    /// Transaction management commands
    #[command(subcommand, alias = "txn")]
    Transaction(TransactionCommands),

    /// Import transactions from a CSV file (date,payee,category,amount)
    Import {
        /// Path to CSV file
        file: PathBuf,
        /// insert: store every row as a transaction; reconcile: spend rows against budgets
        #[arg(short, long)]
        mode: Option<String>,
        /// Print the import summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show spending against each budget
    Report {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Create the data directory, database and settings file
    Init,

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let paths = FinancePaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    let Some(command) = cli.command else {
        println!("fintrack - Terminal personal finance tracker");
        println!();
        println!("Run 'fintrack --help' for usage information.");
        println!("Run 'fintrack tui' to launch the interactive dashboard.");
        return Ok(());
    };

    match command {
        Commands::Tui => fintrack::tui::run_tui(&open_storage(&paths)?, &settings)?,
        Commands::Budget(cmd) => {
            handle_budget_command(&open_storage(&paths)?, &settings, cmd)?;
        }
        Commands::Transaction(cmd) => {
            handle_transaction_command(&open_storage(&paths)?, &settings, cmd)?;
        }
        Commands::Import { file, mode, json } => {
            let storage = open_storage(&paths)?;
            handle_import_command(&storage, &settings, &file, mode.as_deref(), json)?;
        }
        Commands::Report { json } => handle_report_command(&open_storage(&paths)?, json)?,
        Commands::Init => {
            open_storage(&paths)?;
            settings.save(&paths)?;
            println!("Initialized fintrack at: {}", paths.base_dir().display());
            println!("  Database: {}", paths.database_file().display());
            println!("  Settings: {}", paths.settings_file().display());
        }
        Commands::Config => print_config(&paths, &settings),
    }

    Ok(())
}

/// Open the database, creating the data directory on first use
fn open_storage(paths: &FinancePaths) -> Result<Storage> {
    paths.ensure_directories()?;
    let storage = Storage::open(paths.database_file())?;
    Ok(storage)
}

fn print_config(paths: &FinancePaths, settings: &Settings) {
    println!("fintrack Configuration");
    println!("======================");
    println!("Data directory: {}", paths.base_dir().display());
    println!("Database:       {}", paths.database_file().display());
    println!(
        "Settings file:  {}{}",
        paths.settings_file().display(),
        if paths.is_initialized() { "" } else { " (not created yet)" }
    );
    println!();
    println!("Settings:");
    println!("  Import mode:     {}", settings.import_mode);
    println!("  Default period:  {}", settings.default_period);
    println!("  Currency symbol: {}", settings.currency_symbol);
    println!("  Date format:     {}", settings.date_format);
}

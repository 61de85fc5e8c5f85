use clap::{CommandFactory, Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use timewallet_core::storage::{Database, Tab};

mod commands;

#[derive(Parser)]
#[command(name = "timewallet-cli", version, about = "Timewallet CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Card management
    Card {
        #[command(subcommand)]
        action: commands::card::CardAction,
    },
    /// Category management
    Category {
        #[command(subcommand)]
        action: commands::category::CategoryAction,
    },
    /// Wallet management
    Wallet {
        #[command(subcommand)]
        action: commands::wallet::WalletAction,
    },
    /// Settings management
    Settings {
        #[command(subcommand)]
        action: commands::settings::SettingsAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Usage statistics
    Stats {
        #[command(subcommand)]
        action: commands::stats::StatsAction,
    },
    /// Workspace overview
    Workspace {
        #[command(subcommand)]
        action: commands::workspace::WorkspaceAction,
    },
    /// Show app status
    Status {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Generate shell completions
    Completions {
        /// Shell to generate for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

impl Commands {
    /// Screen this command belongs to, recorded as the last selected tab.
    fn tab(&self) -> Option<Tab> {
        match self {
            Commands::Card { .. } => Some(Tab::Cards),
            Commands::Category { .. } => Some(Tab::Categories),
            Commands::Wallet { .. } => Some(Tab::Wallets),
            Commands::Settings { .. } | Commands::Config { .. } => Some(Tab::Settings),
            Commands::Stats { .. } => Some(Tab::Stats),
            Commands::Workspace { .. } => Some(Tab::Workspace),
            Commands::Status { .. } | Commands::Completions { .. } => None,
        }
    }
}

fn main() {
    init_logging();

    // Parse first: help, version and usage errors exit inside `parse()`
    // and must not count as a launch.
    let cli = Cli::parse();
    greet_first_launch();

    let tab = cli.command.tab();
    let result = match cli.command {
        Commands::Card { action } => commands::card::run(action),
        Commands::Category { action } => commands::category::run(action),
        Commands::Wallet { action } => commands::wallet::run(action),
        Commands::Settings { action } => commands::settings::run(action),
        Commands::Config { action } => commands::config::run(action),
        Commands::Stats { action } => commands::stats::run(action),
        Commands::Workspace { action } => commands::workspace::run(action),
        Commands::Status { json } => commands::status::run(json),
        Commands::Completions { shell } => {
            clap_complete::generate(
                shell,
                &mut Cli::command(),
                "timewallet-cli",
                &mut std::io::stdout(),
            );
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }

    if let Some(tab) = tab {
        record_last_tab(tab);
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_env("TIMEWALLET_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// One-time hint on the very first run. Failures only get debug-logged;
/// the command itself must not be blocked by the greeting.
fn greet_first_launch() {
    let db = match Database::open() {
        Ok(db) => db,
        Err(e) => {
            debug!(error = %e, "could not open database for first-launch check");
            return;
        }
    };
    match db.is_first_launch() {
        Ok(true) => {
            eprintln!("Welcome to Timewallet. Add your first card with: timewallet-cli card add <NAME> <PACKAGE>");
            if let Err(e) = db.mark_launched() {
                debug!(error = %e, "could not record first launch");
            }
        }
        Ok(false) => {}
        Err(e) => debug!(error = %e, "could not read first-launch flag"),
    }
}

fn record_last_tab(tab: Tab) {
    let result = Database::open().and_then(|db| db.set_last_tab(tab));
    if let Err(e) = result {
        debug!(error = %e, "could not record last tab");
    }
}

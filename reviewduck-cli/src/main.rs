//! Reviewduck CLI - Command line interface for Reviewduck
//!
//! Publish review forms under a share code and collect reviews against them.

mod commands;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use reviewduck_core::Config;
use reviewduck_db::{Database, ReviewFormService, ReviewService};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use commands::{FormArgs, ReviewArgs};

/// Reviewduck: shareable review forms and the reviews written against them
#[derive(Parser, Debug)]
#[command(name = "reviewduck")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to the SQLite database (overrides config and env)
    #[arg(long, global = true, env = "REVIEWDUCK_DATABASE_PATH")]
    database: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show version information
    Version,

    /// Manage review forms
    #[command(visible_alias = "f")]
    Form(FormArgs),

    /// Submit and manage reviews
    #[command(visible_alias = "r")]
    Review(ReviewArgs),

    /// Show current configuration
    Config,
}

/// Exit status for a rejected input, the CLI's counterpart of HTTP 400
const EXIT_VALIDATION: u8 = 2;
/// Exit status for an unknown code or id, the CLI's counterpart of HTTP 404
const EXIT_NOT_FOUND: u8 = 4;

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    match run(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(exit_status(&e))
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    if cli.verbose {
        tracing::info!("Verbose mode enabled");
    }

    // Load configuration with overrides
    let config = Config::load_with_overrides(cli.database.clone())?;

    if cli.verbose {
        tracing::info!(
            database = %config.database.path.display(),
            max_connections = config.database.max_connections,
            "Configuration loaded"
        );
    }

    match cli.command {
        Some(Commands::Version) => {
            println!("reviewduck {}", env!("CARGO_PKG_VERSION"));
        }
        Some(Commands::Form(args)) => {
            let db = Database::connect(&config.database).await?;
            let service =
                ReviewFormService::new(db).with_max_code_attempts(config.code.max_attempts);
            args.execute(&service, cli.json).await?;
        }
        Some(Commands::Review(args)) => {
            let db = Database::connect(&config.database).await?;
            args.execute(&ReviewService::new(db), cli.json).await?;
        }
        Some(Commands::Config) => {
            println!("Reviewduck Configuration");
            println!("========================");
            println!();
            println!("Database Settings:");
            println!("  path: {}", config.database.path.display());
            println!("  max_connections: {}", config.database.max_connections);
            println!();
            println!("Code Settings:");
            println!("  max_attempts: {}", config.code.max_attempts);
            println!();
            if let Some(path) = Config::default_config_path() {
                println!("Config file: {}", path.display());
                if path.exists() {
                    println!("  (exists)");
                } else {
                    println!("  (not found - using defaults)");
                }
            }
        }
        None => {
            println!("Reviewduck - shareable review forms");
            println!();
            println!("Use --help for usage information");
        }
    }

    Ok(())
}

fn exit_status(error: &anyhow::Error) -> u8 {
    match error.downcast_ref::<reviewduck_db::Error>() {
        Some(e) if e.is_not_found() => EXIT_NOT_FOUND,
        Some(e) if e.is_validation() => EXIT_VALIDATION,
        _ => 1,
    }
}

//! invtrack console entry point.
//!
//! # Responsibility
//! - Parse flags, start logging and open the inventory database.
//! - Run the menu loop over stdin/stdout, then close the database.

mod console;
mod prompt;

use anyhow::{Context, Result};
use clap::Parser;
use console::ConsoleController;
use invtrack_core::db::{close_db, open_db, open_db_in_memory};
use invtrack_core::{
    default_log_level, init_logging, InventoryService, LogConfig, SqliteInventoryRepository,
};
use log::info;
use rusqlite::Connection;
use std::io;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "invtrack")]
#[command(version, about = "Console inventory tracker backed by SQLite", long_about = None)]
struct Cli {
    /// SQLite database file holding the inventory table
    #[arg(long, default_value = "inventory.db", env = "INVTRACK_DB")]
    db: PathBuf,

    /// Use a throwaway in-memory database; `--db` is ignored
    #[arg(long)]
    in_memory: bool,

    /// Log level: trace, debug, info, warn or error
    #[arg(long, env = "INVTRACK_LOG_LEVEL")]
    log_level: Option<String>,

    /// Directory for rotating log files [default: ./logs]
    #[arg(long, env = "INVTRACK_LOG_DIR")]
    log_dir: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // The inventory stays usable without logs.
    if let Err(err) = start_logging(&cli) {
        eprintln!("warning: logging disabled: {err:#}");
    }

    let conn = if cli.in_memory {
        open_db_in_memory().context("failed to open in-memory inventory database")?
    } else {
        open_db(&cli.db)
            .with_context(|| format!("failed to open inventory database `{}`", cli.db.display()))?
    };

    let outcome = run_console(&conn);
    close_db(conn).context("failed to close inventory database")?;
    outcome
}

fn start_logging(cli: &Cli) -> Result<()> {
    let level = cli.log_level.as_deref().unwrap_or(default_log_level());
    let cwd = std::env::current_dir().context("failed to resolve working directory")?;
    let log_dir = match &cli.log_dir {
        Some(dir) => cwd.join(dir),
        None => cwd.join("logs"),
    };

    let config = LogConfig::new(level, log_dir)?;
    init_logging(&config)?;
    info!(
        "event=cli_start module=cli status=ok core_version={}",
        invtrack_core::core_version()
    );
    Ok(())
}

fn run_console(conn: &Connection) -> Result<()> {
    let repo = SqliteInventoryRepository::try_new(conn).context("inventory table is not usable")?;
    let service = InventoryService::new(repo);

    let stdin = io::stdin();
    let stdout = io::stdout();
    ConsoleController::new(&service, stdin.lock(), stdout.lock())
        .run()
        .context("console session failed")?;
    Ok(())
}

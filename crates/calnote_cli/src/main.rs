//! calnote command-line entry point.
//!
//! # Responsibility
//! - Resolve configuration, start logging, and open the event store.
//! - Dispatch to the interactive session or a one-shot subcommand.
//!
//! # Invariants
//! - Failing to open or migrate the store ends the process with status 1.
//! - Logging failures only produce a warning.

mod config;
mod render;
mod session;

use anyhow::{Context, Result};
use calnote_core::db::open_db;
use calnote_core::{
    init_logging, CalendarController, DateKey, EventService, Month, Selection,
    SqliteEventRepository,
};
use clap::{Parser, Subcommand};
use config::{AppConfig, ConfigArgs};
use log::{error, info};
use session::Session;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "calnote")]
#[command(version, about = "Browse months and keep notes on calendar days")]
struct Cli {
    /// SQLite database file
    #[arg(long, global = true, env = "CALNOTE_DB")]
    db: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, env = "CALNOTE_LOG_LEVEL")]
    log_level: Option<String>,

    /// Directory for rolling log files
    #[arg(long, global = true, env = "CALNOTE_LOG_DIR")]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse months interactively (default)
    Browse,
    /// Print one month
    Show {
        /// Year (defaults to the current year)
        #[arg(long, allow_negative_numbers = true)]
        year: Option<i64>,

        /// Month number 1-12 (defaults to the current month)
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=12))]
        month: Option<u32>,

        /// Print the month snapshot as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the events of one date
    List {
        /// Date key, e.g. 2024-3-7 or -44-3-15
        #[arg(allow_hyphen_values = true)]
        date: DateKey,
    },
    /// Replace the events of one date (no lines clears it)
    Set {
        /// Date key, e.g. 2024-3-7 or -44-3-15
        #[arg(allow_hyphen_values = true)]
        date: DateKey,

        /// One event per argument
        lines: Vec<String>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("event=app_exit module=cli status=error error={err:#}");
            eprintln!("calnote: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = AppConfig::resolve(ConfigArgs {
        db: cli.db,
        log_dir: cli.log_dir,
        log_level: cli.log_level,
    })?;

    if let Err(err) = init_logging(&config.log_level, &config.log_dir) {
        eprintln!("calnote: warning: logging disabled: {err}");
    }

    let repo = open_store(&config)?;
    let mut service = EventService::new(repo);
    service
        .init()
        .context("failed to initialize event storage")?;

    match cli.command.unwrap_or(Commands::Browse) {
        Commands::Browse => {
            let controller = CalendarController::new(service, Selection::current());
            let stdin = io::stdin();
            Session::new(controller).run(stdin.lock(), io::stdout().lock())?;
        }
        Commands::Show { year, month, json } => {
            let current = Selection::current();
            let selection = Selection::new(
                year.unwrap_or(current.year),
                month.and_then(Month::from_number).unwrap_or(current.month),
            );
            let view = CalendarController::new(service, selection).view();
            if json {
                println!("{}", serde_json::to_string_pretty(&view)?);
            } else {
                print!("{}", render::render_month(&view));
            }
        }
        Commands::List { date } => {
            let lines = service
                .list_events(&date)
                .with_context(|| format!("could not read events for {date}"))?;
            for line in lines {
                println!("{line}");
            }
        }
        Commands::Set { date, lines } => {
            let stored = service
                .replace_events(&date, &lines)
                .with_context(|| format!("could not save events for {date}"))?;
            println!("saved {} line(s) for {date}", stored.len());
        }
    }

    info!("event=app_exit module=cli status=ok");
    Ok(())
}

fn open_store(config: &AppConfig) -> Result<SqliteEventRepository> {
    config.prepare_db_dir()?;
    let conn = open_db(&config.db_path)
        .with_context(|| format!("failed to open database {}", config.db_path.display()))?;
    let repo = SqliteEventRepository::try_new(conn)
        .with_context(|| format!("database {} is not usable", config.db_path.display()))?;
    info!(
        "event=store_open module=cli status=ok path={}",
        config.db_path.display()
    );
    Ok(repo)
}

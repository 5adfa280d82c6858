mod commands;
mod render;

use std::path::PathBuf;

use anyhow::{Context, Result};
use calgrid_core::config::CalGridConfig;
use calgrid_core::export::ExportFormat;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "calgrid")]
#[command(about = "Plan time-boxed events on a monthly calendar")]
struct Cli {
    /// Read configuration from this file instead of ~/.config/calgrid/config.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add an event
    Add {
        title: String,

        /// Day of the event (YYYY-MM-DD, "today" or "tomorrow")
        #[arg(short, long)]
        date: String,

        /// Start time (HH:MM)
        #[arg(short, long)]
        start: String,

        /// End time (HH:MM). Defaults to one hour after the start
        #[arg(short, long, conflicts_with = "duration")]
        end: Option<String>,

        /// Length of the event instead of an end time (e.g. "30m", "1h 30m")
        #[arg(long)]
        duration: Option<String>,

        #[arg(long)]
        description: Option<String>,

        /// work, personal or other
        #[arg(short, long, default_value = "work")]
        color: String,
    },
    /// Change an existing event
    Edit {
        id: String,

        #[arg(long)]
        title: Option<String>,

        /// New description (pass "" to clear it)
        #[arg(long)]
        description: Option<String>,

        /// Move the event to this day
        #[arg(short, long)]
        date: Option<String>,

        #[arg(short, long)]
        start: Option<String>,

        #[arg(short, long)]
        end: Option<String>,

        #[arg(short, long)]
        color: Option<String>,
    },
    /// Delete an event from a day
    Delete {
        id: String,

        #[arg(short, long)]
        date: String,
    },
    /// Move an event to another day
    Move {
        id: String,

        #[arg(long)]
        from: String,

        #[arg(long)]
        to: String,
    },
    /// List events, optionally for one day or matching a search term
    List {
        #[arg(short, long)]
        date: Option<String>,

        /// Only show events whose title, description or date contains this
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Show a month grid with event counts
    Month {
        /// Month to show (YYYY-MM). Defaults to the current month
        month: Option<String>,

        #[arg(short, long)]
        search: Option<String>,
    },
    /// Export all events to a file
    Export {
        /// json or csv
        #[arg(value_parser = parse_format)]
        format: ExportFormat,

        /// Directory to write to. Defaults to export_dir from the config
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Show configuration and file locations
    Config,
}

fn main() -> Result<()> {
    init_logging();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_ref())?;

    match cli.command {
        Commands::Config => commands::config::run(&config, cli.config.as_deref()),
        command => run_with_store(&config, command),
    }
}

fn run_with_store(config: &CalGridConfig, command: Commands) -> Result<()> {
    tracing::debug!(data_dir = %config.data_path().display(), "opening event store");
    let mut store = config.open_store().with_context(|| {
        format!("Failed to open event store in {}", config.data_path().display())
    })?;

    match command {
        Commands::Add {
            title,
            date,
            start,
            end,
            duration,
            description,
            color,
        } => {
            let args = commands::add::AddArgs {
                title,
                date,
                start,
                end,
                duration,
                description,
                color,
            };
            commands::add::run(&mut store, args)
        }
        Commands::Edit {
            id,
            title,
            description,
            date,
            start,
            end,
            color,
        } => {
            let args = commands::edit::EditArgs {
                title,
                description,
                date,
                start,
                end,
                color,
            };
            commands::edit::run(&mut store, &id, args)
        }
        Commands::Delete { id, date } => commands::delete::run(&mut store, &id, &date),
        Commands::Move { id, from, to } => commands::relocate::run(&mut store, &id, &from, &to),
        Commands::List { date, search } => {
            commands::list::run(&mut store, date.as_deref(), search.as_deref())
        }
        Commands::Month { month, search } => {
            commands::month::run(&mut store, month.as_deref(), search.as_deref())
        }
        Commands::Export { format, out } => {
            let dir = out.unwrap_or_else(|| config.export_path());
            commands::export::run(&store, format, &dir)
        }
        Commands::Config => commands::config::run(config, None),
    }
}

/// Log to stderr, filtered by RUST_LOG (warnings only by default).
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn load_config(path: Option<&PathBuf>) -> Result<CalGridConfig> {
    let config = match path {
        Some(path) => CalGridConfig::load_from(path),
        None => CalGridConfig::load(),
    };
    config.context("Failed to load configuration")
}

fn parse_format(s: &str) -> Result<ExportFormat, String> {
    s.parse().map_err(|e: calgrid_core::CalGridError| e.to_string())
}

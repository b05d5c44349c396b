use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use clap::{Parser, Subcommand};
use tj_calendar::Region;

mod commands;

#[derive(Parser)]
#[command(name = "tj")]
#[command(about = "Trade journal session and economic-event toolkit", long_about = None)]
struct Cli {
    /// Layered config paths in merge order (built-in defaults are always the base)
    #[arg(long = "config", global = true)]
    config_paths: Vec<String>,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Is daylight-saving time in effect for a region on a date
    Dst {
        /// Calendar date (YYYY-MM-DD)
        #[arg(long)]
        date: NaiveDate,

        /// EU | US
        #[arg(long)]
        region: Region,
    },

    /// Print the UTC window of a session on a date
    SessionWindow {
        /// Session label (canonical or legacy alias)
        #[arg(long)]
        session: String,

        /// Reference date (YYYY-MM-DD)
        #[arg(long)]
        date: NaiveDate,

        /// Also print the window in the session region's exchange-local zone
        #[arg(long, default_value_t = false)]
        local: bool,
    },

    /// Check whether an instant falls inside a session
    InSession {
        /// Trade execution instant (RFC 3339, e.g. 2024-06-15T09:30:00Z)
        #[arg(long)]
        at: DateTime<Utc>,

        #[arg(long)]
        session: String,
    },

    /// Normalize a session label and list the canonical sessions it covers
    NormalizeSession { name: String },

    /// Show the pin key and base name of an event name
    CleanEvent { name: String },

    /// List trades tied to a calendar event, plus the pin annotating it
    MatchTrades {
        /// JSON file with an array of trade records
        #[arg(long)]
        trades: String,

        /// JSON file with one economic event
        #[arg(long)]
        event: String,

        /// JSON file with an array of pinned event records
        #[arg(long)]
        pins: Option<String>,
    },

    /// Trades attributed to a session on a date
    Aggregate {
        /// JSON file with an array of trade records
        #[arg(long)]
        trades: String,

        #[arg(long)]
        session: String,

        #[arg(long)]
        date: NaiveDate,
    },

    /// Compute layered config hash + print canonical JSON
    ConfigHash {
        /// Fail instead of warning when the config has unused keys
        #[arg(long, default_value_t = false)]
        strict: bool,
    },
}

fn main() -> Result<()> {
    // Silent if the file does not exist.
    let _ = dotenvy::from_filename(".env.local");

    let cli = Cli::parse();
    let path_refs: Vec<&str> = cli.config_paths.iter().map(|s| s.as_str()).collect();
    let loaded = tj_config::load_layered_yaml(&path_refs)?;

    init_tracing(&loaded.config.log.filter);

    match cli.cmd {
        Commands::Dst { date, region } => commands::session::dst(date, region),
        Commands::SessionWindow {
            session,
            date,
            local,
        } => commands::session::window(&loaded, &session, date, local),
        Commands::InSession { at, session } => commands::session::in_session(&loaded, at, &session),
        Commands::NormalizeSession { name } => commands::session::normalize(&loaded, &name),
        Commands::CleanEvent { name } => commands::events::clean(&name),
        Commands::MatchTrades {
            trades,
            event,
            pins,
        } => commands::events::match_trades(&trades, &event, pins.as_deref()),
        Commands::Aggregate {
            trades,
            session,
            date,
        } => commands::session::aggregate(&loaded, &trades, &session, date),
        Commands::ConfigHash { strict } => commands::config_hash(&loaded, strict),
    }
}

fn init_tracing(default_filter: &str) {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .init();
}

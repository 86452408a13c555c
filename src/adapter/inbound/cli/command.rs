//! Command-line interface definitions.
//!
//! Defines the CLI structure using `clap`: the server, the TV dashboard
//! client, one-shot target and calendar reports, and config management.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use super::paths;
use crate::domain::WeekendPolicy;

/// Sales leaderboard server and TV dashboard
#[derive(Parser, Debug)]
#[command(name = "leaderboard")]
#[command(version)]
pub struct Cli {
    /// Color output mode [auto, always, never]
    #[arg(
        long,
        global = true,
        default_value = "auto",
        hide_possible_values = true
    )]
    pub color: ColorChoice,

    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase output verbosity
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to the configuration file; defaults apply when it is missing
    #[arg(short, long, global = true, default_value_os_t = paths::default_config())]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

/// Color output mode for terminal rendering.
#[derive(Clone, Debug, Default, clap::ValueEnum)]
pub enum ColorChoice {
    /// Detect automatically
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the REST/WebSocket server with the alert scheduler
    Serve(ServeArgs),

    /// Run the TV dashboard against a remote server
    Dashboard(DashboardArgs),

    /// Print today's daily targets from the local database
    Targets(TargetsArgs),

    /// Print working days for a date
    Calendar(CalendarArgs),

    /// Manage configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

/// Subcommands for `leaderboard config`.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Write a documented configuration file.
    Init {
        /// Overwrite an existing file.
        #[arg(long)]
        force: bool,
    },
    /// Display the effective configuration with defaults applied.
    Show,
    /// Validate the configuration file.
    Validate,
}

#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Bind address, overriding `server.host`
    #[arg(long)]
    pub host: Option<String>,

    /// Port, overriding `server.port`
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Keep data in memory instead of the SQLite database
    #[arg(long)]
    pub memory: bool,

    /// Do not run the dashboard scheduler or speak alerts
    #[arg(long)]
    pub no_alerts: bool,
}

#[derive(Parser, Debug)]
pub struct DashboardArgs {
    /// Server base URL, overriding `dashboard.server_url`
    #[arg(long)]
    pub server: Option<String>,

    /// Do not follow the server's change feed
    #[arg(long)]
    pub no_feed: bool,
}

#[derive(Parser, Debug)]
pub struct TargetsArgs {
    /// Date to compute for (YYYY-MM-DD); defaults to today
    #[arg(long)]
    pub date: Option<NaiveDate>,

    /// Only list teams behind schedule
    #[arg(long)]
    pub behind: bool,
}

#[derive(Parser, Debug)]
pub struct CalendarArgs {
    /// Date to count from (YYYY-MM-DD); defaults to today
    pub date: Option<NaiveDate>,

    /// Weekend policy, overriding `dashboard.weekend_policy`
    #[arg(long, value_enum)]
    pub policy: Option<PolicyArg>,

    /// Fixed working-day total for the month; 0 clears it
    #[arg(long = "override", value_name = "DAYS")]
    pub override_total: Option<u32>,
}

/// Weekend policy as a CLI value.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum PolicyArg {
    /// Only Sundays are off
    SundayOnly,
    /// Saturdays and Sundays are off
    SaturdayAndSunday,
}

impl From<PolicyArg> for WeekendPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::SundayOnly => Self::SundayOnly,
            PolicyArg::SaturdayAndSunday => Self::SaturdayAndSunday,
        }
    }
}

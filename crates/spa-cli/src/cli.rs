//! CLI argument definitions for the shell driver.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "spa-shell",
    version,
    about = "Single-page navigation shell - open pages, replay links, talk to the API",
    long_about = "Open a single-page application's markup, restore the last visited app \
                  and section, and replay link clicks.\n\n\
                  Also manages the session against the backend API."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Settings file (default: config.toml in the platform config directory).
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Storage file holding the session and last location.
    #[arg(long = "store", value_name = "PATH", global = true)]
    pub store: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Start the shell on a page and replay link clicks.
    Open(OpenArgs),

    /// Show the stored session and last location.
    Status,

    /// Forget the last visited app and section.
    ResetLocation,

    /// Log in and store the access token.
    Login(LoginArgs),

    /// Log out and clear the stored session.
    Logout,

    /// Fetch the current user from the API.
    Me,

    /// Work with API resources.
    #[command(subcommand)]
    Resource(ResourceCommand),

    /// Inspect or create the settings file.
    #[command(subcommand)]
    Config(ConfigCommand),
}

#[derive(Parser)]
pub struct OpenArgs {
    /// Page markup to open.
    #[arg(long = "page", value_name = "FILE")]
    pub page: PathBuf,

    /// Link path to click after startup, e.g. /billing/invoices. Repeatable.
    #[arg(long = "click", value_name = "PATH")]
    pub clicks: Vec<String>,

    /// Write the resulting markup here.
    #[arg(long = "output", value_name = "FILE")]
    pub output: Option<PathBuf>,
}

#[derive(Parser)]
pub struct LoginArgs {
    #[arg(long = "username")]
    pub username: String,

    #[arg(long = "password")]
    pub password: String,
}

#[derive(Subcommand)]
pub enum ResourceCommand {
    /// List every item.
    List { name: String },

    /// Fetch one item.
    Get { name: String, id: String },

    /// Create an item from a JSON object.
    Create {
        name: String,
        #[arg(long = "data", value_name = "JSON")]
        data: String,
    },

    /// Replace an item with a JSON object.
    Update {
        name: String,
        id: String,
        #[arg(long = "data", value_name = "JSON")]
        data: String,
    },

    /// Delete an item.
    Delete { name: String, id: String },
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Print the effective settings as TOML.
    Show,

    /// Write default settings to the settings file.
    Init {
        /// Replace an existing file.
        #[arg(long = "force")]
        force: bool,
    },
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

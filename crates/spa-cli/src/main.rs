//! Single-page navigation shell CLI.

use std::io::{self, IsTerminal};

use clap::{ColorChoice, Parser};
use spa_cli::logging::{LogConfig, LogFormat, init_logging};
use spa_cli::settings::Settings;
use tracing::level_filters::LevelFilter;

mod cli;
mod commands;

use crate::cli::{Cli, Command, ConfigCommand, LogFormatArg, LogLevelArg};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let exit_code = match run(&cli) {
        Ok(()) => 0,
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    };
    std::process::exit(exit_code);
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    // The settings file may not exist yet.
    if let Command::Config(ConfigCommand::Init { force }) = &cli.command {
        return commands::run_config_init(cli.config.as_deref(), *force);
    }

    let settings = Settings::load(cli.config.as_deref())?;
    let store_path = settings.store_path(cli.store.as_deref());
    tracing::debug!("Using storage at {}", store_path.display());

    match &cli.command {
        Command::Open(args) => commands::run_open(args, &settings, &store_path),
        Command::Status => commands::run_status(&store_path),
        Command::ResetLocation => commands::run_reset_location(&store_path),
        Command::Login(args) => {
            commands::run_login(&settings, &store_path, &args.username, &args.password)
        }
        Command::Logout => commands::run_logout(&settings, &store_path),
        Command::Me => commands::run_me(&settings, &store_path),
        Command::Resource(command) => commands::run_resource(command, &settings, &store_path),
        Command::Config(ConfigCommand::Show) => commands::run_config_show(&settings),
        // Handled before settings are loaded.
        Command::Config(ConfigCommand::Init { .. }) => Ok(()),
    }
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig::default()
        .with_level_filter(cli.verbosity.tracing_level_filter())
        .with_log_file(cli.log_file.clone());
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config = config.with_format(match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    });
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}

//! Command handlers: run the library operations and print their results.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use serde_json::Value;
use spa_api::ApiClient;
use spa_cli::settings::Settings;
use spa_cli::shell::{OpenReport, StatusReport, open_page_file, open_store, reset_location, status};
use spa_nav::{ClickOutcome, Entry, Transition};
use spa_store::{FileStore, SessionStore};

use crate::cli::{OpenArgs, ResourceCommand};

pub fn run_open(args: &OpenArgs, settings: &Settings, store_path: &Path) -> Result<()> {
    let store = open_store(store_path)?;
    let report = open_page_file(&args.page, &args.clicks, store, &settings.navigation)?;
    print_open(&report);

    if let Some(output) = &args.output {
        fs::write(output, &report.markup)
            .with_context(|| format!("Failed to write {}", output.display()))?;
        println!("Wrote {}", output.display());
    }
    Ok(())
}

pub fn run_status(store_path: &Path) -> Result<()> {
    let report = status(open_store(store_path)?)?;
    print_status(&report, store_path);
    Ok(())
}

pub fn run_reset_location(store_path: &Path) -> Result<()> {
    reset_location(open_store(store_path)?)?;
    println!("Location cleared");
    Ok(())
}

pub fn run_login(settings: &Settings, store_path: &Path, username: &str, password: &str) -> Result<()> {
    let api = api_client(settings, store_path)?;
    let login = api.login(username, password)?;
    println!("Logged in as {}", display_user(&login.user).unwrap_or(username));
    Ok(())
}

pub fn run_logout(settings: &Settings, store_path: &Path) -> Result<()> {
    api_client(settings, store_path)?.logout()?;
    println!("Logged out");
    Ok(())
}

pub fn run_me(settings: &Settings, store_path: &Path) -> Result<()> {
    let user = api_client(settings, store_path)?.current_user()?;
    print_json(&user)
}

pub fn run_resource(command: &ResourceCommand, settings: &Settings, store_path: &Path) -> Result<()> {
    let api = api_client(settings, store_path)?;
    let value = match command {
        ResourceCommand::List { name } => api.get_all(name)?,
        ResourceCommand::Get { name, id } => api.get_one(name, id)?,
        ResourceCommand::Create { name, data } => api.create(name, &parse_data(data)?)?,
        ResourceCommand::Update { name, id, data } => api.update(name, id, &parse_data(data)?)?,
        ResourceCommand::Delete { name, id } => api.remove(name, id)?,
    };
    print_json(&value)
}

pub fn run_config_show(settings: &Settings) -> Result<()> {
    print!("{}", settings.to_toml()?);
    Ok(())
}

/// Write default settings to `explicit` or the default settings path.
pub fn run_config_init(explicit: Option<&Path>, force: bool) -> Result<()> {
    let path = explicit.map_or_else(Settings::config_path, Path::to_path_buf);
    if path.exists() && !force {
        bail!("{} already exists (use --force to replace it)", path.display());
    }
    Settings::default().save_to(&path)?;
    println!("Wrote {}", path.display());
    Ok(())
}

fn api_client(settings: &Settings, store_path: &Path) -> Result<ApiClient<Arc<FileStore>>> {
    let session = SessionStore::new(open_store(store_path)?);
    Ok(ApiClient::new(&settings.api, session)?)
}

fn parse_data(data: &str) -> Result<Value> {
    let value: Value = serde_json::from_str(data).context("--data is not valid JSON")?;
    if !value.is_object() {
        bail!("--data must be a JSON object");
    }
    Ok(value)
}

fn print_json(value: &Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn display_user(user: &Value) -> Option<&str> {
    user.get("username").and_then(Value::as_str)
}

fn print_open(report: &OpenReport) {
    let entry = match report.entry {
        Entry::Unauthenticated => "default (not logged in)",
        Entry::Restored => "restored",
        Entry::Fallback => "default",
    };
    println!("Entry: {entry}, {} link(s) wired", report.links);

    for click in &report.clicks {
        match &click.result {
            Ok(ClickOutcome::NotWired) => println!("  {} -> no matching link", click.path),
            Ok(ClickOutcome::Navigated(transitions)) if transitions.is_empty() => {
                println!("  {} -> nothing to do", click.path);
            }
            Ok(ClickOutcome::Navigated(transitions)) => {
                let steps: Vec<String> = transitions
                    .iter()
                    .map(|t| match t {
                        Transition::App(app) => format!("app {app}"),
                        Transition::Section(section) => format!("section {section}"),
                    })
                    .collect();
                println!("  {} -> {}", click.path, steps.join(", "));
            }
            Err(error) => println!("  {} -> rejected: {error}", click.path),
        }
    }

    println!(
        "Active app: {}",
        report.state.active_app.as_deref().unwrap_or("-")
    );
    println!(
        "Active section: {}",
        report.state.active_section.as_deref().unwrap_or("-")
    );
}

fn print_status(report: &StatusReport, store_path: &Path) {
    println!("Storage: {}", store_path.display());
    if report.authenticated {
        let user = report.user.as_ref().and_then(display_user).unwrap_or("unknown user");
        println!("Session: logged in ({user})");
    } else {
        println!("Session: logged out");
    }
    println!(
        "Last app: {}",
        report.location.app.as_deref().unwrap_or("-")
    );
    println!(
        "Last section: {}",
        report.location.section.as_deref().unwrap_or("-")
    );
}

//! Drive a page through the navigation shell from the command line.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use serde_json::Value;
use spa_dom::Document;
use spa_nav::{ClickOutcome, Entry, NavConfig, NavError, NavigationState, bootstrap};
use spa_store::{FileStore, KeyValueStore, LocationStore, PersistedLocation, SessionStore};

/// Open the durable store shared by the session and the location.
pub fn open_store(path: &Path) -> Result<Arc<FileStore>> {
    let store = FileStore::open(path)
        .with_context(|| format!("Failed to open storage at {}", path.display()))?;
    Ok(Arc::new(store))
}

/// One replayed click and what came of it.
#[derive(Debug)]
pub struct ClickReport {
    pub path: String,
    pub result: std::result::Result<ClickOutcome, NavError>,
}

/// The page after startup and every replayed click.
#[derive(Debug)]
pub struct OpenReport {
    pub entry: Entry,
    pub links: usize,
    pub clicks: Vec<ClickReport>,
    pub state: NavigationState,
    pub markup: String,
}

/// Bootstrap `markup` against `store`, then click each path in order.
///
/// A click naming a missing app or section is reported and leaves the page
/// as it was; a storage failure aborts.
pub fn open_page<K>(markup: &str, clicks: &[String], store: K, config: &NavConfig) -> Result<OpenReport>
where
    K: KeyValueStore + Clone,
{
    let document = Document::parse(markup).context("Failed to parse page")?;
    let mut shell = bootstrap(document, store, config).context("Failed to start the shell")?;

    let mut reports = Vec::with_capacity(clicks.len());
    for path in clicks {
        let result = match shell.click_path(path) {
            Err(NavError::Store(error)) => {
                return Err(error).context("Failed to remember the location");
            }
            other => other,
        };
        if let Err(error) = &result {
            tracing::warn!(path = %path, "click rejected: {error}");
        }
        reports.push(ClickReport {
            path: path.clone(),
            result,
        });
    }

    Ok(OpenReport {
        entry: shell.entry().clone(),
        links: shell.links().len(),
        clicks: reports,
        state: shell.controller().state().clone(),
        markup: shell.document().to_markup().context("Failed to serialize page")?,
    })
}

/// Read a page file and open it.
pub fn open_page_file<K>(page: &Path, clicks: &[String], store: K, config: &NavConfig) -> Result<OpenReport>
where
    K: KeyValueStore + Clone,
{
    let markup = fs::read_to_string(page)
        .with_context(|| format!("Failed to read page {}", page.display()))?;
    open_page(&markup, clicks, store, config)
}

/// What the store remembers between runs.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusReport {
    pub authenticated: bool,
    pub user: Option<Value>,
    pub location: PersistedLocation,
}

pub fn status<K: KeyValueStore + Clone>(store: K) -> Result<StatusReport> {
    let session = SessionStore::new(store.clone());
    let location = LocationStore::new(store);
    Ok(StatusReport {
        authenticated: session.is_authenticated()?,
        user: session.user()?,
        location: location.load()?,
    })
}

/// Forget the remembered app and section; the session is untouched.
pub fn reset_location<K: KeyValueStore>(store: K) -> Result<()> {
    LocationStore::new(store).clear()?;
    tracing::info!("Cleared remembered location");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use spa_store::MemoryStore;

    const PAGE: &str = r#"<main id="root"><div id="home"><div id="home" class="section"></div></div><div id="billing"><a href="/home">Home</a></div></main>"#;

    #[test]
    fn test_status_of_empty_store() {
        let report = status(Arc::new(MemoryStore::new())).unwrap();
        assert!(!report.authenticated);
        assert_eq!(report.user, None);
        assert!(report.location.is_empty());
    }

    #[test]
    fn test_reset_location_keeps_session() {
        let store = Arc::new(MemoryStore::with_entries([
            ("auth_token", "t"),
            ("active_app", "billing"),
            ("active_section", "invoices"),
        ]));
        reset_location(store.clone()).unwrap();

        let report = status(store).unwrap();
        assert!(report.authenticated);
        assert!(report.location.is_empty());
    }

    #[test]
    fn test_unwired_click_is_reported() {
        let store = Arc::new(MemoryStore::new());
        let report = open_page(
            PAGE,
            &["/nowhere".to_string()],
            store,
            &NavConfig::default(),
        )
        .unwrap();

        // Not a wired link at all, so nothing happens.
        assert!(matches!(report.clicks[0].result, Ok(ClickOutcome::NotWired)));
        assert_eq!(report.state.active_app.as_deref(), Some("home"));
        assert_eq!(report.links, 1);
    }
}

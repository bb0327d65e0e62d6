//! Startup: registry, link wiring, entry location.

use spa_dom::{Document, NodeId, link_path};
use spa_store::{KeyValueStore, LocationStore, SessionStore};

use crate::config::NavConfig;
use crate::controller::{NavigationController, Transition};
use crate::error::{BootError, NavError};
use crate::registry::Registry;
use crate::surface::{DomSurface, Surface};

/// An anchor whose clicks the shell intercepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WiredLink {
    pub anchor: NodeId,
    pub path: String,
}

/// How the entry location was chosen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    /// No session: the default app and section, whatever was remembered.
    Unauthenticated,
    /// The remembered app (and section, when it was still valid).
    Restored,
    /// Nothing usable was remembered; the default app.
    Fallback,
}

/// Result of clicking an element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickOutcome {
    /// The element was not an anchor present at startup; the shell does not
    /// handle it.
    NotWired,
    Navigated(Vec<Transition>),
}

/// A running page: the navigation controller plus the links wired at startup.
pub struct Shell<K> {
    controller: NavigationController<DomSurface, K>,
    links: Vec<WiredLink>,
    entry: Entry,
}

impl<K: KeyValueStore> Shell<K> {
    pub fn controller(&self) -> &NavigationController<DomSurface, K> {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut NavigationController<DomSurface, K> {
        &mut self.controller
    }

    pub fn links(&self) -> &[WiredLink] {
        &self.links
    }

    pub fn entry(&self) -> &Entry {
        &self.entry
    }

    pub fn document(&self) -> &Document {
        self.controller.surface().document()
    }

    pub fn into_document(self) -> Document {
        self.controller.into_surface().into_document()
    }

    /// Intercept a click on `anchor`.
    pub fn click(&mut self, anchor: NodeId) -> Result<ClickOutcome, NavError> {
        let Some(link) = self.links.iter().find(|l| l.anchor == anchor) else {
            tracing::debug!(node = %anchor, "click on unwired element");
            return Ok(ClickOutcome::NotWired);
        };
        let path = link.path.clone();
        tracing::debug!(path = %path, "intercepted link");
        self.controller.handle_link(&path).map(ClickOutcome::Navigated)
    }

    /// Click the first wired anchor pointing at `path`.
    ///
    /// Paths compare by their non-empty segments, so `/billing/invoices/`
    /// matches a link written as `/billing/invoices`.
    pub fn click_path(&mut self, path: &str) -> Result<ClickOutcome, NavError> {
        let wanted = segments(path);
        match self.links.iter().find(|l| segments(&l.path) == wanted) {
            Some(link) => {
                let anchor = link.anchor;
                self.click(anchor)
            }
            None => Ok(ClickOutcome::NotWired),
        }
    }
}

fn segments(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}

/// Start the shell on a loaded page.
///
/// Builds the registry, wires every anchor present now (anchors added to
/// the page later are never intercepted), hides all panels and picks the
/// entry location from the session.
pub fn bootstrap<K>(document: Document, store: K, config: &NavConfig) -> Result<Shell<K>, BootError>
where
    K: KeyValueStore + Clone,
{
    let registry = Registry::build(&document, config)?;
    let links = wire_links(&document);
    tracing::info!(links = links.len(), "wired page links");

    let session = SessionStore::new(store.clone());
    let location = LocationStore::new(store);
    let surface = DomSurface::new(document, config.show_class.clone());
    let mut controller = NavigationController::new(registry, surface, location, config.mode);
    controller.reset();

    let authenticated = session.is_authenticated()?;
    let entry = enter(&mut controller, authenticated, config)?;

    Ok(Shell {
        controller,
        links,
        entry,
    })
}

fn wire_links(document: &Document) -> Vec<WiredLink> {
    document
        .anchors()
        .into_iter()
        .filter_map(|anchor| {
            let href = document.attr(anchor, "href")?;
            let path = link_path(href)?;
            Some(WiredLink { anchor, path })
        })
        .collect()
}

/// Navigate to the entry location.
///
/// Unauthenticated sessions always land on the default app and section.
/// Authenticated sessions get the remembered app back when it still exists,
/// and the remembered section when it still exists in that app; anything
/// stale is dropped silently in favor of the default app.
///
/// The default app must be on the page in every case, including a restore
/// that never shows it; otherwise this fails with
/// [`BootError::DefaultAppMissing`] before anything is shown.
pub fn enter<S, K>(
    controller: &mut NavigationController<S, K>,
    authenticated: bool,
    config: &NavConfig,
) -> Result<Entry, BootError>
where
    S: Surface,
    K: KeyValueStore,
{
    if !controller.registry().contains(&config.default_app) {
        return Err(BootError::DefaultAppMissing {
            app: config.default_app.clone(),
        });
    }

    if !authenticated {
        tracing::info!(app = %config.default_app, "no session, entering at default app");
        controller.switch_app(&config.default_app)?;
        enter_default_section(controller, config)?;
        return Ok(Entry::Unauthenticated);
    }

    let remembered = controller.location().load()?;
    let app = remembered
        .app
        .as_deref()
        .filter(|app| controller.registry().contains(app));

    let Some(app) = app.map(str::to_string) else {
        if let Some(stale) = &remembered.app {
            tracing::warn!(app = %stale, "remembered app no longer exists");
        }
        controller.switch_app(&config.default_app)?;
        return Ok(Entry::Fallback);
    };

    tracing::info!(app = %app, "restoring remembered app");
    controller.switch_app(&app)?;

    if let Some(section) = remembered.section.as_deref() {
        let valid = controller.mode().sections_enabled()
            && controller
                .registry()
                .get(&app)
                .is_some_and(|entry| entry.has_section(section));
        if valid {
            controller.switch_section(section)?;
        } else {
            tracing::warn!(app = %app, section, "ignoring stale remembered section");
        }
    }
    Ok(Entry::Restored)
}

fn enter_default_section<S, K>(
    controller: &mut NavigationController<S, K>,
    config: &NavConfig,
) -> Result<(), BootError>
where
    S: Surface,
    K: KeyValueStore,
{
    if !controller.mode().sections_enabled() {
        return Ok(());
    }
    let has_default = controller
        .registry()
        .get(&config.default_app)
        .is_some_and(|entry| entry.has_section(&config.default_section));
    if has_default {
        controller.switch_section(&config.default_section)?;
    } else {
        tracing::warn!(
            app = %config.default_app,
            section = %config.default_section,
            "default section is not on the page"
        );
    }
    Ok(())
}

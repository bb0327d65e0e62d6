//! Navigation state machine.
//!
//! Every transition checks its target against the registry before touching
//! any visibility, so a rejected transition leaves the page exactly as it
//! was. Successful transitions are written through to the location store.

use spa_store::{KeyValueStore, LocationStore};

use crate::config::NavigationMode;
use crate::error::NavError;
use crate::link::parse_link_path;
use crate::registry::{PageEntry, Registry};
use crate::surface::Surface;

/// Which app and section are active.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavigationState {
    /// `None` only before the first app switch.
    pub active_app: Option<String>,
    /// The section visible in the active app. After [`NavigationController::switch_app`]
    /// this is whatever section of that app was already shown, while the
    /// location store only remembers sections chosen with `switch_section`.
    pub active_section: Option<String>,
}

/// A transition performed while following a link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    App(String),
    Section(String),
}

/// Owns the registry, the surface and the location store for one page.
pub struct NavigationController<S: Surface, K> {
    registry: Registry<S::Handle>,
    surface: S,
    location: LocationStore<K>,
    state: NavigationState,
    mode: NavigationMode,
}

impl<S: Surface, K: KeyValueStore> NavigationController<S, K> {
    pub fn new(
        registry: Registry<S::Handle>,
        surface: S,
        location: LocationStore<K>,
        mode: NavigationMode,
    ) -> Self {
        Self {
            registry,
            surface,
            location,
            state: NavigationState::default(),
            mode,
        }
    }

    pub fn state(&self) -> &NavigationState {
        &self.state
    }

    pub fn registry(&self) -> &Registry<S::Handle> {
        &self.registry
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn location(&self) -> &LocationStore<K> {
        &self.location
    }

    pub fn mode(&self) -> NavigationMode {
        self.mode
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    /// Show `app` and hide every other app.
    ///
    /// Sections are left as they are. The persisted section is cleared even
    /// when the app still shows one, so a restart restores the app alone.
    pub fn switch_app(&mut self, app: &str) -> Result<(), NavError> {
        let entry = self.registry.get(app).ok_or_else(|| NavError::AppNotFound {
            app: app.to_string(),
        })?;
        let root = entry.root().clone();
        let visible_section = self.visible_section(entry);

        self.hide_all_apps();
        self.surface.show(&root);
        self.state.active_app = Some(app.to_string());
        self.state.active_section = visible_section;
        tracing::debug!(app, "switched app");

        self.location.save_app(app)?;
        Ok(())
    }

    /// Show `section` of the active app and hide its other sections.
    pub fn switch_section(&mut self, section: &str) -> Result<(), NavError> {
        if !self.mode.sections_enabled() {
            return Err(NavError::SectionsDisabled);
        }
        let app = self.state.active_app.clone().ok_or(NavError::NoActiveApp)?;
        let handle = self
            .registry
            .get(&app)
            .and_then(|entry| entry.section(section))
            .cloned()
            .ok_or_else(|| NavError::SectionNotFound {
                app: app.clone(),
                section: section.to_string(),
            })?;

        self.hide_all_sections();
        self.surface.show(&handle);
        self.state.active_section = Some(section.to_string());
        tracing::debug!(app = %app, section, "switched section");

        self.location.save_section(&app, section)?;
        Ok(())
    }

    /// Hide every app panel.
    pub fn hide_all_apps(&mut self) {
        for entry in self.registry.iter() {
            self.surface.hide(entry.root());
        }
    }

    /// Hide every section of the active app. Does nothing before the first
    /// app switch.
    pub fn hide_all_sections(&mut self) {
        let Some(entry) = self
            .state
            .active_app
            .as_deref()
            .and_then(|app| self.registry.get(app))
        else {
            return;
        };
        for (_, handle) in entry.sections() {
            self.surface.hide(handle);
        }
    }

    /// Hide every panel on the page and forget the active app.
    pub fn reset(&mut self) {
        for entry in self.registry.iter() {
            self.surface.hide(entry.root());
            for (_, handle) in entry.sections() {
                self.surface.hide(handle);
            }
        }
        self.state = NavigationState::default();
    }

    /// Follow an intercepted link to `path`.
    ///
    /// The first segment switches app unless it is already active; the second
    /// segment, when present, always switches section. Both targets are
    /// checked before anything changes. Returns the transitions performed,
    /// in order.
    pub fn handle_link(&mut self, path: &str) -> Result<Vec<Transition>, NavError> {
        let Some(target) = parse_link_path(path) else {
            tracing::debug!(path, "link has no target");
            return Ok(Vec::new());
        };
        let section = target.section.filter(|_| self.mode.sections_enabled());

        let entry = self
            .registry
            .get(&target.app)
            .ok_or_else(|| NavError::AppNotFound {
                app: target.app.clone(),
            })?;
        if let Some(section) = &section {
            if !entry.has_section(section) {
                return Err(NavError::SectionNotFound {
                    app: target.app.clone(),
                    section: section.clone(),
                });
            }
        }

        let mut transitions = Vec::new();
        if self.state.active_app.as_deref() != Some(target.app.as_str()) {
            self.switch_app(&target.app)?;
            transitions.push(Transition::App(target.app));
        }
        if let Some(section) = section {
            self.switch_section(&section)?;
            transitions.push(Transition::Section(section));
        }
        Ok(transitions)
    }

    fn visible_section(&self, entry: &PageEntry<S::Handle>) -> Option<String> {
        entry
            .sections()
            .find(|(_, handle)| self.surface.is_shown(handle))
            .map(|(id, _)| id.to_string())
    }
}

//! Navigation error types.
//!
//! Three kinds of failure exist:
//!
//! - startup failures ([`RegistryError`], [`BootError`]) end initialization
//! - [`NavError`] reports a link or caller naming something the page does
//!   not have; the visible state is left as it was
//! - stale remembered locations are not errors at all and never surface

use spa_store::StoreError;
use thiserror::Error;

/// The page does not have the structure the shell needs.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// No element carries the root container id.
    #[error("App cannot run. No #{root_id} found.")]
    MissingRoot { root_id: String },

    #[error("duplicate app id '{app}'")]
    DuplicateApp { app: String },

    #[error("duplicate section id '{section}' in app '{app}'")]
    DuplicateSection { app: String, section: String },
}

/// A navigation request that could not be honored.
#[derive(Debug, Error)]
pub enum NavError {
    #[error("no app named '{app}'")]
    AppNotFound { app: String },

    #[error("app '{app}' has no section named '{section}'")]
    SectionNotFound { app: String, section: String },

    /// A section was requested before any app was active.
    #[error("no app is active")]
    NoActiveApp,

    #[error("section navigation is disabled")]
    SectionsDisabled,

    /// The new location could not be remembered.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl NavError {
    /// Whether the request named an app or section the page does not have.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::AppNotFound { .. } | Self::SectionNotFound { .. })
    }
}

/// Startup failed; the shell cannot run.
#[derive(Debug, Error)]
pub enum BootError {
    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error("default app '{app}' is not on the page")]
    DefaultAppMissing { app: String },

    #[error("entry navigation failed")]
    Navigation(#[from] NavError),

    #[error("session could not be read")]
    Store(#[from] StoreError),
}

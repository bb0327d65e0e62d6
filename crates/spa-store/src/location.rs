//! Last active app and section.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::kv::KeyValueStore;

const APP_KEY: &str = "active_app";
const SECTION_KEY: &str = "active_section";

/// Where the user was when the shell last navigated.
///
/// Nothing guarantees the ids still exist in the current page; callers
/// validate before using them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedLocation {
    pub app: Option<String>,
    pub section: Option<String>,
}

impl PersistedLocation {
    pub fn is_empty(&self) -> bool {
        self.app.is_none() && self.section.is_none()
    }
}

/// Location view over a key-value backend.
#[derive(Debug, Clone)]
pub struct LocationStore<K> {
    store: K,
}

impl<K: KeyValueStore> LocationStore<K> {
    pub fn new(store: K) -> Self {
        Self { store }
    }

    pub fn load(&self) -> Result<PersistedLocation> {
        Ok(PersistedLocation {
            app: self.store.get(APP_KEY)?.filter(|a| !a.is_empty()),
            section: self.store.get(SECTION_KEY)?.filter(|s| !s.is_empty()),
        })
    }

    /// Remember a newly activated app. Any remembered section belonged to the
    /// previous app and is forgotten.
    pub fn save_app(&self, app: &str) -> Result<()> {
        self.store.set(APP_KEY, app)?;
        self.store.remove(SECTION_KEY)
    }

    pub fn save_section(&self, app: &str, section: &str) -> Result<()> {
        self.store.set(APP_KEY, app)?;
        self.store.set(SECTION_KEY, section)
    }

    pub fn clear(&self) -> Result<()> {
        self.store.remove(APP_KEY)?;
        self.store.remove(SECTION_KEY)
    }
}

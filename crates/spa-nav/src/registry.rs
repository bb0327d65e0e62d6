//! Page registry: the page structure, read once.

use std::collections::{BTreeMap, HashMap};

use spa_dom::{Document, NodeId};

use crate::config::NavConfig;
use crate::error::RegistryError;

/// One app panel and its sections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageEntry<H> {
    id: String,
    root: H,
    sections: BTreeMap<String, H>,
}

impl<H> PageEntry<H> {
    pub fn new(id: impl Into<String>, root: H) -> Self {
        Self {
            id: id.into(),
            root,
            sections: BTreeMap::new(),
        }
    }

    /// Add a section, refusing a second section with the same id.
    pub fn with_section(mut self, id: impl Into<String>, handle: H) -> Result<Self, RegistryError> {
        let id = id.into();
        if self.sections.contains_key(&id) {
            return Err(RegistryError::DuplicateSection {
                app: self.id,
                section: id,
            });
        }
        self.sections.insert(id, handle);
        Ok(self)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn root(&self) -> &H {
        &self.root
    }

    pub fn section(&self, id: &str) -> Option<&H> {
        self.sections.get(id)
    }

    pub fn has_section(&self, id: &str) -> bool {
        self.sections.contains_key(id)
    }

    /// Sections ordered by id.
    pub fn sections(&self) -> impl Iterator<Item = (&str, &H)> {
        self.sections.iter().map(|(id, h)| (id.as_str(), h))
    }
}

/// Snapshot of every app on the page, in page order.
///
/// Never changes after construction; elements added to the page later are
/// not known to it.
#[derive(Debug, Clone)]
pub struct Registry<H> {
    entries: Vec<PageEntry<H>>,
    index: HashMap<String, usize>,
}

impl<H> Registry<H> {
    /// Build from ready-made entries, refusing duplicate app ids.
    pub fn from_entries(entries: Vec<PageEntry<H>>) -> Result<Self, RegistryError> {
        let mut index = HashMap::with_capacity(entries.len());
        for (pos, entry) in entries.iter().enumerate() {
            if index.insert(entry.id.clone(), pos).is_some() {
                return Err(RegistryError::DuplicateApp {
                    app: entry.id.clone(),
                });
            }
        }
        Ok(Self { entries, index })
    }

    pub fn get(&self, app: &str) -> Option<&PageEntry<H>> {
        self.index.get(app).map(|pos| &self.entries[*pos])
    }

    pub fn contains(&self, app: &str) -> bool {
        self.index.contains_key(app)
    }

    /// App ids in page order.
    pub fn app_ids(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.id.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &PageEntry<H>> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Registry<NodeId> {
    /// Read the page: the root container's element children are apps, their
    /// descendants carrying the section class are sections.
    pub fn build(document: &Document, config: &NavConfig) -> Result<Self, RegistryError> {
        let root = document
            .element_by_id(&config.root_id)
            .ok_or_else(|| RegistryError::MissingRoot {
                root_id: config.root_id.clone(),
            })?;

        let mut entries = Vec::new();
        for child in document.children(root) {
            let Some(app_id) = document.id(child) else {
                tracing::warn!(node = %child, "skipping app panel without an id");
                continue;
            };

            let mut entry = PageEntry::new(app_id, child);
            for section in document.descendants_with_class(child, &config.section_class) {
                match document.id(section) {
                    Some(section_id) => entry = entry.with_section(section_id, section)?,
                    None => {
                        tracing::warn!(app = app_id, node = %section, "skipping section without an id");
                    }
                }
            }
            tracing::debug!(app = app_id, sections = entry.sections.len(), "registered app");
            entries.push(entry);
        }

        let registry = Self::from_entries(entries)?;
        tracing::info!(apps = registry.len(), "page registry built");
        Ok(registry)
    }
}

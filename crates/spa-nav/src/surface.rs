//! Visibility capability.

use std::fmt::Debug;

use spa_dom::{Document, NodeId};

/// Anything that can show and hide panels addressed by a handle.
///
/// Hiding something already hidden and showing something already shown are
/// both no-ops.
pub trait Surface {
    type Handle: Clone + Eq + Debug;

    fn show(&mut self, handle: &Self::Handle);
    fn hide(&mut self, handle: &Self::Handle);
    fn is_shown(&self, handle: &Self::Handle) -> bool;
}

/// A page whose panels are shown by toggling a marker class.
#[derive(Debug, Clone)]
pub struct DomSurface {
    document: Document,
    marker: String,
}

impl DomSurface {
    pub fn new(document: Document, marker: impl Into<String>) -> Self {
        Self {
            document,
            marker: marker.into(),
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn marker(&self) -> &str {
        &self.marker
    }

    pub fn into_document(self) -> Document {
        self.document
    }
}

impl Surface for DomSurface {
    type Handle = NodeId;

    fn show(&mut self, handle: &NodeId) {
        self.document.add_class(*handle, &self.marker);
    }

    fn hide(&mut self, handle: &NodeId) {
        self.document.remove_class(*handle, &self.marker);
    }

    fn is_shown(&self, handle: &NodeId) -> bool {
        self.document.has_class(*handle, &self.marker)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dom_surface_toggles_marker() {
        let doc = Document::parse(r#"<div id="a" class="app"></div>"#).unwrap();
        let a = doc.element_by_id("a").unwrap();
        let mut surface = DomSurface::new(doc, "show");

        surface.hide(&a);
        assert!(!surface.is_shown(&a));
        surface.show(&a);
        surface.show(&a);
        assert!(surface.is_shown(&a));
        assert_eq!(surface.document().attr(a, "class"), Some("app show"));
    }
}

//! Arena-backed page tree.

use std::fmt;

/// Handle to a node inside a [`Document`].
///
/// Handles are only meaningful for the document that produced them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub(crate) usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone)]
pub(crate) struct Element {
    pub(crate) tag: String,
    /// Attributes in source order, values unescaped.
    pub(crate) attrs: Vec<(String, String)>,
    pub(crate) children: Vec<NodeId>,
    /// Written back as `<tag/>` rather than `<tag></tag>`.
    pub(crate) self_closing: bool,
}

#[derive(Debug, Clone)]
pub(crate) enum NodeKind {
    Element(Element),
    /// Raw (still escaped) character data.
    Text(String),
}

#[derive(Debug, Clone)]
pub(crate) struct Node {
    pub(crate) kind: NodeKind,
    pub(crate) parent: Option<NodeId>,
}

/// A loaded page.
#[derive(Debug, Clone, Default)]
pub struct Document {
    pub(crate) nodes: Vec<Node>,
    /// Top-level nodes in source order.
    pub(crate) roots: Vec<NodeId>,
    pub(crate) doctype: Option<String>,
}

impl Document {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, kind: NodeKind, parent: Option<NodeId>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node { kind, parent });
        match parent {
            Some(parent) => {
                if let Some(element) = self.element_mut(parent) {
                    element.children.push(id);
                }
            }
            None => self.roots.push(id),
        }
        id
    }

    pub(crate) fn element(&self, node: NodeId) -> Option<&Element> {
        match self.nodes.get(node.0).map(|n| &n.kind) {
            Some(NodeKind::Element(element)) => Some(element),
            _ => None,
        }
    }

    pub(crate) fn element_mut(&mut self, node: NodeId) -> Option<&mut Element> {
        match self.nodes.get_mut(node.0).map(|n| &mut n.kind) {
            Some(NodeKind::Element(element)) => Some(element),
            _ => None,
        }
    }

    /// Number of nodes (elements and text) in the document.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the document holds no nodes at all.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Tag name of an element, `None` for text nodes.
    pub fn tag(&self, node: NodeId) -> Option<&str> {
        self.element(node).map(|e| e.tag.as_str())
    }

    /// Value of an attribute. Names compare case-insensitively, as in HTML.
    pub fn attr(&self, node: NodeId, name: &str) -> Option<&str> {
        self.element(node)?
            .attrs
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// The element's `id`, if it has a non-empty one.
    pub fn id(&self, node: NodeId) -> Option<&str> {
        self.attr(node, "id").filter(|id| !id.is_empty())
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.get(node.0).and_then(|n| n.parent)
    }

    /// Element children of a node, in document order.
    pub fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.element(node)
            .map(|e| {
                e.children
                    .iter()
                    .copied()
                    .filter(|child| self.element(*child).is_some())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// All elements in document order.
    pub fn elements(&self) -> Vec<NodeId> {
        let mut out = Vec::new();
        for root in &self.roots {
            self.collect_elements(*root, &mut out);
        }
        out
    }

    /// Element descendants of `node` (excluding `node` itself), in document order.
    pub fn descendants(&self, node: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        if let Some(element) = self.element(node) {
            for child in &element.children {
                self.collect_elements(*child, &mut out);
            }
        }
        out
    }

    fn collect_elements(&self, node: NodeId, out: &mut Vec<NodeId>) {
        if let Some(element) = self.element(node) {
            out.push(node);
            for child in &element.children {
                self.collect_elements(*child, out);
            }
        }
    }

    /// First element whose `id` equals `id`.
    pub fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.elements()
            .into_iter()
            .find(|node| self.id(*node) == Some(id))
    }

    /// Descendants of `node` carrying `class`, like `querySelectorAll('.class')`.
    pub fn descendants_with_class(&self, node: NodeId, class: &str) -> Vec<NodeId> {
        self.descendants(node)
            .into_iter()
            .filter(|d| self.has_class(*d, class))
            .collect()
    }

    /// Every `<a>` element in the document.
    pub fn anchors(&self) -> Vec<NodeId> {
        self.elements()
            .into_iter()
            .filter(|node| {
                self.tag(*node)
                    .is_some_and(|tag| tag.eq_ignore_ascii_case("a"))
            })
            .collect()
    }

    /// Whether `ancestor` contains `node` somewhere below it.
    pub fn is_descendant_of(&self, node: NodeId, ancestor: NodeId) -> bool {
        let mut current = self.parent(node);
        while let Some(parent) = current {
            if parent == ancestor {
                return true;
            }
            current = self.parent(parent);
        }
        false
    }

    /// Classes of an element in attribute order.
    pub fn classes(&self, node: NodeId) -> Vec<&str> {
        self.attr(node, "class")
            .map(|value| value.split_ascii_whitespace().collect())
            .unwrap_or_default()
    }

    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.classes(node).contains(&class)
    }

    /// Add a class. Adding a class that is already present changes nothing.
    pub fn add_class(&mut self, node: NodeId, class: &str) {
        if self.has_class(node, class) {
            return;
        }
        let Some(element) = self.element_mut(node) else {
            return;
        };
        match element.attrs.iter_mut().find(|(key, _)| key == "class") {
            Some((_, value)) => {
                let mut classes: Vec<&str> = value.split_ascii_whitespace().collect();
                classes.push(class);
                *value = classes.join(" ");
            }
            None => element.attrs.push(("class".to_string(), class.to_string())),
        }
    }

    /// Remove a class. Removing an absent class changes nothing.
    pub fn remove_class(&mut self, node: NodeId, class: &str) {
        if !self.has_class(node, class) {
            return;
        }
        let Some(element) = self.element_mut(node) else {
            return;
        };
        if let Some((_, value)) = element.attrs.iter_mut().find(|(key, _)| key == "class") {
            *value = value
                .split_ascii_whitespace()
                .filter(|c| *c != class)
                .collect::<Vec<_>>()
                .join(" ");
        }
    }
}

//! In-memory page tree for the single-page shell.
//!
//! The shell never talks to a live browser. A page is loaded once from its
//! markup into a [`Document`], an arena of element and text nodes addressed
//! by [`NodeId`]. The only mutation the shell performs on the tree is adding
//! and removing CSS classes, which is how panels are shown and hidden.
//!
//! # Features
//!
//! - **Lenient markup loading** with `quick-xml` (HTML attribute syntax,
//!   unclosed void elements)
//! - **Class-list edits** that mirror the browser's `classList`
//! - **Markup serialization** that reflects the current class lists
//! - **Link resolution** matching an anchor's `pathname`
//!
//! # Example
//!
//! ```ignore
//! use spa_dom::Document;
//!
//! let mut doc = Document::parse(r#"<main id="root"><div id="home"></div></main>"#)?;
//! let home = doc.element_by_id("home").unwrap();
//! doc.add_class(home, "show");
//! assert!(doc.has_class(home, "show"));
//! ```

mod document;
mod error;
mod link;
mod parse;
mod write;

pub use document::{Document, NodeId};
pub use error::{DomError, Result};
pub use link::link_path;

//! Markup loading.
//!
//! Pages are tokenized with `quick-xml`. End-name checking is disabled and
//! the tree builder does its own recovery so that common HTML habits load:
//! void elements written as `<br>`, valueless attributes, stray end tags.
//! Tag and attribute names are case-insensitive and stored lowercased.

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::document::{Document, Element, NodeId, NodeKind};
use crate::error::{DomError, Result};

/// Elements that never have content in HTML.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

fn is_void(tag: &str) -> bool {
    VOID_ELEMENTS.iter().any(|v| v.eq_ignore_ascii_case(tag))
}

impl Document {
    /// Load a page from its markup.
    pub fn parse(markup: &str) -> Result<Self> {
        let mut reader = Reader::from_str(markup);
        reader.config_mut().check_end_names = false;

        let mut doc = Document::new();
        let mut open: Vec<(String, NodeId)> = Vec::new();

        loop {
            let event = reader.read_event().map_err(|source| DomError::Markup {
                position: reader.error_position(),
                source,
            })?;
            let parent = open.last().map(|(_, id)| *id);

            match event {
                Event::Start(start) => {
                    let element = read_element(&reader, &start, false)?;
                    let tag = element.tag.clone();
                    let void = is_void(&tag);
                    let id = doc.push(
                        NodeKind::Element(Element {
                            self_closing: void,
                            ..element
                        }),
                        parent,
                    );
                    if !void {
                        open.push((tag, id));
                    }
                }
                Event::Empty(start) => {
                    let element = read_element(&reader, &start, true)?;
                    doc.push(NodeKind::Element(element), parent);
                }
                Event::End(end) => {
                    let name = std::str::from_utf8(end.name().as_ref())?.to_ascii_lowercase();
                    // Close up to the matching element; ignore end tags with no opener.
                    if let Some(pos) = open.iter().rposition(|(tag, _)| *tag == name) {
                        if pos + 1 != open.len() {
                            tracing::debug!(tag = %name, "closing unterminated elements");
                        }
                        open.truncate(pos);
                    } else {
                        tracing::debug!(tag = %name, "ignoring unmatched end tag");
                    }
                }
                Event::Text(text) => {
                    let raw = std::str::from_utf8(&text)?;
                    append_text(&mut doc, parent, raw);
                }
                Event::GeneralRef(reference) => {
                    let name = std::str::from_utf8(&reference)?;
                    append_text(&mut doc, parent, &format!("&{name};"));
                }
                Event::DocType(doctype) => {
                    doc.doctype = Some(std::str::from_utf8(&doctype)?.trim().to_string());
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if !open.is_empty() {
            tracing::debug!(unclosed = open.len(), "page ended with open elements");
        }
        Ok(doc)
    }
}

fn read_element(reader: &Reader<&[u8]>, start: &BytesStart<'_>, self_closing: bool) -> Result<Element> {
    let tag = std::str::from_utf8(start.name().as_ref())?.to_ascii_lowercase();
    let mut attrs = Vec::new();
    for attr in start.html_attributes() {
        let attr = attr.map_err(|source| DomError::Attribute {
            position: reader.buffer_position(),
            source,
        })?;
        let key = std::str::from_utf8(attr.key.as_ref())?.to_ascii_lowercase();
        let raw = std::str::from_utf8(&attr.value)?;
        let value = quick_xml::escape::unescape(raw)
            .map(|v| v.into_owned())
            .unwrap_or_else(|_| raw.to_string());
        attrs.push((key, value));
    }
    Ok(Element {
        tag,
        attrs,
        children: Vec::new(),
        self_closing,
    })
}

/// Adjacent character data is merged into one text node.
fn append_text(doc: &mut Document, parent: Option<NodeId>, raw: &str) {
    let last = match parent {
        Some(parent) => doc.element(parent).and_then(|e| e.children.last().copied()),
        None => doc.roots.last().copied(),
    };
    if let Some(last) = last {
        if let Some(NodeKind::Text(existing)) = doc.nodes.get_mut(last.0).map(|n| &mut n.kind) {
            existing.push_str(raw);
            return;
        }
    }
    doc.push(NodeKind::Text(raw.to_string()), parent);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_nested_elements() {
        let doc = Document::parse(r#"<div id="root"><section id="a"></section></div>"#).unwrap();
        let root = doc.element_by_id("root").unwrap();
        let a = doc.element_by_id("a").unwrap();
        assert_eq!(doc.children(root), vec![a]);
        assert_eq!(doc.parent(a), Some(root));
    }

    #[test]
    fn test_parse_html_void_and_valueless_attributes() {
        let doc = Document::parse(
            r#"<form id="f"><input id="q" disabled><br><button id="b">Go</button></form>"#,
        )
        .unwrap();
        let form = doc.element_by_id("f").unwrap();
        let button = doc.element_by_id("b").unwrap();
        // <input> and <br> must not swallow the button.
        assert_eq!(doc.parent(button), Some(form));
        assert_eq!(doc.children(form).len(), 3);
        let input = doc.element_by_id("q").unwrap();
        assert_eq!(doc.attr(input, "disabled"), Some(""));
    }

    #[test]
    fn test_parse_unescapes_attributes() {
        let doc = Document::parse(r#"<a id="l" href="/x?a=1&amp;b=2">l</a>"#).unwrap();
        let link = doc.element_by_id("l").unwrap();
        assert_eq!(doc.attr(link, "href"), Some("/x?a=1&b=2"));
    }

    #[test]
    fn test_parse_recovers_from_stray_end_tag() {
        let doc = Document::parse(r#"<div id="a"></span><p id="b"></p></div>"#).unwrap();
        let a = doc.element_by_id("a").unwrap();
        let b = doc.element_by_id("b").unwrap();
        assert_eq!(doc.parent(b), Some(a));
    }

    #[test]
    fn test_parse_end_tag_closes_uppercase_start() {
        let doc = Document::parse(
            r#"<main id="root"><DIV id="home"></div><div id="billing"></div></main>"#,
        )
        .unwrap();
        let root = doc.element_by_id("root").unwrap();
        let home = doc.element_by_id("home").unwrap();
        let billing = doc.element_by_id("billing").unwrap();
        assert_eq!(doc.children(root), vec![home, billing]);
        assert_eq!(doc.tag(home), Some("div"));
    }

    #[test]
    fn test_parse_lowercases_attribute_names() {
        let doc = Document::parse(r#"<A ID="l" HREF="/billing">Billing</A>"#).unwrap();
        let link = doc.element_by_id("l").unwrap();
        assert_eq!(doc.anchors(), vec![link]);
        assert_eq!(doc.attr(link, "href"), Some("/billing"));
    }

    #[test]
    fn test_parse_rejects_broken_markup() {
        let err = Document::parse(r#"<div id="a"#).unwrap_err();
        assert!(matches!(err, DomError::Markup { .. }));
    }
}

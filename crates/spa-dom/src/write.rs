//! Markup serialization.

use quick_xml::Writer;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};

use crate::document::{Document, NodeId, NodeKind};
use crate::error::Result;

impl Document {
    /// Serialize the page, reflecting the current class lists.
    pub fn to_markup(&self) -> Result<String> {
        let mut writer = Writer::new(Vec::new());

        if let Some(doctype) = &self.doctype {
            writer.write_event(Event::DocType(BytesText::from_escaped(doctype.as_str())))?;
        }
        for root in &self.roots {
            self.write_node(&mut writer, *root)?;
        }

        let bytes = writer.into_inner();
        Ok(std::str::from_utf8(&bytes)?.to_string())
    }

    fn write_node(&self, writer: &mut Writer<Vec<u8>>, node: NodeId) -> Result<()> {
        let Some(entry) = self.nodes.get(node.0) else {
            return Ok(());
        };
        match &entry.kind {
            NodeKind::Text(raw) => {
                writer.write_event(Event::Text(BytesText::from_escaped(raw.as_str())))?;
            }
            NodeKind::Element(element) => {
                let mut start = BytesStart::new(element.tag.as_str());
                for (key, value) in &element.attrs {
                    start.push_attribute((key.as_str(), value.as_str()));
                }
                if element.self_closing && element.children.is_empty() {
                    writer.write_event(Event::Empty(start))?;
                } else {
                    writer.write_event(Event::Start(start))?;
                    for child in &element.children {
                        self.write_node(writer, *child)?;
                    }
                    writer.write_event(Event::End(BytesEnd::new(element.tag.as_str())))?;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::Document;

    #[test]
    fn test_markup_reflects_class_changes() {
        let mut doc =
            Document::parse(r#"<main id="root"><div id="home" class="app">Home</div></main>"#)
                .unwrap();
        let home = doc.element_by_id("home").unwrap();
        doc.add_class(home, "show");
        insta::assert_snapshot!(
            doc.to_markup().unwrap(),
            @r#"<main id="root"><div id="home" class="app show">Home</div></main>"#
        );
    }

    #[test]
    fn test_markup_keeps_entities_and_doctype() {
        let doc = Document::parse("<!DOCTYPE html>\n<p id=\"x\">a &amp; b</p>").unwrap();
        assert_eq!(
            doc.to_markup().unwrap(),
            "<!DOCTYPE html>\n<p id=\"x\">a &amp; b</p>"
        );
    }

    #[test]
    fn test_markup_void_elements_are_self_closed() {
        let doc = Document::parse(r#"<div id="a"><br><img src="x.png"/></div>"#).unwrap();
        assert_eq!(
            doc.to_markup().unwrap(),
            r#"<div id="a"><br/><img src="x.png"/></div>"#
        );
    }
}

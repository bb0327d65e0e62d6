//! Loading a realistic page layout.

use spa_dom::{Document, link_path};

const PAGE: &str = r#"<!DOCTYPE html>
<html>
<head><meta charset="utf-8"><title>Shell</title></head>
<body>
  <nav>
    <a href="/home/home">Home</a>
    <a href="/billing/invoices/">Invoices</a>
  </nav>
  <main id="root">
    <div id="home" class="app">
      <div id="home" class="section">Welcome</div>
    </div>
    <div id="billing" class="app">
      <div id="invoices" class="section">Invoices</div>
      <div id="payments" class="section">Payments</div>
    </div>
  </main>
</body>
</html>"#;

#[test]
fn test_page_structure() {
    let doc = Document::parse(PAGE).unwrap();
    let root = doc.element_by_id("root").unwrap();

    let apps: Vec<_> = doc
        .children(root)
        .into_iter()
        .filter_map(|app| doc.id(app))
        .collect();
    assert_eq!(apps, vec!["home", "billing"]);

    let billing = doc.children(root)[1];
    let sections: Vec<_> = doc
        .descendants_with_class(billing, "section")
        .into_iter()
        .filter_map(|s| doc.id(s))
        .collect();
    assert_eq!(sections, vec!["invoices", "payments"]);
}

#[test]
fn test_page_anchors_in_document_order() {
    let doc = Document::parse(PAGE).unwrap();
    let paths: Vec<_> = doc
        .anchors()
        .into_iter()
        .filter_map(|a| doc.attr(a, "href"))
        .filter_map(link_path)
        .collect();
    assert_eq!(paths, vec!["/home/home", "/billing/invoices/"]);
}

#[test]
fn test_unchanged_page_serializes_to_same_markup() {
    let doc = Document::parse(PAGE).unwrap();
    let again = Document::parse(&doc.to_markup().unwrap()).unwrap();
    assert_eq!(doc.len(), again.len());
    assert_eq!(doc.elements().len(), again.elements().len());
}

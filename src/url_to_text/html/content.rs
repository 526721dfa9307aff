use scraper::{ElementRef, Html, Node, Selector};

use crate::url_to_text::text::collapse_whitespace;

/// Elements whose text never reaches the summarization input
pub const NON_CONTENT_ELEMENTS: &[&str] = &["script", "style", "nav", "header", "footer", "aside"];

/// Extract the readable text of a page body.
///
/// Subtrees rooted at any of [`NON_CONTENT_ELEMENTS`] are skipped entirely.
/// Falls back to the whole document when there is no `<body>`.
pub fn extract_body_text(html: &str) -> String {
    let document = Html::parse_document(html);

    let root = Selector::parse("body")
        .ok()
        .and_then(|selector| document.select(&selector).next())
        .unwrap_or_else(|| document.root_element());

    let mut raw = String::new();
    collect_text(root, &mut raw);
    collapse_whitespace(&raw)
}

fn collect_text(element: ElementRef, out: &mut String) {
    if NON_CONTENT_ELEMENTS.contains(&element.value().name()) {
        return;
    }

    for child in element.children() {
        match child.value() {
            Node::Text(text) => out.push_str(text),
            Node::Element(_) => {
                if let Some(child_element) = ElementRef::wrap(child) {
                    collect_text(child_element, out);
                }
            }
            _ => {}
        }
    }
}

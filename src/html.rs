//! Markup adapter
//!
//! Parsing is delegated to `scraper`. This module only copies the parsed
//! document into the owned [`Node`] tree the extractor walks.

use scraper::{ElementRef, Html};

use crate::config::CondenseOptions;
use crate::dom::{Element, Node};
use crate::error::CondenseError;

/// Parse a full document and return its document element
///
/// Like a browser, the parser inserts missing `<html>`, `<head>` and `<body>`.
pub fn parse_document(markup: &str) -> Node {
    let document = Html::parse_document(markup);
    Node::Element(convert_element(document.root_element()))
}

/// Parse a fragment and return its top-level nodes in a [`Node::Fragment`]
pub fn parse_fragment(markup: &str) -> Node {
    let fragment = Html::parse_fragment(markup);
    Node::Fragment(convert_children(fragment.root_element()))
}

/// Parse a document and condense it
pub fn condense_html(markup: &str, options: &CondenseOptions) -> Result<String, CondenseError> {
    let root = parse_document(markup);
    crate::condense_with_options(&root, options)
}

/// Parse a fragment and condense its top-level nodes
pub fn condense_html_fragment(
    markup: &str,
    options: &CondenseOptions,
) -> Result<String, CondenseError> {
    let fragment = parse_fragment(markup);
    crate::condense_fragment_with_options(&fragment, options)
}

fn convert_element(element: ElementRef<'_>) -> Element {
    let value = element.value();
    Element {
        tag_name: value.name().to_string(),
        attributes: value
            .attrs
            .iter()
            .map(|(name, value)| {
                // keep the prefix so `xlink:href` and `href` stay distinct
                let name = match &name.prefix {
                    Some(prefix) => format!("{}:{}", prefix, name.local),
                    None => name.local.to_string(),
                };
                (name, value.to_string())
            })
            .collect(),
        children: convert_children(element),
    }
}

fn convert_children(element: ElementRef<'_>) -> Vec<Node> {
    element
        .children()
        .filter_map(|child| {
            if let Some(child_element) = ElementRef::wrap(child) {
                Some(Node::Element(convert_element(child_element)))
            } else if let Some(text) = child.value().as_text() {
                Some(Node::Text(text.to_string()))
            } else {
                // doctypes and processing instructions carry nothing to condense
                child
                    .value()
                    .as_comment()
                    .map(|comment| Node::Comment(comment.to_string()))
            }
        })
        .collect()
}

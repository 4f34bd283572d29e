//! HTML Condense - structural deduplication for markup trees
//!
//! This library factors repeated subtrees of an element/text tree into reusable
//! template definitions, replacing attribute values and text with positional
//! parameters.
//!
//! # Example
//!
//! ```rust
//! use html_condense::html::condense_html_fragment;
//! use html_condense::CondenseOptions;
//!
//! let out = condense_html_fragment("<div>hello</div>", &CondenseOptions::default()).unwrap();
//! assert_eq!(out, r#"div{"hello"}"#);
//! ```

pub mod config;
pub mod dom;
pub mod error;
pub mod extractor;
pub mod format;
pub mod html;
pub mod template;

pub use config::{CondenseOptions, ConfigError, OptimizeLevel, OptimizeOptions};
pub use dom::{Element, Node, NodeKind, TreeNode};
pub use error::CondenseError;
pub use extractor::TemplateExtractor;
pub use format::{CompactFormat, Format, FormatKind, HtmlFormat, TextKind};

/// Condense a tree with default options
///
/// `root` is both the tree root and the outermost template.
///
/// # Example
///
/// ```rust
/// use html_condense::{condense, Element, Node};
///
/// let list: Node = Element::new("ul")
///     .with_child(Element::new("li").with_attribute("class", "item").with_text("one"))
///     .with_child(Element::new("li").with_attribute("class", "item").with_text("two"))
///     .with_child(Element::new("li").with_attribute("class", "item").with_text("three"))
///     .into();
///
/// let out = condense(&list).unwrap();
/// assert_eq!(out, "T1: li[class=\"item\"]{$1}\n\nul{T1(\"one\")T1(\"two\")T1(\"three\")}");
/// ```
pub fn condense<N: TreeNode>(root: N) -> Result<String, CondenseError> {
    condense_with_options(root, &CondenseOptions::default())
}

/// Condense a tree with custom options
pub fn condense_with_options<N: TreeNode>(
    root: N,
    options: &CondenseOptions,
) -> Result<String, CondenseError> {
    Ok(TemplateExtractor::new(root, options)?.to_string())
}

/// Condense the children of `fragment` with default options
///
/// The fragment node itself is discarded: its children are wrapped in a
/// synthetic container whose definition and usage are suppressed, and the
/// output is their usages concatenated.
pub fn condense_fragment<N: TreeNode>(fragment: N) -> Result<String, CondenseError> {
    condense_fragment_with_options(fragment, &CondenseOptions::default())
}

/// Condense the children of `fragment` with custom options
pub fn condense_fragment_with_options<N: TreeNode>(
    fragment: N,
    options: &CondenseOptions,
) -> Result<String, CondenseError> {
    let options = options.clone().with_ignore_root(true);
    condense_with_options(fragment, &options)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_condense_single_element() {
        let node: Node = Element::new("p").with_text("hi").into();
        assert_eq!(condense(&node).unwrap(), r#"p{"hi"}"#);
    }

    #[test]
    fn test_condense_empty_element() {
        let node: Node = Element::new("br").into();
        assert_eq!(condense(&node).unwrap(), "br{}");

        let options = CondenseOptions::new().with_format(HtmlFormat);
        assert_eq!(condense_with_options(&node, &options).unwrap(), "<br/>");
    }

    #[test]
    fn test_condense_fragment() {
        let fragment = Node::fragment([
            Node::from(Element::new("div").with_text("hello")),
            Node::from(Element::new("div").with_text("world")),
        ]);
        assert_eq!(
            condense_fragment(&fragment).unwrap(),
            r#"div{"hello"}div{"world"}"#
        );
    }

    #[test]
    fn test_condense_text_root_fails() {
        let node = Node::text("x");
        assert!(matches!(condense(&node), Err(CondenseError::RootNotElement)));
    }
}

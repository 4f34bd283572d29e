//! Structural hashing
//!
//! Two subtrees get the same key iff they have the same shape: tag name,
//! attribute *names* (sorted, so declaration order does not matter) and
//! recursively the same child shapes. Attribute values and text content are not
//! part of the key since they become parameters.

#[cfg(test)]
use crate::dom::{NodeKind, TreeNode};

/// Key contributed by every kept text node
pub(crate) const TEXT_HASH: &str = "$";

/// Key of an element from its parts; `child_hashes` are the keys of kept children
pub(crate) fn element_hash<'a>(
    tag_name: &str,
    attribute_names: impl IntoIterator<Item = &'a str>,
    child_hashes: impl IntoIterator<Item = &'a str>,
) -> String {
    let mut names: Vec<&str> = attribute_names.into_iter().collect();
    names.sort_unstable();

    let mut hash = format!("{}[{}]{{", tag_name, names.join(" "));
    for child in child_hashes {
        hash.push_str(child);
    }
    hash.push('}');
    hash
}

/// Key of a whole subtree, computed in one go
///
/// The builder derives the same key bottom-up through [`element_hash`]. Text
/// nodes skipped by whitespace stripping and non-element, non-text nodes
/// contribute nothing.
#[cfg(test)]
pub(crate) fn structural_hash<N: TreeNode>(node: &N, strip_whitespace: bool) -> String {
    match node.kind() {
        NodeKind::Text(text) if strip_whitespace && text.trim().is_empty() => String::new(),
        NodeKind::Text(_) => TEXT_HASH.to_string(),
        NodeKind::Element(tag_name) => {
            let children: Vec<String> = node
                .children()
                .map(|child| structural_hash(&child, strip_whitespace))
                .collect();
            element_hash(
                &tag_name.to_ascii_lowercase(),
                node.attributes().map(|(name, _)| name),
                children.iter().map(String::as_str),
            )
        }
        NodeKind::Other => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{Element, Node};

    fn hash(node: Node) -> String {
        structural_hash(&&node, true)
    }

    #[test]
    fn test_text_hashes_ignore_content() {
        assert_eq!(hash(Node::text("a")), "$");
        assert_eq!(hash(Node::text("something else")), "$");
        assert_eq!(hash(Node::comment("x")), "");
    }

    #[test]
    fn test_attribute_order_does_not_matter() {
        let a = Element::new("p")
            .with_attribute("id", "1")
            .with_attribute("class", "x");
        let b = Element::new("p")
            .with_attribute("class", "y")
            .with_attribute("id", "2");
        assert_eq!(hash(a.into()), hash(b.into()));
    }

    #[test]
    fn test_shape_differences() {
        let base = hash(Element::new("p").with_text("x").into());
        assert_eq!(base, "p[]{$}");
        assert_ne!(base, hash(Element::new("div").with_text("x").into()));
        assert_ne!(
            base,
            hash(Element::new("p").with_attribute("id", "1").with_text("x").into())
        );
        assert_ne!(
            base,
            hash(Element::new("p").with_child(Element::new("b")).into())
        );
    }

    #[test]
    fn test_whitespace_and_comments_are_transparent() {
        let plain = Element::new("ul").with_child(Element::new("li"));
        let noisy = Element::new("ul")
            .with_text("\n  ")
            .with_child(Node::comment("item"))
            .with_child(Element::new("li"))
            .with_text("\n");
        assert_eq!(hash(plain.into()), hash(noisy.clone().into()));
        assert_eq!(
            structural_hash(&&Node::from(noisy), false),
            "ul[]{$li[]{}$}"
        );
    }

    #[test]
    fn test_tag_names_are_lowercased() {
        assert_eq!(hash(Element::new("DIV").into()), "div[]{}");
    }
}

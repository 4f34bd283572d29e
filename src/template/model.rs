//! Template and placeholder records

use std::fmt;

use indexmap::IndexMap;

/// Index of a template in its [`super::TemplateRegistry`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TemplateId(pub(crate) usize);

impl TemplateId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One substitutable slot: an attribute value or a text node
///
/// A parameterized placeholder renders as a numbered parameter token. An inline
/// one renders its captured `value` and consumes no parameter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Placeholder {
    pub value: Option<String>,
    pub inline: bool,
}

impl Placeholder {
    /// A fresh parameterized slot
    pub fn new() -> Self {
        Self::default()
    }

    /// Fix this slot to `value`
    pub fn inline_with(&mut self, value: impl Into<String>) {
        self.inline = true;
        self.value = Some(value.into());
    }

    /// The captured literal, empty if none was captured
    pub fn literal(&self) -> &str {
        self.value.as_deref().unwrap_or_default()
    }
}

/// A child slot of a template
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateChild {
    Placeholder(Placeholder),
    Template(TemplateId),
}

/// A canonical subtree shape
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    pub name: String,
    pub tag_name: String,
    pub inline: bool,
    /// Number of source nodes mapped to this template
    pub reference_count: usize,
    /// Attribute placeholders in the declaration order of the first occurrence
    pub attributes: IndexMap<String, Placeholder>,
    pub children: Vec<TemplateChild>,
}

impl Template {
    pub fn new(
        name: impl Into<String>,
        tag_name: impl Into<String>,
        attributes: IndexMap<String, Placeholder>,
        children: Vec<TemplateChild>,
    ) -> Self {
        Self {
            name: name.into(),
            tag_name: tag_name.into(),
            inline: false,
            reference_count: 1,
            attributes,
            children,
        }
    }

    /// Attribute names in the canonical (lexicographic) order used for both
    /// hashing and parameter numbering
    pub fn sorted_attribute_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.attributes.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// The child template ids, in declaration order
    pub fn child_templates(&self) -> impl Iterator<Item = TemplateId> + '_ {
        self.children.iter().filter_map(|child| match child {
            TemplateChild::Template(id) => Some(*id),
            TemplateChild::Placeholder(_) => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sorted_attribute_names() {
        let mut attributes = IndexMap::new();
        attributes.insert("title".to_string(), Placeholder::new());
        attributes.insert("class".to_string(), Placeholder::new());
        attributes.insert("id".to_string(), Placeholder::new());
        let template = Template::new("T1", "a", attributes, vec![]);
        assert_eq!(template.sorted_attribute_names(), vec!["class", "id", "title"]);
    }

    #[test]
    fn test_inline_with() {
        let mut placeholder = Placeholder::new();
        assert_eq!(placeholder.literal(), "");
        placeholder.inline_with("foo");
        assert!(placeholder.inline);
        assert_eq!(placeholder.literal(), "foo");
    }
}

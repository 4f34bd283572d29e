//! Build phase: one walk over the input tree
//!
//! Every element is hashed, mapped to a new or existing template, and recorded
//! with its literal values. Occurrences of a reused template are walked too, so
//! every source element ends up in the node table and the reverse lookup.

use indexmap::IndexMap;
use log::trace;

use crate::dom::{NodeKind, TreeNode};
use crate::format::Format;
use crate::template::{
    NodeId, NodeParams, NodeRecord, ParamChild, Placeholder, Template, TemplateChild, TemplateId,
};

use super::hash::{element_hash, TEXT_HASH};
use super::TemplateGraph;

/// Tag of the synthetic container wrapped around a fragment's children
pub(crate) const FRAGMENT_TAG: &str = "div";

/// Outcome of building one node
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Built {
    Element {
        template: TemplateId,
        node: NodeId,
        hash: String,
    },
    Text(String),
    /// Non-element, non-text node, or stripped whitespace
    Skipped,
}

impl Built {
    fn hash(&self) -> &str {
        match self {
            Built::Element { hash, .. } => hash,
            Built::Text(_) => TEXT_HASH,
            Built::Skipped => "",
        }
    }
}

pub(crate) struct Builder<'a> {
    graph: &'a mut TemplateGraph,
    format: &'a dyn Format,
    strip_whitespace: bool,
}

impl<'a> Builder<'a> {
    pub(crate) fn new(
        graph: &'a mut TemplateGraph,
        format: &'a dyn Format,
        strip_whitespace: bool,
    ) -> Self {
        Self {
            graph,
            format,
            strip_whitespace,
        }
    }

    pub(crate) fn build_node<N: TreeNode>(&mut self, node: &N) -> Built {
        match node.kind() {
            NodeKind::Text(text) if self.strip_whitespace && text.trim().is_empty() => {
                Built::Skipped
            }
            NodeKind::Text(text) => Built::Text(text.to_string()),
            NodeKind::Element(tag_name) => {
                let tag_name = tag_name.to_ascii_lowercase();
                let attributes: IndexMap<String, String> = node
                    .attributes()
                    .map(|(name, value)| (name.to_string(), value.to_string()))
                    .collect();
                let children = node
                    .children()
                    .map(|child| self.build_node(&child))
                    .collect();
                self.build_element(&tag_name, attributes, children)
            }
            NodeKind::Other => Built::Skipped,
        }
    }

    /// Build `container`'s children under a synthetic, attribute-less element
    pub(crate) fn build_container<N: TreeNode>(&mut self, container: &N) -> Built {
        let children = container
            .children()
            .map(|child| self.build_node(&child))
            .collect();
        self.build_element(FRAGMENT_TAG, IndexMap::new(), children)
    }

    fn build_element(
        &mut self,
        tag_name: &str,
        attributes: IndexMap<String, String>,
        children: Vec<Built>,
    ) -> Built {
        let hash = element_hash(
            tag_name,
            attributes.keys().map(String::as_str),
            children.iter().map(Built::hash),
        );

        let registry = &mut self.graph.registry;
        let template = match registry.lookup(&hash) {
            Some(id) => {
                registry.get_mut(id).reference_count += 1;
                id
            }
            None => {
                let placeholders = attributes
                    .keys()
                    .map(|name| (name.clone(), Placeholder::new()))
                    .collect();
                let slots = children
                    .iter()
                    .filter_map(|child| match child {
                        Built::Element { template, .. } => Some(TemplateChild::Template(*template)),
                        Built::Text(_) => Some(TemplateChild::Placeholder(Placeholder::new())),
                        Built::Skipped => None,
                    })
                    .collect();
                let name = self.format.name(registry.len() + 1, false);
                trace!("new template {} for {}", name, hash);
                registry.insert(hash.clone(), Template::new(name, tag_name, placeholders, slots))
            }
        };

        let params = NodeParams {
            attrs: attributes,
            children: children
                .into_iter()
                .filter_map(|child| match child {
                    Built::Element { node, .. } => Some(ParamChild::Node(node)),
                    Built::Text(text) => Some(ParamChild::Text(text)),
                    Built::Skipped => None,
                })
                .collect(),
        };

        let node = NodeId(self.graph.nodes.len());
        self.graph.nodes.push(NodeRecord { template, params });
        self.graph
            .reverse_lookup
            .entry(template)
            .or_default()
            .push(node);

        Built::Element {
            template,
            node,
            hash,
        }
    }
}

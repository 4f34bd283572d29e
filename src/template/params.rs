//! Per-node literal values

use std::fmt;

use indexmap::IndexMap;

use super::TemplateId;

/// Index of a registered source element, assigned in build order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.0)
    }
}

/// A child value of one concrete node
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamChild {
    /// Content of a kept text node
    Text(String),
    /// A nested element, whose own params live in the node table
    Node(NodeId),
}

/// The literal values one concrete element supplies to its template
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeParams {
    pub attrs: IndexMap<String, String>,
    pub children: Vec<ParamChild>,
}

/// What the build phase records for each source element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeRecord {
    pub template: TemplateId,
    pub params: NodeParams,
}

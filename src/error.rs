//! Error types for template extraction
//!
//! None of these are expected for a well-formed input tree. They signal that the
//! build, optimize and render passes disagree about the template graph, and abort
//! the whole extraction.

use thiserror::Error;

use crate::template::NodeId;

/// Errors that can occur while condensing a tree
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CondenseError {
    /// Usage was requested for a node the build phase never registered
    #[error("missing template or params for node {node}")]
    MissingNode { node: NodeId },

    /// A node supplied a different number of values than its template declares
    #[error("parameter count mismatch for {template}: expected {expected}, received {actual}")]
    ParamCountMismatch {
        template: String,
        expected: usize,
        actual: usize,
    },

    /// The rename traversal did not reach every deduplicated template
    #[error("template count mismatch after traversal: {visited} visited, {expected} registered")]
    TemplateCountMismatch { expected: usize, visited: usize },

    /// `condense` was handed a text or non-element node as the root
    #[error("root node must be an element")]
    RootNotElement,
}

impl CondenseError {
    /// Create a parameter count mismatch error
    pub fn param_count(template: impl Into<String>, expected: usize, actual: usize) -> Self {
        Self::ParamCountMismatch {
            template: template.into(),
            expected,
            actual,
        }
    }
}

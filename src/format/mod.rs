//! Output syntax strategies
//!
//! The extractor decides *what* to emit (which templates exist, which slots are
//! parameters); a [`Format`] decides how it is spelled. Implementations are
//! expected to be pure and deterministic, since the optimizer measures their
//! output to decide what to inline.

pub mod compact;
pub mod html;

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Deserialize;

pub use compact::CompactFormat;
pub use html::HtmlFormat;

/// Where a literal ends up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextKind {
    /// Attribute value or call argument
    Param,
    /// Text content between tags
    Content,
}

/// Syntax strategy for rendering templates
pub trait Format {
    /// Name for the `seq`-th template (1-based); inline and standalone
    /// templates are numbered independently
    fn name(&self, seq: usize, inline: bool) -> String;

    /// Call of a named template with already formatted arguments
    fn call(&self, name: &str, params: &[String]) -> String;

    /// Standalone definition line
    fn definition(&self, name: &str, body: &str) -> String;

    /// Element body; `attributes` values are already formatted
    fn body(
        &self,
        tag_name: &str,
        attributes: &BTreeMap<&str, String>,
        children: &dyn Fn() -> String,
    ) -> String;

    /// Quote a literal value
    fn text(&self, literal: &str, kind: TextKind) -> String;

    /// Positional parameter token (1-based)
    fn param(&self, index: usize) -> String;
}

/// Built-in strategies, selectable by name from config or the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FormatKind {
    #[default]
    Compact,
    Html,
}

impl FormatKind {
    /// Instantiate the strategy
    pub fn strategy(self) -> Arc<dyn Format> {
        match self {
            FormatKind::Compact => Arc::new(CompactFormat),
            FormatKind::Html => Arc::new(HtmlFormat),
        }
    }
}

/// Join `name=value` pairs with single spaces
pub(crate) fn join_attributes(attributes: &BTreeMap<&str, String>) -> String {
    attributes
        .iter()
        .map(|(name, value)| format!("{}={}", name, value))
        .collect::<Vec<_>>()
        .join(" ")
}

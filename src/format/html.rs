//! HTML-like syntax: `T1: <div class=$1>$2</div>` / `{T1("a","b")}`
//!
//! Text content is emitted raw, so with every template inlined the output reads
//! as re-serialized markup.

use std::collections::BTreeMap;

use super::{join_attributes, CompactFormat, Format, TextKind};

#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlFormat;

impl Format for HtmlFormat {
    fn name(&self, seq: usize, inline: bool) -> String {
        CompactFormat.name(seq, inline)
    }

    fn call(&self, name: &str, params: &[String]) -> String {
        format!("{{{}}}", CompactFormat.call(name, params))
    }

    fn definition(&self, name: &str, body: &str) -> String {
        CompactFormat.definition(name, body)
    }

    fn body(
        &self,
        tag_name: &str,
        attributes: &BTreeMap<&str, String>,
        children: &dyn Fn() -> String,
    ) -> String {
        let mut out = format!("<{}", tag_name);
        if !attributes.is_empty() {
            out.push(' ');
            out.push_str(&join_attributes(attributes));
        }

        let children = children();
        if children.is_empty() {
            out.push_str("/>");
        } else {
            out.push('>');
            out.push_str(&children);
            out.push_str(&format!("</{}>", tag_name));
        }
        out
    }

    fn text(&self, literal: &str, kind: TextKind) -> String {
        match kind {
            TextKind::Param => format!("\"{}\"", literal),
            TextKind::Content => literal.to_string(),
        }
    }

    fn param(&self, index: usize) -> String {
        CompactFormat.param(index)
    }
}

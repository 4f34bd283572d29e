//! Default compact syntax: `T1: div[class=$1]{$2}` / `T1("a","b")`

use std::collections::BTreeMap;

use super::{join_attributes, Format, TextKind};

/// The default strategy
#[derive(Debug, Clone, Copy, Default)]
pub struct CompactFormat;

impl Format for CompactFormat {
    fn name(&self, seq: usize, inline: bool) -> String {
        if inline {
            format!("X{}", seq)
        } else {
            format!("T{}", seq)
        }
    }

    fn call(&self, name: &str, params: &[String]) -> String {
        format!("{}({})", name, params.join(","))
    }

    fn definition(&self, name: &str, body: &str) -> String {
        format!("{}: {}", name, body)
    }

    fn body(
        &self,
        tag_name: &str,
        attributes: &BTreeMap<&str, String>,
        children: &dyn Fn() -> String,
    ) -> String {
        let mut out = String::from(tag_name);
        if !attributes.is_empty() {
            out.push('[');
            out.push_str(&join_attributes(attributes));
            out.push(']');
        }
        out.push('{');
        out.push_str(&children());
        out.push('}');
        out
    }

    fn text(&self, literal: &str, _kind: TextKind) -> String {
        format!("\"{}\"", literal)
    }

    fn param(&self, index: usize) -> String {
        format!("${}", index)
    }
}

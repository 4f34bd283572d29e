//! Rendering templates as definitions, calls and usages
//!
//! Parameters are numbered by one counter threaded left to right, depth first:
//! sorted attributes, then children in declaration order. Every non-inline slot
//! takes one number and a nested template takes as many as it declares, whether
//! it is called or expanded. [`TemplateRenderer::flatten`] walks the exact same
//! order, which is what keeps call sites and definitions in agreement.

use std::collections::BTreeMap;

use crate::error::CondenseError;
use crate::format::{Format, TextKind};

use super::{NodeParams, NodeRecord, ParamChild, TemplateChild, TemplateId, TemplateRegistry};

/// Renders templates of a registry with a given syntax
#[derive(Clone, Copy)]
pub struct TemplateRenderer<'a> {
    registry: &'a TemplateRegistry,
    format: &'a dyn Format,
}

impl<'a> TemplateRenderer<'a> {
    pub fn new(registry: &'a TemplateRegistry, format: &'a dyn Format) -> Self {
        Self { registry, format }
    }

    /// Number of non-inline slots, counting through nested templates
    pub fn num_params(&self, id: TemplateId) -> usize {
        let template = self.registry.get(id);
        let attributes = template.attributes.values().filter(|p| !p.inline).count();
        let children: usize = template
            .children
            .iter()
            .map(|child| match child {
                TemplateChild::Placeholder(p) => usize::from(!p.inline),
                TemplateChild::Template(child_id) => self.num_params(*child_id),
            })
            .sum();
        attributes + children
    }

    /// Body text with parameters numbered from `first`
    ///
    /// With `values`, parameter `n` is replaced by the quoted `values[n - 1]`
    /// instead of a parameter token.
    pub fn body(&self, id: TemplateId, first: usize, values: Option<&[String]>) -> String {
        let template = self.registry.get(id);
        let mut counter = first;

        let mut attributes = BTreeMap::new();
        for name in template.sorted_attribute_names() {
            let placeholder = &template.attributes[name];
            let value = if placeholder.inline {
                self.format.text(placeholder.literal(), TextKind::Param)
            } else {
                counter += 1;
                self.slot(counter - 1, values, TextKind::Param)
            };
            attributes.insert(name, value);
        }

        let mut children = String::new();
        for child in &template.children {
            match child {
                TemplateChild::Template(child_id) => {
                    children.push_str(&self.call(*child_id, counter, values));
                    counter += self.num_params(*child_id);
                }
                TemplateChild::Placeholder(p) if p.inline => {
                    children.push_str(&self.format.text(p.literal(), TextKind::Content));
                }
                TemplateChild::Placeholder(_) => {
                    children.push_str(&self.slot(counter, values, TextKind::Content));
                    counter += 1;
                }
            }
        }

        self.format
            .body(&template.tag_name, &attributes, &|| children.clone())
    }

    /// Call site text with parameters numbered from `first`; an inline
    /// template expands to its body
    pub fn call(&self, id: TemplateId, first: usize, values: Option<&[String]>) -> String {
        let template = self.registry.get(id);
        if template.inline {
            return self.body(id, first, values);
        }

        let params: Vec<String> = (first..first + self.num_params(id))
            .map(|index| self.slot(index, values, TextKind::Param))
            .collect();
        self.format.call(&template.name, &params)
    }

    /// Standalone definition line
    pub fn definition(&self, id: TemplateId) -> String {
        let template = self.registry.get(id);
        self.format.definition(&template.name, &self.body(id, 1, None))
    }

    /// A node's literals in parameter order, skipping inline slots
    pub fn flatten(
        &self,
        id: TemplateId,
        params: &NodeParams,
        nodes: &[NodeRecord],
    ) -> Result<Vec<String>, CondenseError> {
        let mut out = Vec::new();
        self.flatten_into(id, params, nodes, &mut out)?;
        Ok(out)
    }

    fn flatten_into(
        &self,
        id: TemplateId,
        params: &NodeParams,
        nodes: &[NodeRecord],
        out: &mut Vec<String>,
    ) -> Result<(), CondenseError> {
        let template = self.registry.get(id);

        for name in template.sorted_attribute_names() {
            if template.attributes[name].inline {
                continue;
            }
            if let Some(value) = params.attrs.get(name) {
                out.push(value.clone());
            }
        }

        for (child, value) in template.children.iter().zip(&params.children) {
            match (child, value) {
                (TemplateChild::Template(child_id), ParamChild::Node(node)) => {
                    let record = nodes
                        .get(node.index())
                        .ok_or(CondenseError::MissingNode { node: *node })?;
                    self.flatten_into(*child_id, &record.params, nodes, out)?;
                }
                (TemplateChild::Placeholder(p), ParamChild::Text(text)) if !p.inline => {
                    out.push(text.clone());
                }
                // inline slot, or a shape disagreement the count check reports
                _ => {}
            }
        }
        Ok(())
    }

    /// Filled-in invocation of template `id` for one concrete node
    pub fn usage(
        &self,
        id: TemplateId,
        params: &NodeParams,
        nodes: &[NodeRecord],
    ) -> Result<String, CondenseError> {
        let template = self.registry.get(id);
        let values = self.flatten(id, params, nodes)?;
        let expected = self.num_params(id);
        if values.len() != expected {
            return Err(CondenseError::param_count(
                &template.name,
                expected,
                values.len(),
            ));
        }

        if template.inline {
            return Ok(self.body(id, 1, Some(&values)));
        }
        let params: Vec<String> = values
            .iter()
            .map(|value| self.format.text(value, TextKind::Param))
            .collect();
        Ok(self.format.call(&template.name, &params))
    }

    fn slot(&self, index: usize, values: Option<&[String]>, kind: TextKind) -> String {
        match values.and_then(|values| values.get(index - 1)) {
            Some(value) => self.format.text(value, kind),
            None => self.format.param(index),
        }
    }
}

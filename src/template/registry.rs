//! Template registry: the arena plus the structural-hash dedup table

use std::collections::HashMap;

use super::model::{Template, TemplateId};

/// Arena of templates, deduplicated by structural hash
#[derive(Debug, Default)]
pub struct TemplateRegistry {
    templates: Vec<Template>,
    by_hash: HashMap<String, TemplateId>,
}

impl TemplateRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Find the template registered for a structural hash
    pub fn lookup(&self, hash: &str) -> Option<TemplateId> {
        self.by_hash.get(hash).copied()
    }

    /// Register a new template under `hash`
    ///
    /// The caller checks [`lookup`](Self::lookup) first; registering the same
    /// hash twice would orphan the earlier template.
    pub fn insert(&mut self, hash: String, template: Template) -> TemplateId {
        let id = TemplateId(self.templates.len());
        self.templates.push(template);
        self.by_hash.insert(hash, id);
        id
    }

    /// Get a template by id
    pub fn get(&self, id: TemplateId) -> &Template {
        &self.templates[id.0]
    }

    /// Get a mutable reference to a template
    pub fn get_mut(&mut self, id: TemplateId) -> &mut Template {
        &mut self.templates[id.0]
    }

    /// All ids in creation order (children before the parents that first used them)
    pub fn ids(&self) -> impl Iterator<Item = TemplateId> {
        (0..self.templates.len()).map(TemplateId)
    }

    /// All templates in creation order
    pub fn iter(&self) -> impl Iterator<Item = (TemplateId, &Template)> {
        self.templates
            .iter()
            .enumerate()
            .map(|(index, template)| (TemplateId(index), template))
    }

    /// Number of distinct templates
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// Whether no template was registered
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

//! Template extraction pipeline
//!
//! build → optimize → rename → render. The whole graph is created per call and
//! consumed once; nothing carries over between extractions.

mod builder;
mod hash;
mod optimizer;
mod renamer;

use std::fmt;

use indexmap::IndexMap;
use log::debug;

use crate::config::CondenseOptions;
use crate::dom::{NodeKind, TreeNode};
use crate::error::CondenseError;
use crate::template::{
    NodeId, NodeRecord, ParamChild, TemplateId, TemplateRegistry, TemplateRenderer,
};

use builder::{Builder, Built};

/// Everything the build phase produces
#[derive(Debug, Default)]
pub(crate) struct TemplateGraph {
    pub(crate) registry: TemplateRegistry,
    /// Template and literal values of each source element, by [`NodeId`]
    pub(crate) nodes: Vec<NodeRecord>,
    /// Elements using each template, in build order
    pub(crate) reverse_lookup: IndexMap<TemplateId, Vec<NodeId>>,
}

impl TemplateGraph {
    fn record(&self, node: NodeId) -> Result<&NodeRecord, CondenseError> {
        self.nodes
            .get(node.index())
            .ok_or(CondenseError::MissingNode { node })
    }

    fn usage(
        &self,
        node: NodeId,
        renderer: &TemplateRenderer<'_>,
    ) -> Result<String, CondenseError> {
        let record = self.record(node)?;
        renderer.usage(record.template, &record.params, &self.nodes)
    }
}

/// One extraction: the rendered definitions and usage of a tree
#[derive(Debug)]
pub struct TemplateExtractor {
    graph: TemplateGraph,
    root: TemplateId,
    definitions: Vec<String>,
    usage: String,
}

impl TemplateExtractor {
    /// Run the whole pipeline over `root`
    ///
    /// With `options.ignore_root`, `root` only contributes its children: they
    /// are wrapped in a synthetic container whose own definition and usage are
    /// suppressed.
    pub fn new<N: TreeNode>(root: N, options: &CondenseOptions) -> Result<Self, CondenseError> {
        let format = options.format.as_ref();
        let strip_whitespace = !options.optimize.preserve_empty_whitespace;

        let mut graph = TemplateGraph::default();
        let built = {
            let mut builder = Builder::new(&mut graph, format, strip_whitespace);
            if options.ignore_root {
                builder.build_container(&root)
            } else {
                builder.build_node(&root)
            }
        };
        let Built::Element {
            template: root_template,
            node: root_node,
            ..
        } = built
        else {
            return Err(CondenseError::RootNotElement);
        };

        optimizer::optimize(&mut graph, format, options.optimize.level);
        renamer::rename(&mut graph, root_template, format)?;

        let renderer = TemplateRenderer::new(&graph.registry, format);
        let definitions: Vec<String> = graph
            .registry
            .iter()
            .filter(|(id, template)| {
                !template.inline && !(options.ignore_root && *id == root_template)
            })
            .map(|(id, _)| renderer.definition(id))
            .collect();

        let usage = if options.ignore_root {
            fragment_usage(
                &root,
                &graph,
                &renderer,
                root_node,
                options.optimize.preserve_empty_whitespace,
            )?
        } else {
            graph.usage(root_node, &renderer)?
        };

        debug!(
            "extracted {} templates from {} elements, {} definitions",
            graph.registry.len(),
            graph.nodes.len(),
            definitions.len()
        );

        Ok(Self {
            graph,
            root: root_template,
            definitions,
            usage,
        })
    }

    /// Definition lines of the templates kept as named definitions
    pub fn definitions(&self) -> &[String] {
        &self.definitions
    }

    /// Usage text of the root, or of the top-level children in fragment mode
    pub fn usage(&self) -> &str {
        &self.usage
    }

    /// The optimized and renamed template graph
    pub fn registry(&self) -> &TemplateRegistry {
        &self.graph.registry
    }

    /// Template of the root (the synthetic container in fragment mode)
    pub fn root_template(&self) -> TemplateId {
        self.root
    }
}

impl fmt::Display for TemplateExtractor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.definitions.is_empty() {
            return f.write_str(&self.usage);
        }
        write!(f, "{}\n\n{}", self.definitions.join("\n"), self.usage)
    }
}

/// Top-level usage in fragment mode: text children are emitted as raw literals
/// since no enclosing call exists to parameterize them
///
/// Whitespace-only top-level text follows the same rule as nested text: it is
/// dropped unless whitespace is preserved.
fn fragment_usage<N: TreeNode>(
    container: &N,
    graph: &TemplateGraph,
    renderer: &TemplateRenderer<'_>,
    container_node: NodeId,
    preserve_empty_whitespace: bool,
) -> Result<String, CondenseError> {
    let mut elements = graph
        .record(container_node)?
        .params
        .children
        .iter()
        .filter_map(|child| match child {
            ParamChild::Node(node) => Some(*node),
            ParamChild::Text(_) => None,
        });

    let mut usage = String::new();
    for child in container.children() {
        match child.kind() {
            NodeKind::Text(text) => {
                if preserve_empty_whitespace || !text.trim().is_empty() {
                    usage.push_str(text);
                }
            }
            NodeKind::Element(_) => {
                let node = elements
                    .next()
                    .ok_or(CondenseError::MissingNode { node: container_node })?;
                usage.push_str(&graph.usage(node, renderer)?);
            }
            NodeKind::Other => {}
        }
    }
    Ok(usage)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OptimizeLevel;
    use crate::dom::{Element, Node};
    use crate::format::{CompactFormat, Format};

    fn levels() -> Vec<OptimizeLevel> {
        let mut levels = vec![
            OptimizeLevel::None,
            OptimizeLevel::FormatOnly,
            OptimizeLevel::Full,
        ];
        for inline_static in [false, true] {
            for inline_short_templates in [false, true] {
                levels.push(OptimizeLevel::Granular {
                    inline_static,
                    inline_short_templates,
                });
            }
        }
        levels
    }

    fn card(title: &str, body: &str, tone: &str) -> Element {
        Element::new("section")
            .with_attribute("class", "card")
            .with_attribute("data-tone", tone)
            .with_text("\n  ")
            .with_child(Element::new("h2").with_text(title))
            .with_child(Node::comment("body"))
            .with_child(
                Element::new("p")
                    .with_text(body)
                    .with_child(Element::new("a").with_attribute("href", "#").with_text("more")),
            )
    }

    fn page() -> Node {
        Element::new("main")
            .with_child(card("One", "first", "warm"))
            .with_child(card("Two", "second", "warm"))
            .with_child(card("Three", "third", "cold"))
            .with_child(Element::new("footer").with_text("bye"))
            .into()
    }

    /// For every element, its literal count matches its template's parameter count
    fn assert_params_conserved(graph: &TemplateGraph, format: &dyn Format) {
        let renderer = TemplateRenderer::new(&graph.registry, format);
        for record in &graph.nodes {
            let values = renderer
                .flatten(record.template, &record.params, &graph.nodes)
                .unwrap();
            assert_eq!(values.len(), renderer.num_params(record.template));
        }
    }

    #[test]
    fn test_params_conserved_at_every_level() {
        let page = page();
        for level in levels() {
            for preserve in [false, true] {
                let mut graph = TemplateGraph::default();
                let built =
                    Builder::new(&mut graph, &CompactFormat, !preserve).build_node(&&page);
                assert_params_conserved(&graph, &CompactFormat);

                let Built::Element { template, .. } = built else {
                    panic!("expected element");
                };
                optimizer::optimize(&mut graph, &CompactFormat, level);
                renamer::rename(&mut graph, template, &CompactFormat).unwrap();
                assert_params_conserved(&graph, &CompactFormat);
            }
        }
    }

    #[test]
    fn test_every_level_renders() {
        let page = page();
        for level in levels() {
            let options = CondenseOptions::new().with_level(level);
            let extractor = TemplateExtractor::new(&page, &options).unwrap();
            assert!(!extractor.usage().is_empty());
        }
    }

    #[test]
    fn test_format_only_emits_no_definitions() {
        let page = page();
        let options = CondenseOptions::new().with_level(OptimizeLevel::FormatOnly);
        let extractor = TemplateExtractor::new(&page, &options).unwrap();
        assert!(extractor.definitions().is_empty());
        assert_eq!(extractor.to_string(), extractor.usage());
        assert!(extractor
            .usage()
            .starts_with("main{section[class=\"card\" data-tone=\"warm\"]{"));
    }

    #[test]
    fn test_none_keeps_every_template() {
        let page = page();
        let options = CondenseOptions::new().with_level(OptimizeLevel::None);
        let extractor = TemplateExtractor::new(&page, &options).unwrap();
        assert_eq!(extractor.definitions().len(), extractor.registry().len());
        let root = extractor.registry().get(extractor.root_template());
        assert_eq!(root.tag_name, "main");
        assert_eq!(root.name, format!("T{}", extractor.registry().len()));
    }

    #[test]
    fn test_root_must_be_element() {
        let text = Node::text("loose");
        let err = TemplateExtractor::new(&text, &CondenseOptions::default()).unwrap_err();
        assert_eq!(err, CondenseError::RootNotElement);
    }

    #[test]
    fn test_fragment_skips_top_level_comments() {
        let fragment = Node::fragment([
            Node::comment("lead"),
            Node::from(Element::new("b").with_text("x")),
            Node::text("!"),
        ]);
        let options = CondenseOptions::new().with_ignore_root(true);
        let extractor = TemplateExtractor::new(&fragment, &options).unwrap();
        assert_eq!(extractor.to_string(), "b{\"x\"}!");
    }

    #[test]
    fn test_fragment_top_level_whitespace() {
        let fragment = Node::fragment([
            Node::from(Element::new("i")),
            Node::text("\n"),
            Node::from(Element::new("i")),
        ]);

        let options = CondenseOptions::new().with_ignore_root(true);
        let extractor = TemplateExtractor::new(&fragment, &options).unwrap();
        assert_eq!(extractor.usage(), "i{}i{}");

        let options = options.with_optimize(
            crate::config::OptimizeOptions::default().with_preserve_empty_whitespace(true),
        );
        let extractor = TemplateExtractor::new(&fragment, &options).unwrap();
        assert_eq!(extractor.usage(), "i{}\ni{}");
    }
}

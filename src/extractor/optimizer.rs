//! Optimize phase: decide what is inlined
//!
//! Only `inline` and `value` fields change here; the graph topology built by the
//! builder stays as it is.

use log::debug;

use crate::config::OptimizeLevel;
use crate::format::Format;
use crate::template::{ParamChild, TemplateChild, TemplateId, TemplateRenderer};

use super::TemplateGraph;

pub(crate) fn optimize(graph: &mut TemplateGraph, format: &dyn Format, level: OptimizeLevel) {
    match level {
        OptimizeLevel::None => {}
        OptimizeLevel::FormatOnly => {
            for id in graph.registry.ids().collect::<Vec<_>>() {
                graph.registry.get_mut(id).inline = true;
            }
        }
        OptimizeLevel::Granular { .. } | OptimizeLevel::Full => {
            let Some((inline_static, inline_short_templates)) = level.passes() else {
                return;
            };
            if inline_static {
                inline_shared_placeholders(graph);
            }
            if inline_short_templates {
                inline_short_templates_pass(graph, format);
            }
        }
    }
}

/// Inline every slot whose value is identical across all uses of its template
///
/// Templates used once are skipped: there is nothing to compare against.
fn inline_shared_placeholders(graph: &mut TemplateGraph) {
    for (template_id, nodes) in &graph.reverse_lookup {
        let [first, rest @ ..] = nodes.as_slice() else {
            continue;
        };
        if rest.is_empty() {
            continue;
        }
        let first = &graph.nodes[first.index()].params;
        let others: Vec<_> = rest.iter().map(|node| &graph.nodes[node.index()].params).collect();

        let template = graph.registry.get_mut(*template_id);

        for (name, value) in &first.attrs {
            let shared = others
                .iter()
                .all(|params| params.attrs.get(name) == Some(value));
            if !shared {
                continue;
            }
            if let Some(placeholder) = template.attributes.get_mut(name) {
                debug!("{}: inlining attribute {}={:?}", template.name, name, value);
                placeholder.inline_with(value.as_str());
            }
        }

        for (index, child) in first.children.iter().enumerate() {
            // nested templates are handled through their own usage group
            let ParamChild::Text(value) = child else {
                continue;
            };
            let shared = others.iter().all(|params| {
                matches!(
                    params.children.get(index),
                    Some(ParamChild::Text(other)) if other == value
                )
            });
            if !shared {
                continue;
            }
            if let Some(TemplateChild::Placeholder(placeholder)) =
                template.children.get_mut(index)
            {
                debug!("{}: inlining text slot {} = {:?}", template.name, index, value);
                placeholder.inline_with(value.as_str());
            }
        }
    }
}

/// Inline templates whose expansion at every use is shorter than a definition
/// plus calls
///
/// Templates are visited in creation order, so children are decided before the
/// parents whose bodies they appear in.
fn inline_short_templates_pass(graph: &mut TemplateGraph, format: &dyn Format) {
    for id in graph.registry.ids().collect::<Vec<_>>() {
        if should_inline(graph, format, id) {
            let template = graph.registry.get_mut(id);
            debug!("{}: inlining short template", template.name);
            template.inline = true;
        }
    }
}

fn should_inline(graph: &TemplateGraph, format: &dyn Format, id: TemplateId) -> bool {
    let renderer = TemplateRenderer::new(&graph.registry, format);
    let definition_size = renderer.definition(id).chars().count();
    let call_size = renderer.call(id, 1, None).chars().count();
    let references = graph.registry.get(id).reference_count;

    let templatized_size = definition_size + call_size * references;
    let inlined_size = definition_size * references;
    inlined_size < templatized_size
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{Element, Node};
    use crate::extractor::builder::Builder;
    use crate::format::CompactFormat;

    fn build(node: Node) -> TemplateGraph {
        let mut graph = TemplateGraph::default();
        Builder::new(&mut graph, &CompactFormat, true).build_node(&&node);
        graph
    }

    fn button(class: &str, label: &str) -> Element {
        Element::new("button")
            .with_attribute("class", class)
            .with_attribute("type", "button")
            .with_text(label)
    }

    fn toolbar() -> Node {
        Element::new("nav")
            .with_child(button("btn", "Save"))
            .with_child(button("btn", "Load"))
            .with_child(button("btn", "Load"))
            .into()
    }

    fn template_by_tag<'a>(graph: &'a TemplateGraph, tag: &str) -> &'a crate::template::Template {
        graph
            .registry
            .iter()
            .map(|(_, t)| t)
            .find(|t| t.tag_name == tag)
            .unwrap()
    }

    #[test]
    fn test_none_changes_nothing() {
        let mut graph = build(toolbar());
        optimize(&mut graph, &CompactFormat, OptimizeLevel::None);
        assert!(graph.registry.iter().all(|(_, t)| !t.inline));
        let button = template_by_tag(&graph, "button");
        assert!(button.attributes.values().all(|p| !p.inline));
    }

    #[test]
    fn test_format_only_inlines_everything() {
        let mut graph = build(toolbar());
        optimize(&mut graph, &CompactFormat, OptimizeLevel::FormatOnly);
        assert!(graph.registry.iter().all(|(_, t)| t.inline));
    }

    #[test]
    fn test_shared_placeholders_are_inlined_per_slot() {
        let mut graph = build(toolbar());
        optimize(
            &mut graph,
            &CompactFormat,
            OptimizeLevel::Granular {
                inline_static: true,
                inline_short_templates: false,
            },
        );

        let button = template_by_tag(&graph, "button");
        assert!(!button.inline);
        assert_eq!(button.attributes["class"].value.as_deref(), Some("btn"));
        assert!(button.attributes["type"].inline);
        // "Save" vs "Load" differ
        let TemplateChild::Placeholder(label) = &button.children[0] else {
            panic!("expected placeholder");
        };
        assert!(!label.inline);
    }

    #[test]
    fn test_single_use_templates_keep_their_slots() {
        let mut graph = build(Element::new("p").with_attribute("id", "x").with_text("a").into());
        optimize(
            &mut graph,
            &CompactFormat,
            OptimizeLevel::Granular {
                inline_static: true,
                inline_short_templates: false,
            },
        );
        let p = template_by_tag(&graph, "p");
        assert!(!p.attributes["id"].inline);
    }

    #[test]
    fn test_identical_text_is_inlined() {
        let list: Node = Element::new("ul")
            .with_child(Element::new("li").with_text("same"))
            .with_child(Element::new("li").with_text("same"))
            .into();
        let mut graph = build(list);
        inline_shared_placeholders(&mut graph);
        let li = template_by_tag(&graph, "li");
        assert_eq!(
            li.children[0],
            TemplateChild::Placeholder(crate::template::Placeholder {
                value: Some("same".to_string()),
                inline: true,
            })
        );
    }

    #[test]
    fn test_short_templates_are_inlined() {
        let mut graph = build(toolbar());
        optimize(&mut graph, &CompactFormat, OptimizeLevel::Full);

        // button[class="btn" type="button"]{$1} is worth keeping for three uses
        assert!(!template_by_tag(&graph, "button").inline);
        // single-use root is always cheaper inline
        assert!(template_by_tag(&graph, "nav").inline);
    }

    #[test]
    fn test_short_template_pass_alone() {
        let list: Node = Element::new("ul")
            .with_child(Element::new("li").with_text("a"))
            .with_child(Element::new("li").with_text("b"))
            .into();
        let mut graph = build(list);
        optimize(
            &mut graph,
            &CompactFormat,
            OptimizeLevel::Granular {
                inline_static: false,
                inline_short_templates: true,
            },
        );
        // "T1: li{$1}" is 10 chars, "T1($1)" 6: 10 + 2 * 6 > 2 * 10
        assert!(template_by_tag(&graph, "li").inline);
    }
}

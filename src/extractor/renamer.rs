//! Rename phase: final, reproducible template names

use log::debug;

use crate::error::CondenseError;
use crate::format::Format;
use crate::template::{TemplateId, TemplateRegistry};

use super::TemplateGraph;

/// Name every template in depth-first post-order from `root`, counting inline
/// and standalone templates separately
///
/// Every registered template must be reachable from `root`.
pub(crate) fn rename(
    graph: &mut TemplateGraph,
    root: TemplateId,
    format: &dyn Format,
) -> Result<(), CondenseError> {
    let order = post_order(&graph.registry, root);
    if order.len() != graph.registry.len() {
        return Err(CondenseError::TemplateCountMismatch {
            expected: graph.registry.len(),
            visited: order.len(),
        });
    }

    let mut inline_count = 0;
    let mut standalone_count = 0;
    for id in &order {
        let template = graph.registry.get_mut(*id);
        template.name = if template.inline {
            inline_count += 1;
            format.name(inline_count, true)
        } else {
            standalone_count += 1;
            format.name(standalone_count, false)
        };
    }
    debug!(
        "renamed {} templates ({} inline, {} standalone)",
        order.len(),
        inline_count,
        standalone_count
    );
    Ok(())
}

/// Children before parents, each template once
pub(crate) fn post_order(registry: &TemplateRegistry, root: TemplateId) -> Vec<TemplateId> {
    let mut seen = vec![false; registry.len()];
    let mut order = Vec::with_capacity(registry.len());
    visit(registry, root, &mut seen, &mut order);
    order
}

fn visit(
    registry: &TemplateRegistry,
    id: TemplateId,
    seen: &mut [bool],
    order: &mut Vec<TemplateId>,
) {
    seen[id.index()] = true;
    for child in registry.get(id).child_templates() {
        if !seen[child.index()] {
            visit(registry, child, seen, order);
        }
    }
    order.push(id);
}

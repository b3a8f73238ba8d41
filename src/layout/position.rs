use std::collections::{HashMap, HashSet};

use crate::config::LayoutConfig;
use crate::graph::FamilyIndex;
use crate::model::Person;

use super::types::{LayoutEdge, LayoutNode, edge_id};
use super::{combined_children, effective_node};

/// Emits the node for `person` centered on `center_x` at `y`, then lays its
/// children into slots sized by their precomputed subtree widths and recurses
/// one level down. Returns the node's id; a key that was already emitted
/// (couple reached from the second spouse, or a cyclic repeat reference)
/// returns the existing id without re-emitting or re-descending.
pub(super) fn place_node(
    index: &FamilyIndex<'_>,
    person: &Person,
    center_x: f32,
    y: f32,
    config: &LayoutConfig,
    widths: &HashMap<String, f32>,
    emitted: &mut HashSet<String>,
    nodes: &mut Vec<LayoutNode>,
    edges: &mut Vec<LayoutEdge>,
) -> String {
    let effective = effective_node(index, person);
    let key = effective.key();
    if !emitted.insert(key.clone()) {
        return key;
    }

    let footprint = effective.footprint(config);
    nodes.push(LayoutNode {
        id: key.clone(),
        x: center_x - footprint / 2.0,
        y,
        width: footprint,
        height: config.node_height,
        payload: effective.payload(),
    });

    let children = combined_children(index, &effective);
    if children.is_empty() {
        return key;
    }

    let total: f32 = children
        .iter()
        .map(|child| child_slot(index, child, widths))
        .sum();
    let mut cursor = center_x - total / 2.0;
    let child_y = y + config.vertical_step;
    for child in children {
        let slot = child_slot(index, child, widths);
        let child_id = place_node(
            index,
            child,
            cursor + slot / 2.0,
            child_y,
            config,
            widths,
            emitted,
            nodes,
            edges,
        );
        // A person listed as a child of their own couple would self-edge.
        if child_id != key {
            edges.push(LayoutEdge {
                id: edge_id(&key, &child_id),
                source: key.clone(),
                target: child_id,
            });
        }
        cursor += slot;
    }

    key
}

fn child_slot(index: &FamilyIndex<'_>, child: &Person, widths: &HashMap<String, f32>) -> f32 {
    widths
        .get(&effective_node(index, child).key())
        .copied()
        .unwrap_or(0.0)
}

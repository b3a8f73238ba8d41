mod position;
pub(crate) mod types;
mod width;

pub use types::*;

use std::collections::{HashMap, HashSet};

use crate::config::LayoutConfig;
use crate::graph::FamilyIndex;
use crate::model::{Gender, Person, birth_order};

/// The node a person resolves to during layout: the couple when the pairing
/// pre-pass merged them with a spouse, the individual otherwise. Both layout
/// passes resolve through this so they can never disagree.
pub(crate) enum Effective<'a> {
    Couple {
        husband: &'a Person,
        wife: &'a Person,
    },
    Single(&'a Person),
}

impl<'a> Effective<'a> {
    fn key(&self) -> String {
        match self {
            Effective::Couple { husband, wife } => couple_node_id(&husband.id, &wife.id),
            Effective::Single(person) => person_node_id(&person.id),
        }
    }

    fn footprint(&self, config: &LayoutConfig) -> f32 {
        match self {
            Effective::Couple { .. } => config.couple_width,
            Effective::Single(_) => config.person_width,
        }
    }

    fn payload(&self) -> NodePayload {
        match self {
            Effective::Couple { husband, wife } => NodePayload::Couple {
                husband: (*husband).clone(),
                wife: (*wife).clone(),
            },
            Effective::Single(person) => NodePayload::Person((*person).clone()),
        }
    }
}

pub(crate) fn effective_node<'a>(index: &FamilyIndex<'a>, person: &'a Person) -> Effective<'a> {
    match index.partner_of(&person.id) {
        Some(partner) => {
            let (husband, wife) = assign_slots(person, partner);
            Effective::Couple { husband, wife }
        }
        None => Effective::Single(person),
    }
}

fn assign_slots<'a>(a: &'a Person, b: &'a Person) -> (&'a Person, &'a Person) {
    match (a.gender, b.gender) {
        (Gender::Male, Gender::Female) => (a, b),
        (Gender::Female, Gender::Male) => (b, a),
        // Same-gender pair: ascending id keeps the slots traversal-order
        // independent.
        _ => {
            if a.id <= b.id {
                (a, b)
            } else {
                (b, a)
            }
        }
    }
}

/// Children of a couple are the union of both partners' children,
/// de-duplicated and sorted by the sibling ordering rule.
pub(crate) fn combined_children<'a>(
    index: &FamilyIndex<'a>,
    effective: &Effective<'a>,
) -> Vec<&'a Person> {
    let mut children: Vec<&Person> = match effective {
        Effective::Single(person) => index.children_of(&person.id).to_vec(),
        Effective::Couple { husband, wife } => {
            let mut seen: HashSet<&str> = HashSet::new();
            let mut union: Vec<&Person> = Vec::new();
            for child in index
                .children_of(&husband.id)
                .iter()
                .chain(index.children_of(&wife.id).iter())
            {
                if seen.insert(child.id.as_str()) {
                    union.push(child);
                }
            }
            union
        }
    };
    // Two siblings married to each other resolve to one couple and must
    // claim a single child slot.
    let mut keys: HashSet<String> = HashSet::new();
    children.retain(|child| keys.insert(effective_node(index, child).key()));
    children.sort_by(|a, b| {
        birth_order(a, b).then_with(|| index.input_order(&a.id).cmp(&index.input_order(&b.id)))
    });
    children
}

/// Lays out the whole person list: indexes the graph, computes every
/// entry's subtree width bottom-up, then assigns positions top-down. Pure
/// with respect to its inputs; all bookkeeping dies with the call.
pub fn compute_layout(people: &[Person], config: &LayoutConfig) -> Layout {
    let index = FamilyIndex::new(people);

    // One slot per distinct top-level node: a spouse pair that is a pair of
    // roots collapses to a single entry.
    let mut seen: HashSet<String> = HashSet::new();
    let entries: Vec<&Person> = index
        .entry_points()
        .into_iter()
        .filter(|person| seen.insert(effective_node(&index, person).key()))
        .collect();

    let mut widths: HashMap<String, f32> = HashMap::new();
    let mut in_progress: HashSet<String> = HashSet::new();
    for entry in &entries {
        width::subtree_width(&index, entry, config, &mut widths, &mut in_progress);
    }

    let mut nodes: Vec<LayoutNode> = Vec::new();
    let mut edges: Vec<LayoutEdge> = Vec::new();
    let mut emitted: HashSet<String> = HashSet::new();

    let total: f32 = entries
        .iter()
        .map(|entry| {
            widths
                .get(&effective_node(&index, entry).key())
                .copied()
                .unwrap_or(0.0)
        })
        .sum();
    let mut cursor = config.viewport_width / 2.0 - total / 2.0;
    for entry in &entries {
        let slot = widths
            .get(&effective_node(&index, entry).key())
            .copied()
            .unwrap_or(0.0);
        position::place_node(
            &index,
            entry,
            cursor + slot / 2.0,
            config.top_margin,
            config,
            &widths,
            &mut emitted,
            &mut nodes,
            &mut edges,
        );
        cursor += slot;
    }

    let mut min_x = f32::MAX;
    let mut min_y = f32::MAX;
    let mut max_x = f32::MIN;
    let mut max_y = f32::MIN;
    for node in &nodes {
        min_x = min_x.min(node.x);
        min_y = min_y.min(node.y);
        max_x = max_x.max(node.x + node.width);
        max_y = max_y.max(node.y + node.height);
    }
    let width = if min_x == f32::MAX {
        0.0
    } else {
        (max_x - min_x).max(1.0)
    };
    let height = if min_y == f32::MAX {
        0.0
    } else {
        (max_y - min_y).max(1.0)
    };

    Layout {
        nodes,
        edges,
        width,
        height,
    }
}

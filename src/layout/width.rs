use std::collections::{HashMap, HashSet};

use crate::config::LayoutConfig;
use crate::graph::FamilyIndex;
use crate::model::Person;

use super::{combined_children, effective_node};

/// Horizontal space the person's entire descendant subtree needs, memoized
/// by canonical node key so a couple reached from either spouse resolves to
/// the same cached value. `in_progress` breaks parent-link cycles: a key
/// re-entered while still being computed claims only its own footprint.
pub(super) fn subtree_width(
    index: &FamilyIndex<'_>,
    person: &Person,
    config: &LayoutConfig,
    memo: &mut HashMap<String, f32>,
    in_progress: &mut HashSet<String>,
) -> f32 {
    let effective = effective_node(index, person);
    let key = effective.key();
    if let Some(value) = memo.get(&key) {
        return *value;
    }
    let own = effective.footprint(config) + config.lateral_margin;
    if !in_progress.insert(key.clone()) {
        return own;
    }

    let children = combined_children(index, &effective);
    let width = if children.is_empty() {
        own
    } else {
        let children_total: f32 = children
            .iter()
            .map(|child| subtree_width(index, child, config, memo, in_progress))
            .sum();
        // A childless-wide node must not under-claim, and a narrow node must
        // not squeeze its descendants.
        own.max(children_total)
    };

    in_progress.remove(&key);
    memo.insert(key, width);
    width
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Gender, RelationKind, Relationship};

    fn person(id: &str, gender: Gender, rels: &[(RelationKind, &str)]) -> Person {
        Person {
            id: id.to_string(),
            given_name: format!("Given{id}"),
            surname: "Test".to_string(),
            gender,
            birth_date: None,
            death_date: None,
            relationships: rels
                .iter()
                .map(|(kind, target)| Relationship {
                    kind: *kind,
                    target_id: target.to_string(),
                })
                .collect(),
        }
    }

    fn width_of(people: &[Person], entry: usize) -> f32 {
        let index = FamilyIndex::new(people);
        let config = LayoutConfig::default();
        let mut memo = HashMap::new();
        let mut in_progress = HashSet::new();
        subtree_width(&index, &people[entry], &config, &mut memo, &mut in_progress)
    }

    #[test]
    fn leaf_individual_claims_fixed_footprint() {
        let people = vec![person("a", Gender::Male, &[])];
        let config = LayoutConfig::default();
        assert_eq!(
            width_of(&people, 0),
            config.person_width + config.lateral_margin
        );
    }

    #[test]
    fn childless_couple_claims_couple_footprint() {
        let people = vec![
            person("a", Gender::Male, &[(RelationKind::Spouse, "b")]),
            person("b", Gender::Female, &[(RelationKind::Spouse, "a")]),
        ];
        let config = LayoutConfig::default();
        assert_eq!(
            width_of(&people, 0),
            config.couple_width + config.lateral_margin
        );
    }

    #[test]
    fn couple_with_two_leaf_children_sums_child_widths() {
        let people = vec![
            person("a", Gender::Male, &[(RelationKind::Spouse, "b")]),
            person("b", Gender::Female, &[(RelationKind::Spouse, "a")]),
            person("c", Gender::Male, &[(RelationKind::Parent, "a")]),
            person("d", Gender::Female, &[(RelationKind::Parent, "b")]),
        ];
        let config = LayoutConfig::default();
        let leaf = config.person_width + config.lateral_margin;
        assert!(width_of(&people, 0) >= leaf * 2.0);
    }

    #[test]
    fn wide_couple_over_single_narrow_child_keeps_own_footprint() {
        let people = vec![
            person("a", Gender::Male, &[(RelationKind::Spouse, "b")]),
            person("b", Gender::Female, &[(RelationKind::Spouse, "a")]),
            person("c", Gender::Male, &[(RelationKind::Parent, "a")]),
        ];
        let config = LayoutConfig::default();
        assert_eq!(
            width_of(&people, 0),
            config.couple_width + config.lateral_margin
        );
    }

    #[test]
    fn same_width_from_either_spouse() {
        let people = vec![
            person("a", Gender::Male, &[(RelationKind::Spouse, "b")]),
            person("b", Gender::Female, &[(RelationKind::Spouse, "a")]),
            person("c", Gender::Male, &[(RelationKind::Parent, "b")]),
        ];
        let index = FamilyIndex::new(&people);
        let config = LayoutConfig::default();
        let mut memo = HashMap::new();
        let mut in_progress = HashSet::new();
        let from_a = subtree_width(&index, &people[0], &config, &mut memo, &mut in_progress);
        let from_b = subtree_width(&index, &people[1], &config, &mut memo, &mut in_progress);
        assert_eq!(from_a, from_b);
        // Second resolution hits the memo: one cached entry for the couple.
        assert_eq!(memo.len(), 2); // couple + leaf child
    }

    #[test]
    fn mutual_parent_cycle_terminates() {
        let people = vec![
            person("a", Gender::Male, &[(RelationKind::Parent, "b")]),
            person("b", Gender::Female, &[(RelationKind::Parent, "a")]),
        ];
        let config = LayoutConfig::default();
        let leaf = config.person_width + config.lateral_margin;
        assert_eq!(width_of(&people, 0), leaf);
    }
}

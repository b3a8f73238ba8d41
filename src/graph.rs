use std::collections::{HashMap, HashSet};

use crate::model::{Person, birth_order};

/// Lookup structures built once per layout invocation from the flat person
/// list. All lookups are pure; dangling relationship ids resolve to "no such
/// relation" rather than an error.
pub struct FamilyIndex<'a> {
    people: &'a [Person],
    by_id: HashMap<&'a str, &'a Person>,
    order: HashMap<&'a str, usize>,
    children: HashMap<&'a str, Vec<&'a Person>>,
    partners: HashMap<&'a str, &'a str>,
    roots: Vec<&'a Person>,
}

impl<'a> FamilyIndex<'a> {
    pub fn new(people: &'a [Person]) -> Self {
        let mut by_id: HashMap<&str, &Person> = HashMap::new();
        let mut order: HashMap<&str, usize> = HashMap::new();
        for (idx, person) in people.iter().enumerate() {
            by_id.entry(person.id.as_str()).or_insert(person);
            order.entry(person.id.as_str()).or_insert(idx);
        }

        let mut children: HashMap<&str, Vec<&Person>> = HashMap::new();
        for person in people {
            let mut seen: HashSet<&str> = HashSet::new();
            for target in person.parent_targets() {
                if !seen.insert(target) {
                    continue;
                }
                children.entry(target).or_default().push(person);
            }
        }
        for list in children.values_mut() {
            list.sort_by(|a, b| {
                birth_order(a, b).then_with(|| {
                    let left = order.get(a.id.as_str()).copied().unwrap_or(usize::MAX);
                    let right = order.get(b.id.as_str()).copied().unwrap_or(usize::MAX);
                    left.cmp(&right)
                })
            });
        }

        // Couple pairing is resolved once, in input order, so every traversal
        // observes the same pairing: the first resolvable spouse claim wins
        // and a later claim on an already-paired person loses.
        let mut partners: HashMap<&str, &str> = HashMap::new();
        for person in people {
            if partners.contains_key(person.id.as_str()) {
                continue;
            }
            let Some(target) = person.spouse_target() else {
                continue;
            };
            if target == person.id {
                continue;
            }
            let Some(spouse) = by_id.get(target).copied() else {
                continue;
            };
            if partners.contains_key(spouse.id.as_str()) {
                continue;
            }
            partners.insert(person.id.as_str(), spouse.id.as_str());
            partners.insert(spouse.id.as_str(), person.id.as_str());
        }

        let roots: Vec<&Person> = people
            .iter()
            .filter(|person| !person.has_parent_entry())
            .collect();

        Self {
            people,
            by_id,
            order,
            children,
            partners,
            roots,
        }
    }

    pub fn person(&self, id: &str) -> Option<&'a Person> {
        self.by_id.get(id).copied()
    }

    /// First person referenced by a `spouse` relationship entry, resolved
    /// through the id lookup.
    pub fn spouse_of(&self, person: &Person) -> Option<&'a Person> {
        person.spouse_target().and_then(|id| self.person(id))
    }

    /// The partner this person was paired with, if the pairing pre-pass
    /// merged them into a couple.
    pub fn partner_of(&self, id: &str) -> Option<&'a Person> {
        self.partners.get(id).and_then(|partner| self.person(partner))
    }

    /// Everyone listing `id` as a parent, sorted by birth date with unknown
    /// dates last and input order breaking ties.
    pub fn children_of(&self, id: &str) -> &[&'a Person] {
        self.children.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn roots(&self) -> &[&'a Person] {
        &self.roots
    }

    /// Top-level starting points for the position assigner: the detected
    /// roots, or every person when the data is so cyclic that none exist.
    pub fn entry_points(&self) -> Vec<&'a Person> {
        if self.roots.is_empty() {
            self.people.iter().collect()
        } else {
            self.roots.clone()
        }
    }

    pub fn input_order(&self, id: &str) -> usize {
        self.order.get(id).copied().unwrap_or(usize::MAX)
    }
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

    fn with_birth(mut p: Person, date: &str) -> Person {
        p.birth_date = Some(date.to_string());
        p
    }

    #[test]
    fn children_sorted_by_birth_date_with_unknown_last() {
        let people = vec![
            person("p", Gender::Male, &[]),
            with_birth(
                person("late", Gender::Female, &[(RelationKind::Parent, "p")]),
                "1970-01-01",
            ),
            person("undated", Gender::Male, &[(RelationKind::Parent, "p")]),
            with_birth(
                person("early", Gender::Male, &[(RelationKind::Parent, "p")]),
                "1950-01-01",
            ),
        ];
        let index = FamilyIndex::new(&people);
        let ids: Vec<&str> = index
            .children_of("p")
            .iter()
            .map(|child| child.id.as_str())
            .collect();
        assert_eq!(ids, vec!["early", "late", "undated"]);
    }

    #[test]
    fn duplicate_parent_entries_yield_one_child_slot() {
        let people = vec![
            person("p", Gender::Male, &[]),
            person(
                "c",
                Gender::Female,
                &[(RelationKind::Parent, "p"), (RelationKind::Parent, "p")],
            ),
        ];
        let index = FamilyIndex::new(&people);
        assert_eq!(index.children_of("p").len(), 1);
    }

    #[test]
    fn dangling_spouse_resolves_to_none() {
        let people = vec![person("a", Gender::Male, &[(RelationKind::Spouse, "ghost")])];
        let index = FamilyIndex::new(&people);
        assert!(index.spouse_of(&people[0]).is_none());
        assert!(index.partner_of("a").is_none());
    }

    #[test]
    fn asymmetric_spouse_listing_still_pairs() {
        let people = vec![
            person("a", Gender::Male, &[(RelationKind::Spouse, "b")]),
            person("b", Gender::Female, &[]),
        ];
        let index = FamilyIndex::new(&people);
        assert_eq!(index.partner_of("a").unwrap().id, "b");
        assert_eq!(index.partner_of("b").unwrap().id, "a");
    }

    #[test]
    fn second_claim_on_paired_person_loses() {
        let people = vec![
            person("a", Gender::Male, &[(RelationKind::Spouse, "s")]),
            person("s", Gender::Female, &[(RelationKind::Spouse, "a")]),
            person("c", Gender::Male, &[(RelationKind::Spouse, "s")]),
        ];
        let index = FamilyIndex::new(&people);
        assert_eq!(index.partner_of("a").unwrap().id, "s");
        assert_eq!(index.partner_of("s").unwrap().id, "a");
        assert!(index.partner_of("c").is_none());
    }

    #[test]
    fn self_spouse_is_ignored() {
        let people = vec![person("a", Gender::Male, &[(RelationKind::Spouse, "a")])];
        let index = FamilyIndex::new(&people);
        assert!(index.partner_of("a").is_none());
    }

    #[test]
    fn roots_are_people_without_parent_entries() {
        let people = vec![
            person("r", Gender::Male, &[]),
            person("c", Gender::Female, &[(RelationKind::Parent, "r")]),
            // A dangling parent entry still disqualifies roothood.
            person("d", Gender::Male, &[(RelationKind::Parent, "nobody")]),
        ];
        let index = FamilyIndex::new(&people);
        let ids: Vec<&str> = index.roots().iter().map(|root| root.id.as_str()).collect();
        assert_eq!(ids, vec!["r"]);
    }

    #[test]
    fn entry_points_fall_back_to_everyone_when_cyclic() {
        let people = vec![
            person("a", Gender::Male, &[(RelationKind::Parent, "b")]),
            person("b", Gender::Female, &[(RelationKind::Parent, "a")]),
        ];
        let index = FamilyIndex::new(&people);
        assert!(index.roots().is_empty());
        assert_eq!(index.entry_points().len(), 2);
    }
}

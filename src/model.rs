use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

static DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{4})[-/.](\d{1,2})[-/.](\d{1,2})$").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelationKind {
    Spouse,
    Parent,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Relationship {
    pub kind: RelationKind,
    pub target_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    pub id: String,
    pub given_name: String,
    pub surname: String,
    pub gender: Gender,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub death_date: Option<String>,
    #[serde(default)]
    pub relationships: Vec<Relationship>,
}

impl Person {
    /// First spouse reference, if any. Resolution against the person list
    /// happens in the indexer; a dangling id is the caller's problem.
    pub fn spouse_target(&self) -> Option<&str> {
        self.relationships
            .iter()
            .find(|rel| rel.kind == RelationKind::Spouse)
            .map(|rel| rel.target_id.as_str())
    }

    pub fn parent_targets(&self) -> impl Iterator<Item = &str> {
        self.relationships
            .iter()
            .filter(|rel| rel.kind == RelationKind::Parent)
            .map(|rel| rel.target_id.as_str())
    }

    /// A person with any parent entry is not a root, even when the
    /// referenced id does not resolve.
    pub fn has_parent_entry(&self) -> bool {
        self.relationships
            .iter()
            .any(|rel| rel.kind == RelationKind::Parent)
    }

    pub fn birth_days(&self) -> Option<i32> {
        self.birth_date.as_deref().and_then(parse_civil_date)
    }
}

/// Sibling ordering: ascending birth date, unknown dates after all dated
/// entries. Ties are left to the caller (input order).
pub fn birth_order(a: &Person, b: &Person) -> Ordering {
    match (a.birth_days(), b.birth_days()) {
        (Some(left), Some(right)) => left.cmp(&right),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

pub fn parse_civil_date(value: &str) -> Option<i32> {
    let value = value.trim();
    let caps = DATE_RE.captures(value)?;
    let year: i32 = caps[1].parse().ok()?;
    let month: u32 = caps[2].parse().ok()?;
    let day: u32 = caps[3].parse().ok()?;
    if month == 0 || month > 12 || day == 0 || day > 31 {
        return None;
    }
    Some(days_from_civil(year, month, day))
}

fn days_from_civil(year: i32, month: u32, day: u32) -> i32 {
    let y = year - (month <= 2) as i32;
    let era = if y >= 0 { y } else { y - 399 } / 400;
    let yoe = y - era * 400;
    let m = month as i32;
    let d = day as i32;
    let doy = (153 * (m + if m > 2 { -3 } else { 9 }) + 2) / 5 + d - 1;
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
    era * 146097 + doe - 719468
}

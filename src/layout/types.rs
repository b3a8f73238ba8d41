use crate::model::Person;

#[derive(Debug, Clone)]
pub struct Layout {
    pub nodes: Vec<LayoutNode>,
    pub edges: Vec<LayoutEdge>,
    pub width: f32,
    pub height: f32,
}

/// A positioned drawable: a single person or a merged spouse pair. `x`/`y`
/// are the top-left corner; the parent edge attaches at the top anchor and
/// child edges leave from the bottom anchor.
#[derive(Debug, Clone)]
pub struct LayoutNode {
    pub id: String,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub payload: NodePayload,
}

#[derive(Debug, Clone)]
pub enum NodePayload {
    Couple { husband: Person, wife: Person },
    Person(Person),
}

impl LayoutNode {
    pub fn top_anchor(&self) -> (f32, f32) {
        (self.x + self.width / 2.0, self.y)
    }

    pub fn bottom_anchor(&self) -> (f32, f32) {
        (self.x + self.width / 2.0, self.y + self.height)
    }
}

#[derive(Debug, Clone)]
pub struct LayoutEdge {
    pub id: String,
    pub source: String,
    pub target: String,
}

pub fn person_node_id(id: &str) -> String {
    format!("person-{id}")
}

/// Canonical couple key: ids in ascending order, so the same pair resolves
/// to the same node no matter which spouse was reached first.
pub fn couple_node_id(a: &str, b: &str) -> String {
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    format!("couple-{lo}-{hi}")
}

pub fn edge_id(source: &str, target: &str) -> String {
    format!("edge-{source}-{target}")
}

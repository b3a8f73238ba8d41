use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use crate::layout::{Layout, NodePayload};
use crate::model::Person;

#[derive(Debug, Serialize)]
pub struct LayoutDump {
    pub width: f32,
    pub height: f32,
    pub nodes: Vec<NodeDump>,
    pub edges: Vec<EdgeDump>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeDump {
    pub id: String,
    pub kind: String,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub payload: PayloadDump,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum PayloadDump {
    Couple { husband: Person, wife: Person },
    Person { person: Person },
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeDump {
    pub id: String,
    pub source_node_id: String,
    pub target_node_id: String,
}

impl LayoutDump {
    pub fn from_layout(layout: &Layout) -> Self {
        let nodes = layout
            .nodes
            .iter()
            .map(|node| {
                let (kind, payload) = match &node.payload {
                    NodePayload::Couple { husband, wife } => (
                        "couple",
                        PayloadDump::Couple {
                            husband: husband.clone(),
                            wife: wife.clone(),
                        },
                    ),
                    NodePayload::Person(person) => (
                        "person",
                        PayloadDump::Person {
                            person: person.clone(),
                        },
                    ),
                };
                NodeDump {
                    id: node.id.clone(),
                    kind: kind.to_string(),
                    x: node.x,
                    y: node.y,
                    width: node.width,
                    height: node.height,
                    payload,
                }
            })
            .collect();

        let edges = layout
            .edges
            .iter()
            .map(|edge| EdgeDump {
                id: edge.id.clone(),
                source_node_id: edge.source.clone(),
                target_node_id: edge.target.clone(),
            })
            .collect();

        LayoutDump {
            width: layout.width,
            height: layout.height,
            nodes,
            edges,
        }
    }
}

pub fn to_json_string(layout: &Layout) -> anyhow::Result<String> {
    let dump = LayoutDump::from_layout(layout);
    Ok(serde_json::to_string_pretty(&dump)?)
}

pub fn write_layout_dump(path: &Path, layout: &Layout) -> anyhow::Result<()> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    let dump = LayoutDump::from_layout(layout);
    serde_json::to_writer_pretty(writer, &dump)?;
    Ok(())
}

use crate::{
    core::value::Value,
    graph::descriptor::{EdgeDescriptor, NodeDescriptor},
};
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fmt, str::FromStr};

pub type EntityId = i64;

pub type Properties = BTreeMap<String, Value>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Node,
    Edge,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Node => write!(f, "node"),
            EntityKind::Edge => write!(f, "edge"),
        }
    }
}

impl FromStr for EntityKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "node" | "nodes" => Ok(EntityKind::Node),
            "edge" | "edges" | "relationship" | "relationships" => Ok(EntityKind::Edge),
            other => Err(format!("unknown entity kind '{other}'")),
        }
    }
}

/// Common view over nodes and edges used by filtering.
pub trait GraphEntity {
    type Descriptor;

    const KIND: EntityKind;

    fn id(&self) -> EntityId;

    /// Whether the entity carries the given type.
    ///
    /// Nodes test membership in their label list, edges compare their single
    /// type for exact equality.
    fn has_type(&self, type_name: &str) -> bool;

    fn property(&self, name: &str) -> Option<&Value>;

    fn descriptor(&self) -> Self::Descriptor;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: EntityId,
    #[serde(default, alias = "types")]
    pub labels: Vec<String>,
    #[serde(default)]
    pub properties: Properties,
}

impl Node {
    pub fn new(id: EntityId) -> Self {
        Self {
            id,
            labels: Vec::new(),
            properties: Properties::new(),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.labels.push(label.into());
        self
    }

    pub fn with_property(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(name.into(), value.into());
        self
    }
}

impl GraphEntity for Node {
    type Descriptor = NodeDescriptor;

    const KIND: EntityKind = EntityKind::Node;

    fn id(&self) -> EntityId {
        self.id
    }

    fn has_type(&self, type_name: &str) -> bool {
        self.labels.iter().any(|label| label == type_name)
    }

    fn property(&self, name: &str) -> Option<&Value> {
        self.properties.get(name)
    }

    fn descriptor(&self) -> NodeDescriptor {
        NodeDescriptor::new(self.id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub id: EntityId,
    #[serde(rename = "type")]
    pub edge_type: String,
    pub from: EntityId,
    pub to: EntityId,
    #[serde(default)]
    pub properties: Properties,
}

impl Edge {
    pub fn new(id: EntityId, edge_type: impl Into<String>, from: EntityId, to: EntityId) -> Self {
        Self {
            id,
            edge_type: edge_type.into(),
            from,
            to,
            properties: Properties::new(),
        }
    }

    pub fn with_property(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(name.into(), value.into());
        self
    }
}

impl GraphEntity for Edge {
    type Descriptor = EdgeDescriptor;

    const KIND: EntityKind = EntityKind::Edge;

    fn id(&self) -> EntityId {
        self.id
    }

    fn has_type(&self, type_name: &str) -> bool {
        self.edge_type == type_name
    }

    fn property(&self, name: &str) -> Option<&Value> {
        self.properties.get(name)
    }

    fn descriptor(&self) -> EdgeDescriptor {
        EdgeDescriptor::new(self.id, self.from, self.to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_type_is_label_membership() {
        let node = Node::new(1).with_label("Person").with_label("Director");
        assert!(node.has_type("Director"));
        assert!(node.has_type("Person"));
        assert!(!node.has_type("Dir"));
    }

    #[test]
    fn test_edge_type_is_exact() {
        let edge = Edge::new(1, "DIRECTED", 1, 2);
        assert!(edge.has_type("DIRECTED"));
        assert!(!edge.has_type("Director"));
        assert!(!edge.has_type("DIRECT"));
    }

    #[test]
    fn test_descriptors() {
        let edge = Edge::new(3, "ACTED_IN", 4, 5).with_property("role", "Ripley");
        assert_eq!(edge.descriptor(), EdgeDescriptor::new(3, 4, 5));
        assert_eq!(Node::new(9).descriptor(), NodeDescriptor::new(9));
    }

    #[test]
    fn test_entity_kind_from_str() {
        assert_eq!("nodes".parse::<EntityKind>(), Ok(EntityKind::Node));
        assert_eq!("Edge".parse::<EntityKind>(), Ok(EntityKind::Edge));
        assert!("paths".parse::<EntityKind>().is_err());
    }
}

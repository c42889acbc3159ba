//! Minimal projections of graph entities returned to callers.

use crate::graph::entity::EntityId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeDescriptor {
    pub id: EntityId,
    /// Set on placeholder nodes that only exist to close an edge's endpoint.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub subsidiary: bool,
}

impl NodeDescriptor {
    pub fn new(id: EntityId) -> Self {
        Self {
            id,
            subsidiary: false,
        }
    }

    pub fn subsidiary(id: EntityId) -> Self {
        Self {
            id,
            subsidiary: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EdgeDescriptor {
    pub id: EntityId,
    pub from: EntityId,
    pub to: EntityId,
}

impl EdgeDescriptor {
    pub fn new(id: EntityId, from: EntityId, to: EntityId) -> Self {
        Self { id, from, to }
    }

    pub fn endpoints(&self) -> [EntityId; 2] {
        [self.from, self.to]
    }
}

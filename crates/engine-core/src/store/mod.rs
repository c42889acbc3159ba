use async_trait::async_trait;
use model::graph::{Edge, EdgeDescriptor, EntityId, Node, NodeDescriptor, QueryResult};
use planner::query::{CompiledPredicate, MatchQuery};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod memory;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("The {store} store does not support {operation}")]
    Unsupported {
        store: String,
        operation: &'static str,
    },

    #[error("Failed to read graph document: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse graph document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Store query failed: {0}")]
    Query(String),
}

/// Request for a path between two nodes, optionally restricted to nodes
/// matching a compiled predicate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShortestPathRequest {
    pub from: EntityId,
    pub to: EntityId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_hops: Option<u32>,
    #[serde(default)]
    pub node_predicate: CompiledPredicate,
}

/// The graph store collaborator.
///
/// Every store can hand out its entities for in-memory filtering. Stores
/// that can run queries themselves report `supports_pushdown` and answer
/// `query_nodes`/`query_edges` with descriptors of the matching entities.
#[async_trait]
pub trait GraphStore: Send + Sync {
    fn name(&self) -> &str;

    async fn fetch_nodes(&self) -> Result<Vec<Node>, StoreError>;

    async fn fetch_edges(&self) -> Result<Vec<Edge>, StoreError>;

    fn supports_pushdown(&self) -> bool {
        false
    }

    async fn query_nodes(&self, _query: &MatchQuery) -> Result<Vec<NodeDescriptor>, StoreError> {
        Err(self.unsupported("node pushdown"))
    }

    async fn query_edges(&self, _query: &MatchQuery) -> Result<Vec<EdgeDescriptor>, StoreError> {
        Err(self.unsupported("edge pushdown"))
    }

    async fn shortest_path(
        &self,
        _request: &ShortestPathRequest,
    ) -> Result<QueryResult, StoreError> {
        Err(self.unsupported("shortest path"))
    }

    fn unsupported(&self, operation: &'static str) -> StoreError {
        StoreError::Unsupported {
            store: self.name().to_string(),
            operation,
        }
    }
}

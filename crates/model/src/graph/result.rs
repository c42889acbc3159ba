use crate::graph::descriptor::{EdgeDescriptor, NodeDescriptor};
use serde::{Deserialize, Serialize};

/// A (nodes, edges) pair as returned by any query path.
///
/// Raw results may contain duplicates and dangling edges. Consolidated results
/// hold unique ids and only edges whose endpoints are present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryResult {
    #[serde(default)]
    pub nodes: Vec<NodeDescriptor>,
    #[serde(default)]
    pub edges: Vec<EdgeDescriptor>,
}

impl QueryResult {
    pub fn new(nodes: Vec<NodeDescriptor>, edges: Vec<EdgeDescriptor>) -> Self {
        Self { nodes, edges }
    }

    pub fn from_nodes(nodes: Vec<NodeDescriptor>) -> Self {
        Self::new(nodes, Vec::new())
    }

    pub fn from_edges(edges: Vec<EdgeDescriptor>) -> Self {
        Self::new(Vec::new(), edges)
    }
}

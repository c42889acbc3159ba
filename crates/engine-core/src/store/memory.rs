use crate::store::{GraphStore, StoreError};
use async_trait::async_trait;
use model::graph::{Edge, GraphDocument, Node};
use std::path::Path;
use tracing::info;

/// A graph held entirely in memory. Fetch only; filtering happens in process.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    graph: GraphDocument,
}

impl MemoryStore {
    pub fn new(graph: GraphDocument) -> Self {
        Self { graph }
    }

    /// Loads a graph document from a JSON file.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let source = tokio::fs::read_to_string(path).await?;
        let graph = GraphDocument::from_json(&source)?;
        info!(
            "Loaded graph from {}: {} node(s), {} edge(s)",
            path.display(),
            graph.nodes.len(),
            graph.edges.len()
        );
        Ok(Self::new(graph))
    }
}

#[async_trait]
impl GraphStore for MemoryStore {
    fn name(&self) -> &str {
        "memory"
    }

    async fn fetch_nodes(&self) -> Result<Vec<Node>, StoreError> {
        Ok(self.graph.nodes.clone())
    }

    async fn fetch_edges(&self) -> Result<Vec<Edge>, StoreError> {
        Ok(self.graph.edges.clone())
    }
}

use async_trait::async_trait;
use engine_core::store::{GraphStore, ShortestPathRequest, StoreError};
use model::graph::{Edge, EdgeDescriptor, GraphDocument, Node, NodeDescriptor, QueryResult};
use planner::query::MatchQuery;
use serde_json::{Value as JsonValue, json};
use std::{
    path::{Path, PathBuf},
    sync::Mutex,
};
use tracing::debug;

/// A small film graph: two directors, two actors, three films.
///
/// Node ids: 1 Ridley Scott, 2 Sigourney Weaver, 3 Alien, 4 Blade Runner,
/// 5 Harrison Ford, 6 James Cameron, 7 Aliens.
pub fn movie_graph_json() -> JsonValue {
    json!({
        "nodes": [
            {"id": 1, "labels": ["Person", "Director"], "properties": {"name": "Ridley Scott", "born": 1937}},
            {"id": 2, "labels": ["Person"], "properties": {"name": "Sigourney Weaver", "born": 1949}},
            {"id": 3, "labels": ["Movie"], "properties": {"title": "Alien", "released": 1979, "rating": 8.5}},
            {"id": 4, "labels": ["Movie"], "properties": {"title": "Blade Runner", "released": 1982, "rating": 8.1}},
            {"id": 5, "labels": ["Person"], "properties": {"name": "Harrison Ford", "born": 1942}},
            {"id": 6, "labels": ["Person", "Director"], "properties": {"name": "James Cameron", "born": 1954}},
            {"id": 7, "labels": ["Movie"], "properties": {"title": "Aliens", "released": 1986, "rating": 8.4}}
        ],
        "edges": [
            {"id": 100, "type": "DIRECTED", "from": 1, "to": 3},
            {"id": 101, "type": "DIRECTED", "from": 1, "to": 4},
            {"id": 102, "type": "ACTED_IN", "from": 2, "to": 3, "properties": {"role": "Ripley"}},
            {"id": 103, "type": "ACTED_IN", "from": 5, "to": 4, "properties": {"role": "Deckard"}},
            {"id": 104, "type": "DIRECTED", "from": 6, "to": 7},
            {"id": 105, "type": "ACTED_IN", "from": 2, "to": 7, "properties": {"role": "Ripley"}}
        ]
    })
}

pub fn movie_graph() -> GraphDocument {
    serde_json::from_value(movie_graph_json()).expect("fixture graph is valid")
}

/// Writes the fixture graph to `dir` and returns the file path.
pub fn write_movie_graph(dir: &Path) -> PathBuf {
    let path = dir.join("movies.json");
    std::fs::write(&path, movie_graph_json().to_string()).expect("write fixture graph");
    path
}

pub fn node_ids(nodes: &[NodeDescriptor]) -> Vec<i64> {
    nodes.iter().map(|n| n.id).collect()
}

pub fn edge_ids(edges: &[EdgeDescriptor]) -> Vec<i64> {
    edges.iter().map(|e| e.id).collect()
}

/// A pushdown-only store that records every query it receives and answers
/// with canned descriptors.
#[derive(Default)]
pub struct RecordingStore {
    pub nodes: Vec<NodeDescriptor>,
    pub edges: Vec<EdgeDescriptor>,
    pub path: QueryResult,
    queries: Mutex<Vec<MatchQuery>>,
    path_requests: Mutex<Vec<ShortestPathRequest>>,
}

impl RecordingStore {
    pub fn new(nodes: Vec<NodeDescriptor>, edges: Vec<EdgeDescriptor>) -> Self {
        Self {
            nodes,
            edges,
            ..Self::default()
        }
    }

    pub fn with_path(mut self, path: QueryResult) -> Self {
        self.path = path;
        self
    }

    pub fn queries(&self) -> Vec<MatchQuery> {
        self.queries.lock().expect("queries lock").clone()
    }

    pub fn path_requests(&self) -> Vec<ShortestPathRequest> {
        self.path_requests.lock().expect("path lock").clone()
    }

    fn record(&self, query: &MatchQuery) {
        debug!("Recording store received {} query: {}", query.kind, query.text);
        self.queries.lock().expect("queries lock").push(query.clone());
    }
}

#[async_trait]
impl GraphStore for RecordingStore {
    fn name(&self) -> &str {
        "recording"
    }

    async fn fetch_nodes(&self) -> Result<Vec<Node>, StoreError> {
        Err(self.unsupported("fetching nodes"))
    }

    async fn fetch_edges(&self) -> Result<Vec<Edge>, StoreError> {
        Err(self.unsupported("fetching edges"))
    }

    fn supports_pushdown(&self) -> bool {
        true
    }

    async fn query_nodes(&self, query: &MatchQuery) -> Result<Vec<NodeDescriptor>, StoreError> {
        self.record(query);
        Ok(self.nodes.clone())
    }

    async fn query_edges(&self, query: &MatchQuery) -> Result<Vec<EdgeDescriptor>, StoreError> {
        self.record(query);
        Ok(self.edges.clone())
    }

    async fn shortest_path(
        &self,
        request: &ShortestPathRequest,
    ) -> Result<QueryResult, StoreError> {
        debug!("Recording store received path {} -> {}", request.from, request.to);
        self.path_requests
            .lock()
            .expect("path lock")
            .push(request.clone());
        Ok(self.path.clone())
    }
}

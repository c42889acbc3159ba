use model::graph::{EntityId, NodeDescriptor, QueryResult};
use std::collections::HashSet;
use tracing::debug;

/// Turns a raw result into a closed subgraph.
///
/// Nodes and edges are deduplicated by id, first occurrence wins. An edge
/// whose endpoint is not among the nodes is dropped, or, with
/// `include_subsidiary`, kept together with a subsidiary stub for each
/// missing endpoint.
pub fn consolidate(raw: QueryResult, include_subsidiary: bool) -> QueryResult {
    let raw_counts = (raw.nodes.len(), raw.edges.len());

    let mut nodes = dedup_by_id(raw.nodes, |node| node.id);
    let mut node_ids: HashSet<EntityId> = nodes.iter().map(|node| node.id).collect();

    let mut edges = Vec::with_capacity(raw.edges.len());
    let mut dropped = 0usize;

    for edge in dedup_by_id(raw.edges, |edge| edge.id) {
        let closed = edge.endpoints().iter().all(|id| node_ids.contains(id));
        if closed {
            edges.push(edge);
        } else if include_subsidiary {
            for id in edge.endpoints() {
                if node_ids.insert(id) {
                    nodes.push(NodeDescriptor::subsidiary(id));
                }
            }
            edges.push(edge);
        } else {
            dropped += 1;
        }
    }

    debug!(
        "Consolidated {} node(s) / {} edge(s) into {} / {} ({} dangling edge(s) dropped)",
        raw_counts.0,
        raw_counts.1,
        nodes.len(),
        edges.len(),
        dropped
    );

    QueryResult::new(nodes, edges)
}

/// Removes repeated ids, keeping the first occurrence of each.
pub fn dedup_by_id<T>(items: Vec<T>, id: impl Fn(&T) -> EntityId) -> Vec<T> {
    let mut seen = HashSet::with_capacity(items.len());
    items.into_iter().filter(|item| seen.insert(id(item))).collect()
}

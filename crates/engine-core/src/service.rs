//! The filtering pipeline: decode, execute (in memory or pushed down to the
//! store), then consolidate.

use crate::{
    consolidate::{consolidate, dedup_by_id},
    error::EngineError,
    executor::{EdgeExecutor, NodeExecutor},
    store::{GraphStore, ShortestPathRequest},
};
use condition::{Condition, decode, validate};
use model::graph::{EdgeDescriptor, EntityId, EntityKind, NodeDescriptor, QueryResult};
use planner::query::{IdentifierStrategy, MatchQuery, PredicateBuilder, render_match};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::{fmt, str::FromStr, sync::Arc};
use tracing::{debug, info};

/// Where conditions are evaluated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExecutionMode {
    /// Push down when the store supports it, otherwise filter in memory.
    #[default]
    Auto,
    InMemory,
    Pushdown,
}

impl fmt::Display for ExecutionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExecutionMode::Auto => write!(f, "auto"),
            ExecutionMode::InMemory => write!(f, "in-memory"),
            ExecutionMode::Pushdown => write!(f, "pushdown"),
        }
    }
}

impl FromStr for ExecutionMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "auto" => Ok(ExecutionMode::Auto),
            "in-memory" | "memory" => Ok(ExecutionMode::InMemory),
            "pushdown" => Ok(ExecutionMode::Pushdown),
            other => Err(format!("unknown execution mode '{other}'")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOptions {
    pub variable: String,
    pub strategy: IdentifierStrategy,
    pub mode: ExecutionMode,
    pub include_subsidiary: bool,
}

impl Default for FilterOptions {
    fn default() -> Self {
        Self {
            variable: "n".to_string(),
            strategy: IdentifierStrategy::default(),
            mode: ExecutionMode::default(),
            include_subsidiary: false,
        }
    }
}

/// Conditions for a combined node and edge query. A missing condition
/// places no constraint on that entity kind.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nodes: Option<JsonValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edges: Option<JsonValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_subsidiary: Option<bool>,
}

pub struct FilterService {
    store: Arc<dyn GraphStore>,
    options: FilterOptions,
}

impl FilterService {
    pub fn new(store: Arc<dyn GraphStore>, options: FilterOptions) -> Self {
        Self { store, options }
    }

    /// Decodes a node condition and returns the matching nodes, deduplicated.
    pub async fn filter_nodes(
        &self,
        payload: &JsonValue,
    ) -> Result<Vec<NodeDescriptor>, EngineError> {
        let condition = decode(payload)?;
        self.select_nodes(&condition).await
    }

    /// Decodes an edge condition and returns the matching edges, deduplicated.
    pub async fn filter_edges(
        &self,
        payload: &JsonValue,
    ) -> Result<Vec<EdgeDescriptor>, EngineError> {
        let condition = decode(payload)?;
        self.select_edges(&condition).await
    }

    /// Runs both conditions and consolidates the union into a closed subgraph.
    ///
    /// Both payloads are decoded before the store is touched.
    pub async fn filter_graph(&self, request: &FilterRequest) -> Result<QueryResult, EngineError> {
        let node_condition = decode_or_unconstrained(request.nodes.as_ref())?;
        let edge_condition = decode_or_unconstrained(request.edges.as_ref())?;

        let nodes = self.select_nodes(&node_condition).await?;
        let edges = self.select_edges(&edge_condition).await?;

        let include_subsidiary = request
            .include_subsidiary
            .unwrap_or(self.options.include_subsidiary);
        let result = consolidate(QueryResult::new(nodes, edges), include_subsidiary);

        info!(
            "Filtered graph: {} node(s), {} edge(s)",
            result.nodes.len(),
            result.edges.len()
        );
        Ok(result)
    }

    pub async fn select_nodes(
        &self,
        condition: &Condition,
    ) -> Result<Vec<NodeDescriptor>, EngineError> {
        validate(condition)?;

        let nodes = if self.use_pushdown() {
            let query = self.compile(EntityKind::Node, condition)?;
            self.store.query_nodes(&query).await?
        } else {
            let candidates = self.store.fetch_nodes().await?;
            NodeExecutor::new().execute(&candidates, condition)
        };

        Ok(dedup_by_id(nodes, |node| node.id))
    }

    pub async fn select_edges(
        &self,
        condition: &Condition,
    ) -> Result<Vec<EdgeDescriptor>, EngineError> {
        validate(condition)?;

        let edges = if self.use_pushdown() {
            let query = self.compile(EntityKind::Edge, condition)?;
            self.store.query_edges(&query).await?
        } else {
            let candidates = self.store.fetch_edges().await?;
            EdgeExecutor::new().execute(&candidates, condition)
        };

        Ok(dedup_by_id(edges, |edge| edge.id))
    }

    /// Compiles a condition into the read query a pushdown store receives.
    pub fn compile(
        &self,
        kind: EntityKind,
        condition: &Condition,
    ) -> Result<MatchQuery, EngineError> {
        let builder = PredicateBuilder::new(kind)
            .with_variable(self.options.variable.as_str())
            .with_strategy(self.options.strategy);
        let predicate = builder.build(condition)?;
        let query = render_match(kind, builder.variable(), builder.dialect(), &predicate);

        debug!("Compiled {kind} query: {}", query.text);
        Ok(query)
    }

    /// Validates the optional node condition and forwards the request to the
    /// store.
    pub async fn shortest_path(
        &self,
        from: EntityId,
        to: EntityId,
        max_hops: Option<u32>,
        node_filter: Option<&JsonValue>,
    ) -> Result<QueryResult, EngineError> {
        let condition = decode_or_unconstrained(node_filter)?;
        let node_predicate = PredicateBuilder::new(EntityKind::Node)
            .with_variable(self.options.variable.as_str())
            .with_strategy(self.options.strategy)
            .build(&condition)?;

        let request = ShortestPathRequest {
            from,
            to,
            max_hops,
            node_predicate,
        };
        info!("Shortest path {from} -> {to} via the {} store", self.store.name());

        let path = self.store.shortest_path(&request).await?;
        Ok(consolidate(path, self.options.include_subsidiary))
    }

    fn use_pushdown(&self) -> bool {
        match self.options.mode {
            ExecutionMode::Auto => self.store.supports_pushdown(),
            ExecutionMode::InMemory => false,
            ExecutionMode::Pushdown => true,
        }
    }
}

fn decode_or_unconstrained(payload: Option<&JsonValue>) -> Result<Condition, EngineError> {
    Ok(match payload {
        Some(payload) => decode(payload)?,
        None => Condition::all([]),
    })
}

//! Defines the core rendering trait and context for turning compiled
//! predicates into complete read queries.

use crate::query::{builder::predicate::CompiledPredicate, dialect::Dialect, params::Parameters};
use model::graph::EntityKind;
use serde::Serialize;

/// A trait for any query part that can be rendered into query text.
pub trait Render {
    fn render(&self, renderer: &mut Renderer);
}

/// A context that holds the state during the rendering process.
///
/// It accumulates the query text and the parameters, and provides access to
/// the dialect for syntax-specific details.
pub struct Renderer<'a> {
    pub query: String,
    pub parameters: Parameters,
    pub dialect: &'a dyn Dialect,
}

impl<'a> Renderer<'a> {
    pub fn new(dialect: &'a dyn Dialect) -> Self {
        Self {
            query: String::new(),
            parameters: Parameters::new(),
            dialect,
        }
    }

    /// Consumes the renderer and returns the final query text and parameters.
    pub fn finish(self) -> (String, Parameters) {
        (self.query, self.parameters)
    }
}

/// `MATCH <pattern>` binding every entity of one kind.
pub struct MatchClause<'v> {
    pub kind: EntityKind,
    pub variable: &'v str,
}

impl Render for MatchClause<'_> {
    fn render(&self, r: &mut Renderer) {
        let pattern = match self.kind {
            EntityKind::Node => r.dialect.node_pattern(self.variable),
            EntityKind::Edge => r.dialect.edge_pattern(self.variable),
        };
        r.query.push_str("MATCH ");
        r.query.push_str(&pattern);
    }
}

/// Renders ` WHERE <fragment>` and takes over the predicate's parameters.
/// An unconstrained predicate renders nothing.
impl Render for CompiledPredicate {
    fn render(&self, r: &mut Renderer) {
        if let Some(fragment) = &self.fragment {
            r.query.push_str(" WHERE ");
            r.query.push_str(fragment);
        }
        r.parameters
            .extend(self.parameters.iter().map(|(k, v)| (k.clone(), v.clone())));
    }
}

pub struct ReturnClause<'v> {
    pub variable: &'v str,
}

impl Render for ReturnClause<'_> {
    fn render(&self, r: &mut Renderer) {
        r.query.push_str(" RETURN ");
        r.query.push_str(self.variable);
    }
}

/// A complete read query ready for the store collaborator.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchQuery {
    pub kind: EntityKind,
    pub text: String,
    pub parameters: Parameters,
}

/// Renders `MATCH <pattern> [WHERE <fragment>] RETURN <variable>`.
pub fn render_match(
    kind: EntityKind,
    variable: &str,
    dialect: &dyn Dialect,
    predicate: &CompiledPredicate,
) -> MatchQuery {
    let mut renderer = Renderer::new(dialect);
    MatchClause { kind, variable }.render(&mut renderer);
    predicate.render(&mut renderer);
    ReturnClause { variable }.render(&mut renderer);

    let (text, parameters) = renderer.finish();
    MatchQuery {
        kind,
        text,
        parameters,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::{builder::predicate::PredicateBuilder, dialect::Cypher};
    use condition::Condition;
    use model::core::value::Value;

    #[test]
    fn test_render_node_query_with_predicate() {
        let predicate = PredicateBuilder::new(EntityKind::Node)
            .build(&Condition::all([
                Condition::of_type("Person"),
                Condition::match_property("born", 1964),
            ]))
            .unwrap();

        let query = render_match(EntityKind::Node, "n", &Cypher, &predicate);

        assert_eq!(
            query.text,
            "MATCH (n) WHERE ($type IN labels(n) AND n[$born] = $born_value) RETURN n"
        );
        assert_eq!(query.parameters.get("born_value"), Some(&Value::Int(1964)));
        assert_eq!(query.parameters.len(), 3);
    }

    #[test]
    fn test_render_omits_where_for_unconstrained_predicate() {
        let predicate = CompiledPredicate::default();
        let query = render_match(EntityKind::Edge, "r", &Cypher, &predicate);

        assert_eq!(query.text, "MATCH ()-[r]->() RETURN r");
        assert!(query.parameters.is_empty());
    }
}

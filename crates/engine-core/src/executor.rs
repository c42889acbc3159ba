//! In-memory evaluation of conditions against fetched entities.

use condition::{Condition, ConditionVisitor};
use model::{
    core::value::Value,
    graph::{Edge, GraphEntity, Node},
};
use std::{collections::HashSet, convert::Infallible, marker::PhantomData};
use tracing::{debug, warn};

/// Narrows an ordered candidate list by walking a condition.
///
/// Conjunction is the inherited sequential fold: each child sees only what
/// its predecessors kept. Disjunction runs every child against the same
/// input and unions the branches by id, first occurrence first.
pub struct EntityExecutor<'a, E> {
    _entities: PhantomData<&'a E>,
}

pub type NodeExecutor<'a> = EntityExecutor<'a, Node>;
pub type EdgeExecutor<'a> = EntityExecutor<'a, Edge>;

impl<'a, E: GraphEntity> EntityExecutor<'a, E> {
    pub const fn new() -> Self {
        Self {
            _entities: PhantomData,
        }
    }

    /// Returns the entities matching `condition`, in input order.
    pub fn filter(&self, entities: &'a [E], condition: &Condition) -> Vec<&'a E> {
        let Ok(kept) = self.visit(entities.iter().collect(), condition);
        debug!(
            "{} executor kept {} of {} candidate(s)",
            E::KIND,
            kept.len(),
            entities.len()
        );
        kept
    }

    /// Same as [`filter`](Self::filter), projected to descriptors.
    pub fn execute(&self, entities: &'a [E], condition: &Condition) -> Vec<E::Descriptor> {
        self.filter(entities, condition)
            .into_iter()
            .map(GraphEntity::descriptor)
            .collect()
    }
}

impl<E: GraphEntity> Default for EntityExecutor<'_, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, E: GraphEntity> ConditionVisitor for EntityExecutor<'a, E> {
    type State = Vec<&'a E>;
    type Error = Infallible;

    fn of_type(&self, state: Vec<&'a E>, type_name: &str) -> Result<Vec<&'a E>, Infallible> {
        Ok(state
            .into_iter()
            .filter(|entity| entity.has_type(type_name))
            .collect())
    }

    fn match_property(
        &self,
        state: Vec<&'a E>,
        property: &str,
        value: &Value,
    ) -> Result<Vec<&'a E>, Infallible> {
        Ok(state
            .into_iter()
            .filter(|entity| {
                entity
                    .property(property)
                    .is_some_and(|found| found.strict_eq(value))
            })
            .collect())
    }

    fn match_any(
        &self,
        state: Vec<&'a E>,
        filters: &[Condition],
    ) -> Result<Vec<&'a E>, Infallible> {
        if filters.is_empty() {
            warn!("Empty 'any' condition matches every {}", E::KIND);
            return Ok(state);
        }

        let mut seen = HashSet::with_capacity(state.len());
        let mut merged = Vec::with_capacity(state.len());

        for filter in filters {
            let branch = self.visit(state.clone(), filter)?;
            merged.extend(branch.into_iter().filter(|entity| seen.insert(entity.id())));
        }

        Ok(merged)
    }
}

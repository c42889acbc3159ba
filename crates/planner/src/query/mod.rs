//! Compilation of conditions into parameterized graph queries.

pub mod builder;
pub mod dialect;
pub mod params;
pub mod renderer;

pub use builder::predicate::{CompiledPredicate, IdentifierStrategy, PredicateBuilder};
pub use dialect::{Cypher, Dialect};
pub use params::{Parameters, allocate_key};
pub use renderer::{MatchQuery, render_match};

//! Filter conditions over graph entities.
//!
//! A [`Condition`] is a closed predicate tree: type matching, property
//! matching, and the `all`/`any` combinators. Untrusted JSON payloads are
//! turned into conditions by [`decode`], which is the only place the wire
//! `rule` tag is inspected. Backends walk the tree through
//! [`ConditionVisitor`].

pub mod ast;
pub mod decode;
pub mod errors;
pub mod semantic;

pub use ast::{
    condition::{ALL, ANY, Condition, MATCH_PROPERTY, OF_TYPE},
    path::ConditionPath,
    visitor::ConditionVisitor,
};
pub use decode::{decode, decode_str};
pub use errors::{ConditionError, Result};
pub use semantic::validator::{ConditionValidator, validate};

pub mod descriptor;
pub mod document;
pub mod entity;
pub mod result;

pub use descriptor::{EdgeDescriptor, NodeDescriptor};
pub use document::GraphDocument;
pub use entity::{Edge, EntityId, EntityKind, GraphEntity, Node, Properties};
pub use result::QueryResult;

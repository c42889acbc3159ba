pub mod consolidate;
pub mod error;
pub mod executor;
pub mod service;
pub mod store;

//! Declarative per-node-type configuration schemas.
//!
//! A node type is made editable by adding one [`ToolSchema`] entry to the
//! [`SchemaCatalog`]; nothing else in the crate needs to know about it.

pub mod catalog;
pub mod types;

pub use catalog::*;
pub use types::*;

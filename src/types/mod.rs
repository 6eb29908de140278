//! Strongly-typed domain types.
//!
//! Newtypes for the 1-based ids used by the Gmsh format, so that node ids,
//! element ids and raw grid indices cannot be mixed up.

mod indices;

pub use indices::{ElementId, NodeId};

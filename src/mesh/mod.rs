//! Unstructured mesh representation.
//!
//! Provides:
//! - Node and quadrilateral element lists with 1-based Gmsh ids
//! - Lowering of a structured grid to those lists
//! - Gmsh MSH 2.2 ASCII output

pub mod gmsh;
mod structured;

pub use gmsh::{Element, GmshElementType, GmshError, GmshMesh, Node};
pub use structured::{node_id, quad_nodes};

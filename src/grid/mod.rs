//! Structured grid representation.

mod structured_grid;

pub use structured_grid::{GridError, StructuredGrid};

//! # p3d2gmsh
//!
//! Conversion of single-block Plot3D formatted grids to Gmsh meshes.
//!
//! This crate provides:
//! - A P3Dfmt reader producing a [`StructuredGrid`]
//! - Lowering of the structured grid to unstructured nodes and quadrilaterals
//! - A Gmsh MSH 2.2 ASCII writer
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use p3d2gmsh::{convert_file, ReaderOptions};
//!
//! let summary = convert_file(
//!     Path::new("airfoil.p3dfmt"),
//!     Some(Path::new("airfoil.msh")),
//!     &ReaderOptions::default(),
//! )?;
//! println!("{} nodes, {} elements", summary.n_nodes, summary.n_elements);
//! # Ok::<(), p3d2gmsh::ConvertError>(())
//! ```

pub mod convert;
pub mod grid;
pub mod io;
pub mod mesh;
pub mod types;

// Re-export main types for convenience
pub use convert::{convert_file, ConversionSummary, ConvertError};
pub use grid::{GridError, StructuredGrid};
pub use io::{
    parse_p3dfmt, read_p3dfmt_file, ExcessTokenPolicy, P3dError, P3dFile, ParseWarning,
    ReaderOptions,
};
pub use mesh::{GmshError, GmshMesh};

//! Grid file input.
//!
//! This module provides:
//! - **P3Dfmt**: single-block Plot3D formatted (ASCII) structured grids
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use p3d2gmsh::io::{read_p3dfmt_file, ReaderOptions};
//!
//! let p3d = read_p3dfmt_file(Path::new("wing.p3dfmt"), &ReaderOptions::default())?;
//! println!("{} x {} grid", p3d.grid.idim(), p3d.grid.jdim());
//! # Ok::<(), p3d2gmsh::io::P3dError>(())
//! ```

mod p3dfmt;

pub use p3dfmt::{
    parse_p3dfmt, read_p3dfmt_file, Axis, ExcessTokenPolicy, P3dError, P3dFile, ParseWarning,
    ReaderOptions,
};

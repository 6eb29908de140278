//! P3Dfmt to Gmsh conversion pipeline.
//!
//! read grid → lower to nodes/elements → write mesh. The input is parsed
//! completely before the output is opened, so a rejected input never
//! creates or truncates the output file.

use std::path::Path;

use thiserror::Error;
use tracing::info;

use crate::io::{read_p3dfmt_file, P3dError, ParseWarning, ReaderOptions};
use crate::mesh::{GmshError, GmshMesh};

/// Error type for a conversion run.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// Input grid could not be read
    #[error("Error while reading grid file: {0}")]
    Read(#[from] P3dError),

    /// Output mesh could not be written
    #[error("Error while writing mesh file: {0}")]
    Write(#[from] GmshError),
}

/// Outcome of a successful conversion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConversionSummary {
    pub n_nodes: usize,
    pub n_elements: usize,
    /// Non-fatal issues found in the input
    pub warnings: Vec<ParseWarning>,
}

/// Convert the P3Dfmt file at `input` to a Gmsh mesh.
///
/// The mesh is written to `output`, or to standard output when `None`.
pub fn convert_file(
    input: &Path,
    output: Option<&Path>,
    options: &ReaderOptions,
) -> Result<ConversionSummary, ConvertError> {
    info!(input = %input.display(), "Reading P3Dfmt grid");
    let p3d = read_p3dfmt_file(input, options)?;

    let mesh = GmshMesh::from_structured_grid(&p3d.grid);
    mesh.save(output)?;

    Ok(ConversionSummary {
        n_nodes: mesh.n_nodes(),
        n_elements: mesh.n_elements(),
        warnings: p3d.warnings,
    })
}

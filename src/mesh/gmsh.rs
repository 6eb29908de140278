//! Gmsh mesh file output.
//!
//! Writes Gmsh MSH format version 2.2 (ASCII), the legacy format that every
//! Gmsh release and most downstream solvers can read.
//!
//! ## Supported Element Types
//! - 3 = Quadrilateral (4-node)
//!
//! ## Example
//! ```no_run
//! use p3d2gmsh::mesh::GmshMesh;
//! use std::path::Path;
//!
//! let mut mesh = GmshMesh::new();
//! let a = mesh.push_node(0.0, 0.0, 0.0);
//! let b = mesh.push_node(1.0, 0.0, 0.0);
//! let c = mesh.push_node(1.0, 1.0, 0.0);
//! let d = mesh.push_node(0.0, 1.0, 0.0);
//! mesh.push_quadrilateral([a, b, c, d]);
//! mesh.save(Some(Path::new("square.msh"))).expect("Failed to write mesh");
//! ```

use std::fmt;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use thiserror::Error;
use tracing::debug;

use crate::types::{ElementId, NodeId};

/// Format version written in the `$MeshFormat` section.
pub const MESH_FORMAT_VERSION: &str = "2.2";
/// File type 0 is ASCII.
pub const FILE_TYPE_ASCII: u32 = 0;
/// Size of a floating point value, in bytes.
pub const DATA_SIZE: u32 = 8;
/// Physical group every element is assigned to.
pub const PHYSICAL_TAG: u32 = 1;
/// Tag count written in each element line.
pub const NUM_TAGS: u32 = 2;

/// Error type for Gmsh I/O operations.
#[derive(Debug, Error)]
pub enum GmshError {
    /// File could not be created or written.
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),
}

/// Gmsh element types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GmshElementType {
    Quadrilateral = 3,
}

impl GmshElementType {
    /// Numeric type code used in the file.
    pub fn code(self) -> i32 {
        self as i32
    }
}

/// A mesh node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Node {
    pub id: NodeId,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.id,
            Coord(self.x),
            Coord(self.y),
            Coord(self.z)
        )
    }
}

/// A quadrilateral mesh element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Element {
    pub id: ElementId,
    pub element_type: GmshElementType,
    pub physical_tag: u32,
    /// Corner nodes, counter-clockwise for a right-handed grid
    pub nodes: [NodeId; 4],
}

impl Element {
    /// Create a quadrilateral in the default physical group.
    pub fn quadrilateral(id: ElementId, nodes: [NodeId; 4]) -> Self {
        Self {
            id,
            element_type: GmshElementType::Quadrilateral,
            physical_tag: PHYSICAL_TAG,
            nodes,
        }
    }
}

impl fmt::Display for Element {
    /// Format: elem_id type n_tags physical_tag node1 node2 node3 node4
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.id,
            self.element_type.code(),
            NUM_TAGS,
            self.physical_tag
        )?;
        for node in &self.nodes {
            write!(f, " {}", node)?;
        }
        Ok(())
    }
}

/// Coordinate formatting.
///
/// Integral values keep a trailing `.0` and very small or large magnitudes use
/// exponent notation with a sign and at least two exponent digits
/// (`1e-05`, `2.5e+20`). All values round-trip exactly.
struct Coord(f64);

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let v = self.0;
        let a = v.abs();
        if v.is_finite() && v.fract() == 0.0 && a < 1e16 {
            write!(f, "{:.1}", v)
        } else if v.is_finite() && a != 0.0 && (a < 1e-4 || a >= 1e16) {
            let text = format!("{:e}", v);
            match text.split_once('e') {
                Some((mantissa, exp)) => {
                    let (sign, digits) = match exp.strip_prefix('-') {
                        Some(digits) => ('-', digits),
                        None => ('+', exp),
                    };
                    write!(f, "{}e{}{:0>2}", mantissa, sign, digits)
                }
                None => f.write_str(&text),
            }
        } else {
            write!(f, "{}", v)
        }
    }
}

/// Node and element lists of an unstructured mesh.
///
/// Ids are the 1-based list positions, so entities are only ever appended.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GmshMesh {
    nodes: Vec<Node>,
    elements: Vec<Element>,
}

impl GmshMesh {
    /// Create an empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty mesh with room for the given counts.
    pub fn with_capacity(n_nodes: usize, n_elements: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(n_nodes),
            elements: Vec::with_capacity(n_elements),
        }
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn n_nodes(&self) -> usize {
        self.nodes.len()
    }

    pub fn n_elements(&self) -> usize {
        self.elements.len()
    }

    /// Append a node and return its id.
    pub fn push_node(&mut self, x: f64, y: f64, z: f64) -> NodeId {
        let id = NodeId::from_position(self.nodes.len());
        self.nodes.push(Node { id, x, y, z });
        id
    }

    /// Append a quadrilateral and return its id.
    ///
    /// # Panics
    /// Panics if a node id does not refer to an existing node.
    pub fn push_quadrilateral(&mut self, nodes: [NodeId; 4]) -> ElementId {
        assert!(
            nodes.iter().all(|n| n.position() < self.nodes.len()),
            "Quadrilateral references a node that does not exist: {:?}",
            nodes
        );
        let id = ElementId::from_position(self.elements.len());
        self.elements.push(Element::quadrilateral(id, nodes));
        id
    }

    /// Write the mesh in MSH 2.2 ASCII format.
    pub fn write_to<W: Write>(&self, out: &mut W) -> Result<(), GmshError> {
        self.write_header(out)?;
        self.write_nodes(out)?;
        self.write_elements(out)?;
        Ok(())
    }

    /// Save the mesh to `destination`, or to standard output when `None`.
    ///
    /// An existing file is truncated. If writing fails partway the file is
    /// left incomplete.
    pub fn save(&self, destination: Option<&Path>) -> Result<(), GmshError> {
        match destination {
            Some(path) => {
                debug!(path = %path.display(), "Writing Gmsh mesh");
                let file = File::create(path)?;
                let mut writer = BufWriter::new(file);
                self.write_to(&mut writer)?;
                writer.flush()?;
            }
            None => {
                debug!("Writing Gmsh mesh to stdout");
                let stdout = io::stdout();
                let mut writer = BufWriter::new(stdout.lock());
                self.write_to(&mut writer)?;
                writer.flush()?;
            }
        }
        Ok(())
    }

    fn write_header<W: Write>(&self, out: &mut W) -> Result<(), GmshError> {
        writeln!(out, "$MeshFormat")?;
        writeln!(
            out,
            "{} {} {}",
            MESH_FORMAT_VERSION, FILE_TYPE_ASCII, DATA_SIZE
        )?;
        writeln!(out, "$EndMeshFormat")?;
        Ok(())
    }

    fn write_nodes<W: Write>(&self, out: &mut W) -> Result<(), GmshError> {
        writeln!(out, "$Nodes")?;
        writeln!(out, "{}", self.nodes.len())?;
        for node in &self.nodes {
            writeln!(out, "{}", node)?;
        }
        writeln!(out, "$EndNodes")?;
        Ok(())
    }

    fn write_elements<W: Write>(&self, out: &mut W) -> Result<(), GmshError> {
        writeln!(out, "$Elements")?;
        writeln!(out, "{}", self.elements.len())?;
        for elem in &self.elements {
            writeln!(out, "{}", elem)?;
        }
        writeln!(out, "$EndElements")?;
        Ok(())
    }
}

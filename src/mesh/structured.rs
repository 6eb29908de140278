//! Lowering of a structured grid to an unstructured quadrilateral mesh.
//!
//! Nodes are emitted in row-major order (`i` outer, `j` inner), so the node
//! at grid index `(i, j)` has id `i * jdim + j + 1`. Cell `(i, j)` becomes the
//! quadrilateral `(i, j) → (i+1, j) → (i+1, j+1) → (i, j+1)`, which is
//! counter-clockwise when x grows with `i` and y grows with `j`.

use tracing::info;

use super::gmsh::GmshMesh;
use crate::grid::StructuredGrid;
use crate::types::NodeId;

/// Id of the node generated for grid index `(i, j)`.
///
/// Both node emission and element connectivity are derived from this.
#[inline]
pub fn node_id(i: usize, j: usize, jdim: usize) -> NodeId {
    NodeId::from_position(i * jdim + j)
}

/// Corner node ids of cell `(i, j)`.
#[inline]
pub fn quad_nodes(i: usize, j: usize, jdim: usize) -> [NodeId; 4] {
    [
        node_id(i, j, jdim),
        node_id(i + 1, j, jdim),
        node_id(i + 1, j + 1, jdim),
        node_id(i, j + 1, jdim),
    ]
}

impl GmshMesh {
    /// Build a mesh from a single structured grid.
    ///
    /// The result has `idim * jdim` nodes and `(idim - 1) * (jdim - 1)`
    /// quadrilaterals. All nodes lie in the `z = 0` plane.
    pub fn from_structured_grid(grid: &StructuredGrid) -> Self {
        let mut mesh = Self::with_capacity(grid.n_points(), grid.n_cells());
        mesh.consume(grid);
        mesh
    }

    /// Append the nodes and cells of `grid` to this mesh.
    ///
    /// Ids continue after the existing nodes and elements. On an empty mesh
    /// node ids are exactly [`node_id`].
    pub fn consume(&mut self, grid: &StructuredGrid) {
        let (idim, jdim) = (grid.idim(), grid.jdim());
        let base = self.n_nodes();
        let shift = |id: NodeId| NodeId::from_position(base + id.position());

        for ((i, j), (x, y)) in grid.points() {
            let id = self.push_node(x, y, 0.0);
            debug_assert_eq!(id, shift(node_id(i, j, jdim)));
        }

        for i in 0..idim.saturating_sub(1) {
            for j in 0..jdim.saturating_sub(1) {
                self.push_quadrilateral(quad_nodes(i, j, jdim).map(shift));
            }
        }

        info!(
            idim,
            jdim,
            nodes = self.n_nodes(),
            elements = self.n_elements(),
            "Converted structured grid"
        );
    }
}

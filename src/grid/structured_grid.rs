//! Single-block structured grid.
//!
//! Connectivity of a structured grid is implicit in its index space: point
//! `(i, j)` is connected to `(i±1, j)` and `(i, j±1)`. Only coordinates are
//! stored, in row-major order (`i` outer, `j` inner).

use thiserror::Error;

/// Error type for grid construction.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GridError {
    /// Dimensions must both be at least 1.
    #[error("Invalid grid dimensions {idim} x {jdim}")]
    InvalidDimensions { idim: usize, jdim: usize },

    /// A coordinate array does not match `idim * jdim`.
    #[error("{axis}-coordinates have {found} values, expected {expected}")]
    ShapeMismatch {
        axis: char,
        expected: usize,
        found: usize,
    },
}

/// A 2D structured grid with `idim × jdim` points.
///
/// Immutable after construction.
#[derive(Clone, Debug, PartialEq)]
pub struct StructuredGrid {
    idim: usize,
    jdim: usize,
    /// Row-major x-coordinates, `x[i * jdim + j]`
    x: Vec<f64>,
    /// Row-major y-coordinates, `y[i * jdim + j]`
    y: Vec<f64>,
}

impl StructuredGrid {
    /// Create a grid from row-major coordinate arrays.
    ///
    /// # Errors
    /// - `InvalidDimensions` if either dimension is zero
    /// - `ShapeMismatch` if an array does not hold exactly `idim * jdim` values
    pub fn new(idim: usize, jdim: usize, x: Vec<f64>, y: Vec<f64>) -> Result<Self, GridError> {
        if idim == 0 || jdim == 0 {
            return Err(GridError::InvalidDimensions { idim, jdim });
        }
        let expected = idim * jdim;
        for (axis, values) in [('x', &x), ('y', &y)] {
            if values.len() != expected {
                return Err(GridError::ShapeMismatch {
                    axis,
                    expected,
                    found: values.len(),
                });
            }
        }
        Ok(Self { idim, jdim, x, y })
    }

    /// Create a grid from coordinate columns.
    ///
    /// Column `j` holds the `idim` values of the fixed-`j` line, so
    /// `x_columns[j][i]` becomes `x(i, j)`. This is the layout of a P3Dfmt
    /// file.
    pub fn from_columns(
        idim: usize,
        jdim: usize,
        x_columns: &[Vec<f64>],
        y_columns: &[Vec<f64>],
    ) -> Result<Self, GridError> {
        let x = transpose_columns(idim, jdim, x_columns, 'x')?;
        let y = transpose_columns(idim, jdim, y_columns, 'y')?;
        Self::new(idim, jdim, x, y)
    }

    /// Number of points along the first logical axis.
    #[inline]
    pub fn idim(&self) -> usize {
        self.idim
    }

    /// Number of points along the second logical axis.
    #[inline]
    pub fn jdim(&self) -> usize {
        self.jdim
    }

    /// Total number of grid points.
    #[inline]
    pub fn n_points(&self) -> usize {
        self.idim * self.jdim
    }

    /// Number of quadrilateral cells, zero for a degenerate (line or point) grid.
    #[inline]
    pub fn n_cells(&self) -> usize {
        self.idim.saturating_sub(1) * self.jdim.saturating_sub(1)
    }

    /// Coordinates of point `(i, j)`.
    ///
    /// # Panics
    /// Panics if the index is out of range.
    #[inline]
    pub fn point(&self, i: usize, j: usize) -> (f64, f64) {
        assert!(
            i < self.idim && j < self.jdim,
            "Grid index ({}, {}) out of range for {} x {} grid",
            i,
            j,
            self.idim,
            self.jdim
        );
        let k = i * self.jdim + j;
        (self.x[k], self.y[k])
    }

    /// Row-major x-coordinates.
    pub fn x(&self) -> &[f64] {
        &self.x
    }

    /// Row-major y-coordinates.
    pub fn y(&self) -> &[f64] {
        &self.y
    }

    /// Iterate over `((i, j), (x, y))` in row-major order.
    pub fn points(&self) -> impl Iterator<Item = ((usize, usize), (f64, f64))> + '_ {
        let jdim = self.jdim;
        self.x
            .iter()
            .zip(&self.y)
            .enumerate()
            .map(move |(k, (&x, &y))| ((k / jdim, k % jdim), (x, y)))
    }
}

fn transpose_columns(
    idim: usize,
    jdim: usize,
    columns: &[Vec<f64>],
    axis: char,
) -> Result<Vec<f64>, GridError> {
    if idim == 0 || jdim == 0 {
        return Err(GridError::InvalidDimensions { idim, jdim });
    }
    let found: usize = columns.iter().map(Vec::len).sum();
    if columns.len() != jdim || columns.iter().any(|c| c.len() != idim) {
        return Err(GridError::ShapeMismatch {
            axis,
            expected: idim * jdim,
            found,
        });
    }

    let mut values = vec![0.0; idim * jdim];
    for (j, column) in columns.iter().enumerate() {
        for (i, &v) in column.iter().enumerate() {
            values[i * jdim + j] = v;
        }
    }
    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_columns_layout() {
        // Column j = 0 is (i = 0, 1, 2), column j = 1 likewise
        let x_cols = vec![vec![0.0, 1.0, 2.0], vec![0.0, 1.0, 2.0]];
        let y_cols = vec![vec![0.0, 0.0, 0.0], vec![5.0, 5.0, 5.0]];
        let grid = StructuredGrid::from_columns(3, 2, &x_cols, &y_cols).unwrap();

        assert_eq!(grid.idim(), 3);
        assert_eq!(grid.jdim(), 2);
        assert_eq!(grid.point(2, 0), (2.0, 0.0));
        assert_eq!(grid.point(1, 1), (1.0, 5.0));
        assert_eq!(grid.x(), &[0.0, 0.0, 1.0, 1.0, 2.0, 2.0]);
    }

    #[test]
    fn test_points_row_major() {
        let grid = StructuredGrid::new(2, 2, vec![0.0, 0.0, 1.0, 1.0], vec![0.0, 1.0, 0.0, 1.0])
            .unwrap();
        let indices: Vec<_> = grid.points().map(|(ij, _)| ij).collect();
        assert_eq!(indices, vec![(0, 0), (0, 1), (1, 0), (1, 1)]);
    }

    #[test]
    fn test_cell_counts() {
        let grid = StructuredGrid::new(4, 3, vec![0.0; 12], vec![0.0; 12]).unwrap();
        assert_eq!(grid.n_points(), 12);
        assert_eq!(grid.n_cells(), 6);

        let line = StructuredGrid::new(5, 1, vec![0.0; 5], vec![0.0; 5]).unwrap();
        assert_eq!(line.n_cells(), 0);
    }

    #[test]
    fn test_shape_mismatch() {
        let err = StructuredGrid::new(2, 2, vec![0.0; 4], vec![0.0; 3]).unwrap_err();
        assert_eq!(
            err,
            GridError::ShapeMismatch {
                axis: 'y',
                expected: 4,
                found: 3
            }
        );
    }

    #[test]
    fn test_zero_dimension_rejected() {
        let err = StructuredGrid::new(0, 3, vec![], vec![]).unwrap_err();
        assert_eq!(err, GridError::InvalidDimensions { idim: 0, jdim: 3 });
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_point_out_of_range() {
        let grid = StructuredGrid::new(1, 1, vec![0.0], vec![0.0]).unwrap();
        let _ = grid.point(1, 0);
    }
}

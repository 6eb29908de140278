//! Reader for single-block Plot3D formatted grid files (P3Dfmt).
//!
//! # File Format
//!
//! ```text
//! 1
//! 3 2
//! 0.0 1.0 2.0
//! 0.0 1.0 2.0
//! 0.0 0.0 0.0
//! 1.0 1.0 1.0
//! ```
//!
//! The first line is the block count, which must be 1. The second line holds
//! the dimensions `idim jdim`. Then follow `jdim` x-columns and `jdim`
//! y-columns of `idim` values each. A column may be wrapped over several
//! physical lines; values are accumulated line by line until at least `idim`
//! are available. Every column starts on a fresh line, so surplus values on
//! the last line of a column never spill into the next one.
//!
//! Content after the last y-column is ignored.

use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::Path;

use thiserror::Error;
use tracing::{debug, warn};

use crate::grid::{GridError, StructuredGrid};

/// Upper bound on buffer preallocation; dimensions come from the file and
/// are not trusted until the data backing them has been read.
const PREALLOC_LIMIT: usize = 4096;

/// Coordinate axis a column belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::X => write!(f, "x"),
            Axis::Y => write!(f, "y"),
        }
    }
}

/// Error type for P3Dfmt parsing.
#[derive(Debug, Error)]
pub enum P3dError {
    /// File I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// File is empty or the first line is blank
    #[error("File is empty or missing block count line")]
    MissingBlockCount,

    /// Block count is not exactly 1
    #[error("Wrong block count: expected exactly 1 block, found '{found}'")]
    WrongBlockCount { found: String },

    /// Dimension line is absent
    #[error("Missing dimensions line")]
    MissingDimensions,

    /// Dimension line is not two positive integers
    #[error("Invalid dimensions line: '{line}'")]
    InvalidDimensions { line: String },

    /// Input ended before a coordinate column was complete
    #[error("Unexpected end of file while reading {axis}-coordinates for row {row}")]
    UnexpectedEof { axis: Axis, row: usize },

    /// A coordinate token is not a number
    #[error("Invalid number '{token}' at line {line}")]
    InvalidNumber { line: usize, token: String },

    /// A coordinate column has surplus values and the policy rejects them
    #[error("Row {row} has {found} {axis}-coordinates, expected {expected}")]
    ExcessTokens {
        axis: Axis,
        row: usize,
        expected: usize,
        found: usize,
    },

    /// Parsed data does not form a valid grid
    #[error("Grid error: {0}")]
    Grid(#[from] GridError),
}

/// What to do when a coordinate column holds more than `idim` values.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ExcessTokenPolicy {
    /// Keep the first `idim` values and record a warning.
    #[default]
    Truncate,
    /// Fail with [`P3dError::ExcessTokens`].
    Reject,
}

/// Options controlling how lenient the reader is.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ReaderOptions {
    pub excess_tokens: ExcessTokenPolicy,
}

impl ReaderOptions {
    /// Options that reject any malformed column.
    pub fn strict() -> Self {
        Self {
            excess_tokens: ExcessTokenPolicy::Reject,
        }
    }

    /// Set the excess token policy.
    pub fn with_excess_tokens(mut self, policy: ExcessTokenPolicy) -> Self {
        self.excess_tokens = policy;
        self
    }
}

/// Non-fatal issue found while parsing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParseWarning {
    /// Surplus values in a column were dropped.
    ExcessTokensTruncated {
        axis: Axis,
        row: usize,
        expected: usize,
        found: usize,
    },
}

impl fmt::Display for ParseWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseWarning::ExcessTokensTruncated {
                axis,
                row,
                expected,
                found,
            } => write!(
                f,
                "Row {} - excess {}-coordinates detected and truncated ({} found, {} kept)",
                row, axis, found, expected
            ),
        }
    }
}

/// A parsed P3Dfmt file.
#[derive(Clone, Debug)]
pub struct P3dFile {
    /// The single grid block
    pub grid: StructuredGrid,
    /// Warnings raised while parsing, in file order
    pub warnings: Vec<ParseWarning>,
}

impl P3dFile {
    /// Number of blocks in the file. Only single-block files are accepted.
    pub fn nblocks(&self) -> usize {
        1
    }
}

/// Read a P3Dfmt file from disk.
///
/// # Errors
/// Any structural problem in the file is fatal; see [`P3dError`].
pub fn read_p3dfmt_file(path: &Path, options: &ReaderOptions) -> Result<P3dFile, P3dError> {
    let file = File::open(path)?;
    parse_p3dfmt(BufReader::new(file), options)
}

/// Parse P3Dfmt content from a buffered reader.
pub fn parse_p3dfmt<R: BufRead>(reader: R, options: &ReaderOptions) -> Result<P3dFile, P3dError> {
    let mut source = LineSource::new(reader);

    let nblocks = match source.next_line()? {
        Some((_, line)) if !line.trim().is_empty() => line.trim().to_string(),
        _ => return Err(P3dError::MissingBlockCount),
    };
    if nblocks.parse::<i64>().ok() != Some(1) {
        return Err(P3dError::WrongBlockCount { found: nblocks });
    }

    let (idim, jdim) = match source.next_line()? {
        Some((_, line)) if !line.trim().is_empty() => parse_dimensions(&line)?,
        _ => return Err(P3dError::MissingDimensions),
    };
    debug!(idim, jdim, "P3Dfmt block dimensions");

    let mut warnings = Vec::new();
    let mut x_columns = Vec::with_capacity(jdim.min(PREALLOC_LIMIT));
    for j in 0..jdim {
        x_columns.push(read_column(
            &mut source,
            idim,
            Axis::X,
            j + 1,
            options,
            &mut warnings,
        )?);
    }
    let mut y_columns = Vec::with_capacity(jdim.min(PREALLOC_LIMIT));
    for j in 0..jdim {
        y_columns.push(read_column(
            &mut source,
            idim,
            Axis::Y,
            j + 1,
            options,
            &mut warnings,
        )?);
    }

    let grid = StructuredGrid::from_columns(idim, jdim, &x_columns, &y_columns)?;
    Ok(P3dFile { grid, warnings })
}

/// Parse `idim jdim`; both must be positive.
fn parse_dimensions(line: &str) -> Result<(usize, usize), P3dError> {
    let invalid = || P3dError::InvalidDimensions {
        line: line.trim().to_string(),
    };
    let parts: Vec<&str> = line.split_whitespace().collect();
    if parts.len() != 2 {
        return Err(invalid());
    }
    let idim: usize = parts[0].parse().map_err(|_| invalid())?;
    let jdim: usize = parts[1].parse().map_err(|_| invalid())?;
    if idim == 0 || jdim == 0 {
        return Err(invalid());
    }
    Ok((idim, jdim))
}

/// Accumulate one column of `idim` values.
///
/// `row` is the 1-based column number used in messages.
fn read_column<R: BufRead>(
    source: &mut LineSource<R>,
    idim: usize,
    axis: Axis,
    row: usize,
    options: &ReaderOptions,
    warnings: &mut Vec<ParseWarning>,
) -> Result<Vec<f64>, P3dError> {
    let mut values = Vec::with_capacity(idim.min(PREALLOC_LIMIT));

    while values.len() < idim {
        let (line_no, line) = source
            .next_data_line()?
            .ok_or(P3dError::UnexpectedEof { axis, row })?;
        for token in line.split_whitespace() {
            let value: f64 = token.parse().map_err(|_| P3dError::InvalidNumber {
                line: line_no,
                token: token.to_string(),
            })?;
            values.push(value);
        }
    }

    if values.len() > idim {
        let found = values.len();
        match options.excess_tokens {
            ExcessTokenPolicy::Reject => {
                return Err(P3dError::ExcessTokens {
                    axis,
                    row,
                    expected: idim,
                    found,
                });
            }
            ExcessTokenPolicy::Truncate => {
                let warning = ParseWarning::ExcessTokensTruncated {
                    axis,
                    row,
                    expected: idim,
                    found,
                };
                warn!("{}", warning);
                warnings.push(warning);
                values.truncate(idim);
            }
        }
    }

    Ok(values)
}

/// Line iterator that tracks 1-based line numbers.
struct LineSource<R> {
    lines: Lines<R>,
    line_no: usize,
}

impl<R: BufRead> LineSource<R> {
    fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line_no: 0,
        }
    }

    /// Next physical line, blank or not.
    fn next_line(&mut self) -> Result<Option<(usize, String)>, P3dError> {
        match self.lines.next() {
            Some(line) => {
                self.line_no += 1;
                Ok(Some((self.line_no, line?)))
            }
            None => Ok(None),
        }
    }

    /// Next line with at least one token.
    fn next_data_line(&mut self) -> Result<Option<(usize, String)>, P3dError> {
        while let Some((line_no, line)) = self.next_line()? {
            if !line.trim().is_empty() {
                return Ok(Some((line_no, line)));
            }
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};
    use tempfile::NamedTempFile;

    fn parse(content: &str) -> Result<P3dFile, P3dError> {
        parse_p3dfmt(Cursor::new(content), &ReaderOptions::default())
    }

    #[test]
    fn test_parse_unit_square() {
        let file = parse("1\n2 2\n0.0 1.0\n0.0 1.0\n0.0 0.0\n1.0 1.0\n").unwrap();
        let grid = &file.grid;

        assert_eq!(file.nblocks(), 1);
        assert!(file.warnings.is_empty());
        assert_eq!((grid.idim(), grid.jdim()), (2, 2));
        // Column j holds the values for i = 0..idim
        assert_eq!(grid.point(0, 0), (0.0, 0.0));
        assert_eq!(grid.point(1, 0), (1.0, 0.0));
        assert_eq!(grid.point(0, 1), (0.0, 1.0));
        assert_eq!(grid.point(1, 1), (1.0, 1.0));
    }

    #[test]
    fn test_column_wrapped_over_lines() {
        let content = "1\n4 1\n0.0 1.0\n2.0\n3.0\n 5.0 5.0 \n5.0 5.0\n";
        let file = parse(content).unwrap();
        let xs: Vec<f64> = (0..4).map(|i| file.grid.point(i, 0).0).collect();
        assert_eq!(xs, vec![0.0, 1.0, 2.0, 3.0]);
        assert!(file.warnings.is_empty());
    }

    #[test]
    fn test_blank_lines_between_columns() {
        let file = parse("1\n2 1\n\n0.0 1.0\n\n   \n3.0 4.0\n").unwrap();
        assert_eq!(file.grid.point(1, 0), (1.0, 4.0));
    }

    #[test]
    fn test_wrong_block_count() {
        for count in ["2", "0", "-1", "one"] {
            let content = format!("{}\n2 2\n0 1\n0 1\n0 0\n1 1\n", count);
            match parse(&content) {
                Err(P3dError::WrongBlockCount { found }) => assert_eq!(found, count),
                other => panic!("Expected WrongBlockCount, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_empty_file() {
        assert!(matches!(parse(""), Err(P3dError::MissingBlockCount)));
        assert!(matches!(parse("\n2 2\n"), Err(P3dError::MissingBlockCount)));
    }

    #[test]
    fn test_missing_dimensions() {
        assert!(matches!(parse("1\n"), Err(P3dError::MissingDimensions)));
        assert!(matches!(parse("1\n\n"), Err(P3dError::MissingDimensions)));
    }

    #[test]
    fn test_invalid_dimensions() {
        for dims in ["2", "2 x", "2 2 2", "0 3", "-2 2"] {
            let content = format!("1\n{}\n", dims);
            assert!(
                matches!(parse(&content), Err(P3dError::InvalidDimensions { .. })),
                "dimensions '{}' should be rejected",
                dims
            );
        }
    }

    #[test]
    fn test_x_column_eof_names_row() {
        // Second x-column (row 2) has only one of three values
        let err = parse("1\n3 2\n0.0 1.0 2.0\n0.0\n").unwrap_err();
        match err {
            P3dError::UnexpectedEof { axis, row } => {
                assert_eq!(axis, Axis::X);
                assert_eq!(row, 2);
            }
            other => panic!("Expected UnexpectedEof, got {:?}", other),
        }
    }

    #[test]
    fn test_y_column_eof_is_same_error_kind() {
        let err = parse("1\n2 2\n0 1\n0 1\n0 0\n").unwrap_err();
        match err {
            P3dError::UnexpectedEof { axis, row } => {
                assert_eq!(axis, Axis::Y);
                assert_eq!(row, 2);
            }
            other => panic!("Expected UnexpectedEof, got {:?}", other),
        }
        assert_eq!(
            err.to_string(),
            "Unexpected end of file while reading y-coordinates for row 2"
        );
    }

    #[test]
    fn test_huge_dimensions_fail_without_allocating() {
        let err = parse("1\n100000000000000 1\n0.0\n").unwrap_err();
        assert!(matches!(
            err,
            P3dError::UnexpectedEof {
                axis: Axis::X,
                row: 1
            }
        ));

        let err = parse("1\n1 100000000000000\n0.0\n").unwrap_err();
        assert!(matches!(
            err,
            P3dError::UnexpectedEof {
                axis: Axis::X,
                row: 2
            }
        ));
    }

    #[test]
    fn test_blank_line_inside_column_is_skipped() {
        let file = parse("1\n2 1\n0.0\n\n1.0\n0 0\n").unwrap();
        assert_eq!(file.grid.point(1, 0), (1.0, 0.0));
    }

    #[test]
    fn test_excess_tokens_truncated_with_warning() {
        let file = parse("1\n2 1\n0.0 1.0 9.0\n3.0 4.0\n").unwrap();
        assert_eq!(file.grid.point(0, 0), (0.0, 3.0));
        assert_eq!(file.grid.point(1, 0), (1.0, 4.0));
        assert_eq!(
            file.warnings,
            vec![ParseWarning::ExcessTokensTruncated {
                axis: Axis::X,
                row: 1,
                expected: 2,
                found: 3,
            }]
        );
    }

    #[test]
    fn test_excess_tokens_do_not_spill_into_next_column() {
        // 3.0 on the first line is dropped; the y-column starts on the next line
        let file = parse("1\n2 1\n0.0\n1.0 3.0\n5.0 6.0\n").unwrap();
        assert_eq!(file.grid.point(1, 0), (1.0, 6.0));
        assert_eq!(file.warnings.len(), 1);
    }

    #[test]
    fn test_excess_tokens_rejected_in_strict_mode() {
        let result = parse_p3dfmt(
            Cursor::new("1\n2 1\n0.0 1.0\n3.0 4.0 5.0\n"),
            &ReaderOptions::strict(),
        );
        match result {
            Err(P3dError::ExcessTokens {
                axis,
                row,
                expected,
                found,
            }) => {
                assert_eq!(axis, Axis::Y);
                assert_eq!((row, expected, found), (1, 2, 3));
            }
            other => panic!("Expected ExcessTokens, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_number_reports_line() {
        let err = parse("1\n2 1\n0.0 abc\n").unwrap_err();
        match err {
            P3dError::InvalidNumber { line, token } => {
                assert_eq!(line, 3);
                assert_eq!(token, "abc");
            }
            other => panic!("Expected InvalidNumber, got {:?}", other),
        }
    }

    #[test]
    fn test_trailing_data_ignored() {
        let file = parse("1\n1 1\n2.5\n-1.5\nthis is not read\n").unwrap();
        assert_eq!(file.grid.point(0, 0), (2.5, -1.5));
    }

    #[test]
    fn test_scientific_notation() {
        let file = parse("1\n2 1\n1.0e-3 -2.5E+02\n0 1E1\n").unwrap();
        assert_eq!(file.grid.point(0, 0), (1.0e-3, 0.0));
        assert_eq!(file.grid.point(1, 0), (-250.0, 10.0));
    }

    #[test]
    fn test_read_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"1
3 2
0.0 0.5 1.0
0.0 0.5 1.0
0.0 0.0 0.0
2.0 2.0 2.0"#
        )
        .unwrap();

        let p3d = read_p3dfmt_file(file.path(), &ReaderOptions::default()).unwrap();
        assert_eq!(p3d.grid.n_points(), 6);
        assert_eq!(p3d.grid.point(2, 1), (1.0, 2.0));
    }

    #[test]
    fn test_missing_file() {
        let result = read_p3dfmt_file(
            Path::new("/nonexistent/grid.p3dfmt"),
            &ReaderOptions::default(),
        );
        assert!(matches!(result, Err(P3dError::IoError(_))));
    }
}

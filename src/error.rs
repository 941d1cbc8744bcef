use core::fmt;

/// Result alias for `tastemap`.
pub type Result<T> = std::result::Result<T, Error>;

/// Structural errors returned by the embedding and axis-analysis primitives.
///
/// Numeric irregularities (slow convergence, degenerate axes, zero-variance
/// correlations, sparse metrics) are not errors; they are recorded in a
/// [`DiagnosticReport`](crate::diagnostics::DiagnosticReport) instead.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Input was empty.
    EmptyInput,

    /// Too few entities for the requested computation.
    InvalidInputSize {
        /// Number of entities provided.
        found: usize,
        /// Minimum number required.
        min: usize,
    },

    /// Matrix dimension mismatch.
    DimensionMismatch {
        /// Expected dimension.
        expected: usize,
        /// Found dimension.
        found: usize,
    },

    /// `d(row, col)` and `d(col, row)` disagree.
    NotSymmetric {
        /// Row index.
        row: usize,
        /// Column index.
        col: usize,
        /// Value above the diagonal.
        upper: f64,
        /// Value below the diagonal.
        lower: f64,
    },

    /// A diagonal entry is not zero.
    NonZeroDiagonal {
        /// Diagonal index.
        index: usize,
        /// Offending value.
        value: f64,
    },

    /// Negative or non-finite dissimilarity.
    InvalidDissimilarity {
        /// Row index.
        row: usize,
        /// Column index.
        col: usize,
        /// Offending value.
        value: f64,
    },

    /// The same entity id appears twice.
    DuplicateEntity(String),

    /// A nested mapping lacks an off-diagonal pair.
    MissingEntry {
        /// Row entity id.
        row: String,
        /// Column entity id.
        col: String,
    },

    /// Entity id not present in the embedding or among the matrix rows.
    UnknownEntity(String),

    /// Invalid parameter value.
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Error message.
        message: &'static str,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::EmptyInput => write!(f, "empty input provided"),
            Error::InvalidInputSize { found, min } => {
                write!(f, "need at least {min} entities, found {found}")
            }
            Error::DimensionMismatch { expected, found } => {
                write!(f, "dimension mismatch: expected {expected}, found {found}")
            }
            Error::NotSymmetric {
                row,
                col,
                upper,
                lower,
            } => write!(
                f,
                "matrix is not symmetric at ({row}, {col}): {upper} != {lower}"
            ),
            Error::NonZeroDiagonal { index, value } => {
                write!(f, "diagonal entry {index} is {value}, expected 0")
            }
            Error::InvalidDissimilarity { row, col, value } => {
                write!(f, "invalid dissimilarity at ({row}, {col}): {value}")
            }
            Error::DuplicateEntity(id) => write!(f, "duplicate entity id '{id}'"),
            Error::MissingEntry { row, col } => {
                write!(f, "missing dissimilarity between '{row}' and '{col}'")
            }
            Error::UnknownEntity(id) => write!(f, "unknown entity '{id}'"),
            Error::InvalidParameter { name, message } => {
                write!(f, "invalid parameter '{name}': {message}")
            }
        }
    }
}

impl std::error::Error for Error {}

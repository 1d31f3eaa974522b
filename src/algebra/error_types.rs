use thiserror::Error;

/// Error type returned by sparse matrix and sparse vector operations.
///
/// All variants indicate a violated calling contract, i.e. a bug in the
/// caller rather than a condition the numerical algorithms recover from.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MatrixError {
    /// A (row, column) index lies outside the matrix dimensions
    #[error("index ({row},{col}) out of range for {nrows}x{ncols} matrix")]
    IndexOutOfRange {
        row: usize,
        col: usize,
        nrows: usize,
        ncols: usize,
    },
    /// A sparse vector index lies outside the vector dimension
    #[error("index {index} out of range for vector of dimension {dim}")]
    SparseIndexOutOfRange { index: usize, dim: usize },
    /// Operand dimensions disagree
    #[error("dimension mismatch in {what}: expected {expected}, found {found}")]
    DimensionMismatch {
        what: &'static str,
        expected: usize,
        found: usize,
    },
    /// Update of an entry that was never inserted
    #[error("entry at ({row},{col}) does not exist")]
    EntryNotFound { row: usize, col: usize },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
/// Error type returned by raw compressed sparse row assembly.
pub enum SparseFormatError {
    /// Matrix dimension fields and/or array lengths are incompatible
    #[error("Matrix dimension fields and/or array lengths are incompatible")]
    IncompatibleDimension,
    #[error("Column value exceeds the matrix column dimension")]
    /// Column value exceeds the matrix column dimension, or columns
    /// are not strictly increasing within a row
    BadColval,
    #[error("Bad row pointer values")]
    /// Matrix row pointer values are defective
    BadRowptr,
}

/// Checks that `found` equals `expected`, reporting `what` otherwise.
#[inline]
pub(crate) fn check_dim(what: &'static str, expected: usize, found: usize) -> Result<(), MatrixError> {
    if expected != found {
        return Err(MatrixError::DimensionMismatch {
            what,
            expected,
            found,
        });
    }
    Ok(())
}

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Matrix orientation marker
#[derive(PartialEq, Eq, Copy, Clone, Debug)]
pub enum MatrixShape {
    /// Normal matrix orientation
    N,
    /// Transposed matrix orientation
    T,
}

/// A single `(row, col, value)` matrix entry.
///
/// Triplets are the interchange record between the coordinate
/// builder [`DokMatrix`](crate::algebra::DokMatrix) and the compressed
/// form [`CsrMatrix`](crate::algebra::CsrMatrix).
#[derive(PartialEq, Copy, Clone, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Triplet<T = f64> {
    pub row: usize,
    pub col: usize,
    pub value: T,
}

impl<T> Triplet<T> {
    pub fn new(row: usize, col: usize, value: T) -> Self {
        Triplet { row, col, value }
    }
}

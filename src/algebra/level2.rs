#![allow(non_snake_case)]

use crate::algebra::*;
use enum_dispatch::*;

/// The sparse matrix representations provided by this crate.
///
/// Wrapping a matrix in `AnySparseMatrix` lets callers hold either
/// representation behind a single type.  Supporting a further
/// representation means implementing [`SparseMatrix`] for it and adding
/// a variant here.
#[enum_dispatch(SparseMatrix<T>)]
#[derive(Debug, Clone)]
pub enum AnySparseMatrix<T>
where
    T: FloatT,
{
    Csr(CsrMatrix<T>),
    Dok(DokMatrix<T>),
}

/// Sparse matrix-vector multiply
///
/// Computes
///
/// ```text
/// y = alpha * op(A) * x + beta * y
/// ```
///
/// where `op(A)` is `A` for [`MatrixShape::N`] or `Aᵀ` for
/// [`MatrixShape::T`].  If `beta` is zero the prior contents of `y`
/// are ignored, including any NaN or Inf values.
///
/// Fails with [`MatrixError::DimensionMismatch`] unless `x.len()` equals
/// the number of columns and `y.len()` the number of rows of `op(A)`.
pub fn mul_mat_vec<T, M>(
    y: &mut [T],
    alpha: T,
    shape: MatrixShape,
    A: &M,
    x: &[T],
    beta: T,
) -> Result<(), MatrixError>
where
    T: FloatT,
    M: SparseMatrix<T> + ?Sized,
{
    let (m, n) = match shape {
        MatrixShape::N => (A.nrows(), A.ncols()),
        MatrixShape::T => (A.ncols(), A.nrows()),
    };
    check_dim("matrix-vector product input", n, x.len())?;
    check_dim("matrix-vector product output", m, y.len())?;

    A.gemv_unchecked(y, x, alpha, beta, shape);
    Ok(())
}

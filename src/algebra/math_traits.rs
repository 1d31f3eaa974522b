use super::{FloatT, MatrixError, MatrixShape};

// All dense vector math used by the solver methods goes
// through this trait, implemented generically on slices
// of FloatT.  Sparse kernels live with their types.

/// Vector operations on slices of [`FloatT`](crate::algebra::FloatT)

pub trait VectorMath {
    type T;

    /// Copy values from `src` to `self`
    fn copy_from(&mut self, src: &Self) -> &mut Self;

    /// set all elements to the same value
    fn set(&mut self, c: Self::T) -> &mut Self;

    /// Elementwise scaling.
    fn scale(&mut self, c: Self::T) -> &mut Self;

    /// Elementwise negation of entries.
    fn negate(&mut self) -> &mut Self;

    /// Dot product
    fn dot(&self, y: &Self) -> Self::T;

    /// Sum of squares of the elements.
    fn sumsq(&self) -> Self::T;

    /// 2-norm
    fn norm(&self) -> Self::T;

    /// Infinity norm
    fn norm_inf(&self) -> Self::T;

    /// max absolute difference between `self` and `b`
    fn norm_inf_diff(&self, b: &Self) -> Self::T;

    /// Checks if all elements are finite, i.e. no Infs or NaNs
    fn is_finite(&self) -> bool;

    //blas-like vector ops
    //--------------------

    /// BLAS-like shift and scale in place.  Produces `self = a*x+b*self`
    fn axpby(&mut self, a: Self::T, x: &Self, b: Self::T) -> &mut Self;

    /// BLAS-like update.  Produces `self = self + a*x`
    fn axpy(&mut self, a: Self::T, x: &Self) -> &mut Self;
}

/// Sparse matrix representations usable as the operand of
/// [`mul_mat_vec`](crate::algebra::mul_mat_vec).
///
/// Every representation reports its shape, supports bounds-checked
/// element access and provides its own matrix-vector kernel.  The
/// closed set of representations shipped with the crate is collected
/// in [`AnySparseMatrix`](crate::algebra::AnySparseMatrix).

#[enum_dispatch::enum_dispatch]
pub trait SparseMatrix<T>
where
    T: FloatT,
{
    /// number of rows
    fn nrows(&self) -> usize;

    /// number of columns
    fn ncols(&self) -> usize;

    /// number of stored entries
    fn nnz(&self) -> usize;

    /// Value at `(row, col)`, zero if there is no stored entry.
    fn at(&self, row: usize, col: usize) -> Result<T, MatrixError>;

    /// Representation specific kernel for `y = a*op(self)*x + b*y`.
    ///
    /// Callers must have checked that `x` and `y` are compatible with
    /// the dimensions of `op(self)`.  Use
    /// [`mul_mat_vec`](crate::algebra::mul_mat_vec) for a checked product.
    fn gemv_unchecked(&self, y: &mut [T], x: &[T], a: T, b: T, shape: MatrixShape);

    /// `(nrows, ncols)`
    fn size(&self) -> (usize, usize) {
        (self.nrows(), self.ncols())
    }

    /// true if `nrows == ncols`
    fn is_square(&self) -> bool {
        self.nrows() == self.ncols()
    }
}

use crate::algebra::*;
use std::iter::zip;

impl<T: FloatT> SparseMatrix<T> for CsrMatrix<T> {
    fn nrows(&self) -> usize {
        self.m
    }
    fn ncols(&self) -> usize {
        self.n
    }
    fn nnz(&self) -> usize {
        self.rowptr[self.m]
    }

    fn at(&self, row: usize, col: usize) -> Result<T, MatrixError> {
        Ok(self.get_entry((row, col))?.unwrap_or_else(T::zero))
    }

    fn gemv_unchecked(&self, y: &mut [T], x: &[T], a: T, b: T, shape: MatrixShape) {
        match shape {
            MatrixShape::N => _csr_axpby_N(self, y, x, a, b),
            MatrixShape::T => _csr_axpby_T(self, y, x, a, b),
        }
    }
}

// scale y by b, ignoring its prior contents when b == 0
fn _scale_or_clear<T: FloatT>(y: &mut [T], b: T) {
    if b == T::zero() {
        y.fill(T::zero());
    } else if b == T::one() {
    } else if b == -T::one() {
        y.negate();
    } else {
        y.scale(b);
    }
}

// sparse matrix-vector multiply, no transpose
#[allow(non_snake_case)]
fn _csr_axpby_N<T: FloatT>(A: &CsrMatrix<T>, y: &mut [T], x: &[T], a: T, b: T) {
    //first do the b*y part
    _scale_or_clear(y, b);

    // if a is zero, we're done
    if a == T::zero() {
        return;
    }

    assert_eq!(A.nzval.len(), A.rowptr[A.m]);
    assert_eq!(x.len(), A.n);
    assert_eq!(y.len(), A.m);

    //y += A*x, one row at a time
    for (i, yi) in y.iter_mut().enumerate() {
        let first = A.rowptr[i];
        let last = A.rowptr[i + 1];
        let cols = &A.colval[first..last];
        let vals = &A.nzval[first..last];

        let sum = zip(cols, vals).fold(T::zero(), |acc, (&j, &Aij)| acc + Aij * x[j]);
        *yi += a * sum;
    }
}

// sparse matrix-vector multiply, transposed.  The row-major layout
// has no column view, so each row is scattered into y.  Every stored
// entry is multiplied, also for x[i] == 0, so that non-finite entries
// propagate as in the untransposed product
#[allow(non_snake_case)]
fn _csr_axpby_T<T: FloatT>(A: &CsrMatrix<T>, y: &mut [T], x: &[T], a: T, b: T) {
    //first do the b*y part
    _scale_or_clear(y, b);

    // if a is zero, we're done
    if a == T::zero() {
        return;
    }

    assert_eq!(A.nzval.len(), A.rowptr[A.m]);
    assert_eq!(x.len(), A.m);
    assert_eq!(y.len(), A.n);

    for (i, &xi) in x.iter().enumerate() {
        let axi = a * xi;
        let (first, last) = (A.rowptr[i], A.rowptr[i + 1]);
        for (&j, &Aij) in zip(&A.colval[first..last], &A.nzval[first..last]) {
            y[j] += axi * Aij;
        }
    }
}

#![allow(non_snake_case)]

use crate::algebra::{check_dim, FloatT, MatrixError};
use std::iter::zip;

/// Sparse vector type
///
/// A vector of dimension `n` holding its nonzero values `nzval` together
/// with their indices `nzind`.  Indices must be unique but need not be
/// sorted.  Uniqueness is not checked; kernels that write into a dense
/// vector resolve duplicates in storage order.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SparseVector<T = f64> {
    /// vector dimension
    pub n: usize,
    /// vector of entry indices
    pub nzind: Vec<usize>,
    /// vector of non-zero vector elements
    pub nzval: Vec<T>,
}

/// Borrowed view of a sparse vector, e.g. of a single row of a
/// [`CsrMatrix`](crate::algebra::CsrMatrix).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SparseVectorView<'a, T = f64> {
    pub n: usize,
    pub nzind: &'a [usize],
    pub nzval: &'a [T],
}

impl<T> SparseVector<T>
where
    T: FloatT,
{
    /// Creates a sparse vector of dimension `n` from its nonzero
    /// values and their indices.
    pub fn new(n: usize, nzval: Vec<T>, nzind: Vec<usize>) -> Result<Self, MatrixError> {
        check_dim("sparse vector indices", nzval.len(), nzind.len())?;
        if nzval.len() > n {
            return Err(MatrixError::DimensionMismatch {
                what: "sparse vector entries",
                expected: n,
                found: nzval.len(),
            });
        }
        if let Some(&index) = nzind.iter().find(|&&i| i >= n) {
            return Err(MatrixError::SparseIndexOutOfRange { index, dim: n });
        }
        Ok(SparseVector { n, nzind, nzval })
    }

    /// An empty sparse vector of dimension `n`
    pub fn zeros(n: usize) -> Self {
        SparseVector {
            n,
            nzind: Vec::new(),
            nzval: Vec::new(),
        }
    }

    /// Creates a `SparseVector` from the nonzeros of a dense slice.
    pub fn from_dense(values: &[T]) -> Self {
        let (nzind, nzval) = values
            .iter()
            .enumerate()
            .filter(|&(_, &v)| v != T::zero())
            .map(|(i, &v)| (i, v))
            .unzip();

        SparseVector {
            n: values.len(),
            nzind,
            nzval,
        }
    }

    /// Appends the value `val` at index `idx`.
    pub fn push(&mut self, val: T, idx: usize) -> Result<(), MatrixError> {
        if idx >= self.n {
            return Err(MatrixError::SparseIndexOutOfRange {
                index: idx,
                dim: self.n,
            });
        }
        self.nzval.push(val);
        self.nzind.push(idx);
        Ok(())
    }

    pub fn nnz(&self) -> usize {
        self.nzval.len()
    }

    pub fn view(&self) -> SparseVectorView<'_, T> {
        SparseVectorView {
            n: self.n,
            nzind: &self.nzind,
            nzval: &self.nzval,
        }
    }

    /// Gathers the entries of `y` at `indices` into a new sparse
    /// vector, i.e. `x[k] = y[indices[k]]`, preserving index order.
    pub fn gather(y: &[T], indices: &[usize]) -> Result<Self, MatrixError> {
        check_indices(indices, y.len())?;
        let nzval = indices.iter().map(|&i| y[i]).collect();
        Ok(SparseVector {
            n: y.len(),
            nzind: indices.to_vec(),
            nzval,
        })
    }

    /// As [`gather`](SparseVector::gather), and additionally sets the
    /// gathered entries of `y` to zero.
    pub fn gather_zero(y: &mut [T], indices: &[usize]) -> Result<Self, MatrixError> {
        check_indices(indices, y.len())?;
        let nzval = indices
            .iter()
            .map(|&i| std::mem::replace(&mut y[i], T::zero()))
            .collect();
        Ok(SparseVector {
            n: y.len(),
            nzind: indices.to_vec(),
            nzval,
        })
    }

    /// see [`SparseVectorView::dot`]
    pub fn dot(&self, y: &[T]) -> Result<T, MatrixError> {
        self.view().dot(y)
    }

    /// see [`SparseVectorView::axpy`]
    pub fn axpy(&self, alpha: T, y: &mut [T]) -> Result<(), MatrixError> {
        self.view().axpy(alpha, y)
    }

    /// see [`SparseVectorView::scatter`]
    pub fn scatter(&self, y: &mut [T]) -> Result<(), MatrixError> {
        self.view().scatter(y)
    }
}

impl<'a, T> SparseVectorView<'a, T>
where
    T: FloatT,
{
    pub fn nnz(&self) -> usize {
        self.nzval.len()
    }

    /// Dot product with the dense vector `y`
    ///
    /// ```text
    /// sum_k x.nzval[k] * y[x.nzind[k]]
    /// ```
    pub fn dot(&self, y: &[T]) -> Result<T, MatrixError> {
        check_dim("sparse dot", self.n, y.len())?;
        Ok(zip(self.nzval, self.nzind).fold(T::zero(), |acc, (&v, &i)| acc + v * y[i]))
    }

    /// Adds the scaled sparse vector to the dense vector `y`
    ///
    /// ```text
    /// y[x.nzind[k]] += alpha * x.nzval[k]
    /// ```
    ///
    /// If `alpha` is zero, `y` is not modified at all.
    pub fn axpy(&self, alpha: T, y: &mut [T]) -> Result<(), MatrixError> {
        check_dim("sparse axpy", self.n, y.len())?;
        self.axpy_unchecked(alpha, y);
        Ok(())
    }

    /// Copies the stored values into the dense vector `y`
    ///
    /// ```text
    /// y[x.nzind[k]] = x.nzval[k]
    /// ```
    pub fn scatter(&self, y: &mut [T]) -> Result<(), MatrixError> {
        check_dim("sparse scatter", self.n, y.len())?;
        for (&v, &i) in zip(self.nzval, self.nzind) {
            y[i] = v;
        }
        Ok(())
    }

    #[inline]
    pub(crate) fn axpy_unchecked(&self, alpha: T, y: &mut [T]) {
        if alpha == T::zero() {
            return;
        }
        for (&v, &i) in zip(self.nzval, self.nzind) {
            y[i] += alpha * v;
        }
    }
}

fn check_indices(indices: &[usize], dim: usize) -> Result<(), MatrixError> {
    match indices.iter().find(|&&i| i >= dim) {
        Some(&index) => Err(MatrixError::SparseIndexOutOfRange { index, dim }),
        None => Ok(()),
    }
}

impl<T> From<SparseVector<T>> for Vec<T>
where
    T: FloatT,
{
    fn from(sv: SparseVector<T>) -> Vec<T> {
        let mut v = vec![T::zero(); sv.n];
        for (i, nz) in zip(sv.nzind, sv.nzval) {
            v[i] = nz;
        }
        v
    }
}

#[test]
fn test_sparsevector_from_dense() {
    let v = vec![0.1, 0.3, 0.0, 0.0, 0.4, 0.0];

    let vs = SparseVector::from_dense(&v);

    assert_eq!(vs.n, v.len());
    assert_eq!(vs.nzind, vec![0, 1, 4]);
    assert_eq!(vs.nzval, vec![0.1, 0.3, 0.4]);

    let vback: Vec<f64> = vs.into();
    assert_eq!(v, vback);
}

#[test]
fn test_sparsevector_new_checks() {
    assert!(SparseVector::<f64>::new(3, vec![1., 2.], vec![0]).is_err());
    assert!(SparseVector::<f64>::new(1, vec![1., 2.], vec![0, 0]).is_err());
    assert_eq!(
        SparseVector::<f64>::new(3, vec![1.], vec![3]),
        Err(MatrixError::SparseIndexOutOfRange { index: 3, dim: 3 })
    );

    let mut x = SparseVector::<f64>::new(3, vec![1.], vec![2]).unwrap();
    x.push(5., 0).unwrap();
    assert_eq!(x.nzind, vec![2, 0]);
    assert!(x.push(5., 3).is_err());
}

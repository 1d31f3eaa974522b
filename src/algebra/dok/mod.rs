#![allow(non_snake_case)]

use crate::algebra::{FloatT, MatrixError, MatrixShape, SparseMatrix, Triplet, VectorMath};
use std::collections::HashMap;

/// Sparse matrix in "dictionary of keys" coordinate format
///
/// A `DokMatrix` is a mutable builder: entries are inserted, overwritten
/// or accumulated one at a time in any order, after which the matrix is
/// converted into a [`CsrMatrix`](crate::algebra::CsrMatrix) for
/// computation.
///
/// __Example usage__ : To construct the 2 x 2 matrix
/// ```text
/// A = [0.  1.]
///     [2.  0.]
/// ```
///
/// ```no_run
/// use krylov::algebra::*;
///
/// let mut A = DokMatrix::<f64>::new(2, 2);
/// A.set(0, 1, 1.).unwrap();
/// A.set(1, 0, 2.).unwrap();
/// let A = CsrMatrix::from(&A);
/// ```

#[derive(Debug, Clone, PartialEq)]
pub struct DokMatrix<T = f64> {
    /// number of rows
    pub m: usize,
    /// number of columns
    pub n: usize,
    data: HashMap<(usize, usize), T>,
}

impl<T> DokMatrix<T>
where
    T: FloatT,
{
    /// An empty `m x n` matrix
    pub fn new(m: usize, n: usize) -> Self {
        DokMatrix {
            m,
            n,
            data: HashMap::new(),
        }
    }

    /// Inserts the value `v` at `(row, col)`, overwriting any
    /// existing entry.
    pub fn set(&mut self, row: usize, col: usize, v: T) -> Result<(), MatrixError> {
        self.check_bounds(row, col)?;
        self.data.insert((row, col), v);
        Ok(())
    }

    /// Adds `v` to the entry at `(row, col)`, inserting it if absent.
    pub fn add(&mut self, row: usize, col: usize, v: T) -> Result<(), MatrixError> {
        self.check_bounds(row, col)?;
        *self.data.entry((row, col)).or_insert_with(T::zero) += v;
        Ok(())
    }

    /// Overwrites an entry that was previously inserted.
    ///
    /// Fails with [`MatrixError::EntryNotFound`] if there is no entry
    /// at `(row, col)`, so that the sparsity pattern is never changed.
    pub fn update(&mut self, row: usize, col: usize, v: T) -> Result<(), MatrixError> {
        self.check_bounds(row, col)?;
        match self.data.get_mut(&(row, col)) {
            Some(entry) => {
                *entry = v;
                Ok(())
            }
            None => Err(MatrixError::EntryNotFound { row, col }),
        }
    }

    /// True if there is a stored entry at `(row, col)`
    pub fn contains(&self, row: usize, col: usize) -> bool {
        self.data.contains_key(&(row, col))
    }

    /// All stored entries, in no particular order
    pub fn triplets(&self) -> Vec<Triplet<T>> {
        self.data
            .iter()
            .map(|(&(row, col), &value)| Triplet { row, col, value })
            .collect()
    }

    fn check_bounds(&self, row: usize, col: usize) -> Result<(), MatrixError> {
        if row >= self.m || col >= self.n {
            return Err(MatrixError::IndexOutOfRange {
                row,
                col,
                nrows: self.m,
                ncols: self.n,
            });
        }
        Ok(())
    }
}

impl<T> SparseMatrix<T> for DokMatrix<T>
where
    T: FloatT,
{
    fn nrows(&self) -> usize {
        self.m
    }
    fn ncols(&self) -> usize {
        self.n
    }
    fn nnz(&self) -> usize {
        self.data.len()
    }

    fn at(&self, row: usize, col: usize) -> Result<T, MatrixError> {
        self.check_bounds(row, col)?;
        Ok(self.data.get(&(row, col)).copied().unwrap_or_else(T::zero))
    }

    fn gemv_unchecked(&self, y: &mut [T], x: &[T], a: T, b: T, shape: MatrixShape) {
        _dok_axpby(self, y, x, a, b, shape);
    }
}

// sparse matrix-vector multiply by walking the hash map.  Slow,
// but kept so the builder can be used directly as an operand
fn _dok_axpby<T: FloatT>(A: &DokMatrix<T>, y: &mut [T], x: &[T], a: T, b: T, shape: MatrixShape) {
    if b == T::zero() {
        y.fill(T::zero());
    } else if b != T::one() {
        y.scale(b);
    }

    if a == T::zero() {
        return;
    }

    match shape {
        MatrixShape::N => {
            for (&(row, col), &v) in A.data.iter() {
                y[row] += a * v * x[col];
            }
        }
        MatrixShape::T => {
            for (&(row, col), &v) in A.data.iter() {
                y[col] += a * v * x[row];
            }
        }
    }
}

#[test]
fn test_dok_set_add_update() {
    let mut A = DokMatrix::<f64>::new(3, 2);

    A.set(0, 1, 1.).unwrap();
    A.set(0, 1, 3.).unwrap();
    assert_eq!(A.at(0, 1).unwrap(), 3.);

    A.add(0, 1, 2.).unwrap();
    A.add(2, 0, -1.).unwrap();
    assert_eq!(A.at(0, 1).unwrap(), 5.);
    assert_eq!(A.at(2, 0).unwrap(), -1.);
    assert_eq!(A.at(1, 1).unwrap(), 0.);
    assert_eq!(A.nnz(), 2);

    A.update(2, 0, 7.).unwrap();
    assert_eq!(A.at(2, 0).unwrap(), 7.);
    assert_eq!(
        A.update(1, 0, 7.),
        Err(MatrixError::EntryNotFound { row: 1, col: 0 })
    );
    assert!(!A.contains(1, 0));
}

#[test]
fn test_dok_bounds() {
    let mut A = DokMatrix::<f64>::new(3, 2);
    let err = MatrixError::IndexOutOfRange {
        row: 0,
        col: 2,
        nrows: 3,
        ncols: 2,
    };
    assert_eq!(A.set(0, 2, 1.), Err(err.clone()));
    assert_eq!(A.add(0, 2, 1.), Err(err.clone()));
    assert_eq!(A.update(0, 2, 1.), Err(err.clone()));
    assert_eq!(A.at(0, 2), Err(err));
    assert!(A.at(3, 0).is_err());
}

#[test]
fn test_dok_triplets() {
    let mut A = DokMatrix::<f64>::new(2, 2);
    A.set(1, 0, 2.).unwrap();
    A.set(0, 1, 1.).unwrap();

    let mut t = A.triplets();
    t.sort_by_key(|t| (t.row, t.col));
    assert_eq!(t, vec![Triplet::new(0, 1, 1.), Triplet::new(1, 0, 2.)]);
}

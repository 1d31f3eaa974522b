#![allow(non_snake_case)]

use crate::algebra::{DokMatrix, FloatT, MatrixError, SparseFormatError, SparseVectorView};

#[cfg(feature = "serde")]
use serde::{de::DeserializeOwned, Deserialize, Serialize};

/// Sparse matrix in standard Compressed Sparse Row (CSR) format
///
/// The usual way to make a `CsrMatrix` is to assemble a
/// [`DokMatrix`](crate::algebra::DokMatrix) and convert it.  The raw-array
/// constructor [`new`](CsrMatrix::new) is provided as a fast path for data
/// that is already in compressed form.
///
/// __Example usage__ : To construct the 3 x 3 matrix
/// ```text
/// A = [0.  1.  0.]
///     [2.  0. -4.]
///     [0.  0.  3.]
/// ```
///
/// ```no_run
/// use krylov::algebra::CsrMatrix;
///
/// let A : CsrMatrix<f64> = CsrMatrix::new(
///    3,                         // m
///    3,                         // n
///    vec![0, 1, 3, 4],          //rowptr
///    vec![1, 0, 2, 2],          //colval
///    vec![1., 2., -4., 3.],     //nzval
///  );
///
/// // optional correctness check
/// assert!(A.check_format().is_ok());
///
/// ```
///

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(bound = "T: Serialize + DeserializeOwned"))]
pub struct CsrMatrix<T = f64> {
    /// number of rows
    pub m: usize,
    /// number of columns
    pub n: usize,
    /// CSR format row pointer.
    ///
    /// Ths field has length `m+1`. The last entry corresponds
    /// to the the number of nonzeros and agrees with the lengths
    /// of the `colval` and `nzval` fields.
    pub rowptr: Vec<usize>,
    /// vector of column indices
    pub colval: Vec<usize>,
    /// vector of non-zero matrix elements
    pub nzval: Vec<T>,
}

impl<T> CsrMatrix<T>
where
    T: FloatT,
{
    /// `CsrMatrix` constructor.
    ///
    /// # Panics
    /// Makes rudimentary dimensional compatibility checks and panics on
    /// failure.   This constructor does __not__
    /// ensure that column indices are all in bounds or that data is arranged
    /// such that entries within each row appear in order of increasing
    /// column index.   Use [`check_format`](CsrMatrix::check_format) for that.
    ///

    pub fn new(m: usize, n: usize, rowptr: Vec<usize>, colval: Vec<usize>, nzval: Vec<T>) -> Self {
        assert_eq!(colval.len(), nzval.len());
        assert_eq!(rowptr.len(), m + 1);
        assert_eq!(rowptr[m], colval.len());
        CsrMatrix {
            m,
            n,
            rowptr,
            colval,
            nzval,
        }
    }

    /// An `m x n` matrix with no stored entries
    pub fn zeros(m: usize, n: usize) -> Self {
        CsrMatrix::new(m, n, vec![0; m + 1], Vec::new(), Vec::new())
    }

    /// Identity matrix of size `n`
    pub fn identity(n: usize) -> Self {
        let rowptr = (0usize..=n).collect();
        let colval = (0usize..n).collect();
        let nzval = vec![T::one(); n];

        CsrMatrix::new(n, n, rowptr, colval, nzval)
    }

    /// Check that matrix data is correctly formatted.
    pub fn check_format(&self) -> Result<(), SparseFormatError> {
        if self.colval.len() != self.nzval.len() {
            return Err(SparseFormatError::IncompatibleDimension);
        }

        if self.rowptr.is_empty()
            || (self.rowptr.len() - 1) != self.m
            || self.rowptr[self.m] != self.colval.len()
        {
            return Err(SparseFormatError::IncompatibleDimension);
        }

        //check for rowptr monotonicity
        if self.rowptr.windows(2).any(|c| c[0] > c[1]) {
            return Err(SparseFormatError::BadRowptr);
        }

        //check for colval monotonicity within each row
        for row in 0..self.m {
            let rng = self.rowptr[row]..self.rowptr[row + 1];
            if self.colval[rng].windows(2).any(|c| c[0] >= c[1]) {
                return Err(SparseFormatError::BadColval);
            }
        }
        //check for column values out of bounds
        if !self.colval.iter().all(|c| c < &self.n) {
            return Err(SparseFormatError::BadColval);
        }

        Ok(())
    }

    /// View of the stored entries of row `i` as a sparse vector
    /// of dimension `n`.
    ///
    /// # Panics
    /// Panics if `i` is out of bounds.
    pub fn row(&self, i: usize) -> SparseVectorView<'_, T> {
        let rng = self.rowptr[i]..self.rowptr[i + 1];
        SparseVectorView {
            n: self.n,
            nzind: &self.colval[rng.clone()],
            nzval: &self.nzval[rng],
        }
    }

    /// Returns the value at the given (row,col) index as an Option.
    /// Returns None if the given index is not a structural nonzero.
    pub fn get_entry(&self, idx: (usize, usize)) -> Result<Option<T>, MatrixError> {
        let (row, col) = idx;
        if row >= self.m || col >= self.n {
            return Err(MatrixError::IndexOutOfRange {
                row,
                col,
                nrows: self.m,
                ncols: self.n,
            });
        }

        let first = self.rowptr[row];
        let last = self.rowptr[row + 1];
        let cols_in_this_row = &self.colval[first..last];
        match cols_in_this_row.binary_search(&col) {
            Ok(idx) => Ok(Some(self.nzval[first + idx])),
            Err(_) => Ok(None),
        }
    }
}

/// Compression of a coordinate matrix.  Entries are sorted by row
/// and then by column, which gives each row strictly increasing
/// column indices.
impl<T> From<&DokMatrix<T>> for CsrMatrix<T>
where
    T: FloatT,
{
    fn from(dok: &DokMatrix<T>) -> Self {
        let mut triplets = dok.triplets();
        triplets.sort_by(|a, b| (a.row, a.col).cmp(&(b.row, b.col)));

        let (m, n) = (dok.m, dok.n);
        let nnz = triplets.len();
        let mut rowptr = vec![0; m + 1];
        let mut colval = vec![0; nnz];
        let mut nzval = vec![T::zero(); nnz];

        // count the number of entries in each row
        for t in triplets.iter() {
            rowptr[t.row] += 1;
        }

        // exclusive cumsum of the counts
        let mut sum = 0;
        for ptr in rowptr.iter_mut().take(m) {
            let count = *ptr;
            *ptr = sum;
            sum += count;
        }
        rowptr[m] = nnz;

        // place each entry at the next free slot of its row
        let mut offset = vec![0; m];
        for t in triplets.iter() {
            let dest = rowptr[t.row] + offset[t.row];
            colval[dest] = t.col;
            nzval[dest] = t.value;
            offset[t.row] += 1;
        }

        CsrMatrix {
            m,
            n,
            rowptr,
            colval,
            nzval,
        }
    }
}

impl<T> From<DokMatrix<T>> for CsrMatrix<T>
where
    T: FloatT,
{
    fn from(dok: DokMatrix<T>) -> Self {
        CsrMatrix::from(&dok)
    }
}

#[test]
fn test_csr_get_entry() {
    // A =
    //[ ⋅   1.0    ⋅    2.0   ⋅ ]
    //[3.0   ⋅     ⋅     ⋅    ⋅ ]
    //[ ⋅   4.0   5.0    ⋅   6.0]

    let A = CsrMatrix::new(
        3,                              // m
        5,                              // n
        vec![0, 2, 3, 6],               // rowptr
        vec![1, 3, 0, 1, 2, 4],         // colval
        vec![1., 2., 3., 4., 5., 6.],   // nzval
    );
    assert!(A.check_format().is_ok());

    assert_eq!(A.get_entry((0, 1)).unwrap(), Some(1.));
    assert_eq!(A.get_entry((0, 3)).unwrap(), Some(2.));
    assert_eq!(A.get_entry((1, 0)).unwrap(), Some(3.));
    assert_eq!(A.get_entry((2, 4)).unwrap(), Some(6.));

    assert_eq!(A.get_entry((0, 0)).unwrap(), None);
    assert_eq!(A.get_entry((1, 4)).unwrap(), None);
    assert_eq!(A.get_entry((2, 3)).unwrap(), None);

    assert!(A.get_entry((3, 0)).is_err());
    assert!(A.get_entry((0, 5)).is_err());
}

#[test]
fn test_csr_check_format() {
    // unsorted columns in row 0
    let A = CsrMatrix::new(2, 3, vec![0, 2, 3], vec![2, 1, 0], vec![1., 2., 3.]);
    assert_eq!(A.check_format(), Err(SparseFormatError::BadColval));

    // column out of range
    let A = CsrMatrix::new(2, 3, vec![0, 1, 2], vec![0, 3], vec![1., 2.]);
    assert_eq!(A.check_format(), Err(SparseFormatError::BadColval));

    // decreasing row pointer
    let A = CsrMatrix::new(2, 3, vec![0, 2, 1], vec![0], vec![1.]);
    assert_eq!(A.check_format(), Err(SparseFormatError::BadRowptr));
}

#[test]
fn test_csr_from_dok() {
    let mut dok = DokMatrix::<f64>::new(4, 3);
    for &(i, j, v) in &[(0, 1, 1.), (1, 0, 2.), (3, 0, 3.), (2, 2, 4.), (3, 1, 5.)] {
        dok.set(i, j, v).unwrap();
    }

    let A = CsrMatrix::from(&dok);
    assert!(A.check_format().is_ok());
    assert_eq!(A.rowptr, vec![0, 1, 2, 3, 5]);
    assert_eq!(A.colval, vec![1, 0, 2, 0, 1]);
    assert_eq!(A.nzval, vec![1., 2., 4., 3., 5.]);

    let row = A.row(3);
    assert_eq!(row.n, 3);
    assert_eq!(row.nzind, &[0, 1]);
    assert_eq!(row.nzval, &[3., 5.]);
}

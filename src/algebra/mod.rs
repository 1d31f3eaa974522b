//! Sparse matrix and vector types and the BLAS-like kernels operating on them.
//!
//! Matrices are assembled as a [`DokMatrix`] and compressed once into a
//! [`CsrMatrix`].  Both representations implement [`SparseMatrix`], which is
//! the operand type of the level-2 product [`mul_mat_vec`].  The level-1
//! kernels between sparse and dense vectors are implemented on
//! [`SparseVector`] and its borrowed [`SparseVectorView`].

// first import and flatten the solver's collection
// of core numeric types and matrix / vector traits.

mod error_types;
mod floats;
mod math_traits;
mod matrix_types;
mod vecmath;
pub use error_types::*;
pub use floats::*;
pub use math_traits::*;
pub use matrix_types::*;

// sparse storage types and their kernels

mod csr;
mod dok;
mod level2;
mod sparsevector;
pub use csr::*;
pub use dok::*;
pub use level2::*;
pub use sparsevector::*;

#[cfg(test)]
mod tests;

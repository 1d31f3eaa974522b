//! __krylov__ is a Rust library of sparse matrix types and a resumable engine
//! for iterative Krylov subspace solvers of linear systems
//!
//! $$
//! Ax = b, \qquad A \in \mathbb{R}^{n \times n} \text{ sparse}.
//! $$
//!
//! ## Features
//!
//! * __Sparse storage__: matrices are assembled in a mutable coordinate
//!   ("dictionary of keys") form [`DokMatrix`](crate::algebra::DokMatrix) and
//!   converted once into an immutable compressed sparse row form
//!   [`CsrMatrix`](crate::algebra::CsrMatrix) for computation.
//!
//! * __Sparse BLAS-like kernels__: level-1 operations between sparse and dense
//!   vectors and a level-2 matrix-vector product `y = αop(A)x + βy` that
//!   dispatches on the matrix representation.
//!
//! * __Resumable solver methods__: a Krylov method such as
//!   [`ConjugateGradient`](crate::solver::ConjugateGradient) never touches the
//!   matrix.  It is an explicit state machine which suspends whenever it needs
//!   a matrix-vector product, a preconditioner solve or a convergence check,
//!   and the [solver engine](crate::solver::IterativeSolver) performs that
//!   operation before resuming it.
//!
//! ## Example
//!
//! ```no_run
//! use krylov::algebra::*;
//! use krylov::solver::*;
//!
//! let mut dok = DokMatrix::<f64>::new(2, 2);
//! dok.set(0, 0, 4.).unwrap();
//! dok.set(0, 1, 1.).unwrap();
//! dok.set(1, 0, 1.).unwrap();
//! dok.set(1, 1, 3.).unwrap();
//! let A = CsrMatrix::from(&dok);
//!
//! let b = [1., 2.];
//! let mut method = ConjugateGradient::new();
//! let result = solve(&A, &b, None, None, &mut method).unwrap();
//! assert_eq!(result.status, SolverStatus::Solved);
//! ```
//!
//! # License
//!
//! Licensed under the BSD 3-Clause license.

//Rust hates greek characters
#![allow(confusable_idents)]
#![allow(mixed_script_confusables)]

const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod algebra;
pub mod io;
pub mod solver;
pub mod timers;

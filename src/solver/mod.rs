//! Iterative solvers for sparse linear systems.
//!
//! The [solver engine](IterativeSolver) drives a Krylov [method](core::traits::Method)
//! implemented as a resumable state machine.  Methods ask for
//! matrix-vector products, preconditioner solves and convergence checks
//! through [`Operation`] requests, and the engine carries them out on the
//! shared [`Context`] workspace.

pub mod core;
pub mod methods;
pub mod preconditioners;

//partially flatten top level pieces
pub use self::core::traits::Method;
pub use self::core::*;
pub use methods::*;
pub use preconditioners::*;

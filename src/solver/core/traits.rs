//! Trait implemented by the Krylov methods driven by the solver engine.

use super::{Context, Operation, SolverError};
use crate::algebra::FloatT;
use enum_dispatch::*;

/// A Krylov method written as a resumable state machine.
///
/// The solver driver calls [`init`](Method::init) once the initial
/// residual is in place, and afterwards calls
/// [`iterate`](Method::iterate) every time it has carried out the
/// [`Operation`] the method last asked for.  The method records in
/// its own state where it has to continue, so each call is an ordinary
/// synchronous function call.
///
/// Implementations read and write the workspace vectors of the
/// [`Context`] but never perform matrix-vector products or
/// preconditioner solves themselves.

#[enum_dispatch]
pub trait Method<T: FloatT> {
    /// Resets the method for a new solve and returns the first request.
    ///
    /// On entry `ctx.x` holds the initial guess and `ctx.residual`
    /// holds `b - A*x`.
    fn init(&mut self, ctx: &mut Context<T>) -> Operation;

    /// Resumes the method after the driver has performed the
    /// requested operation, returning the next request.
    ///
    /// Fails with [`SolverError::Breakdown`] if the recurrence cannot
    /// be continued.
    fn iterate(&mut self, ctx: &mut Context<T>) -> Result<Operation, SolverError>;

    /// short name used in solver output
    fn name(&self) -> &'static str;
}

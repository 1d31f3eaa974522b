#![allow(non_snake_case)]

use super::info_print::*;
use super::traits::Method;
use super::*;
use crate::algebra::*;
use crate::io::{ConfigurablePrintTarget, PrintTarget};
use crate::solver::preconditioners::{IdentityPreconditioner, Preconditioner};
use crate::timers::*;
use thiserror::Error;
use tracing::{debug, trace, warn};

#[cfg(feature = "serde")]
use serde::{de::DeserializeOwned, Deserialize, Serialize};

// ---------------------------------
// Solver status type
// ---------------------------------

/// Status of solver at termination

#[repr(u32)]
#[derive(PartialEq, Eq, Clone, Debug, Copy)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SolverStatus {
    /// Problem is not solved (solver hasn't run).
    Unsolved,
    /// Relative residual is below the configured tolerance.
    Solved,
    /// Iteration limit reached before the tolerance was met.
    IterationLimitExceeded,
    /// The method recurrence broke down.  The solution returned is the
    /// last iterate before the breakdown.
    Breakdown,
}

impl std::fmt::Display for SolverStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl Default for SolverStatus {
    fn default() -> Self {
        SolverStatus::Unsolved
    }
}

/// Error type returned by the iterative solver
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolverError {
    /// The system is empty, the matrix is not square or a vector
    /// does not have the dimension of the matrix
    #[error("invalid problem dimension: {0}")]
    InvalidDimension(&'static str),
    /// A matrix kernel rejected its operands
    #[error(transparent)]
    Matrix(#[from] MatrixError),
    /// The solver settings are not valid
    #[error("invalid settings: {0}")]
    Settings(#[from] SettingsError),
    /// The iteration cap was reached before convergence
    #[error("no convergence after {iterations} iterations (relative residual {residual:e})")]
    IterationLimitExceeded { iterations: usize, residual: f64 },
    /// The method recurrence cannot be continued
    #[error("method breakdown: {0}")]
    Breakdown(&'static str),
}

// ---------------------------------
// Solve statistics and results
// ---------------------------------

/// Counters accumulated by the solver driver

#[derive(Default, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(bound = "T: Serialize + DeserializeOwned"))]
pub struct SolveStats<T> {
    /// completed convergence checks
    pub iterations: usize,
    /// matrix-vector products, forward and transposed, including the
    /// one forming the initial residual
    pub mat_vec_multiplies: usize,
    /// preconditioner applications, forward and transposed
    pub preconditioner_solves: usize,
    /// most recent relative residual `‖b - A*x‖ / ‖b‖`
    pub residual: T,
}

/// Outcome of an iterative solve
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(bound = "T: Serialize + DeserializeOwned"))]
pub struct SolveResult<T> {
    /// final iterate
    pub x: Vec<T>,
    pub stats: SolveStats<T>,
    pub status: SolverStatus,
    /// wall clock time in seconds
    pub solve_time: f64,
}

impl<T> SolveResult<T>
where
    T: FloatT,
{
    /// Converts any status other than [`Solved`](SolverStatus::Solved)
    /// into an error, for callers that treat non-convergence as a
    /// failure.
    pub fn into_converged(self) -> Result<Self, SolverError> {
        match self.status {
            SolverStatus::Solved => Ok(self),
            SolverStatus::Breakdown => Err(SolverError::Breakdown("method breakdown")),
            _ => Err(SolverError::IterationLimitExceeded {
                iterations: self.stats.iterations,
                residual: self.stats.residual.to_f64().unwrap_or(f64::NAN),
            }),
        }
    }
}

// ---------------------------------
// Iterative solver
// ---------------------------------

/// Driver for Krylov methods.
///
/// The solver owns the settings, the preconditioner, the print target
/// for verbose output and a [`Context`] workspace that is kept between
/// solves, so that repeated solves of one dimension do not reallocate.
///
/// ```no_run
/// use krylov::algebra::*;
/// use krylov::solver::*;
///
/// let mut A = DokMatrix::<f64>::new(2, 2);
/// A.set(0, 0, 4.).unwrap();
/// A.set(0, 1, 1.).unwrap();
/// A.set(1, 0, 1.).unwrap();
/// A.set(1, 1, 3.).unwrap();
/// let A = CsrMatrix::from(&A);
///
/// let mut solver = IterativeSolver::new(SolverSettings::default()).unwrap();
/// let mut method = ConjugateGradient::new();
/// let result = solver.solve(&A, &[1., 2.], None, &mut method).unwrap();
/// ```
pub struct IterativeSolver<T: FloatT> {
    pub settings: SolverSettings<T>,
    preconditioner: Box<dyn Preconditioner<T>>,
    context: Context<T>,
    stream: PrintTarget,
}

impl<T> IterativeSolver<T>
where
    T: FloatT,
{
    /// Creates a solver with the identity preconditioner.
    pub fn new(settings: SolverSettings<T>) -> Result<Self, SolverError> {
        settings.validate()?;
        Ok(Self {
            settings,
            preconditioner: Box::new(IdentityPreconditioner::new()),
            context: Context::new(),
            stream: PrintTarget::default(),
        })
    }

    /// Replaces the preconditioner used by subsequent solves.
    pub fn set_preconditioner(&mut self, preconditioner: Box<dyn Preconditioner<T>>) {
        self.preconditioner = preconditioner;
    }

    /// workspace left behind by the most recent solve
    pub fn context(&self) -> &Context<T> {
        &self.context
    }

    /// Solves `A*x = b` with `method`, starting from `x_init` or from
    /// zero if no initial guess is given.
    ///
    /// Returns `Ok` whenever the solve ran, whatever the outcome.  The
    /// [`status`](SolveResult::status) tells whether the tolerance was
    /// met.  Errors are reserved for invalid inputs.
    pub fn solve<M, K>(
        &mut self,
        A: &M,
        b: &[T],
        x_init: Option<&[T]>,
        method: &mut K,
    ) -> Result<SolveResult<T>, SolverError>
    where
        M: SparseMatrix<T> + ?Sized,
        K: Method<T> + ?Sized,
    {
        self.settings.validate()?;
        let n = check_dimensions(A, b, x_init)?;

        let Self {
            settings,
            preconditioner,
            context: ctx,
            stream,
        } = self;

        let tol = settings.tolerance;
        let max_iter = settings.iteration_limit(n);

        let mut timers = Timers::default();
        let mut stats = SolveStats::<T>::default();
        let status: SolverStatus;

        debug!(
            n,
            nnz = A.nnz(),
            method = method.name(),
            max_iter,
            "starting iterative solve"
        );

        if settings.verbose {
            report(print_banner(stream));
            report(print_configuration(
                stream,
                settings,
                n,
                A.nnz(),
                method.name(),
            ));
            report(print_status_header(stream));
        }

        timeit! {timers => "solve"; {

        // initial iterate and residual
        resize_workspace(&mut ctx.x, n);
        match x_init {
            Some(x0) => ctx.x.copy_from(x0),
            None => ctx.x.set(T::zero()),
        };
        resize_workspace(&mut ctx.residual, n);
        ctx.residual.copy_from(b);

        // the product vanishes for a zero guess
        if ctx.x.iter().any(|&v| v != T::zero()) {
            timeit! {timers => "matvec"; {
                mul_mat_vec(&mut ctx.residual, -T::one(), MatrixShape::N, A, &ctx.x, T::one())?;
            }}
            stats.mat_vec_multiplies += 1;
        }

        let bnorm = b.norm();
        stats.residual = relative_residual(&ctx.residual, bnorm);

        if stats.residual < tol {
            status = SolverStatus::Solved;
        } else {
            let mut op = method.init(ctx);

            loop {
                match op {
                    Operation::None => {}

                    Operation::ComputeMatrixVectorProduct => {
                        resize_workspace(&mut ctx.ap, n);
                        timeit! {timers => "matvec"; {
                            mul_mat_vec(&mut ctx.ap, T::one(), MatrixShape::N, A, &ctx.p, T::zero())?;
                        }}
                        stats.mat_vec_multiplies += 1;
                    }

                    Operation::ComputeTransposeMatrixVectorProduct => {
                        resize_workspace(&mut ctx.atp_tilde, n);
                        timeit! {timers => "matvec"; {
                            mul_mat_vec(&mut ctx.atp_tilde, T::one(), MatrixShape::T, A, &ctx.p_tilde, T::zero())?;
                        }}
                        stats.mat_vec_multiplies += 1;
                    }

                    Operation::ApplyPreconditioner => {
                        check_workspace("residual", n, &ctx.residual)?;
                        resize_workspace(&mut ctx.z, n);
                        timeit! {timers => "precond"; {
                            preconditioner.solve(&mut ctx.z, &ctx.residual);
                        }}
                        stats.preconditioner_solves += 1;
                    }

                    Operation::ApplyTransposePreconditioner => {
                        check_workspace("residual_tilde", n, &ctx.residual_tilde)?;
                        resize_workspace(&mut ctx.z_tilde, n);
                        timeit! {timers => "precond"; {
                            preconditioner.solve_transpose(&mut ctx.z_tilde, &ctx.residual_tilde);
                        }}
                        stats.preconditioner_solves += 1;
                    }

                    Operation::CheckConvergence => {
                        stats.iterations += 1;
                        stats.residual = relative_residual(&ctx.residual, bnorm);

                        trace!(
                            iteration = stats.iterations,
                            residual = %stats.residual,
                            "convergence check"
                        );
                        if settings.verbose {
                            notimeit! {timers; {
                                report(print_status(stream, &stats));
                            }}
                        }

                        if stats.residual < tol {
                            status = SolverStatus::Solved;
                            break;
                        }
                        if stats.iterations >= max_iter {
                            warn!(
                                iterations = stats.iterations,
                                residual = %stats.residual,
                                "iteration limit reached before convergence"
                            );
                            status = SolverStatus::IterationLimitExceeded;
                            break;
                        }
                    }
                }

                op = match method.iterate(ctx) {
                    Ok(op) => op,
                    Err(SolverError::Breakdown(reason)) => {
                        warn!(
                            iterations = stats.iterations,
                            reason,
                            "method breakdown"
                        );
                        status = SolverStatus::Breakdown;
                        break;
                    }
                    Err(e) => return Err(e),
                };
            }
        }
        }} //end "solve" timer

        let result = SolveResult {
            x: ctx.x.clone(),
            stats,
            status,
            solve_time: timers.total_time().as_secs_f64(),
        };

        debug!(
            status = %result.status,
            iterations = result.stats.iterations,
            mat_vec_multiplies = result.stats.mat_vec_multiplies,
            residual = %result.stats.residual,
            "iterative solve finished"
        );

        if settings.verbose {
            report(print_footer(stream, &result, &timers));
        }

        Ok(result)
    }
}

impl<T> ConfigurablePrintTarget for IterativeSolver<T>
where
    T: FloatT,
{
    fn print_to_stdout(&mut self) {
        self.stream.print_to_stdout()
    }
    fn print_to_file(&mut self, file: std::fs::File) {
        self.stream.print_to_file(file)
    }
    fn print_to_stream(&mut self, stream: Box<dyn std::io::Write + Send + Sync>) {
        self.stream.print_to_stream(stream)
    }
    fn print_to_sink(&mut self) {
        self.stream.print_to_sink()
    }
    fn print_to_buffer(&mut self) {
        self.stream.print_to_buffer()
    }
    fn get_print_buffer(&mut self) -> std::io::Result<String> {
        self.stream.get_print_buffer()
    }
}

/// Solves `A*x = b` with `method` using a one-off
/// [`IterativeSolver`] with identity preconditioning.
///
/// `settings` defaults to [`SolverSettings::default`].
pub fn solve<T, M, K>(
    A: &M,
    b: &[T],
    x_init: Option<&[T]>,
    settings: Option<SolverSettings<T>>,
    method: &mut K,
) -> Result<SolveResult<T>, SolverError>
where
    T: FloatT,
    M: SparseMatrix<T> + ?Sized,
    K: Method<T> + ?Sized,
{
    let mut solver = IterativeSolver::new(settings.unwrap_or_default())?;
    solver.solve(A, b, x_init, method)
}

// ---------------------------------
// utilities
// ---------------------------------

fn check_dimensions<T, M>(A: &M, b: &[T], x_init: Option<&[T]>) -> Result<usize, SolverError>
where
    T: FloatT,
    M: SparseMatrix<T> + ?Sized,
{
    let n = A.nrows();
    if n == 0 {
        return Err(SolverError::InvalidDimension("system has dimension zero"));
    }
    if !A.is_square() {
        return Err(SolverError::InvalidDimension("matrix is not square"));
    }
    if b.len() != n {
        return Err(SolverError::InvalidDimension(
            "right hand side does not match the matrix",
        ));
    }
    if x_init.is_some_and(|x| x.len() != n) {
        return Err(SolverError::InvalidDimension(
            "initial guess does not match the matrix",
        ));
    }
    Ok(n)
}

// vectors read by the preconditioner are written by the method
fn check_workspace<T>(what: &'static str, n: usize, v: &[T]) -> Result<(), SolverError> {
    check_dim(what, n, v.len())?;
    Ok(())
}

fn relative_residual<T: FloatT>(r: &[T], bnorm: T) -> T {
    let rnorm = r.norm();
    if bnorm == T::zero() {
        rnorm
    } else {
        rnorm / bnorm
    }
}

// verbose output is best effort and never fails a solve
fn report(result: std::io::Result<()>) {
    if let Err(e) = result {
        warn!(error = %e, "failed to write solver output");
    }
}

#![allow(non_snake_case)]

use crate::algebra::*;
use crate::solver::core::traits::Method;
use crate::solver::core::{resize_workspace, Context, Operation, SolverError};
use itertools::izip;

// points at which the method suspends itself
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
enum BicgState {
    Precondition,
    AfterPreconditioner,
    AfterTransposePreconditioner,
    AfterMatVec,
    AfterTransposeMatVec,
}

/// Preconditioned Bi-Conjugate Gradient method
///
/// For general square systems.  Alongside the residual `r` the method
/// carries a shadow residual `r̃`, initially equal to `r`, which is
/// driven by `Aᵀ` and `M⁻ᵀ`.  Each iteration requests two
/// preconditioner solves and two matrix-vector products.
///
/// ```text
/// z = M⁻¹ r,  z̃ = M⁻ᵀ r̃
/// ρ = z·r̃
/// p = z + (ρ/ρ_prev) p,  p̃ = z̃ + (ρ/ρ_prev) p̃
/// α = ρ / p̃·Ap
/// x = x + α p
/// r = r - α Ap,  r̃ = r̃ - α Aᵀp̃
/// ```
///
/// The method breaks down if `ρ` or `p̃·Ap` vanishes, which is
/// reported as [`SolverError::Breakdown`] and ends the solve.

#[derive(Debug, Clone)]
pub struct BiConjugateGradient<T> {
    /// `ρ = z·r̃` is treated as zero when `|ρ| ≤ tol·‖z‖·‖r̃‖`
    pub breakdown_tolerance: T,
    state: BicgState,
    first: bool,
    rho: T,
    rho_prev: T,
}

impl<T> BiConjugateGradient<T>
where
    T: FloatT,
{
    pub fn new() -> Self {
        Self {
            breakdown_tolerance: T::epsilon(),
            state: BicgState::Precondition,
            first: true,
            rho: T::nan(),
            rho_prev: T::nan(),
        }
    }

    pub fn with_breakdown_tolerance(mut self, tol: T) -> Self {
        self.breakdown_tolerance = tol;
        self
    }
}

impl<T> Default for BiConjugateGradient<T>
where
    T: FloatT,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Method<T> for BiConjugateGradient<T>
where
    T: FloatT,
{
    fn init(&mut self, ctx: &mut Context<T>) -> Operation {
        self.first = true;
        self.rho = T::nan();
        self.rho_prev = T::nan();

        let n = ctx.dim();
        resize_workspace(&mut ctx.p, n);
        resize_workspace(&mut ctx.p_tilde, n);
        resize_workspace(&mut ctx.residual_tilde, n);
        ctx.residual_tilde.copy_from(&ctx.residual);

        self.state = BicgState::AfterPreconditioner;
        Operation::ApplyPreconditioner
    }

    fn iterate(&mut self, ctx: &mut Context<T>) -> Result<Operation, SolverError> {
        let op = match self.state {
            BicgState::Precondition => {
                self.state = BicgState::AfterPreconditioner;
                Operation::ApplyPreconditioner
            }

            BicgState::AfterPreconditioner => {
                self.state = BicgState::AfterTransposePreconditioner;
                Operation::ApplyTransposePreconditioner
            }

            BicgState::AfterTransposePreconditioner => {
                // ρ = z·r̃
                self.rho = ctx.z.dot(&ctx.residual_tilde);
                let scale = ctx.z.norm() * ctx.residual_tilde.norm();
                if self.rho.abs() <= self.breakdown_tolerance * scale || self.rho == T::zero() {
                    return Err(SolverError::Breakdown("z·r̃ vanished"));
                }

                if self.first {
                    ctx.p.copy_from(&ctx.z);
                    ctx.p_tilde.copy_from(&ctx.z_tilde);
                } else {
                    let β = self.rho / self.rho_prev;
                    for (p, pt, &z, &zt) in izip!(&mut ctx.p, &mut ctx.p_tilde, &ctx.z, &ctx.z_tilde) {
                        *p = z + β * *p;
                        *pt = zt + β * *pt;
                    }
                }
                self.first = false;

                self.state = BicgState::AfterMatVec;
                Operation::ComputeMatrixVectorProduct
            }

            BicgState::AfterMatVec => {
                self.state = BicgState::AfterTransposeMatVec;
                Operation::ComputeTransposeMatrixVectorProduct
            }

            BicgState::AfterTransposeMatVec => {
                let σ = ctx.p_tilde.dot(&ctx.ap);
                let α = self.rho / σ;
                if σ == T::zero() || !α.is_finite() {
                    return Err(SolverError::Breakdown("p̃·Ap vanished"));
                }

                ctx.x.axpy(α, &ctx.p);
                ctx.residual.axpy(-α, &ctx.ap);
                ctx.residual_tilde.axpy(-α, &ctx.atp_tilde);

                self.rho_prev = self.rho;

                self.state = BicgState::Precondition;
                Operation::CheckConvergence
            }
        };
        Ok(op)
    }

    fn name(&self) -> &'static str {
        "bicg"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn serve(A: &CsrMatrix<f64>, ctx: &mut Context<f64>, op: Operation) {
        let n = ctx.dim();
        match op {
            Operation::ApplyPreconditioner => ctx.z = ctx.residual.clone(),
            Operation::ApplyTransposePreconditioner => ctx.z_tilde = ctx.residual_tilde.clone(),
            Operation::ComputeMatrixVectorProduct => {
                ctx.ap = vec![0.; n];
                mul_mat_vec(&mut ctx.ap, 1., MatrixShape::N, A, &ctx.p, 0.).unwrap();
            }
            Operation::ComputeTransposeMatrixVectorProduct => {
                ctx.atp_tilde = vec![0.; n];
                mul_mat_vec(&mut ctx.atp_tilde, 1., MatrixShape::T, A, &ctx.p_tilde, 0.).unwrap();
            }
            _ => {}
        }
    }

    fn start(b: &[f64]) -> Context<f64> {
        let mut ctx = Context::new();
        ctx.x = vec![0.; b.len()];
        ctx.residual = b.to_vec();
        ctx
    }

    #[test]
    fn test_bicg_request_sequence() {
        let A = CsrMatrix::<f64>::identity(2);
        let mut ctx = start(&[1., 1.]);
        let mut bicg = BiConjugateGradient::new();

        let mut ops = vec![bicg.init(&mut ctx)];
        assert_eq!(ctx.residual_tilde, ctx.residual);
        for _ in 0..5 {
            serve(&A, &mut ctx, ops[ops.len() - 1]);
            ops.push(bicg.iterate(&mut ctx).unwrap());
        }
        assert_eq!(
            ops,
            vec![
                Operation::ApplyPreconditioner,
                Operation::ApplyTransposePreconditioner,
                Operation::ComputeMatrixVectorProduct,
                Operation::ComputeTransposeMatrixVectorProduct,
                Operation::CheckConvergence,
                Operation::ApplyPreconditioner,
            ]
        );
        assert_eq!(ctx.x, vec![1., 1.]);
    }

    #[test]
    fn test_bicg_nonsymmetric_exact() {
        // A = [2 1]
        //     [0 3]
        // BiCG terminates in at most n steps in exact arithmetic
        let mut dok = DokMatrix::new(2, 2);
        dok.set(0, 0, 2.).unwrap();
        dok.set(0, 1, 1.).unwrap();
        dok.set(1, 1, 3.).unwrap();
        let A = CsrMatrix::from(&dok);

        let mut ctx = start(&[4., 6.]);
        let mut bicg = BiConjugateGradient::new();
        let mut op = bicg.init(&mut ctx);
        let mut checks = 0;
        while checks < 2 {
            serve(&A, &mut ctx, op);
            if op == Operation::CheckConvergence {
                checks += 1;
            }
            op = bicg.iterate(&mut ctx).unwrap();
        }
        assert!(ctx.x.norm_inf_diff(&[1., 2.]) < 1e-12);
    }

    #[test]
    fn test_bicg_breakdown() {
        // z·r̃ = 0 on the first iteration when the shadow residual is
        // chosen orthogonal to r
        let A = CsrMatrix::<f64>::identity(2);
        let mut ctx = start(&[1., 0.]);
        let mut bicg = BiConjugateGradient::new();

        let op = bicg.init(&mut ctx);
        ctx.residual_tilde = vec![0., 1.];
        serve(&A, &mut ctx, op);
        let op = bicg.iterate(&mut ctx).unwrap();
        serve(&A, &mut ctx, op);
        assert!(matches!(
            bicg.iterate(&mut ctx),
            Err(SolverError::Breakdown(_))
        ));
    }
}

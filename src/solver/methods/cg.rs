#![allow(non_snake_case)]

use crate::algebra::*;
use crate::solver::core::traits::Method;
use crate::solver::core::{resize_workspace, Context, Operation, SolverError};

// points at which the method suspends itself
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
enum CgState {
    Precondition,
    AfterPreconditioner,
    AfterMatVec,
}

/// Preconditioned Conjugate Gradient method
///
/// For symmetric positive definite systems.  Each iteration requests
/// one preconditioner solve and one matrix-vector product.
///
/// ```text
/// z = M⁻¹ r
/// ρ = r·z
/// p = z + (ρ/ρ_prev) p      (p = z on the first iteration)
/// α = ρ / p·Ap
/// x = x + α p
/// r = r - α Ap
/// ```
///
/// If `p·Ap` vanishes, as it can for singular or indefinite `A`, the
/// method reports [`SolverError::Breakdown`] and the iterate is left at
/// its last finite value.

#[derive(Debug, Clone)]
pub struct ConjugateGradient<T> {
    state: CgState,
    first: bool,
    rho: T,
    rho_prev: T,
}

impl<T> ConjugateGradient<T>
where
    T: FloatT,
{
    pub fn new() -> Self {
        Self {
            state: CgState::Precondition,
            first: true,
            rho: T::nan(),
            rho_prev: T::nan(),
        }
    }
}

impl<T> Default for ConjugateGradient<T>
where
    T: FloatT,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Method<T> for ConjugateGradient<T>
where
    T: FloatT,
{
    fn init(&mut self, ctx: &mut Context<T>) -> Operation {
        self.first = true;
        self.rho = T::nan();
        self.rho_prev = T::nan();

        let n = ctx.dim();
        resize_workspace(&mut ctx.p, n);

        self.state = CgState::AfterPreconditioner;
        Operation::ApplyPreconditioner
    }

    fn iterate(&mut self, ctx: &mut Context<T>) -> Result<Operation, SolverError> {
        let op = match self.state {
            CgState::Precondition => {
                self.state = CgState::AfterPreconditioner;
                Operation::ApplyPreconditioner
            }

            CgState::AfterPreconditioner => {
                // ρ = r·z
                self.rho = ctx.residual.dot(&ctx.z);
                if !self.first {
                    // z = z + β p
                    let β = self.rho / self.rho_prev;
                    ctx.z.axpy(β, &ctx.p);
                }
                self.first = false;
                ctx.p.copy_from(&ctx.z);

                self.state = CgState::AfterMatVec;
                Operation::ComputeMatrixVectorProduct
            }

            CgState::AfterMatVec => {
                // the residual update uses Ap before it is recomputed
                let pAp = ctx.p.dot(&ctx.ap);
                let α = self.rho / pAp;
                // A singular or indefinite along p, leave x untouched
                if pAp == T::zero() || !α.is_finite() {
                    return Err(SolverError::Breakdown("p·Ap vanished"));
                }
                ctx.x.axpy(α, &ctx.p);
                ctx.residual.axpy(-α, &ctx.ap);

                self.rho_prev = self.rho;

                self.state = CgState::Precondition;
                Operation::CheckConvergence
            }
        };
        Ok(op)
    }

    fn name(&self) -> &'static str {
        "cg"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // drives the method by hand with an identity preconditioner,
    // recording the requests it makes
    fn drive(A: &CsrMatrix<f64>, b: &[f64], steps: usize) -> (Context<f64>, Vec<Operation>) {
        let mut ctx = Context::new();
        ctx.x = vec![0.; b.len()];
        ctx.residual = b.to_vec();

        let mut cg = ConjugateGradient::new();
        let mut ops = vec![cg.init(&mut ctx)];
        for _ in 0..steps {
            match ops[ops.len() - 1] {
                Operation::ApplyPreconditioner => ctx.z = ctx.residual.clone(),
                Operation::ComputeMatrixVectorProduct => {
                    ctx.ap = vec![0.; b.len()];
                    mul_mat_vec(&mut ctx.ap, 1., MatrixShape::N, A, &ctx.p, 0.).unwrap();
                }
                _ => {}
            }
            ops.push(cg.iterate(&mut ctx).unwrap());
        }
        (ctx, ops)
    }

    #[test]
    fn test_cg_request_sequence() {
        let A = CsrMatrix::<f64>::identity(3);
        let (_, ops) = drive(&A, &[1., 2., 3.], 4);
        assert_eq!(
            ops,
            vec![
                Operation::ApplyPreconditioner,
                Operation::ComputeMatrixVectorProduct,
                Operation::CheckConvergence,
                Operation::ApplyPreconditioner,
                Operation::ComputeMatrixVectorProduct,
            ]
        );
    }

    #[test]
    fn test_cg_identity_one_step() {
        // a single step is exact for A = I
        let A = CsrMatrix::<f64>::identity(3);
        let (ctx, _) = drive(&A, &[1., 2., 3.], 2);
        assert_eq!(ctx.x, vec![1., 2., 3.]);
        assert_eq!(ctx.residual, vec![0.; 3]);
    }

    #[test]
    fn test_cg_diagonal_two_steps() {
        // two distinct eigenvalues, so two steps are exact
        let mut dok = DokMatrix::new(3, 3);
        dok.set(0, 0, 1.).unwrap();
        dok.set(1, 1, 2.).unwrap();
        dok.set(2, 2, 2.).unwrap();
        let A = CsrMatrix::from(&dok);

        let (ctx, _) = drive(&A, &[1., 2., 4.], 5);
        let expected = [1., 1., 2.];
        assert!(ctx.x.norm_inf_diff(&expected) < 1e-12);
        assert!(ctx.residual.norm_inf() < 1e-12);
    }
}

//! Preconditioners applied by the solver driver.

use crate::algebra::{FloatT, VectorMath};

/// A preconditioner `M ≈ A`, applied through solves with `M`.
///
/// The solver driver calls [`solve`](Preconditioner::solve) for an
/// [`ApplyPreconditioner`](crate::solver::Operation::ApplyPreconditioner)
/// request and [`solve_transpose`](Preconditioner::solve_transpose) for
/// [`ApplyTransposePreconditioner`](crate::solver::Operation::ApplyTransposePreconditioner).
/// Both vectors always have the dimension of the system.
pub trait Preconditioner<T: FloatT> {
    /// `z = M⁻¹ * r`
    fn solve(&self, z: &mut [T], r: &[T]);

    /// `z = M⁻ᵀ * r`.  Defaults to [`solve`](Preconditioner::solve),
    /// which is correct for symmetric `M`.
    fn solve_transpose(&self, z: &mut [T], r: &[T]) {
        self.solve(z, r)
    }
}

/// The identity preconditioner `M = I`
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityPreconditioner;

impl IdentityPreconditioner {
    pub fn new() -> Self {
        Self
    }
}

impl<T: FloatT> Preconditioner<T> for IdentityPreconditioner {
    fn solve(&self, z: &mut [T], r: &[T]) {
        z.copy_from(r);
    }
}

#[test]
fn test_identity_preconditioner() {
    let pc = IdentityPreconditioner::new();
    let r = [1., -2., 3.];
    let mut z = [0.; 3];
    pc.solve(&mut z, &r);
    assert_eq!(z, r);

    let mut z = [f64::NAN; 3];
    pc.solve_transpose(&mut z, &r);
    assert_eq!(z, r);
}

use crate::algebra::FloatT;

/// Request issued by a [`Method`](crate::solver::core::traits::Method)
/// to the solver driver.
///
/// A method never touches the system matrix, the preconditioner or the
/// solver counters.  Whenever it needs one of those it returns the
/// corresponding `Operation`, the driver performs it on the shared
/// [`Context`] and then resumes the method.

#[repr(u32)]
#[derive(PartialEq, Eq, Clone, Debug, Copy)]
pub enum Operation {
    /// No driver action.  The method is resumed immediately.
    None,
    /// `ap = A * p`
    ComputeMatrixVectorProduct,
    /// `atp_tilde = Aᵀ * p_tilde`
    ComputeTransposeMatrixVectorProduct,
    /// `z = M⁻¹ * residual`
    ApplyPreconditioner,
    /// `z_tilde = M⁻ᵀ * residual_tilde`
    ApplyTransposePreconditioner,
    /// Count an iteration and test the residual for convergence
    CheckConvergence,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl Default for Operation {
    fn default() -> Self {
        Operation::None
    }
}

/// Dense workspace shared between the solver driver and a method.
///
/// All vectors have the dimension of the linear system once a solve is
/// under way.  The driver owns `x` and `residual`.  The remaining
/// vectors are sized on first use by whichever side writes them, and a
/// `Context` reused across solves of equal dimension does not allocate.
#[derive(Debug, Clone, Default)]
pub struct Context<T> {
    /// current solution estimate
    pub x: Vec<T>,
    /// residual `b - A*x`
    pub residual: Vec<T>,
    /// search direction
    pub p: Vec<T>,
    /// `A * p`
    pub ap: Vec<T>,
    /// preconditioned residual
    pub z: Vec<T>,
    /// shadow residual (BiCG)
    pub residual_tilde: Vec<T>,
    /// shadow search direction (BiCG)
    pub p_tilde: Vec<T>,
    /// `Aᵀ * p_tilde` (BiCG)
    pub atp_tilde: Vec<T>,
    /// preconditioned shadow residual (BiCG)
    pub z_tilde: Vec<T>,
}

impl<T> Context<T>
where
    T: FloatT,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// dimension of the system currently held
    pub fn dim(&self) -> usize {
        self.x.len()
    }
}

/// Makes `v` a vector of length `n`.
///
/// A vector that already has length `n` is left alone, contents
/// included.  Otherwise it is cleared and refilled with zeros, which
/// reuses its allocation when the capacity is large enough.
pub fn resize_workspace<T: FloatT>(v: &mut Vec<T>, n: usize) {
    if v.len() != n {
        v.clear();
        v.resize(n, T::zero());
    }
}

#[test]
fn test_resize_workspace() {
    let mut v = vec![1., 2., 3.];
    resize_workspace(&mut v, 3);
    assert_eq!(v, vec![1., 2., 3.]);

    let cap = v.capacity();
    resize_workspace(&mut v, 2);
    assert_eq!(v, vec![0., 0.]);
    assert_eq!(v.capacity(), cap);

    resize_workspace(&mut v, 4);
    assert_eq!(v, vec![0.; 4]);
}

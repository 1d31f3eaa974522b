//! Krylov methods driven by the [`IterativeSolver`](crate::solver::IterativeSolver).

use crate::algebra::FloatT;
use crate::solver::core::traits::Method;
use crate::solver::core::{Context, Operation, SolverError};
use enum_dispatch::*;

mod bicg;
mod cg;
pub use bicg::*;
pub use cg::*;

/// The Krylov methods provided by this crate, for callers that
/// choose a method at run time.
///
/// ```no_run
/// use krylov::solver::*;
///
/// let method: KrylovMethod<f64> = "bicg".parse().unwrap();
/// ```
#[enum_dispatch(Method<T>)]
#[derive(Debug, Clone)]
pub enum KrylovMethod<T>
where
    T: FloatT,
{
    ConjugateGradient(ConjugateGradient<T>),
    BiConjugateGradient(BiConjugateGradient<T>),
}

impl<T> std::str::FromStr for KrylovMethod<T>
where
    T: FloatT,
{
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "cg" => Ok(ConjugateGradient::new().into()),
            "bicg" => Ok(BiConjugateGradient::new().into()),
            _ => Err(format!("unknown method \"{s}\"")),
        }
    }
}

#[test]
fn test_method_from_str() {
    let m: KrylovMethod<f64> = "CG".parse().unwrap();
    assert_eq!(m.name(), "cg");
    let m: KrylovMethod<f64> = "bicg".parse().unwrap();
    assert_eq!(m.name(), "bicg");
    assert!("gmres".parse::<KrylovMethod<f64>>().is_err());
}

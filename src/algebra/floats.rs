#![allow(non_snake_case)]
use num_traits::{Float, FromPrimitive, NumAssign};
use std::fmt::{Debug, Display, LowerExp};

/// Scalar type of matrices, vectors and solvers.
///
/// Blanket implemented for every type with the required
/// [`num_traits`](num_traits) and formatting bounds, which in practice
/// means `f32` and `f64`.  Solvers default to `f64`.
pub trait FloatT:
    'static + Send + Sync + Float + NumAssign + Default + FromPrimitive + Display + LowerExp + Debug
{
}

impl<T> FloatT for T where
    T: 'static
        + Send
        + Sync
        + Float
        + NumAssign
        + Default
        + FromPrimitive
        + Display
        + LowerExp
        + Debug
{
}

/// Conversion of primitive constants into a [`FloatT`].
///
/// Lets defaults be written as `(1e-6).as_T()` in generic code,
/// e.g. in the [solver settings](crate::solver::SolverSettings) builder.
pub trait AsFloatT<T>: 'static {
    fn as_T(&self) -> T;
}

impl<T: FloatT> AsFloatT<T> for f64 {
    #[inline]
    fn as_T(&self) -> T {
        // every FloatT is constructible from an f64, possibly rounded
        T::from_f64(*self).unwrap_or_else(T::nan)
    }
}

impl<T: FloatT> AsFloatT<T> for usize {
    #[inline]
    fn as_T(&self) -> T {
        T::from_usize(*self).unwrap_or_else(T::infinity)
    }
}

#[test]
fn test_as_float() {
    let x: f32 = (0.5).as_T();
    assert_eq!(x, 0.5f32);
    let y: f64 = 3usize.as_T();
    assert_eq!(y, 3.);
}

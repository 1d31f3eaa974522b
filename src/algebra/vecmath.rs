use super::{FloatT, VectorMath};
use std::iter::zip;

impl<T: FloatT> VectorMath for [T] {
    type T = T;

    fn copy_from(&mut self, src: &[T]) -> &mut Self {
        self.copy_from_slice(src);
        self
    }

    fn set(&mut self, c: T) -> &mut Self {
        self.fill(c);
        self
    }

    fn scale(&mut self, c: T) -> &mut Self {
        self.iter_mut().for_each(|x| *x *= c);
        self
    }

    fn negate(&mut self) -> &mut Self {
        self.iter_mut().for_each(|x| *x = -*x);
        self
    }

    fn dot(&self, y: &[T]) -> T {
        assert_eq!(self.len(), y.len());
        pairwise_dot(self, y)
    }

    fn sumsq(&self) -> T {
        pairwise_dot(self, self)
    }

    fn norm(&self) -> T {
        self.sumsq().sqrt()
    }

    // NaN if any entry is NaN
    fn norm_inf(&self) -> T {
        let mut out = T::zero();
        for &v in self {
            if v.is_nan() {
                return v;
            }
            out = out.max(v.abs());
        }
        out
    }

    fn norm_inf_diff(&self, b: &[T]) -> T {
        assert_eq!(self.len(), b.len());
        zip(self, b).fold(T::zero(), |acc, (&x, &y)| acc.max((x - y).abs()))
    }

    fn is_finite(&self) -> bool {
        self.iter().all(|x| x.is_finite())
    }

    fn axpby(&mut self, a: T, x: &[T], b: T) -> &mut Self {
        assert_eq!(self.len(), x.len());
        zip(&mut *self, x).for_each(|(y, &x)| *y = a * x + b * *y);
        self
    }

    fn axpy(&mut self, a: T, x: &[T]) -> &mut Self {
        assert_eq!(self.len(), x.len());
        zip(&mut *self, x).for_each(|(y, &x)| *y += a * x);
        self
    }
}

// Inner products are summed pairwise over halves, so rounding error
// grows with log(n) rather than n on long vectors.
const PAIRWISE_BLOCK: usize = 16;

fn pairwise_dot<T: FloatT>(x: &[T], y: &[T]) -> T {
    if x.len() <= PAIRWISE_BLOCK {
        zip(x, y).fold(T::zero(), |acc, (&a, &b)| acc + a * b)
    } else {
        let mid = x.len() / 2;
        let (x1, x2) = x.split_at(mid);
        let (y1, y2) = y.split_at(mid);
        pairwise_dot(x1, y1) + pairwise_dot(x2, y2)
    }
}

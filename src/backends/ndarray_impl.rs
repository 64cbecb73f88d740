//! `ndarray` adapter
//!
//! Owned arrays, views and shared arrays of any dimensionality are supported.
//! Means are taken with `ArrayBase::mean`, which divides in the element type,
//! so integer arrays report no mean here; [`Backend::rejects_integer_mean`]
//! tells the engine to average a [`ArrayLike::to_float`] copy instead.

use super::{reduce_values, ArrayLike, DType, Element, Reduction};
use crate::Backend;
use ndarray::{ArrayBase, Data, Dimension};
use num_traits::{FromPrimitive, Zero};
use std::ops::{Add, Div};

impl<A, S, D> ArrayLike for ArrayBase<S, D>
where
    A: Element + FromPrimitive + Zero + Add<Output = A> + Div<Output = A>,
    S: Data<Elem = A>,
    D: Dimension + 'static,
{
    fn backend(&self) -> Backend {
        Backend::NdArray
    }

    fn shape(&self) -> Option<Vec<usize>> {
        Some(self.shape().to_vec())
    }

    fn dtype(&self) -> Option<DType> {
        Some(A::DTYPE)
    }

    fn reduce(&self, op: Reduction) -> Option<f64> {
        match op {
            Reduction::Min | Reduction::Max => {
                reduce_values(self.iter().map(|&v| v.to_f64()), op)
            }
            Reduction::Mean if A::DTYPE.is_integer() => None,
            Reduction::Mean => self.mean().map(Element::to_f64),
        }
    }

    fn to_float(&self) -> Option<Box<dyn ArrayLike + '_>> {
        Some(Box::new(self.mapv(Element::to_f64)))
    }
}

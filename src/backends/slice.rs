//! Standard-library adapter
//!
//! Slices, vectors and fixed-size arrays are one-dimensional: their shape is
//! `(len,)` and every statistic is computed over the widened elements.

use super::{reduce_values, ArrayLike, DType, Element, Reduction};
use crate::Backend;

fn reduce_slice<T: Element>(data: &[T], op: Reduction) -> Option<f64> {
    reduce_values(data.iter().map(|&v| v.to_f64()), op)
}

fn float_copy<T: Element>(data: &[T]) -> Box<dyn ArrayLike> {
    Box::new(data.iter().map(|&v| v.to_f64()).collect::<Vec<f64>>())
}

impl<T: Element> ArrayLike for [T] {
    fn backend(&self) -> Backend {
        Backend::Std
    }

    fn shape(&self) -> Option<Vec<usize>> {
        Some(vec![self.len()])
    }

    fn dtype(&self) -> Option<DType> {
        Some(T::DTYPE)
    }

    fn reduce(&self, op: Reduction) -> Option<f64> {
        reduce_slice(self, op)
    }

    fn to_float(&self) -> Option<Box<dyn ArrayLike + '_>> {
        Some(float_copy(self))
    }
}

impl<T: Element> ArrayLike for Vec<T> {
    fn backend(&self) -> Backend {
        Backend::Std
    }

    fn shape(&self) -> Option<Vec<usize>> {
        self.as_slice().shape()
    }

    fn dtype(&self) -> Option<DType> {
        Some(T::DTYPE)
    }

    fn reduce(&self, op: Reduction) -> Option<f64> {
        reduce_slice(self, op)
    }

    fn to_float(&self) -> Option<Box<dyn ArrayLike + '_>> {
        Some(float_copy(self))
    }
}

impl<T: Element, const N: usize> ArrayLike for [T; N] {
    fn backend(&self) -> Backend {
        Backend::Std
    }

    fn shape(&self) -> Option<Vec<usize>> {
        Some(vec![N])
    }

    fn dtype(&self) -> Option<DType> {
        Some(T::DTYPE)
    }

    fn reduce(&self, op: Reduction) -> Option<f64> {
        reduce_slice(self, op)
    }

    fn to_float(&self) -> Option<Box<dyn ArrayLike + '_>> {
        Some(float_copy(self))
    }
}

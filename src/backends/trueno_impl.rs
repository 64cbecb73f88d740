//! `trueno` adapter
//!
//! Vectors carry the execution backend chosen at creation time, reported as
//! their device. Trueno has no `min` or `mean` on vectors: the minimum is
//! folded over the data and the mean is derived from `Vector::sum`.

use super::{reduce_values, ArrayLike, DType, Reduction};
use crate::Backend;
use trueno::{Matrix, Vector};

impl ArrayLike for Vector<f32> {
    fn backend(&self) -> Backend {
        Backend::Trueno
    }

    fn shape(&self) -> Option<Vec<usize>> {
        Some(vec![self.len()])
    }

    fn dtype(&self) -> Option<DType> {
        Some(DType::F32)
    }

    fn device(&self) -> Option<String> {
        Some(format!("{:?}", self.backend()).to_lowercase())
    }

    fn reduce(&self, op: Reduction) -> Option<f64> {
        if self.is_empty() {
            return None;
        }
        match op {
            Reduction::Max => self.max().ok().map(f64::from),
            Reduction::Mean => self
                .sum()
                .ok()
                .map(|total| f64::from(total) / self.len() as f64),
            Reduction::Min => reduce_values(self.as_slice().iter().map(|&v| f64::from(v)), op),
        }
    }
}

impl ArrayLike for Matrix<f32> {
    fn backend(&self) -> Backend {
        Backend::Trueno
    }

    fn shape(&self) -> Option<Vec<usize>> {
        let (rows, cols) = self.shape();
        Some(vec![rows, cols])
    }

    fn dtype(&self) -> Option<DType> {
        Some(DType::F32)
    }

    fn reduce(&self, op: Reduction) -> Option<f64> {
        reduce_values(self.as_slice().iter().map(|&v| f64::from(v)), op)
    }
}

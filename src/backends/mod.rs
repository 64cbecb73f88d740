//! Array-like adapters for the supported array libraries
//!
//! Every supported array type implements [`ArrayLike`], the fixed capability
//! set the metric engine queries. All capabilities are optional: a missing
//! one is rendered as a sentinel, never an error.
//!
//! # Adapters
//!
//! - `slice`: `[T]`, `Vec<T>` and `[T; N]` of any [`Element`] (always available)
//! - `ndarray_impl`: `ndarray::ArrayBase` (feature `ndarray`)
//! - `trueno_impl`: `trueno::Vector<f32>` and `trueno::Matrix<f32>` (feature `trueno`)

use crate::Backend;
use serde::{Deserialize, Serialize};
use std::fmt;

pub mod slice;

#[cfg(feature = "ndarray")]
pub mod ndarray_impl;

#[cfg(feature = "trueno")]
pub mod trueno_impl;

/// Element type of an array, displayed with numpy names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DType {
    U8,
    U16,
    U32,
    U64,
    I8,
    I16,
    I32,
    I64,
    F32,
    F64,
}

impl DType {
    /// Whether the element type is an integer
    #[must_use]
    pub const fn is_integer(self) -> bool {
        !self.is_float()
    }

    /// Whether the element type is floating point
    #[must_use]
    pub const fn is_float(self) -> bool {
        matches!(self, DType::F32 | DType::F64)
    }
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DType::U8 => "uint8",
            DType::U16 => "uint16",
            DType::U32 => "uint32",
            DType::U64 => "uint64",
            DType::I8 => "int8",
            DType::I16 => "int16",
            DType::I32 => "int32",
            DType::I64 => "int64",
            DType::F32 => "float32",
            DType::F64 => "float64",
        };
        f.write_str(name)
    }
}

/// Scalar element types the built-in adapters understand
pub trait Element: Copy + 'static {
    /// The element's dtype tag
    const DTYPE: DType;

    /// Widen to `f64` for statistics
    fn to_f64(self) -> f64;
}

macro_rules! impl_element {
    ($($ty:ty => $dtype:ident),* $(,)?) => {
        $(
            impl Element for $ty {
                const DTYPE: DType = DType::$dtype;

                #[allow(clippy::cast_lossless)]
                fn to_f64(self) -> f64 {
                    self as f64
                }
            }
        )*
    };
}

impl_element! {
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    f32 => F32,
    f64 => F64,
}

/// Zero-argument reductions queried by the numeric probes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Reduction {
    /// Smallest element
    Min,
    /// Largest element
    Max,
    /// Arithmetic mean
    Mean,
}

/// Capability set of an array-like value
///
/// Only [`ArrayLike::backend`] is required. Each other method returns `None`
/// when the array does not support that attribute.
///
/// # Examples
///
/// ```
/// use pshape::{ArrayLike, Backend, Reduction};
///
/// struct Histogram(Vec<u32>);
///
/// impl ArrayLike for Histogram {
///     fn backend(&self) -> Backend {
///         Backend::Unknown
///     }
///
///     fn shape(&self) -> Option<Vec<usize>> {
///         Some(vec![self.0.len()])
///     }
/// }
///
/// let h = Histogram(vec![1, 2, 3]);
/// assert_eq!(h.shape(), Some(vec![3]));
/// assert_eq!(h.reduce(Reduction::Max), None);
/// ```
pub trait ArrayLike {
    /// Library the array belongs to
    fn backend(&self) -> Backend;

    /// Dimension sizes, outermost first
    fn shape(&self) -> Option<Vec<usize>> {
        None
    }

    /// Element type
    fn dtype(&self) -> Option<DType> {
        None
    }

    /// Execution device, for backends with device placement
    fn device(&self) -> Option<String> {
        None
    }

    /// Apply a reduction, `None` if unsupported or the array is empty
    fn reduce(&self, _op: Reduction) -> Option<f64> {
        None
    }

    /// A floating-point copy, used to average integer arrays
    fn to_float(&self) -> Option<Box<dyn ArrayLike + '_>> {
        None
    }
}

impl<A: ArrayLike + ?Sized> ArrayLike for &A {
    fn backend(&self) -> Backend {
        (**self).backend()
    }

    fn shape(&self) -> Option<Vec<usize>> {
        (**self).shape()
    }

    fn dtype(&self) -> Option<DType> {
        (**self).dtype()
    }

    fn device(&self) -> Option<String> {
        (**self).device()
    }

    fn reduce(&self, op: Reduction) -> Option<f64> {
        (**self).reduce(op)
    }

    fn to_float(&self) -> Option<Box<dyn ArrayLike + '_>> {
        (**self).to_float()
    }
}

/// Reduce widened values, propagating NaN through min/max like numpy
///
/// Returns `None` for an empty sequence.
pub(crate) fn reduce_values<I>(values: I, op: Reduction) -> Option<f64>
where
    I: IntoIterator<Item = f64>,
{
    let mut values = values.into_iter();
    let first = values.next()?;

    match op {
        Reduction::Min | Reduction::Max => {
            let mut extreme = first;
            for val in values {
                if extreme.is_nan() {
                    break;
                }
                let better = match op {
                    Reduction::Min => val < extreme,
                    _ => val > extreme,
                };
                if val.is_nan() || better {
                    extreme = val;
                }
            }
            Some(extreme)
        }
        Reduction::Mean => {
            let mut total = first;
            let mut count = 1usize;
            for val in values {
                total += val;
                count += 1;
            }
            Some(total / count as f64)
        }
    }
}

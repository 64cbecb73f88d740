//! pshape: Print Array Shapes Next to Their Names
//!
//! **pshape** prints a table of array-like values for debugging: the source
//! expression each array was passed as, followed by its shape, device, dtype,
//! min, mean and max.
//!
//! ```text
//! name      shape          dtype   min    mean   max
//! cool_arr1 (123, 4, 2, 1) float64 0.0014 0.5091 0.9973
//! cool_arr2 (123, 4, 2, 2) float64 0.0004 0.5058 0.9990
//! ```
//!
//! # Design Principles
//!
//! - **Never crash the host**: every failure degrades to a fallback or a warning
//! - **Best-effort names**: the invoking source line is re-read and split; when
//!   it is unavailable the arrays are named `arr_1`, `arr_2`, ...
//! - **Closed backend dispatch**: each supported array library has an
//!   [`ArrayLike`] adapter tagged with its [`Backend`]
//!
//! # Quick Start
//!
//! ```rust
//! use pshape::{render_arrays, ArrayLike, PrintOptions};
//!
//! let weights = vec![0.5f64, 1.5, 2.5];
//! let options = PrintOptions::default().with_header(false);
//! let names = ["weights".to_string()];
//! let text = render_arrays(&names, &options, &[&weights as &dyn ArrayLike]).unwrap();
//! assert_eq!(text, "weights (3,) float64 0.5000 1.5000 2.5000\n");
//! ```
//!
//! In application code the [`pshape!`] macro resolves the names itself:
//!
//! ```rust,no_run
//! use pshape::pshape;
//!
//! let weights = vec![0.5f64, 1.5, 2.5];
//! pshape!(weights);
//! ```

#![allow(clippy::cast_precision_loss)] // Statistics are for display only
#![allow(clippy::module_name_repetitions)]

pub mod backends;
pub mod callsite;
pub mod error;
pub mod metrics;
pub mod printer;
pub mod splitter;
pub mod table;

pub use backends::{ArrayLike, DType, Element, Reduction};
pub use callsite::{resolve, CallSite, FsSourceReader, SourceReader};
pub use error::{PshapeError, Result};
pub use metrics::{active_probes, MetricProbe, ProbeKind, ProbeValue, Row};
pub use printer::{
    print_arrays, print_arrays_with_reader, render_arrays, PrintOptions, PrintOutcome,
};
pub use splitter::split_args;
pub use table::{OutputFormat, Table};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Array library an [`ArrayLike`] value belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Backend {
    /// Slices, `Vec` and fixed-size arrays of [`Element`] values
    Std,
    /// `ndarray::ArrayBase`
    NdArray,
    /// `trueno::Vector` and `trueno::Matrix`
    Trueno,
    /// Any other [`ArrayLike`] implementation
    Unknown,
}

impl Backend {
    /// Whether arrays of this backend are placed on an execution device
    ///
    /// The device column is only shown when at least one array in a batch
    /// comes from such a backend.
    #[must_use]
    pub const fn supports_devices(self) -> bool {
        matches!(self, Backend::Trueno)
    }

    /// Whether the backend's own mean is unusable for integer elements
    ///
    /// `ndarray`'s `mean()` divides in the element type, truncating integer
    /// averages, so integer arrays are averaged through a float copy.
    #[must_use]
    pub const fn rejects_integer_mean(self) -> bool {
        matches!(self, Backend::NdArray)
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Backend::Std => "std",
            Backend::NdArray => "ndarray",
            Backend::Trueno => "trueno",
            Backend::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

/// Print arrays to stdout, named after their source expressions
///
/// Expands to a call to [`print_arrays`] with default [`PrintOptions`] and
/// returns its [`PrintOutcome`].
///
/// # Call-site layout
///
/// Names are read back from the invoking source line, so the whole
/// invocation must start its own line and fit on it, e.g. `pshape!(a, b);`.
/// A call inside another expression (`let x = pshape!(a);`) prints nothing.
/// A call spread over several lines prints with `arr_1`, `arr_2`, ... names.
/// `rustfmt` splits calls whose arguments exceed its `fn_call_width` (60
/// columns by default), so bind long expressions or options to locals first:
///
/// ```rust,no_run
/// use pshape::{pshape_with, PrintOptions};
///
/// let weights = vec![0.5f64, 1.5, 2.5];
/// let options = PrintOptions::default().with_precision(2);
/// pshape_with!(options, weights);
/// ```
///
/// # Diagnostics
///
/// Suppressed and failed prints are reported as `tracing` warnings, which
/// are only visible once a subscriber is installed (e.g.
/// `tracing_subscriber::fmt().init()`). The returned [`PrintOutcome`] says
/// what happened either way.
///
/// A panic inside an [`ArrayLike`] implementation is caught, but the
/// process panic hook still runs first, so the usual `thread '...'
/// panicked at` message appears on stderr before the warning.
#[macro_export]
macro_rules! pshape {
    ($($array:expr),* $(,)?) => {
        $crate::print_arrays(
            &$crate::CallSite::new(file!(), line!(), "pshape!"),
            &$crate::PrintOptions::default(),
            &mut ::std::io::stdout().lock(),
            &[$(&$array as &dyn $crate::ArrayLike),*],
        )
    };
}

/// Like [`pshape!`] with explicit [`PrintOptions`] as the first argument
#[macro_export]
macro_rules! pshape_with {
    ($options:expr $(, $array:expr)* $(,)?) => {
        $crate::print_arrays(
            &$crate::CallSite::new(file!(), line!(), "pshape_with!").with_leading_args(1),
            &$options,
            &mut ::std::io::stdout().lock(),
            &[$(&$array as &dyn $crate::ArrayLike),*],
        )
    };
}

/// Like [`pshape_with!`], writing to a sink (`&mut impl Write`) first
#[macro_export]
macro_rules! pshape_to {
    ($sink:expr, $options:expr $(, $array:expr)* $(,)?) => {
        $crate::print_arrays(
            &$crate::CallSite::new(file!(), line!(), "pshape_to!").with_leading_args(2),
            &$options,
            $sink,
            &[$(&$array as &dyn $crate::ArrayLike),*],
        )
    };
}

//! Metric probes and row construction
//!
//! A probe extracts one attribute (shape, dtype, min, ...) from one array and
//! renders it. Probes never fail: an attribute the array does not expose
//! becomes a sentinel, `?` for text columns and `nan` for numeric ones.

use crate::backends::{ArrayLike, DType, Reduction};
use serde::{Deserialize, Serialize};
use std::cell::OnceCell;

/// Rendered text of a missing non-numeric attribute
pub const UNKNOWN: &str = "?";

/// Rendered text of a missing or undefined numeric attribute
pub const NOT_A_NUMBER: &str = "nan";

/// Kind of metric shown in a column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProbeKind {
    /// Source expression of the array (always the first column)
    Name,
    /// Dimension sizes
    Shape,
    /// Execution device
    Device,
    /// Element type
    Dtype,
    /// Smallest element
    Min,
    /// Arithmetic mean
    Mean,
    /// Largest element
    Max,
}

impl ProbeKind {
    /// Column title shown in the header
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            ProbeKind::Name => "name",
            ProbeKind::Shape => "shape",
            ProbeKind::Device => "device",
            ProbeKind::Dtype => "dtype",
            ProbeKind::Min => "min",
            ProbeKind::Mean => "mean",
            ProbeKind::Max => "max",
        }
    }

    /// Whether values render as fixed-point numbers
    #[must_use]
    pub const fn is_numeric(self) -> bool {
        matches!(self, ProbeKind::Min | ProbeKind::Mean | ProbeKind::Max)
    }

    /// Probes shown when none are configured, in column order
    ///
    /// Built fresh on every call; `Device` is dropped later for batches
    /// without a device-capable backend.
    #[must_use]
    pub fn default_probes() -> Vec<ProbeKind> {
        vec![
            ProbeKind::Shape,
            ProbeKind::Device,
            ProbeKind::Dtype,
            ProbeKind::Min,
            ProbeKind::Mean,
            ProbeKind::Max,
        ]
    }

    fn reduction(self) -> Option<Reduction> {
        match self {
            ProbeKind::Min => Some(Reduction::Min),
            ProbeKind::Mean => Some(Reduction::Mean),
            ProbeKind::Max => Some(Reduction::Max),
            _ => None,
        }
    }
}

/// Extracted value of a probe
#[derive(Debug, Clone, PartialEq)]
pub enum ProbeValue {
    /// Free text (names, devices)
    Text(String),
    /// Dimension sizes
    Shape(Vec<usize>),
    /// Element type
    DType(DType),
    /// Statistic
    Number(f64),
    /// The array does not expose this attribute
    Unknown,
}

impl ProbeValue {
    /// Render for a column of `kind` with `precision` decimals
    ///
    /// # Examples
    ///
    /// ```
    /// use pshape::{ProbeKind, ProbeValue};
    ///
    /// assert_eq!(ProbeValue::Number(0.50905).render(ProbeKind::Mean, 2), "0.51");
    /// assert_eq!(ProbeValue::Shape(vec![5]).render(ProbeKind::Shape, 4), "(5,)");
    /// assert_eq!(ProbeValue::Unknown.render(ProbeKind::Max, 4), "nan");
    /// ```
    #[must_use]
    pub fn render(&self, kind: ProbeKind, precision: usize) -> String {
        match self {
            ProbeValue::Text(text) => text.clone(),
            ProbeValue::Shape(dims) => render_shape(dims),
            ProbeValue::DType(dtype) => dtype.to_string(),
            ProbeValue::Number(value) => render_number(*value, precision),
            ProbeValue::Unknown if kind.is_numeric() => NOT_A_NUMBER.to_string(),
            ProbeValue::Unknown => UNKNOWN.to_string(),
        }
    }
}

/// Render dimension sizes as a tuple: `(3, 4)`, `(5,)`, `()`
#[must_use]
pub fn render_shape(dims: &[usize]) -> String {
    match dims {
        [] => "()".to_string(),
        [single] => format!("({single},)"),
        _ => {
            let parts: Vec<String> = dims.iter().map(ToString::to_string).collect();
            format!("({})", parts.join(", "))
        }
    }
}

/// Render a statistic in fixed point, `nan`/`inf` for non-finite values
#[must_use]
pub fn render_number(value: f64, precision: usize) -> String {
    if value.is_nan() {
        NOT_A_NUMBER.to_string()
    } else {
        format!("{value:.precision$}")
    }
}

/// One metric of one array, evaluated at most once
pub struct MetricProbe<'a> {
    kind: ProbeKind,
    handle: Option<&'a dyn ArrayLike>,
    value: OnceCell<ProbeValue>,
}

impl<'a> MetricProbe<'a> {
    /// Probe `kind` on `handle`
    #[must_use]
    pub fn new(kind: ProbeKind, handle: &'a dyn ArrayLike) -> Self {
        Self {
            kind,
            handle: Some(handle),
            value: OnceCell::new(),
        }
    }

    /// Name probe carrying an already resolved expression
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            kind: ProbeKind::Name,
            handle: None,
            value: OnceCell::from(ProbeValue::Text(name.into())),
        }
    }

    /// Kind of this probe
    #[must_use]
    pub fn kind(&self) -> ProbeKind {
        self.kind
    }

    /// Whether the array exposes this probe's attribute
    #[must_use]
    pub fn is_applicable(&self) -> bool {
        !matches!(self.value(), ProbeValue::Unknown)
    }

    /// Extracted value, computed on first access
    pub fn value(&self) -> &ProbeValue {
        self.value.get_or_init(|| self.extract())
    }

    /// Rendered value
    #[must_use]
    pub fn render(&self, precision: usize) -> String {
        self.value().render(self.kind, precision)
    }

    fn extract(&self) -> ProbeValue {
        let Some(handle) = self.handle else {
            return ProbeValue::Unknown;
        };

        let value = match self.kind {
            ProbeKind::Name => None,
            ProbeKind::Shape => handle.shape().map(ProbeValue::Shape),
            ProbeKind::Device => handle.device().map(ProbeValue::Text),
            ProbeKind::Dtype => handle.dtype().map(ProbeValue::DType),
            ProbeKind::Mean => mean_of(handle).map(ProbeValue::Number),
            kind => kind
                .reduction()
                .and_then(|op| handle.reduce(op))
                .map(ProbeValue::Number),
        };

        value.unwrap_or(ProbeValue::Unknown)
    }
}

/// Mean of `handle`, through a float copy when its backend refuses integers
fn mean_of(handle: &dyn ArrayLike) -> Option<f64> {
    let integer = handle.dtype().is_some_and(DType::is_integer);
    if integer && handle.backend().rejects_integer_mean() {
        let copy = handle.to_float()?;
        return copy.reduce(Reduction::Mean);
    }
    handle.reduce(Reduction::Mean)
}

/// Columns for a batch: `Name` first, then `requested` in order
///
/// Duplicates and explicit `Name` entries are ignored. `Device` is dropped
/// unless some array in the batch has a device-capable backend.
///
/// # Examples
///
/// ```
/// use pshape::{active_probes, ArrayLike, ProbeKind};
///
/// let a = vec![1.0f32, 2.0];
/// let kinds = active_probes(&ProbeKind::default_probes(), &[&a as &dyn ArrayLike]);
/// assert!(!kinds.contains(&ProbeKind::Device));
/// assert_eq!(kinds[0], ProbeKind::Name);
/// ```
#[must_use]
pub fn active_probes(requested: &[ProbeKind], handles: &[&dyn ArrayLike]) -> Vec<ProbeKind> {
    let devices = handles.iter().any(|h| h.backend().supports_devices());

    let mut kinds = vec![ProbeKind::Name];
    for &kind in requested {
        if kinds.contains(&kind) || (kind == ProbeKind::Device && !devices) {
            continue;
        }
        kinds.push(kind);
    }
    kinds
}

/// Pad or truncate resolved names to one per array
///
/// Missing names become `arr_{index}` (1-based).
#[must_use]
pub fn reconcile_names(mut resolved: Vec<String>, count: usize) -> Vec<String> {
    resolved.truncate(count);
    let start = resolved.len();
    resolved.extend((start..count).map(|i| format!("arr_{}", i + 1)));
    resolved
}

/// Rendered cells of one array, headed by its name
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Row {
    cells: Vec<(ProbeKind, String)>,
}

impl Row {
    /// Evaluate `kinds` on `handle`, naming the row `name`
    ///
    /// `kinds` must start with [`ProbeKind::Name`], as returned by
    /// [`active_probes`].
    #[must_use]
    pub fn build(
        name: &str,
        handle: &dyn ArrayLike,
        kinds: &[ProbeKind],
        precision: usize,
    ) -> Self {
        let cells = kinds
            .iter()
            .map(|&kind| {
                let probe = match kind {
                    ProbeKind::Name => MetricProbe::named(name),
                    _ => MetricProbe::new(kind, handle),
                };
                (kind, probe.render(precision))
            })
            .collect();
        Self { cells }
    }

    /// Row from already rendered cells
    #[must_use]
    pub fn from_cells(cells: Vec<(ProbeKind, String)>) -> Self {
        Self { cells }
    }

    /// Column kinds in order
    pub fn kinds(&self) -> impl Iterator<Item = ProbeKind> + '_ {
        self.cells.iter().map(|(kind, _)| *kind)
    }

    /// Rendered cells in order
    #[must_use]
    pub fn cells(&self) -> &[(ProbeKind, String)] {
        &self.cells
    }

    /// Rendered cell of `kind`
    #[must_use]
    pub fn get(&self, kind: ProbeKind) -> Option<&str> {
        self.cells
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, text)| text.as_str())
    }

    /// Number of cells
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the row has no cells
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn prop_render_number_has_fixed_decimals(
            value in -1.0e6f64..1.0e6,
            precision in 0usize..8,
        ) {
            let rendered = render_number(value, precision);
            match rendered.split_once('.') {
                Some((_, frac)) => prop_assert_eq!(frac.len(), precision),
                None => prop_assert_eq!(precision, 0),
            }

            let parsed: f64 = rendered.parse().unwrap();
            let tolerance = 0.5 * 10f64.powi(-(precision as i32)) + 1e-9 * value.abs().max(1.0);
            prop_assert!((parsed - value).abs() <= tolerance, "{} vs {}", rendered, value);
        }

        #[test]
        fn prop_render_shape_lists_every_dim(dims in prop::collection::vec(0usize..10_000, 0..6)) {
            let rendered = render_shape(&dims);
            prop_assert!(rendered.starts_with('(') && rendered.ends_with(')'));
            if dims.len() == 1 {
                prop_assert!(rendered.ends_with(",)"));
            }

            let inner = rendered[1..rendered.len() - 1].trim_end_matches(',');
            let parsed: Vec<usize> = if inner.is_empty() {
                Vec::new()
            } else {
                inner.split(", ").map(|d| d.parse().unwrap()).collect()
            };
            prop_assert_eq!(parsed, dims);
        }
    }
}

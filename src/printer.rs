//! Print entry points
//!
//! [`print_arrays`] is the boundary of the crate: it resolves names, renders
//! the table and writes it, and turns every failure into a [`PrintOutcome`]
//! plus a `tracing` event instead of an error or a panic.

use crate::backends::ArrayLike;
use crate::callsite::{resolve, CallSite, FsSourceReader, SourceReader};
use crate::error::{PshapeError, Result};
use crate::metrics::{active_probes, reconcile_names, ProbeKind, Row};
use crate::table::{OutputFormat, Table};
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::io::Write;
use std::panic::{self, AssertUnwindSafe};
use tracing::{debug, warn};

/// Options for one print invocation
///
/// # Examples
///
/// ```
/// use pshape::{OutputFormat, PrintOptions, ProbeKind};
///
/// let options = PrintOptions::default()
///     .with_precision(2)
///     .with_probes(vec![ProbeKind::Shape, ProbeKind::Max])
///     .with_format(OutputFormat::Text);
/// assert_eq!(options.precision, 2);
/// assert!(options.show_header);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrintOptions {
    /// Decimals shown for min, mean and max
    pub precision: usize,
    /// Columns after the name, in order
    pub probes: Vec<ProbeKind>,
    /// Print a header line with column titles
    pub show_header: bool,
    /// Text or JSON
    pub format: OutputFormat,
    /// Bold header labels (text format only)
    pub color: bool,
}

impl Default for PrintOptions {
    fn default() -> Self {
        Self {
            precision: 4,
            probes: ProbeKind::default_probes(),
            show_header: true,
            format: OutputFormat::Text,
            color: false,
        }
    }
}

impl PrintOptions {
    /// Set the number of decimals
    #[must_use]
    pub fn with_precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    /// Set the columns shown after the name
    #[must_use]
    pub fn with_probes(mut self, probes: Vec<ProbeKind>) -> Self {
        self.probes = probes;
        self
    }

    /// Enable or disable the header line
    #[must_use]
    pub fn with_header(mut self, show_header: bool) -> Self {
        self.show_header = show_header;
        self
    }

    /// Set the output format
    #[must_use]
    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    /// Enable or disable bold header labels
    #[must_use]
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    /// Parse options from JSON; missing fields take their defaults
    ///
    /// # Errors
    ///
    /// Returns [`PshapeError::Json`] if `json` is not a valid options object.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// What a print invocation did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrintOutcome {
    /// A table with this many data rows was written
    Printed {
        /// Number of arrays printed
        rows: usize,
    },
    /// No arrays were passed; nothing was written
    Empty,
    /// The call was nested in another expression; nothing was written
    Suppressed,
    /// Rendering or writing failed; output may be partial
    Failed(String),
}

/// Render the table for `arrays` named `names`
///
/// `names` is reconciled against the array count first: missing names
/// become `arr_{index}`, extra names are ignored.
///
/// # Errors
///
/// Returns [`PshapeError::Json`] if JSON output fails to serialize.
pub fn render_arrays(
    names: &[String],
    options: &PrintOptions,
    arrays: &[&dyn ArrayLike],
) -> Result<String> {
    let names = reconcile_names(names.to_vec(), arrays.len());
    let kinds = active_probes(&options.probes, arrays);

    let rows = names
        .iter()
        .zip(arrays)
        .map(|(name, handle)| Row::build(name, *handle, &kinds, options.precision))
        .collect();

    Table::new(kinds, rows, options.show_header)?.render(options.format, options.color)
}

/// Print `arrays` to `sink`, naming them from the source line at `site`
///
/// Never panics and never returns an error; see [`PrintOutcome`].
///
/// Panics raised by an [`ArrayLike`] implementation are caught after the
/// installed panic hook has run, so the hook's stderr message is still
/// printed.
pub fn print_arrays(
    site: &CallSite,
    options: &PrintOptions,
    sink: &mut dyn Write,
    arrays: &[&dyn ArrayLike],
) -> PrintOutcome {
    print_arrays_with_reader(site, options, sink, arrays, &FsSourceReader::new())
}

/// [`print_arrays`] reading call-site source through `reader`
pub fn print_arrays_with_reader(
    site: &CallSite,
    options: &PrintOptions,
    sink: &mut dyn Write,
    arrays: &[&dyn ArrayLike],
    reader: &dyn SourceReader,
) -> PrintOutcome {
    if arrays.is_empty() {
        return PrintOutcome::Empty;
    }

    let names = match resolve(site, reader) {
        Ok(names) => {
            if names.len() != arrays.len() {
                debug!(
                    resolved = names.len(),
                    arrays = arrays.len(),
                    "name count differs from array count"
                );
            }
            names
        }
        Err(err @ PshapeError::AmbiguousCallSyntax { .. }) => {
            warn!(
                file = site.file,
                line = site.line,
                "not printing: call {}(...) on its own line, not inside another expression ({err})",
                site.callee
            );
            return PrintOutcome::Suppressed;
        }
        Err(err) => {
            debug!(file = site.file, line = site.line, "using generic array names: {err}");
            Vec::new()
        }
    };

    let attempt = panic::catch_unwind(AssertUnwindSafe(|| -> Result<()> {
        let text = render_arrays(&names, options, arrays)?;
        sink.write_all(text.as_bytes())?;
        sink.flush()?;
        Ok(())
    }));

    let failure = match attempt {
        Ok(Ok(())) => return PrintOutcome::Printed { rows: arrays.len() },
        Ok(Err(err)) => err,
        Err(payload) => PshapeError::Internal(panic_message(payload.as_ref())),
    };

    warn!(file = site.file, line = site.line, "pshape failed: {failure}");
    PrintOutcome::Failed(failure.to_string())
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}

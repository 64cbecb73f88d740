//! Call-site resolution
//!
//! Recovers the literal argument expressions of a `pshape!` invocation by
//! re-reading the invoking source line. Resolution is best effort: callers
//! treat every error as "names unavailable" except
//! [`PshapeError::AmbiguousCallSyntax`], which suppresses the print.

use crate::error::{PshapeError, Result};
use crate::splitter::split_args;
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Location and shape of a macro invocation
///
/// Built by the `pshape!` family of macros from `file!()` and `line!()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallSite {
    /// Source file as recorded by `file!()`
    pub file: &'static str,
    /// 1-based line of the invocation
    pub line: u32,
    /// Macro name including the `!`, e.g. `pshape!`
    pub callee: &'static str,
    /// Number of leading arguments that are not arrays
    pub leading_args: usize,
}

impl CallSite {
    /// Create a call site for `callee` at `file:line`
    #[must_use]
    pub const fn new(file: &'static str, line: u32, callee: &'static str) -> Self {
        Self {
            file,
            line,
            callee,
            leading_args: 0,
        }
    }

    /// Skip `count` leading non-array arguments when naming
    #[must_use]
    pub const fn with_leading_args(mut self, count: usize) -> Self {
        self.leading_args = count;
        self
    }
}

/// Source of call-site text
pub trait SourceReader {
    /// Return the 1-based `line` of `file`
    ///
    /// # Errors
    ///
    /// Returns [`PshapeError::SourceUnavailable`] if the line cannot be read.
    fn read_line(&self, file: &str, line: u32) -> Result<String>;
}

/// Reads call sites from the filesystem
///
/// Paths recorded by `file!()` are relative to the workspace root, while
/// `cargo test` and `cargo run` set the working directory and
/// `CARGO_MANIFEST_DIR` to the member package. The reader therefore tries the
/// path as given, then relative to `CARGO_MANIFEST_DIR` and each of its
/// ancestors.
#[derive(Debug, Clone, Default)]
pub struct FsSourceReader {
    roots: Vec<PathBuf>,
}

impl FsSourceReader {
    /// Create a reader that tries the current directory, then
    /// `CARGO_MANIFEST_DIR` and its ancestors
    #[must_use]
    pub fn new() -> Self {
        let reader = Self {
            roots: vec![PathBuf::new()],
        };
        match std::env::var_os("CARGO_MANIFEST_DIR") {
            Some(dir) => reader.with_ancestors(PathBuf::from(dir)),
            None => reader,
        }
    }

    /// Create a reader resolving relative paths against `root` only
    #[must_use]
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            roots: vec![root.into()],
        }
    }

    /// Also resolve relative paths against `dir` and every ancestor of it,
    /// nearest first
    #[must_use]
    pub fn with_ancestors(mut self, dir: impl AsRef<Path>) -> Self {
        self.roots.extend(dir.as_ref().ancestors().map(Path::to_path_buf));
        self
    }

    fn candidates<'a>(&'a self, file: &'a str) -> impl Iterator<Item = PathBuf> + 'a {
        let path = Path::new(file);
        let absolute = path.is_absolute().then(|| path.to_path_buf());
        let relative = self
            .roots
            .iter()
            .filter(move |_| !path.is_absolute())
            .map(move |root| root.join(path));
        absolute.into_iter().chain(relative)
    }
}

impl SourceReader for FsSourceReader {
    fn read_line(&self, file: &str, line: u32) -> Result<String> {
        let unavailable = |reason: String| PshapeError::SourceUnavailable {
            file: file.to_string(),
            line,
            reason,
        };

        if line == 0 {
            return Err(unavailable("line numbers start at 1".to_string()));
        }

        let mut last_error = String::from("no candidate paths");
        for path in self.candidates(file) {
            match std::fs::read_to_string(&path) {
                Ok(source) => {
                    return source
                        .lines()
                        .nth(line as usize - 1)
                        .map(str::to_string)
                        .ok_or_else(|| unavailable(format!("file has fewer than {line} lines")));
                }
                Err(e) => last_error = format!("{}: {e}", path.display()),
            }
        }

        Err(unavailable(last_error))
    }
}

/// Extract the text between the callee's `(` and its balanced `)`
///
/// The trimmed line must start with the callee, optionally behind a module
/// path (`pshape::pshape!(`).
///
/// # Errors
///
/// - [`PshapeError::AmbiguousCallSyntax`] if the line does not start with the call
/// - [`PshapeError::ParseFailure`] if the parentheses do not balance on this line
pub fn extract_call_args(line: &str, callee: &str) -> Result<String> {
    let trimmed = line.trim();

    let open = call_prefix()
        .captures(trimmed)
        .filter(|caps| &caps[1] == callee)
        .and_then(|caps| caps.get(0))
        .ok_or_else(|| PshapeError::AmbiguousCallSyntax {
            callee: callee.to_string(),
            line: trimmed.to_string(),
        })?;

    let body = &trimmed[open.end()..];
    let mut depth = 1usize;
    for (idx, c) in body.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return Ok(body[..idx].to_string());
                }
            }
            _ => {}
        }
    }

    Err(PshapeError::ParseFailure(format!(
        "no closing parenthesis for `{callee}(` on this line"
    )))
}

/// Optional module path, then a macro name and its opening parenthesis
fn call_prefix() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(?:::)?(?:[A-Za-z_][A-Za-z0-9_]*::)*([A-Za-z_][A-Za-z0-9_]*!)\(")
            .expect("call prefix pattern is valid")
    })
}

/// Resolve the argument expressions of the call at `site`
///
/// Returns one name per array argument, after dropping the call site's
/// leading non-array arguments.
///
/// # Errors
///
/// Propagates [`SourceReader::read_line`] and [`extract_call_args`] failures,
/// and returns [`PshapeError::ParseFailure`] when the line has fewer
/// arguments than the leading ones the macro takes.
pub fn resolve(site: &CallSite, reader: &dyn SourceReader) -> Result<Vec<String>> {
    let text = reader.read_line(site.file, site.line)?;
    let raw = extract_call_args(&text, site.callee)?;
    let mut names = split_args(&raw);

    if names.len() < site.leading_args {
        return Err(PshapeError::ParseFailure(format!(
            "expected at least {} leading arguments, found {}",
            site.leading_args,
            names.len()
        )));
    }
    names.drain(..site.leading_args);

    Ok(names)
}

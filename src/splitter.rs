//! Top-level argument splitting
//!
//! The simplest parser that can label arrays: it only cares about commas and
//! parenthesis depth. Commas inside string literals still split, and brackets
//! other than `(`/`)` do not nest.

/// Split a raw argument list into one expression per top-level argument
///
/// A comma separates arguments only at parenthesis depth zero. Each segment
/// is stripped of leading whitespace; trailing whitespace is kept.
///
/// # Examples
///
/// ```
/// use pshape::split_args;
///
/// assert_eq!(split_args("a, b"), vec!["a", "b"]);
/// assert_eq!(split_args("f(a, b), c"), vec!["f(a, b)", "c"]);
/// assert_eq!(split_args(""), vec![""]);
/// ```
#[must_use]
pub fn split_args(raw: &str) -> Vec<String> {
    let mut segments = vec![String::new()];
    let mut depth: i32 = 0;

    for c in raw.chars() {
        if depth == 0 && c == ',' {
            segments.push(String::new());
            continue;
        }
        match c {
            '(' => depth += 1,
            ')' => depth -= 1,
            _ => {}
        }
        if let Some(current) = segments.last_mut() {
            current.push(c);
        }
    }

    segments
        .into_iter()
        .map(|s| s.trim_start().to_string())
        .collect()
}

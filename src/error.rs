//! Error types for pshape operations
//!
//! None of these escape [`crate::print_arrays`]: the printer maps each variant
//! to a fallback or a [`crate::PrintOutcome`].

use thiserror::Error;

/// Result type for pshape operations
pub type Result<T> = std::result::Result<T, PshapeError>;

/// Errors that can occur while resolving names or rendering a table
#[derive(Debug, Error)]
pub enum PshapeError {
    /// The source line of the call site could not be read
    #[error("Source unavailable for {file}:{line}: {reason}")]
    SourceUnavailable {
        /// File as recorded by `file!()`
        file: String,
        /// 1-based line number
        line: u32,
        /// Why the line could not be read
        reason: String,
    },

    /// The call line does not start with the macro invocation
    #[error("Call line does not start with `{callee}(`: {line}")]
    AmbiguousCallSyntax {
        /// Macro name including the `!`
        callee: String,
        /// The trimmed source line
        line: String,
    },

    /// The argument list could not be extracted from the call line
    #[error("Failed to parse call arguments: {0}")]
    ParseFailure(String),

    /// Table rows disagree on their column layout
    #[error("Row {row} has columns {actual:?}, expected {expected:?}")]
    RowMismatch {
        /// Index of the offending row
        row: usize,
        /// Column layout of the first row
        expected: Vec<String>,
        /// Column layout of the offending row
        actual: Vec<String>,
    },

    /// Writing to the output sink failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// A panic caught while computing metrics or formatting
    #[error("Internal failure: {0}")]
    Internal(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_unavailable_display() {
        let err = PshapeError::SourceUnavailable {
            file: "src/main.rs".to_string(),
            line: 12,
            reason: "No such file".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Source unavailable for src/main.rs:12: No such file"
        );
    }

    #[test]
    fn test_ambiguous_call_display() {
        let err = PshapeError::AmbiguousCallSyntax {
            callee: "pshape!".to_string(),
            line: "let x = pshape!(a);".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Call line does not start with `pshape!(`: let x = pshape!(a);"
        );
    }

    #[test]
    fn test_parse_failure_display() {
        let err = PshapeError::ParseFailure("unbalanced parenthesis".to_string());
        assert!(err.to_string().contains("unbalanced parenthesis"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed");
        let err: PshapeError = io.into();
        assert!(matches!(err, PshapeError::Io(_)));
        assert!(err.to_string().contains("pipe closed"));
    }

    #[test]
    fn test_internal_display() {
        let err = PshapeError::Internal("boom".to_string());
        assert_eq!(err.to_string(), "Internal failure: boom");
    }
}

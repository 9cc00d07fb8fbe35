//! Compiler diagnostics.
//!
//! Every phase reports problems as [`Diagnostic`] values collected
//! alongside its artifact; nothing unwinds across phase boundaries. A
//! diagnostic carries a 1-indexed source position, a message, and a
//! [`Severity`]. Errors fail compilation, warnings do not.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Diagnostic severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Severity {
    /// Suspicious but compilable (out-of-range values, empty repeats).
    Warning,
    /// Compilation fails.
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// A single diagnostic with source location.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{severity}: Line {line}: {message}")]
pub struct Diagnostic {
    /// 1-indexed source line.
    pub line: u32,
    /// 1-indexed source column. 0 when the reporting phase only tracks
    /// lines (semantic analysis).
    pub column: u32,
    /// Human-readable explanation.
    pub message: String,
    /// Error or warning.
    pub severity: Severity,
}

impl Diagnostic {
    /// Creates an error diagnostic.
    pub fn error(line: u32, column: u32, message: impl Into<String>) -> Self {
        Self {
            line,
            column,
            message: message.into(),
            severity: Severity::Error,
        }
    }

    /// Creates a warning diagnostic.
    pub fn warning(line: u32, column: u32, message: impl Into<String>) -> Self {
        Self {
            line,
            column,
            message: message.into(),
            severity: Severity::Warning,
        }
    }

    /// True when this diagnostic fails compilation.
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let diag = Diagnostic::error(3, 7, "unexpected token");
        assert_eq!(diag.line, 3);
        assert_eq!(diag.column, 7);
        assert_eq!(diag.severity, Severity::Error);
        assert!(diag.is_error());
    }

    #[test]
    fn test_warning_creation() {
        let diag = Diagnostic::warning(5, 0, "value out of range");
        assert_eq!(diag.severity, Severity::Warning);
        assert!(!diag.is_error());
    }

    #[test]
    fn test_display_format() {
        let diag = Diagnostic::error(2, 1, "Unknown keyword 'jump'");
        assert_eq!(diag.to_string(), "error: Line 2: Unknown keyword 'jump'");

        let warn = Diagnostic::warning(4, 0, "will be clamped");
        assert_eq!(warn.to_string(), "warning: Line 4: will be clamped");
    }

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Warning < Severity::Error);
    }
}

//! Core diagnostic types.

use fern_ir::Span;
use std::fmt;

/// Severity level for diagnostics.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Severity {
    Error,
    Warning,
    Note,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Note => write!(f, "note"),
        }
    }
}

/// Diagnostic categories with their stable uppercase labels.
///
/// The labels are part of the golden-test interface.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Category {
    ParseError,
    UnknownToken,
    UndefinedVariable,
    InvalidNumber,
    TypeMismatch,
}

impl Category {
    /// The stable uppercase label rendered in the PROBLEMS section.
    pub const fn label(&self) -> &'static str {
        match self {
            Category::ParseError => "PARSE ERROR",
            Category::UnknownToken => "UNKNOWN TOKEN",
            Category::UndefinedVariable => "UNDEFINED VARIABLE",
            Category::InvalidNumber => "INVALID NUMBER",
            Category::TypeMismatch => "TYPE MISMATCH",
        }
    }
}

/// A diagnostic collected during parsing, canonicalization, or inference.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Diagnostic {
    pub severity: Severity,
    pub category: Category,
    pub message: String,
    pub span: Span,
    /// Stable machine-readable code; for parse errors this is the malformed
    /// node's reason code.
    pub code: Option<&'static str>,
}

impl Diagnostic {
    /// Create an error diagnostic.
    pub fn error(category: Category, message: impl Into<String>, span: Span) -> Self {
        Diagnostic {
            severity: Severity::Error,
            category,
            message: message.into(),
            span,
            code: None,
        }
    }

    /// Attach a stable machine-readable code.
    #[must_use]
    pub fn with_code(mut self, code: &'static str) -> Self {
        self.code = Some(code);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn labels_are_stable() {
        assert_eq!(Category::ParseError.label(), "PARSE ERROR");
        assert_eq!(Category::UndefinedVariable.label(), "UNDEFINED VARIABLE");
        assert_eq!(Category::UnknownToken.label(), "UNKNOWN TOKEN");
        assert_eq!(Category::InvalidNumber.label(), "INVALID NUMBER");
        assert_eq!(Category::TypeMismatch.label(), "TYPE MISMATCH");
    }

    #[test]
    fn with_code_sets_code() {
        let d = Diagnostic::error(Category::ParseError, "bad", Span::new(0, 1))
            .with_code("expected_expr");
        assert_eq!(d.code, Some("expected_expr"));
        assert_eq!(d.severity, Severity::Error);
    }
}

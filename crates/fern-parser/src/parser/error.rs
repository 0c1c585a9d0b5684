//! Diagnostics, the error cap and parse errors.
//!
//! Every problem the parser detects becomes a [`Diagnostic`]: a stable code,
//! the location of the offending token and named parameters for whoever
//! renders it. Rendering to prose is not done here.

use fern_ast::Location;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use tracing::debug;

/// Default number of diagnostics collected before parsing aborts.
pub const DEFAULT_MAX_ERRORS: usize = 10;

/// Machine-readable diagnostic code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DiagnosticCode {
    /// A specific token was required: `expected`, `found`, `context`
    ExpectedToken,
    /// An identifier was required: `found`, `context`
    ExpectedIdentifier,
    /// No expression starts here: `found`
    ExpectedExpression,
    /// No pattern starts here: `found`
    ExpectedPattern,
    /// No type expression starts here: `found`
    ExpectedType,
    /// No declaration starts here: `found`
    ExpectedDeclaration,
    /// Two statements or declarations without a separator: `found`
    MissingTerminator,
    /// A string literal was required: `found`, `context`
    ExpectedStringLiteral,
    /// The token cannot appear here: `found`, `context`
    UnexpectedToken,
    /// `and` after a `let` without `rec`
    AndWithoutRec,
    /// `{ expr }` could be a block or a record
    AmbiguousBraces,
    /// `(+)`, `(1 +)` or `(+ 1)`: `operator`, `kind`, `hint`
    OperatorSection,
    /// The error cap was reached: `limit`
    TooManyErrors,
}

/// Error taxonomy a diagnostic code belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DiagnosticCategory {
    /// A required token class was absent
    Expected,
    /// No production matches the current token
    Unexpected,
    /// Well-formed under more than one reading
    Ambiguous,
    /// Parseable but rejected
    Unsupported,
    /// Too many accumulated errors
    Limit,
}

impl DiagnosticCode {
    /// Stable code string, e.g. `P0001`.
    pub fn as_str(self) -> &'static str {
        match self {
            DiagnosticCode::ExpectedToken => "P0001",
            DiagnosticCode::ExpectedIdentifier => "P0002",
            DiagnosticCode::ExpectedExpression => "P0003",
            DiagnosticCode::ExpectedPattern => "P0004",
            DiagnosticCode::ExpectedType => "P0005",
            DiagnosticCode::ExpectedDeclaration => "P0006",
            DiagnosticCode::MissingTerminator => "P0007",
            DiagnosticCode::ExpectedStringLiteral => "P0008",
            DiagnosticCode::UnexpectedToken => "P0009",
            DiagnosticCode::AndWithoutRec => "P0010",
            DiagnosticCode::AmbiguousBraces => "P0011",
            DiagnosticCode::OperatorSection => "P0012",
            DiagnosticCode::TooManyErrors => "P0013",
        }
    }

    /// Taxonomy of this code.
    pub fn category(self) -> DiagnosticCategory {
        match self {
            DiagnosticCode::ExpectedToken
            | DiagnosticCode::ExpectedIdentifier
            | DiagnosticCode::ExpectedExpression
            | DiagnosticCode::ExpectedPattern
            | DiagnosticCode::ExpectedType
            | DiagnosticCode::ExpectedDeclaration
            | DiagnosticCode::MissingTerminator
            | DiagnosticCode::ExpectedStringLiteral => DiagnosticCategory::Expected,
            DiagnosticCode::UnexpectedToken | DiagnosticCode::AndWithoutRec => {
                DiagnosticCategory::Unexpected
            }
            DiagnosticCode::AmbiguousBraces => DiagnosticCategory::Ambiguous,
            DiagnosticCode::OperatorSection => DiagnosticCategory::Unsupported,
            DiagnosticCode::TooManyErrors => DiagnosticCategory::Limit,
        }
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Diagnostic severity. The parser only produces errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Severity {
    /// Rejects the input
    #[default]
    Error,
}

/// A structured parse diagnostic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// What went wrong
    pub code: DiagnosticCode,
    /// Where it went wrong
    pub location: Location,
    /// Named interpolation parameters, in insertion order
    pub params: IndexMap<String, String>,
    /// Always [`Severity::Error`] for parser diagnostics
    pub severity: Severity,
}

impl Diagnostic {
    /// Create a diagnostic without parameters.
    pub fn new(code: DiagnosticCode, location: Location) -> Self {
        Self {
            code,
            location,
            params: IndexMap::new(),
            severity: Severity::Error,
        }
    }

    /// Attach a named parameter.
    pub fn with_param(mut self, name: impl Into<String>, value: impl fmt::Display) -> Self {
        self.params.insert(name.into(), value.to_string());
        self
    }

    /// Look up a parameter by name.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.location, self.code)?;
        for (name, value) in &self.params {
            write!(f, " {name}={value:?}")?;
        }
        Ok(())
    }
}

/// Error propagated through the grammar functions.
///
/// The diagnostic itself is already recorded in [`Diagnostics`] when this is
/// raised; the payload is a copy for callers that stop at the first error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    /// A recoverable syntax error
    #[error("syntax error: {0}")]
    Syntax(Box<Diagnostic>),
    /// The error cap was reached; parsing cannot continue
    #[error("too many errors (limit {limit})")]
    TooManyErrors {
        /// Configured cap
        limit: usize,
    },
}

impl ParseError {
    /// Whether a batch caller may synchronize and keep going.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, ParseError::Syntax(_))
    }
}

/// Result type of every grammar function.
pub type PResult<T> = Result<T, ParseError>;

/// Ordered diagnostic collection with a hard cap.
#[derive(Debug, Clone)]
pub struct Diagnostics {
    items: Vec<Diagnostic>,
    limit: usize,
}

impl Diagnostics {
    /// Create an empty collection with the given cap.
    pub fn new(limit: usize) -> Self {
        Self {
            items: Vec::new(),
            limit: limit.max(1),
        }
    }

    /// Record a diagnostic and produce the error to propagate.
    ///
    /// Once the collection holds `limit` diagnostics a final
    /// [`DiagnosticCode::TooManyErrors`] sentinel is appended and the fatal
    /// [`ParseError::TooManyErrors`] is returned.
    pub fn report(&mut self, diagnostic: Diagnostic) -> ParseError {
        if self.limit_reached() {
            return ParseError::TooManyErrors { limit: self.limit };
        }

        debug!(
            code = %diagnostic.code,
            location = %diagnostic.location,
            "parse diagnostic"
        );
        let location = diagnostic.location.clone();
        self.items.push(diagnostic.clone());

        if self.items.len() >= self.limit {
            debug!(limit = self.limit, "error limit reached, aborting");
            self.items.push(
                Diagnostic::new(DiagnosticCode::TooManyErrors, location)
                    .with_param("limit", self.limit),
            );
            return ParseError::TooManyErrors { limit: self.limit };
        }

        ParseError::Syntax(Box::new(diagnostic))
    }

    /// Whether the sentinel has already been appended.
    pub fn limit_reached(&self) -> bool {
        self.items.len() > self.limit
    }

    /// Number of recorded diagnostics, sentinel included.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Recorded diagnostics in order.
    pub fn as_slice(&self) -> &[Diagnostic] {
        &self.items
    }

    /// Take ownership of the recorded diagnostics.
    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.items
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn loc(line: u32) -> Location {
        Location::new(Arc::from("test.fern"), line, 1, 0)
    }

    #[test]
    fn test_with_param_keeps_insertion_order() {
        let diagnostic = Diagnostic::new(DiagnosticCode::ExpectedToken, loc(1))
            .with_param("expected", ")")
            .with_param("found", "end of input");

        let names: Vec<_> = diagnostic.params.keys().cloned().collect();
        assert_eq!(names, vec!["expected", "found"]);
        assert_eq!(diagnostic.param("expected"), Some(")"));
        assert_eq!(diagnostic.severity, Severity::Error);
    }

    #[test]
    fn test_report_below_cap_is_recoverable() {
        let mut diagnostics = Diagnostics::new(3);
        let err = diagnostics.report(Diagnostic::new(DiagnosticCode::ExpectedType, loc(1)));

        assert!(err.is_recoverable());
        assert_eq!(diagnostics.len(), 1);
    }

    #[test]
    fn test_cap_appends_sentinel_once() {
        let mut diagnostics = Diagnostics::new(2);
        diagnostics.report(Diagnostic::new(DiagnosticCode::ExpectedType, loc(1)));
        let err = diagnostics.report(Diagnostic::new(DiagnosticCode::ExpectedType, loc(2)));
        assert_eq!(err, ParseError::TooManyErrors { limit: 2 });

        let again = diagnostics.report(Diagnostic::new(DiagnosticCode::ExpectedType, loc(3)));
        assert_eq!(again, ParseError::TooManyErrors { limit: 2 });

        let codes: Vec<_> = diagnostics.as_slice().iter().map(|d| d.code).collect();
        assert_eq!(
            codes,
            vec![
                DiagnosticCode::ExpectedType,
                DiagnosticCode::ExpectedType,
                DiagnosticCode::TooManyErrors
            ]
        );
    }

    #[test]
    fn test_categories() {
        assert_eq!(
            DiagnosticCode::OperatorSection.category(),
            DiagnosticCategory::Unsupported
        );
        assert_eq!(
            DiagnosticCode::AmbiguousBraces.category(),
            DiagnosticCategory::Ambiguous
        );
        assert_eq!(
            DiagnosticCode::MissingTerminator.category(),
            DiagnosticCategory::Expected
        );
        assert_eq!(DiagnosticCode::TooManyErrors.as_str(), "P0013");
    }
}

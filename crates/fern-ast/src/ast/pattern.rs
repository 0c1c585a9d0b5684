//! Pattern nodes.

use super::types::TypeExpr;
use crate::foundation::{Located, Location};
use serde::{Deserialize, Serialize};

/// A pattern with its source location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pattern {
    /// What kind of pattern this is
    pub kind: PatternKind,
    /// Location of the pattern's first token
    pub loc: Location,
}

impl Pattern {
    /// Create a new pattern.
    pub fn new(kind: PatternKind, loc: Location) -> Self {
        Self { kind, loc }
    }

    /// The bound name, if this is a plain variable pattern.
    pub fn as_var(&self) -> Option<&str> {
        match &self.kind {
            PatternKind::Var(name) => Some(name),
            _ => None,
        }
    }
}

impl Located for Pattern {
    fn location(&self) -> &Location {
        &self.loc
    }
}

/// Pattern variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PatternKind {
    /// `_`
    Wildcard,
    /// Lowercase identifier binding: `x`
    Var(String),
    /// Literal: `0`, `-1`, `"s"`, `true`, `()`
    Literal(LiteralPattern),
    /// Uppercase constructor with optional arguments: `None`, `Some(x)`
    Constructor {
        /// Constructor name
        name: String,
        /// Argument patterns; empty when written without parentheses
        args: Vec<Pattern>,
    },
    /// Tuple with two or more elements: `(a, b)`
    Tuple(Vec<Pattern>),
    /// List: `[a, b, ...rest]`
    List {
        /// Fixed leading elements
        elements: Vec<Pattern>,
        /// Optional rest pattern, always last
        rest: Option<Box<Pattern>>,
    },
    /// Record: `{ name, age: a }`
    Record(Vec<RecordPatternField>),
    /// Type-annotated pattern: `(p: T)`
    Annotated {
        /// Inner pattern
        pattern: Box<Pattern>,
        /// Annotation
        type_expr: TypeExpr,
    },
}

/// Literal values allowed in patterns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LiteralPattern {
    /// Integer, possibly negative
    Int(i64),
    /// Float, possibly negative
    Float(f64),
    /// String
    String(String),
    /// Boolean
    Bool(bool),
    /// `()`
    Unit,
}

/// A record pattern field.
///
/// Shorthand `{ name }` is stored with `pattern` = `Var(name)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordPatternField {
    /// Field name
    pub name: String,
    /// Pattern the field value is matched against
    pub pattern: Pattern,
    /// Location of the field name
    pub loc: Location,
}

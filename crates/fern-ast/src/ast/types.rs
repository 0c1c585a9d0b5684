//! Type expression nodes.

use crate::foundation::{Located, Location};
use serde::{Deserialize, Serialize};

/// A type expression with its source location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeExpr {
    /// What kind of type expression this is
    pub kind: TypeExprKind,
    /// Location of the type expression's first token
    pub loc: Location,
}

impl TypeExpr {
    /// Create a new type expression.
    pub fn new(kind: TypeExprKind, loc: Location) -> Self {
        Self { kind, loc }
    }

    /// Classify a bare identifier by case.
    ///
    /// A leading lowercase letter (or `_`) makes a type variable; anything
    /// else is a type constant. Purely lexical.
    pub fn named(name: &str, loc: Location) -> Self {
        let kind = if name.starts_with(|c: char| c.is_ascii_uppercase()) {
            TypeExprKind::Const(name.to_string())
        } else {
            TypeExprKind::Var(name.to_string())
        };
        Self::new(kind, loc)
    }
}

impl Located for TypeExpr {
    fn location(&self) -> &Location {
        &self.loc
    }
}

/// Type expression variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TypeExprKind {
    /// Type variable: `a`
    Var(String),
    /// Type constant: `Int`
    Const(String),
    /// Generic or constructor-style application: `List<Int>`, `Option(a)`
    App {
        /// Applied constructor (a `Var` or `Const`)
        constructor: Box<TypeExpr>,
        /// Arguments in source order
        args: Vec<TypeExpr>,
    },
    /// Function type: `(A, B) -> R`
    Function {
        /// Parameter types
        params: Vec<TypeExpr>,
        /// Return type
        return_type: Box<TypeExpr>,
    },
    /// Tuple type: `(A, B)`
    Tuple(Vec<TypeExpr>),
    /// Record type: `{ name: String, age: Int }`
    Record(Vec<RecordTypeField>),
    /// Union type: `A | B`
    Union(Vec<TypeExpr>),
    /// `()`
    Unit,
}

/// A field of a record type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordTypeField {
    /// Field name
    pub name: String,
    /// Field type
    pub type_expr: TypeExpr,
    /// Location of the field name
    pub loc: Location,
}

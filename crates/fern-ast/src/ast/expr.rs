//! Expression nodes.

use super::pattern::Pattern;
use super::types::TypeExpr;
use crate::foundation::{Located, Location};
use serde::{Deserialize, Serialize};
use std::fmt;

/// An expression with its source location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expr {
    /// What kind of expression this is
    pub kind: ExprKind,
    /// Location of the expression's first token
    pub loc: Location,
}

impl Expr {
    /// Create a new expression.
    pub fn new(kind: ExprKind, loc: Location) -> Self {
        Self { kind, loc }
    }

    /// Create a unit literal.
    pub fn unit(loc: Location) -> Self {
        Self::new(ExprKind::UnitLit, loc)
    }

    /// Create a binary operation located at its left operand.
    pub fn binary(op: BinaryOp, left: Expr, right: Expr) -> Self {
        let loc = left.loc.clone();
        Self::new(
            ExprKind::Binary {
                op,
                left: Box::new(left),
                right: Box::new(right),
            },
            loc,
        )
    }

    /// The variable name, if this is a plain variable reference.
    pub fn as_var(&self) -> Option<&str> {
        match &self.kind {
            ExprKind::Var(name) => Some(name),
            _ => None,
        }
    }
}

impl Located for Expr {
    fn location(&self) -> &Location {
        &self.loc
    }
}

/// Expression variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ExprKind {
    // === Literals ===
    /// Integer literal: `42`
    IntLit(i64),
    /// Float literal: `3.5`
    FloatLit(f64),
    /// String literal: `"text"`
    StringLit(String),
    /// Boolean literal: `true`, `false`
    BoolLit(bool),
    /// Unit literal: `()`
    UnitLit,

    /// Variable reference: `x`, `Some`
    Var(String),

    /// Lambda: `x => e`, `(a, b: Int): Int => e`, `() => e`
    Lambda {
        /// Parameters in source order
        params: Vec<LambdaParam>,
        /// Optional return type annotation
        return_type: Option<TypeExpr>,
        /// Lambda body
        body: Box<Expr>,
    },

    /// Function application: `f(a, b)`
    App {
        /// Callee
        func: Box<Expr>,
        /// Arguments in source order
        args: Vec<Expr>,
    },

    /// Binary operation (arithmetic, comparison, logic, cons, concat,
    /// composition, reference assignment)
    Binary {
        /// Operator
        op: BinaryOp,
        /// Left operand
        left: Box<Expr>,
        /// Right operand
        right: Box<Expr>,
    },

    /// Unary operation: `-x`, `!x`, postfix dereference `x!`
    Unary {
        /// Operator
        op: UnaryOp,
        /// Operand
        operand: Box<Expr>,
    },

    /// Pipe: `value |> func`
    Pipe {
        /// Value fed into the function
        value: Box<Expr>,
        /// Function receiving the value
        func: Box<Expr>,
    },

    /// Type annotation: `e: T`
    TypeAnnotation {
        /// Annotated expression
        expr: Box<Expr>,
        /// Annotation
        type_expr: TypeExpr,
    },

    /// Conditional: `if c then a else b`
    ///
    /// A missing `else` branch is a unit literal.
    If {
        /// Condition
        condition: Box<Expr>,
        /// Branch taken when the condition holds
        then_branch: Box<Expr>,
        /// Branch taken otherwise
        else_branch: Box<Expr>,
    },

    /// Pattern match: `match e { | p when g => body | ... }`
    Match {
        /// Matched value
        scrutinee: Box<Expr>,
        /// Arms in source order
        cases: Vec<MatchCase>,
    },

    /// Record construction: `{ x: 1, y, ...rest }`
    Record {
        /// Entries in source order; duplicates are preserved
        fields: Vec<RecordEntry>,
    },

    /// Record update: `{ ...base, x: 1 }` or `{ base | x: 1 }`
    RecordUpdate {
        /// Record being updated
        base: Box<Expr>,
        /// Overrides in source order; later entries win at evaluation time
        updates: Vec<RecordEntry>,
    },

    /// Field access: `r.field`
    RecordAccess {
        /// Accessed record
        record: Box<Expr>,
        /// Field name
        field: String,
    },

    /// Tuple: `(a, b, c)`
    Tuple(Vec<Expr>),

    /// List literal: `[a, ...rest, b]`
    List(Vec<ListElement>),

    /// Block: `{ stmt; stmt; result }`
    Block(Vec<Expr>),

    /// Block-level `let` statement: `let [mut] [rec] p: T = v`
    Let {
        /// The binding
        binding: Box<LetBinding>,
        /// Whether `rec` was given
        recursive: bool,
    },

    /// Block-level recursive group: `let rec f = ... and g = ...`
    LetRecGroup(Vec<LetBinding>),

    /// `unsafe { ... }`
    Unsafe(Box<Expr>),

    /// `while cond { ... }`
    While {
        /// Loop condition
        condition: Box<Expr>,
        /// Loop body (a block)
        body: Box<Expr>,
    },
}

/// Binary operators, grouped by precedence tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinaryOp {
    /// `:=`
    RefAssign,
    /// `>>`
    ForwardCompose,
    /// `<<`
    BackwardCompose,
    /// `||`
    LogicalOr,
    /// `&&`
    LogicalAnd,
    /// `==`
    Equal,
    /// `!=`
    NotEqual,
    /// `<`
    LessThan,
    /// `<=`
    LessEqual,
    /// `>`
    GreaterThan,
    /// `>=`
    GreaterEqual,
    /// `::`
    Cons,
    /// `&`
    Concat,
    /// `+`
    Add,
    /// `-`
    Subtract,
    /// `*`
    Multiply,
    /// `/`
    Divide,
    /// `%`
    Modulo,
}

impl BinaryOp {
    /// Source spelling of the operator.
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::RefAssign => ":=",
            BinaryOp::ForwardCompose => ">>",
            BinaryOp::BackwardCompose => "<<",
            BinaryOp::LogicalOr => "||",
            BinaryOp::LogicalAnd => "&&",
            BinaryOp::Equal => "==",
            BinaryOp::NotEqual => "!=",
            BinaryOp::LessThan => "<",
            BinaryOp::LessEqual => "<=",
            BinaryOp::GreaterThan => ">",
            BinaryOp::GreaterEqual => ">=",
            BinaryOp::Cons => "::",
            BinaryOp::Concat => "&",
            BinaryOp::Add => "+",
            BinaryOp::Subtract => "-",
            BinaryOp::Multiply => "*",
            BinaryOp::Divide => "/",
            BinaryOp::Modulo => "%",
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Unary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnaryOp {
    /// Prefix `-`
    Negate,
    /// Prefix `!`
    LogicalNot,
    /// Postfix `!`
    Deref,
}

/// A lambda parameter: a pattern with an optional type annotation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LambdaParam {
    /// Destructuring pattern
    pub pattern: Pattern,
    /// Optional `: Type`
    pub type_annotation: Option<TypeExpr>,
    /// Location of the pattern's first token
    pub loc: Location,
}

/// One arm of a `match`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchCase {
    /// Arm pattern
    pub pattern: Pattern,
    /// Optional `when` guard
    pub guard: Option<Expr>,
    /// Arm body
    pub body: Expr,
    /// Location of the pattern's first token
    pub loc: Location,
}

/// An entry of a record literal or update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RecordEntry {
    /// `name: value`, or shorthand `name` (value is `Var(name)`)
    Field {
        /// Field name
        name: String,
        /// Field value
        value: Expr,
        /// Location of the field name
        loc: Location,
    },
    /// `...expr`
    Spread {
        /// Spread record
        expr: Expr,
        /// Location of the `...`
        loc: Location,
    },
}

impl Located for RecordEntry {
    fn location(&self) -> &Location {
        match self {
            RecordEntry::Field { loc, .. } | RecordEntry::Spread { loc, .. } => loc,
        }
    }
}

/// An element of a list literal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ListElement {
    /// Plain element
    Item(Expr),
    /// `...expr`
    Spread(Expr),
}

/// A `let` binding, shared by declarations and block statements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LetBinding {
    /// Bound pattern
    pub pattern: Pattern,
    /// Optional `: Type`
    pub type_annotation: Option<TypeExpr>,
    /// Bound value
    pub value: Expr,
    /// Whether `mut` was given
    pub mutable: bool,
    /// Location of `let`, `and`, or `mut`, whichever starts the binding
    pub loc: Location,
}

//! Function table wiring the mutually recursive grammars.
//!
//! Expressions contain patterns (lambda parameters, match arms) and types
//! (annotations); patterns contain types; match arms contain guard
//! expressions. Each grammar calls the others only through this table,
//! which is filled once before parsing starts.

use super::{expr, patterns, types, PResult, Parser};
use fern_ast::{Expr, Pattern, TypeExpr};

/// Entry point of the expression grammar.
pub type ExprFn = fn(&mut Parser<'_>) -> PResult<Expr>;
/// Entry point of the pattern grammar.
pub type PatternFn = fn(&mut Parser<'_>) -> PResult<Pattern>;
/// Entry point of the type expression grammar.
pub type TypeFn = fn(&mut Parser<'_>) -> PResult<TypeExpr>;

/// Cross-grammar entry points.
#[derive(Clone, Copy)]
pub struct Grammar {
    /// Full expression, lambda tier down
    pub expression: ExprFn,
    /// Match guard, parsed below the lambda tier
    pub guard: ExprFn,
    /// Pattern
    pub pattern: PatternFn,
    /// Type expression
    pub type_expr: TypeFn,
}

impl Grammar {
    /// The real grammar.
    pub fn standard() -> Self {
        Self {
            expression: expr::parse_expr,
            guard: expr::parse_guard,
            pattern: patterns::parse_pattern,
            type_expr: types::parse_type,
        }
    }
}

impl std::fmt::Debug for Grammar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Grammar").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::ParseOptions;
    use fern_ast::{ExprKind, PatternKind, TypeExprKind};
    use fern_lexer::tokenize;

    /// Consumes one token and yields a fixed type, whatever the input.
    fn stub_type(p: &mut Parser<'_>) -> PResult<TypeExpr> {
        let loc = p.location();
        p.advance();
        Ok(TypeExpr::new(TypeExprKind::Const("Stub".into()), loc))
    }

    #[test]
    fn test_expression_grammar_calls_type_through_table() {
        let lexemes = tokenize("x: 42").unwrap();
        let grammar = Grammar {
            type_expr: stub_type,
            ..Grammar::standard()
        };
        let mut parser = Parser::with_grammar(&lexemes, "test.fern", &ParseOptions::default(), grammar);

        let expr = parser.parse_expression().unwrap();
        match expr.kind {
            ExprKind::TypeAnnotation { type_expr, .. } => {
                assert_eq!(type_expr.kind, TypeExprKind::Const("Stub".into()));
            }
            other => panic!("expected type annotation, got {:?}", other),
        }
    }

    #[test]
    fn test_pattern_grammar_calls_type_through_table() {
        let lexemes = tokenize("(x: 42)").unwrap();
        let grammar = Grammar {
            type_expr: stub_type,
            ..Grammar::standard()
        };
        let mut parser = Parser::with_grammar(&lexemes, "test.fern", &ParseOptions::default(), grammar);

        let pattern = parser.parse_pattern().unwrap();
        assert!(matches!(pattern.kind, PatternKind::Annotated { .. }));
    }
}

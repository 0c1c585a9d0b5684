//! Atomic expressions - literals, identifiers, list literals - and the
//! primary-position dispatch.

use super::super::token_utils::describe;
use super::super::{Diagnostic, DiagnosticCode, PResult, Parser};
use super::{ambiguity, special};
use fern_ast::{Expr, ExprKind, ListElement};
use fern_lexer::Token;

/// Parse a primary expression.
pub(super) fn parse_primary(p: &mut Parser<'_>) -> PResult<Expr> {
    let loc = p.location();

    let kind = match p.peek() {
        Some(Token::Int(n)) => ExprKind::IntLit(*n),
        Some(Token::Float(x)) => ExprKind::FloatLit(*x),
        Some(Token::Str(s)) => ExprKind::StringLit(s.to_string()),
        Some(Token::True) => ExprKind::BoolLit(true),
        Some(Token::False) => ExprKind::BoolLit(false),
        Some(Token::Ident(name)) => ExprKind::Var(name.to_string()),
        Some(Token::LParen) => return ambiguity::parse_paren(p),
        Some(Token::LBrace) => return ambiguity::parse_brace(p),
        Some(Token::LBracket) => return parse_list(p),
        Some(Token::If) => return special::parse_if(p),
        Some(Token::Match) => return special::parse_match(p),
        Some(Token::Unsafe) => return special::parse_unsafe(p),
        Some(Token::While) => return special::parse_while(p),
        Some(Token::Let) => return Err(p.error_here(DiagnosticCode::ExpectedExpression)),
        Some(_) => return Err(p.unexpected("in expression")),
        None => {
            let diagnostic = Diagnostic::new(DiagnosticCode::ExpectedExpression, loc)
                .with_param("found", describe(None));
            return Err(p.report(diagnostic));
        }
    };

    p.advance();
    Ok(Expr::new(kind, loc))
}

/// List literal: `[a, ...rest, b]`
fn parse_list(p: &mut Parser<'_>) -> PResult<Expr> {
    let loc = p.expect(Token::LBracket, "to open a list")?;

    let mut elements = Vec::new();
    while !p.eat(&Token::RBracket) {
        let element = if p.eat(&Token::Ellipsis) {
            ListElement::Spread(p.parse_expression()?)
        } else {
            ListElement::Item(p.parse_expression()?)
        };
        elements.push(element);

        if !p.eat(&Token::Comma) {
            p.expect(Token::RBracket, "to close the list")?;
            break;
        }
    }

    Ok(Expr::new(ExprKind::List(elements), loc))
}

#[cfg(test)]
mod tests {
    use crate::parser::{parse_expression, DiagnosticCode};
    use fern_ast::{ExprKind, ListElement};
    use fern_lexer::tokenize;

    #[test]
    fn test_list_with_interleaved_spread() {
        let lexemes = tokenize("[1, ...xs, 2]").unwrap();
        let expr = parse_expression(&lexemes, "test.fern").unwrap();
        let ExprKind::List(elements) = expr.kind else {
            panic!("expected list");
        };
        assert!(matches!(elements[0], ListElement::Item(_)));
        assert!(matches!(elements[1], ListElement::Spread(_)));
        assert!(matches!(elements[2], ListElement::Item(_)));
    }

    #[test]
    fn test_end_of_input_expects_expression() {
        let lexemes = tokenize("1 +").unwrap();
        let errors = parse_expression(&lexemes, "test.fern").unwrap_err();
        assert_eq!(errors[0].code, DiagnosticCode::ExpectedExpression);
    }

    #[test]
    fn test_stray_token_is_unexpected() {
        let lexemes = tokenize("1 + )").unwrap();
        let errors = parse_expression(&lexemes, "test.fern").unwrap_err();
        assert_eq!(errors[0].code, DiagnosticCode::UnexpectedToken);
        assert_eq!(errors[0].param("found"), Some(")"));
    }
}

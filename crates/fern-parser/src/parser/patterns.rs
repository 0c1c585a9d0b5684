//! Pattern parser.
//!
//! Patterns appear in `let` bindings, lambda parameters and match arms.
//! Type annotations inside patterns go through the grammar table.

use super::{DiagnosticCode, PResult, Parser};
use fern_ast::{Expr, LiteralPattern, Pattern, PatternKind, RecordPatternField};
use fern_lexer::Token;

/// Parse a pattern.
pub(crate) fn parse_pattern(p: &mut Parser<'_>) -> PResult<Pattern> {
    let loc = p.location();

    let kind = match p.peek() {
        Some(Token::Underscore) => {
            p.advance();
            PatternKind::Wildcard
        }
        Some(token @ Token::Ident(_)) if token.is_upper_ident() => {
            return parse_constructor(p);
        }
        Some(Token::Ident(name)) => {
            let name = name.to_string();
            p.advance();
            PatternKind::Var(name)
        }
        Some(Token::Int(_) | Token::Float(_) | Token::Str(_) | Token::True | Token::False) => {
            PatternKind::Literal(parse_literal(p, false)?)
        }
        Some(Token::Minus) if matches!(p.peek_nth(1), Some(Token::Int(_) | Token::Float(_))) => {
            p.advance();
            PatternKind::Literal(parse_literal(p, true)?)
        }
        Some(Token::LParen) => return parse_parenthesized(p),
        Some(Token::LBracket) => return parse_list(p),
        Some(Token::LBrace) => return parse_record(p),
        _ => return Err(p.error_here(DiagnosticCode::ExpectedPattern)),
    };

    Ok(Pattern::new(kind, loc))
}

/// Parse a match arm head: `pattern [when guard]`.
pub(crate) fn parse_case_head(p: &mut Parser<'_>) -> PResult<(Pattern, Option<Expr>)> {
    let pattern = p.parse_pattern()?;
    let guard = if p.eat(&Token::When) {
        Some(p.parse_guard()?)
    } else {
        None
    };
    Ok((pattern, guard))
}

fn parse_literal(p: &mut Parser<'_>, negative: bool) -> PResult<LiteralPattern> {
    let literal = match p.peek() {
        Some(Token::Int(n)) if negative => LiteralPattern::Int(n.wrapping_neg()),
        Some(Token::Int(n)) => LiteralPattern::Int(*n),
        Some(Token::Float(x)) if negative => LiteralPattern::Float(-x),
        Some(Token::Float(x)) => LiteralPattern::Float(*x),
        Some(Token::Str(s)) => LiteralPattern::String(s.to_string()),
        Some(Token::True) => LiteralPattern::Bool(true),
        Some(Token::False) => LiteralPattern::Bool(false),
        _ => return Err(p.error_here(DiagnosticCode::ExpectedPattern)),
    };
    p.advance();
    Ok(literal)
}

/// `Name` or `Name(p, ...)`.
fn parse_constructor(p: &mut Parser<'_>) -> PResult<Pattern> {
    let (name, loc) = p.expect_ident("as a constructor name")?;
    let args = if p.eat(&Token::LParen) {
        p.comma_list(Token::RParen, "to close the constructor arguments", parse_pattern)?
    } else {
        Vec::new()
    };
    Ok(Pattern::new(PatternKind::Constructor { name, args }, loc))
}

/// `()`, `(p)`, `(p: T)` or a tuple `(a, b: T, ...)`.
fn parse_parenthesized(p: &mut Parser<'_>) -> PResult<Pattern> {
    let loc = p.expect(Token::LParen, "to open a parenthesized pattern")?;
    if p.eat(&Token::RParen) {
        return Ok(Pattern::new(PatternKind::Literal(LiteralPattern::Unit), loc));
    }

    let mut elements = p.comma_list(
        Token::RParen,
        "to close the parenthesized pattern",
        parse_annotated_element,
    )?;

    if elements.len() == 1 {
        return Ok(elements.remove(0));
    }
    Ok(Pattern::new(PatternKind::Tuple(elements), loc))
}

/// A pattern with an optional `: Type` suffix.
fn parse_annotated_element(p: &mut Parser<'_>) -> PResult<Pattern> {
    let pattern = parse_pattern(p)?;
    if !p.eat(&Token::Colon) {
        return Ok(pattern);
    }
    let type_expr = p.parse_type()?;
    let loc = pattern.loc.clone();
    Ok(Pattern::new(
        PatternKind::Annotated {
            pattern: Box::new(pattern),
            type_expr,
        },
        loc,
    ))
}

/// `[a, b, ...rest]`
fn parse_list(p: &mut Parser<'_>) -> PResult<Pattern> {
    let loc = p.expect(Token::LBracket, "to open a list pattern")?;
    let mut elements = Vec::new();
    let mut rest = None;

    while !p.eat(&Token::RBracket) {
        if p.eat(&Token::Ellipsis) {
            rest = Some(Box::new(parse_pattern(p)?));
            p.eat(&Token::Comma);
            p.expect(Token::RBracket, "after the rest pattern")?;
            break;
        }

        elements.push(parse_pattern(p)?);
        if !p.eat(&Token::Comma) {
            p.expect(Token::RBracket, "to close the list pattern")?;
            break;
        }
    }

    Ok(Pattern::new(PatternKind::List { elements, rest }, loc))
}

/// `{ name, name: pattern }`
fn parse_record(p: &mut Parser<'_>) -> PResult<Pattern> {
    let loc = p.expect(Token::LBrace, "to open a record pattern")?;
    let fields = p.comma_list(
        Token::RBrace,
        "to close the record pattern",
        |p| {
            let (name, loc) = p.expect_ident("as a record field name")?;
            let pattern = if p.eat(&Token::Colon) {
                parse_pattern(p)?
            } else {
                Pattern::new(PatternKind::Var(name.clone()), loc.clone())
            };
            Ok(RecordPatternField { name, pattern, loc })
        },
    )?;
    Ok(Pattern::new(PatternKind::Record(fields), loc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_pattern as parse_standalone;
    use fern_lexer::tokenize;

    fn parse(source: &str) -> Pattern {
        let lexemes = tokenize(source).unwrap();
        parse_standalone(&lexemes, "test.fern").expect("Parse failed")
    }

    fn parse_err(source: &str) -> DiagnosticCode {
        let lexemes = tokenize(source).unwrap();
        parse_standalone(&lexemes, "test.fern").unwrap_err()[0].code
    }

    #[test]
    fn test_negative_literals() {
        assert_eq!(parse("-1").kind, PatternKind::Literal(LiteralPattern::Int(-1)));
        assert_eq!(
            parse("-2.5").kind,
            PatternKind::Literal(LiteralPattern::Float(-2.5))
        );
    }

    #[test]
    fn test_unit_and_elision() {
        assert_eq!(parse("()").kind, PatternKind::Literal(LiteralPattern::Unit));
        assert_eq!(parse("(x)").kind, PatternKind::Var("x".into()));
        assert_eq!(parse("(x,)").kind, PatternKind::Var("x".into()));
    }

    #[test]
    fn test_constructor_case() {
        let PatternKind::Constructor { name, args } = parse("Some(x)").kind else {
            panic!("expected constructor");
        };
        assert_eq!(name, "Some");
        assert_eq!(args.len(), 1);

        let PatternKind::Constructor { args, .. } = parse("None").kind else {
            panic!("expected constructor");
        };
        assert!(args.is_empty());
    }

    #[test]
    fn test_list_rest_must_be_last() {
        let PatternKind::List { elements, rest } = parse("[a, b, ...tail]").kind else {
            panic!("expected list");
        };
        assert_eq!(elements.len(), 2);
        assert_eq!(rest.map(|r| r.kind), Some(PatternKind::Var("tail".into())));

        assert_eq!(parse_err("[...a, b]"), DiagnosticCode::ExpectedToken);
        assert_eq!(parse_err("[,]"), DiagnosticCode::ExpectedPattern);
    }

    #[test]
    fn test_record_shorthand_binds_name() {
        let PatternKind::Record(fields) = parse("{ name, age: a }").kind else {
            panic!("expected record");
        };
        assert_eq!(fields[0].pattern.kind, PatternKind::Var("name".into()));
        assert_eq!(fields[1].pattern.kind, PatternKind::Var("a".into()));
    }

    #[test]
    fn test_tuple_with_annotated_element() {
        let PatternKind::Tuple(elements) = parse("(a: Int, _)").kind else {
            panic!("expected tuple");
        };
        assert!(matches!(elements[0].kind, PatternKind::Annotated { .. }));
        assert_eq!(elements[1].kind, PatternKind::Wildcard);
    }
}

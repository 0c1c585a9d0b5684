//! Type expression parser.
//!
//! Precedence, lowest first: union `A | B`, function `(A, B) -> R`
//! (right-associative), primary (names, applications, records, groups).

use super::{DiagnosticCode, PResult, Parser};
use fern_ast::{RecordTypeField, TypeExpr, TypeExprKind};
use fern_lexer::{Lexeme, Token};
use tracing::trace;

/// Parse a type expression.
pub(crate) fn parse_type(p: &mut Parser<'_>) -> PResult<TypeExpr> {
    let first = parse_function_type(p)?;
    if !p.check(&Token::Bar) {
        return Ok(first);
    }

    let loc = first.loc.clone();
    let mut members = vec![first];
    while p.eat(&Token::Bar) {
        members.push(parse_function_type(p)?);
    }
    Ok(TypeExpr::new(TypeExprKind::Union(members), loc))
}

/// Parse a function type or anything tighter.
fn parse_function_type(p: &mut Parser<'_>) -> PResult<TypeExpr> {
    if p.check(&Token::LParen) {
        return parse_parenthesized(p);
    }

    let primary = parse_primary(p)?;
    if p.eat(&Token::Arrow) {
        let return_type = parse_function_type(p)?;
        let loc = primary.loc.clone();
        return Ok(TypeExpr::new(
            TypeExprKind::Function {
                params: vec![primary],
                return_type: Box::new(return_type),
            },
            loc,
        ));
    }
    Ok(primary)
}

/// `()`, `(T)`, `(A, B)` or a parameter list followed by `->`.
///
/// The parameter list is the parenthesized list itself, so
/// `(Int, String) -> R` has two parameters and `((Int, String)) -> R` one.
fn parse_parenthesized(p: &mut Parser<'_>) -> PResult<TypeExpr> {
    let loc = p.expect(Token::LParen, "to open a parenthesized type")?;
    let mut items = p.comma_list(Token::RParen, "to close the parenthesized type", parse_type)?;

    if p.eat(&Token::Arrow) {
        let return_type = parse_function_type(p)?;
        return Ok(TypeExpr::new(
            TypeExprKind::Function {
                params: items,
                return_type: Box::new(return_type),
            },
            loc,
        ));
    }

    match items.len() {
        0 => Ok(TypeExpr::new(TypeExprKind::Unit, loc)),
        1 => Ok(items.remove(0)),
        _ => Ok(TypeExpr::new(TypeExprKind::Tuple(items), loc)),
    }
}

fn parse_primary(p: &mut Parser<'_>) -> PResult<TypeExpr> {
    match p.peek() {
        Some(Token::Ident(_)) => parse_named(p),
        Some(Token::LBrace) => parse_record_type(p),
        _ => Err(p.error_here(DiagnosticCode::ExpectedType)),
    }
}

/// `Name`, `Name<T, ...>` or `Name(T, ...)`.
fn parse_named(p: &mut Parser<'_>) -> PResult<TypeExpr> {
    let (name, loc) = p.expect_ident("in type expression")?;
    let constructor = TypeExpr::named(&name, loc.clone());

    let args = if p.eat(&Token::Lt) {
        let args = parse_angle_list(p, parse_type)?;
        close_angle(p)?;
        args
    } else if p.eat(&Token::LParen) {
        p.comma_list(Token::RParen, "to close the type arguments", parse_type)?
    } else {
        return Ok(constructor);
    };

    Ok(TypeExpr::new(
        TypeExprKind::App {
            constructor: Box::new(constructor),
            args,
        },
        loc,
    ))
}

/// `{ name: T, ... }`
pub(crate) fn parse_record_type(p: &mut Parser<'_>) -> PResult<TypeExpr> {
    let loc = p.expect(Token::LBrace, "to open a record type")?;
    let fields = parse_record_fields(p)?;
    Ok(TypeExpr::new(TypeExprKind::Record(fields), loc))
}

/// Record type fields after the `{`, through the closing `}`.
pub(crate) fn parse_record_fields(p: &mut Parser<'_>) -> PResult<Vec<RecordTypeField>> {
    p.comma_list(
        Token::RBrace,
        "to close the record type",
        |p| {
            let (name, loc) = p.expect_ident("as a record field name")?;
            p.expect(Token::Colon, "after the record field name")?;
            let type_expr = parse_type(p)?;
            Ok(RecordTypeField {
                name,
                type_expr,
                loc,
            })
        },
    )
}

/// Type parameter names after a consumed `<`, through the closing `>`.
///
/// No trailing comma is accepted.
pub(crate) fn parse_type_params(p: &mut Parser<'_>) -> PResult<Vec<String>> {
    let params = parse_angle_list(p, |p| {
        p.expect_ident("as a type parameter").map(|(name, _)| name)
    })?;
    close_angle(p)?;
    Ok(params)
}

/// One or more comma-separated items, no trailing comma.
fn parse_angle_list<T>(
    p: &mut Parser<'_>,
    mut item: impl FnMut(&mut Parser<'_>) -> PResult<T>,
) -> PResult<Vec<T>> {
    let mut items = vec![item(p)?];
    while p.eat(&Token::Comma) {
        items.push(item(p)?);
    }
    Ok(items)
}

/// Consume the `>` closing an angle-bracket list.
///
/// A `>>` here closes two nested lists at once: it is consumed and a
/// synthetic `>` is pushed back for the enclosing list.
fn close_angle(p: &mut Parser<'_>) -> PResult<()> {
    if p.check(&Token::GtGt) {
        if let Some(shift) = p.stream.current().cloned() {
            p.advance();
            trace!(line = shift.line, column = shift.column, "splitting `>>`");
            p.stream.push_front(Lexeme::new(
                Token::Gt,
                shift.span.start + 1..shift.span.end,
                shift.line,
                shift.column + 1,
                false,
            ));
            return Ok(());
        }
    }
    p.expect(Token::Gt, "to close the type arguments")?;
    Ok(())
}

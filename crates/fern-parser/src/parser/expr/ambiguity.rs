//! What a `(` or `{` in primary position starts.
//!
//! `(`: unit, zero-parameter lambda, grouping, tuple, parameter list, or a
//! rejected operator section. Decided by scanning ahead to the matching `)`
//! without parsing.
//!
//! `{`: empty block, record, record update, block, or an ambiguity error.
//! Decided by the first one or two tokens, and failing that by parsing one
//! expression speculatively and rewinding.

use super::super::token_utils::is_binary_operator;
use super::super::{Diagnostic, DiagnosticCode, PResult, Parser};
use super::special::parse_block;
use fern_ast::{Expr, ExprKind, LambdaParam, RecordEntry};
use fern_lexer::Token;
use tracing::trace;

// =============================================================================
// Parentheses
// =============================================================================

/// Parse a form starting with `(`.
pub(super) fn parse_paren(p: &mut Parser<'_>) -> PResult<Expr> {
    let loc = p.location();

    if p.check_nth(1, &Token::RParen) {
        if arrow_follows(p, 2) {
            trace!("zero-parameter lambda");
            return parse_lambda_params(p);
        }
        p.advance();
        p.advance();
        return Ok(Expr::unit(loc));
    }

    if let Some(close) = matching_close(p) {
        if arrow_follows(p, close + 1) {
            trace!(close, "parenthesized lambda parameters");
            return parse_lambda_params(p);
        }
        if let Some(section) = operator_section(p, close) {
            return Err(p.report(section));
        }
    }

    p.advance();
    let mut items = p.comma_list(
        Token::RParen,
        "to close the parentheses",
        |p| p.parse_expression(),
    )?;

    if items.len() == 1 {
        return Ok(items.remove(0));
    }
    Ok(Expr::new(ExprKind::Tuple(items), loc))
}

/// Whether `=>`, or `: Type =>`, starts at offset `at`.
fn arrow_follows(p: &Parser<'_>, at: usize) -> bool {
    p.check_nth(at, &Token::FatArrow)
        || (p.check_nth(at, &Token::Colon) && type_then_arrow(p, at + 1))
}

/// Offset of the `)` matching the `(` under the cursor.
///
/// All three bracket kinds share one depth counter.
fn matching_close(p: &Parser<'_>) -> Option<usize> {
    let mut depth = 0usize;
    let mut offset = 0;
    loop {
        match p.peek_nth(offset)? {
            Token::LParen | Token::LBracket | Token::LBrace => depth += 1,
            Token::RParen | Token::RBracket | Token::RBrace => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return Some(offset);
                }
            }
            _ => {}
        }
        offset += 1;
    }
}

/// Whether a well-nested type expression starting at `at` is followed by `=>`.
///
/// Only tokens that can appear in a type are walked. `>>` closes two levels.
/// Two names in a row at depth zero, a comma at depth zero or a closer
/// without an opener mean this is not a return type annotation.
fn type_then_arrow(p: &Parser<'_>, at: usize) -> bool {
    let mut depth: usize = 0;
    let mut offset = at;
    let mut after_name = false;

    loop {
        let Some(token) = p.peek_nth(offset) else {
            return false;
        };
        match token {
            Token::FatArrow if depth == 0 => return offset > at,
            Token::Ident(_) => {
                if after_name && depth == 0 {
                    return false;
                }
                after_name = true;
                offset += 1;
                continue;
            }
            Token::Lt | Token::LParen | Token::LBrace => depth += 1,
            Token::Gt | Token::RParen | Token::RBrace => {
                let Some(next) = depth.checked_sub(1) else {
                    return false;
                };
                depth = next;
                after_name = depth == 0;
                offset += 1;
                continue;
            }
            Token::GtGt => {
                let Some(next) = depth.checked_sub(2) else {
                    return false;
                };
                depth = next;
                after_name = depth == 0;
                offset += 1;
                continue;
            }
            Token::Comma if depth == 0 => return false,
            Token::Colon if depth == 0 => return false,
            Token::Comma | Token::Colon | Token::Arrow | Token::Bar => {}
            _ => return false,
        }
        after_name = false;
        offset += 1;
    }
}

/// `(params) [: R] => body`, cursor on the `(`.
fn parse_lambda_params(p: &mut Parser<'_>) -> PResult<Expr> {
    let loc = p.expect(Token::LParen, "to open the lambda parameters")?;
    let params = p.comma_list(
        Token::RParen,
        "to close the lambda parameters",
        |p| {
            let loc = p.location();
            let pattern = p.parse_pattern()?;
            let type_annotation = if p.eat(&Token::Colon) {
                Some(p.parse_type()?)
            } else {
                None
            };
            Ok(LambdaParam {
                pattern,
                type_annotation,
                loc,
            })
        },
    )?;

    let return_type = if p.eat(&Token::Colon) {
        Some(p.parse_type()?)
    } else {
        None
    };
    p.expect(Token::FatArrow, "after the lambda parameters")?;
    let body = p.parse_expression()?;

    Ok(Expr::new(
        ExprKind::Lambda {
            params,
            return_type,
            body: Box::new(body),
        },
        loc,
    ))
}

/// Detect `(+)`, `(+ 1)` and `(1 +)` before parsing the contents.
///
/// A leading `-` is negation unless it stands alone. A trailing `>` or `>>`
/// after a depth-zero `:` closes type arguments, not a section.
fn operator_section(p: &Parser<'_>, close: usize) -> Option<Diagnostic> {
    let first = p.peek_nth(1)?;
    let leading = is_binary_operator(first) && (*first != Token::Minus || close == 2);

    let (operator, kind) = if leading {
        (first, if close == 2 { "bare" } else { "right" })
    } else {
        let last = p.peek_nth(close - 1)?;
        if close < 3 || !is_binary_operator(last) || closes_type_arguments(p, close) {
            return None;
        }
        (last, "left")
    };

    let operand = (if kind == "left" { 1..close - 1 } else { 2..close })
        .filter_map(|offset| p.peek_nth(offset))
        .map(|token| token.to_string())
        .collect::<Vec<_>>()
        .join(" ");
    let hint = match kind {
        "bare" => format!("(a, b) => a {operator} b"),
        "right" => format!("x => x {operator} {operand}"),
        _ => format!("x => {operand} {operator} x"),
    };

    trace!(%operator, kind, "operator section");
    Some(
        Diagnostic::new(DiagnosticCode::OperatorSection, p.location())
            .with_param("operator", operator)
            .with_param("kind", kind)
            .with_param("hint", hint),
    )
}

fn closes_type_arguments(p: &Parser<'_>, close: usize) -> bool {
    if !matches!(p.peek_nth(close - 1), Some(Token::Gt | Token::GtGt)) {
        return false;
    }
    let mut depth = 0usize;
    for offset in 1..close {
        match p.peek_nth(offset) {
            Some(Token::LParen | Token::LBracket | Token::LBrace) => depth += 1,
            Some(Token::RParen | Token::RBracket | Token::RBrace) => {
                depth = depth.saturating_sub(1)
            }
            Some(Token::Colon) if depth == 0 => return true,
            _ => {}
        }
    }
    false
}

// =============================================================================
// Braces
// =============================================================================

/// Parse a form starting with `{`.
pub(super) fn parse_brace(p: &mut Parser<'_>) -> PResult<Expr> {
    match (p.peek_nth(1), p.peek_nth(2)) {
        (Some(Token::RBrace), _) => {
            let loc = p.location();
            p.advance();
            p.advance();
            trace!("empty braces are a block");
            return Ok(Expr::new(ExprKind::Block(Vec::new()), loc));
        }
        (Some(Token::Ellipsis), _) | (Some(Token::Ident(_)), Some(Token::Colon)) => {
            return parse_record(p);
        }
        (Some(Token::Ident(_)), Some(Token::Bar)) => return parse_base_update(p),
        (Some(Token::Let | Token::If | Token::Match | Token::Unsafe | Token::While), _) => {
            return parse_block(p);
        }
        (Some(Token::Ident(_)), Some(Token::Comma | Token::RBrace)) => return parse_record(p),
        _ => {}
    }

    let loc = p.location();
    let checkpoint = p.stream.checkpoint();
    p.advance();
    p.with_record_context(false, |p| {
        p.parse_expression()?;

        if p.check(&Token::RBrace) {
            let diagnostic = Diagnostic::new(DiagnosticCode::AmbiguousBraces, loc.clone())
                .with_param(
                    "hint",
                    "add `;` after the expression for a block, or write `{ name: value }` for a record",
                );
            return Err(p.report(diagnostic));
        }
        if p.check(&Token::Semicolon) || p.implicit_terminator() {
            return Ok(());
        }
        Err(p.error_here(DiagnosticCode::MissingTerminator))
    })?;

    trace!("braces reparsed as a block");
    p.stream.restore(checkpoint);
    parse_block(p)
}

/// `{ field: v, shorthand, ...spread }`; a leading spread makes it an update.
fn parse_record(p: &mut Parser<'_>) -> PResult<Expr> {
    let loc = p.expect(Token::LBrace, "to open a record")?;
    let mut entries = parse_record_entries(p)?;

    if matches!(entries.first(), Some(RecordEntry::Spread { .. })) {
        if let RecordEntry::Spread { expr, .. } = entries.remove(0) {
            return Ok(Expr::new(
                ExprKind::RecordUpdate {
                    base: Box::new(expr),
                    updates: entries,
                },
                loc,
            ));
        }
    }
    Ok(Expr::new(ExprKind::Record { fields: entries }, loc))
}

/// `{ base | field: v, ... }`
fn parse_base_update(p: &mut Parser<'_>) -> PResult<Expr> {
    let loc = p.expect(Token::LBrace, "to open a record update")?;
    let (name, base_loc) = p.expect_ident("as the record to update")?;
    p.expect(Token::Bar, "after the record to update")?;
    if p.check(&Token::RBrace) {
        return Err(p.error_here(DiagnosticCode::ExpectedIdentifier));
    }
    let updates = parse_record_entries(p)?;

    Ok(Expr::new(
        ExprKind::RecordUpdate {
            base: Box::new(Expr::new(ExprKind::Var(name), base_loc)),
            updates,
        },
        loc,
    ))
}

/// Record entries through the closing `}`, under the record context.
fn parse_record_entries(p: &mut Parser<'_>) -> PResult<Vec<RecordEntry>> {
    p.with_record_context(true, |p| {
        p.comma_list(Token::RBrace, "to close the record", parse_record_entry)
    })
}

fn parse_record_entry(p: &mut Parser<'_>) -> PResult<RecordEntry> {
    let loc = p.location();
    if p.eat(&Token::Ellipsis) {
        let expr = p.parse_expression()?;
        return Ok(RecordEntry::Spread { expr, loc });
    }

    let (name, loc) = p.expect_ident("as a record field name")?;
    let value = if p.eat(&Token::Colon) {
        p.parse_expression()?
    } else {
        Expr::new(ExprKind::Var(name.clone()), loc.clone())
    };
    Ok(RecordEntry::Field { name, value, loc })
}

#[cfg(test)]
mod tests {
    use crate::parser::{parse_expression, DiagnosticCode};
    use fern_ast::{Expr, ExprKind, RecordEntry};
    use fern_lexer::tokenize;

    fn parse(source: &str) -> Expr {
        let lexemes = tokenize(source).unwrap();
        parse_expression(&lexemes, "test.fern").expect("Parse failed")
    }

    fn parse_err(source: &str) -> DiagnosticCode {
        let lexemes = tokenize(source).unwrap();
        parse_expression(&lexemes, "test.fern").unwrap_err()[0].code
    }

    #[test]
    fn test_zero_param_lambda_with_return_type() {
        let ExprKind::Lambda {
            params,
            return_type,
            ..
        } = parse("(): Int => 1").kind
        else {
            panic!("expected lambda");
        };
        assert!(params.is_empty());
        assert!(return_type.is_some());
    }

    #[test]
    fn test_return_type_with_nested_generics() {
        let ExprKind::Lambda { return_type, .. } = parse("(x): Map<K, List<V>> => x").kind else {
            panic!("expected lambda");
        };
        assert!(return_type.is_some());
    }

    #[test]
    fn test_destructuring_params() {
        let ExprKind::Lambda { params, .. } = parse("((a, b), { c }) => a").kind else {
            panic!("expected lambda");
        };
        assert_eq!(params.len(), 2);
    }

    #[test]
    fn test_annotated_grouping_is_not_a_section() {
        let expr = parse("(xs: List<Int>)");
        assert!(matches!(expr.kind, ExprKind::TypeAnnotation { .. }));
    }

    #[test]
    fn test_parenthesized_negation_is_not_a_section() {
        let expr = parse("(-x)");
        assert!(matches!(expr.kind, ExprKind::Unary { .. }));
        assert_eq!(parse_err("(-)"), DiagnosticCode::OperatorSection);
    }

    #[test]
    fn test_elm_style_update() {
        let ExprKind::RecordUpdate { base, updates } = parse("{ p | x: 1, y: 2 }").kind else {
            panic!("expected update");
        };
        assert_eq!(base.kind, ExprKind::Var("p".into()));
        assert_eq!(updates.len(), 2);
    }

    #[test]
    fn test_elm_style_update_needs_a_field() {
        assert_eq!(parse_err("{ p | }"), DiagnosticCode::ExpectedIdentifier);
        assert_eq!(parse_err("{ p | , }"), DiagnosticCode::ExpectedIdentifier);
    }

    #[test]
    fn test_spread_update_preserves_order() {
        let ExprKind::RecordUpdate { updates, .. } = parse("{ ...a, x: 1, ...b, x: 2 }").kind
        else {
            panic!("expected update");
        };
        assert_eq!(updates.len(), 3);
        assert!(matches!(updates[1], RecordEntry::Spread { .. }));
    }

    #[test]
    fn test_brace_missing_terminator() {
        assert_eq!(parse_err("{ f(x) g(y) }"), DiagnosticCode::MissingTerminator);
    }
}

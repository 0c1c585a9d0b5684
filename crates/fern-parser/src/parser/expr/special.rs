//! Special forms: conditionals, matches, loops, blocks, block `let`.

use super::super::bindings::{self, LetForm};
use super::super::patterns::parse_case_head;
use super::super::{DiagnosticCode, PResult, Parser};
use fern_ast::{Expr, ExprKind, MatchCase};
use fern_lexer::Token;

/// `if cond then a [else b]`; a missing `else` is a unit literal.
pub(super) fn parse_if(p: &mut Parser<'_>) -> PResult<Expr> {
    let loc = p.expect(Token::If, "to start a conditional")?;
    let condition = p.parse_expression()?;
    p.expect(Token::Then, "after the if condition")?;
    let then_branch = p.parse_expression()?;
    let else_branch = if p.eat(&Token::Else) {
        p.parse_expression()?
    } else {
        Expr::unit(p.previous_location())
    };

    Ok(Expr::new(
        ExprKind::If {
            condition: Box::new(condition),
            then_branch: Box::new(then_branch),
            else_branch: Box::new(else_branch),
        },
        loc,
    ))
}

/// `match e { [|] p [when g] => body (| ...)* }`
pub(super) fn parse_match(p: &mut Parser<'_>) -> PResult<Expr> {
    let loc = p.expect(Token::Match, "to start a match")?;
    let scrutinee = p.parse_expression()?;
    p.expect(Token::LBrace, "to open the match arms")?;
    p.eat(&Token::Bar);

    let mut cases = Vec::new();
    loop {
        let case_loc = p.location();
        let (pattern, guard) = parse_case_head(p)?;
        p.expect(Token::FatArrow, "after the match pattern")?;
        let body = p.parse_expression()?;
        cases.push(MatchCase {
            pattern,
            guard,
            body,
            loc: case_loc,
        });

        if !p.eat(&Token::Bar) {
            break;
        }
    }
    p.expect(Token::RBrace, "to close the match arms")?;

    Ok(Expr::new(
        ExprKind::Match {
            scrutinee: Box::new(scrutinee),
            cases,
        },
        loc,
    ))
}

/// `unsafe { ... }`
pub(super) fn parse_unsafe(p: &mut Parser<'_>) -> PResult<Expr> {
    let loc = p.expect(Token::Unsafe, "to start an unsafe block")?;
    let body = parse_block(p)?;
    Ok(Expr::new(ExprKind::Unsafe(Box::new(body)), loc))
}

/// `while cond { ... }`
pub(super) fn parse_while(p: &mut Parser<'_>) -> PResult<Expr> {
    let loc = p.expect(Token::While, "to start a loop")?;
    let condition = p.parse_expression()?;
    let body = parse_block(p)?;
    Ok(Expr::new(
        ExprKind::While {
            condition: Box::new(condition),
            body: Box::new(body),
        },
        loc,
    ))
}

/// Block statement `let`; only valid directly inside a block.
fn parse_let_statement(p: &mut Parser<'_>) -> PResult<Expr> {
    let loc = p.location();
    let kind = match bindings::parse_let(p)? {
        LetForm::Single { binding, recursive } => ExprKind::Let {
            binding: Box::new(binding),
            recursive,
        },
        LetForm::Group(bindings) => ExprKind::LetRecGroup(bindings),
    };
    Ok(Expr::new(kind, loc))
}

/// `{ stmt (; | newline) ... }`
///
/// Statements are separated by `;` or an implicit terminator; the last one
/// may omit it. The record-context flag is cleared for the body.
pub(super) fn parse_block(p: &mut Parser<'_>) -> PResult<Expr> {
    let loc = p.expect(Token::LBrace, "to open a block")?;

    p.with_record_context(false, |p| {
        let mut statements = Vec::new();
        while !p.eat(&Token::RBrace) {
            let statement = if p.check(&Token::Let) {
                parse_let_statement(p)?
            } else {
                p.parse_expression()?
            };
            statements.push(statement);

            if p.eat(&Token::Semicolon) || p.check(&Token::RBrace) || p.implicit_terminator() {
                continue;
            }
            return Err(p.error_here(DiagnosticCode::MissingTerminator));
        }
        Ok(Expr::new(ExprKind::Block(statements), loc))
    })
}

#[cfg(test)]
mod tests {
    use crate::parser::{parse_expression, DiagnosticCode};
    use fern_ast::{Expr, ExprKind};
    use fern_lexer::tokenize;

    fn parse(source: &str) -> Expr {
        let lexemes = tokenize(source).unwrap();
        parse_expression(&lexemes, "test.fern").expect("Parse failed")
    }

    #[test]
    fn test_if_without_else_defaults_to_unit() {
        let ExprKind::If { else_branch, .. } = parse("if ok then go()").kind else {
            panic!("expected if");
        };
        assert_eq!(else_branch.kind, ExprKind::UnitLit);
        assert_eq!(else_branch.loc.column, 15);
    }

    #[test]
    fn test_match_optional_leading_bar_and_guard() {
        let ExprKind::Match { cases, .. } =
            parse("match n { | 0 => a | x when x > 1 => b | _ => c }").kind
        else {
            panic!("expected match");
        };
        assert_eq!(cases.len(), 3);
        assert!(cases[1].guard.is_some());

        let ExprKind::Match { cases, .. } = parse("match n { 0 => a | _ => c }").kind else {
            panic!("expected match");
        };
        assert_eq!(cases.len(), 2);
    }

    #[test]
    fn test_guard_does_not_swallow_arrow() {
        let ExprKind::Match { cases, .. } = parse("match n { x when ready => x }").kind else {
            panic!("expected match");
        };
        assert_eq!(
            cases[0].guard.as_ref().map(|g| g.kind.clone()),
            Some(ExprKind::Var("ready".into()))
        );
    }

    #[test]
    fn test_block_with_newline_terminators() {
        let ExprKind::Block(statements) = parse("{\n  let x = 1\n  print(x)\n  x\n}").kind else {
            panic!("expected block");
        };
        assert_eq!(statements.len(), 3);
        assert!(matches!(statements[0].kind, ExprKind::Let { .. }));
    }

    #[test]
    fn test_block_let_rec_group() {
        let ExprKind::Block(statements) =
            parse("{ let rec even = n => odd(n) and odd = n => even(n); even(2) }").kind
        else {
            panic!("expected block");
        };
        let ExprKind::LetRecGroup(bindings) = &statements[0].kind else {
            panic!("expected recursive group");
        };
        assert_eq!(bindings.len(), 2);
    }

    #[test]
    fn test_block_missing_terminator() {
        let lexemes = tokenize("{ let x = 1 x }").unwrap();
        let errors = parse_expression(&lexemes, "test.fern").unwrap_err();
        assert_eq!(errors[0].code, DiagnosticCode::MissingTerminator);
    }

    #[test]
    fn test_while_and_unsafe() {
        let ExprKind::While { body, .. } = parse("while i < 3 { i := i! + 1 }").kind else {
            panic!("expected while");
        };
        assert!(matches!(body.kind, ExprKind::Block(_)));

        let ExprKind::Unsafe(body) = parse("unsafe { poke(1) }").kind else {
            panic!("expected unsafe");
        };
        assert!(matches!(body.kind, ExprKind::Block(_)));
    }
}

//! Precedence ladder core: one function per tier, lowest first.

use super::super::token_utils::can_end_expression;
use super::super::{PResult, Parser};
use super::atoms;
use fern_ast::{BinaryOp, Expr, ExprKind, LambdaParam, UnaryOp};
use fern_lexer::Token;

/// Tier function type used by the left-associative helper.
type Tier = fn(&mut Parser<'_>) -> PResult<Expr>;

/// `x => body` and `_ => body`; anything else falls through.
pub(super) fn parse_lambda(p: &mut Parser<'_>) -> PResult<Expr> {
    let single_param = matches!(p.peek(), Some(Token::Ident(_) | Token::Underscore))
        && p.check_nth(1, &Token::FatArrow);
    if !single_param {
        return parse_ref_assign(p);
    }

    let loc = p.location();
    let pattern = p.parse_pattern()?;
    p.expect(Token::FatArrow, "after the lambda parameter")?;
    let body = parse_lambda(p)?;

    Ok(Expr::new(
        ExprKind::Lambda {
            params: vec![LambdaParam {
                pattern,
                type_annotation: None,
                loc: loc.clone(),
            }],
            return_type: None,
            body: Box::new(body),
        },
        loc,
    ))
}

/// `target := value`, right-associative.
pub(super) fn parse_ref_assign(p: &mut Parser<'_>) -> PResult<Expr> {
    let target = parse_annotation(p)?;
    if p.eat(&Token::ColonEq) {
        let value = parse_ref_assign(p)?;
        return Ok(Expr::binary(BinaryOp::RefAssign, target, value));
    }
    Ok(target)
}

/// `expr: Type`
fn parse_annotation(p: &mut Parser<'_>) -> PResult<Expr> {
    let expr = parse_pipe(p)?;
    if !p.eat(&Token::Colon) {
        return Ok(expr);
    }

    let type_expr = p.parse_type()?;
    let loc = expr.loc.clone();
    Ok(Expr::new(
        ExprKind::TypeAnnotation {
            expr: Box::new(expr),
            type_expr,
        },
        loc,
    ))
}

/// `value |> func`
fn parse_pipe(p: &mut Parser<'_>) -> PResult<Expr> {
    let mut value = parse_composition(p)?;
    while p.eat(&Token::PipeGt) {
        let func = parse_composition(p)?;
        let loc = value.loc.clone();
        value = Expr::new(
            ExprKind::Pipe {
                value: Box::new(value),
                func: Box::new(func),
            },
            loc,
        );
    }
    Ok(value)
}

fn parse_composition(p: &mut Parser<'_>) -> PResult<Expr> {
    parse_left_assoc(
        p,
        &[
            (Token::GtGt, BinaryOp::ForwardCompose),
            (Token::LtLt, BinaryOp::BackwardCompose),
        ],
        parse_or,
    )
}

fn parse_or(p: &mut Parser<'_>) -> PResult<Expr> {
    parse_left_assoc(p, &[(Token::PipePipe, BinaryOp::LogicalOr)], parse_and)
}

fn parse_and(p: &mut Parser<'_>) -> PResult<Expr> {
    parse_left_assoc(p, &[(Token::AmpAmp, BinaryOp::LogicalAnd)], parse_equality)
}

fn parse_equality(p: &mut Parser<'_>) -> PResult<Expr> {
    parse_left_assoc(
        p,
        &[
            (Token::EqEq, BinaryOp::Equal),
            (Token::BangEq, BinaryOp::NotEqual),
        ],
        parse_comparison,
    )
}

fn parse_comparison(p: &mut Parser<'_>) -> PResult<Expr> {
    parse_left_assoc(
        p,
        &[
            (Token::Lt, BinaryOp::LessThan),
            (Token::LtEq, BinaryOp::LessEqual),
            (Token::Gt, BinaryOp::GreaterThan),
            (Token::GtEq, BinaryOp::GreaterEqual),
        ],
        parse_cons,
    )
}

/// `head :: tail`, right-associative.
fn parse_cons(p: &mut Parser<'_>) -> PResult<Expr> {
    let head = parse_concat(p)?;
    if p.eat(&Token::ColonColon) {
        let tail = parse_cons(p)?;
        return Ok(Expr::binary(BinaryOp::Cons, head, tail));
    }
    Ok(head)
}

fn parse_concat(p: &mut Parser<'_>) -> PResult<Expr> {
    parse_left_assoc(p, &[(Token::Amp, BinaryOp::Concat)], parse_additive)
}

fn parse_additive(p: &mut Parser<'_>) -> PResult<Expr> {
    parse_left_assoc(
        p,
        &[
            (Token::Plus, BinaryOp::Add),
            (Token::Minus, BinaryOp::Subtract),
        ],
        parse_multiplicative,
    )
}

fn parse_multiplicative(p: &mut Parser<'_>) -> PResult<Expr> {
    parse_left_assoc(
        p,
        &[
            (Token::Star, BinaryOp::Multiply),
            (Token::Slash, BinaryOp::Divide),
            (Token::Percent, BinaryOp::Modulo),
        ],
        parse_unary,
    )
}

/// One left-associative tier: `next (op next)*`.
fn parse_left_assoc(
    p: &mut Parser<'_>,
    operators: &[(Token, BinaryOp)],
    next: Tier,
) -> PResult<Expr> {
    let mut left = next(p)?;

    loop {
        let op = match operators.iter().find(|(token, _)| p.check(token)) {
            Some((_, op)) => *op,
            None => break,
        };
        p.advance();
        let right = next(p)?;
        left = Expr::binary(op, left, right);
    }

    Ok(left)
}

/// Prefix `-` and `!`, stacking.
///
/// `-` is negation only when the previous token cannot end an expression;
/// otherwise it belongs to a subtraction and this tier declines it.
fn parse_unary(p: &mut Parser<'_>) -> PResult<Expr> {
    let op = match p.peek() {
        Some(Token::Minus) if !previous_ends_expression(p) => UnaryOp::Negate,
        Some(Token::Bang) => UnaryOp::LogicalNot,
        _ => return parse_postfix(p),
    };

    let loc = p.location();
    p.advance();
    let operand = parse_unary(p)?;

    Ok(Expr::new(
        ExprKind::Unary {
            op,
            operand: Box::new(operand),
        },
        loc,
    ))
}

fn previous_ends_expression(p: &Parser<'_>) -> bool {
    p.stream
        .previous()
        .is_some_and(|lexeme| can_end_expression(&lexeme.token))
}

/// Calls, field access and postfix dereference, chained.
fn parse_postfix(p: &mut Parser<'_>) -> PResult<Expr> {
    let mut expr = atoms::parse_primary(p)?;

    loop {
        match p.peek() {
            Some(Token::LParen) => {
                p.advance();
                let args = p.comma_list(
                    Token::RParen,
                    "to close the argument list",
                    |p| p.parse_expression(),
                )?;
                let loc = expr.loc.clone();
                expr = Expr::new(
                    ExprKind::App {
                        func: Box::new(expr),
                        args,
                    },
                    loc,
                );
            }
            Some(Token::Dot) => {
                p.advance();
                let (field, _) = p.expect_ident("after `.`")?;
                let loc = expr.loc.clone();
                expr = Expr::new(
                    ExprKind::RecordAccess {
                        record: Box::new(expr),
                        field,
                    },
                    loc,
                );
            }
            Some(Token::Bang) if !current_is_spaced(p) => {
                p.advance();
                let loc = expr.loc.clone();
                expr = Expr::new(
                    ExprKind::Unary {
                        op: UnaryOp::Deref,
                        operand: Box::new(expr),
                    },
                    loc,
                );
            }
            _ => break,
        }
    }

    Ok(expr)
}

fn current_is_spaced(p: &Parser<'_>) -> bool {
    p.stream.current().map_or(true, |lexeme| lexeme.spaced)
}

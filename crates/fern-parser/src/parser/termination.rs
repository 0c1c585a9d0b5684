//! Automatic statement termination.
//!
//! Statements and declarations may be separated by a newline instead of a
//! `;`. Whether a line break ends a statement is decided per token pair,
//! on demand, at the grammar points that accept a statement sequence.

use fern_lexer::{Lexeme, Token};

/// Whether an implicit terminator sits between `previous` and `current`.
///
/// Rules, first match wins:
/// 1. never inside a record literal or update;
/// 2. never before `=>`;
/// 3. only across a line break;
/// 4. never after a token that continues an expression;
/// 5. never before a token that continues an expression;
/// 6. always before a statement keyword or `}`;
/// 7. otherwise, yes.
pub fn implicit_terminator(previous: &Lexeme, current: &Lexeme, in_record: bool) -> bool {
    if in_record {
        return false;
    }
    if current.token == Token::FatArrow {
        return false;
    }
    if previous.line == current.line {
        return false;
    }
    // Rules 6 and 7 both insert.
    !(continues_expression(&previous.token) || continues_expression(&current.token))
}

/// Tokens that syntactically continue an expression across a line break.
pub fn continues_expression(token: &Token) -> bool {
    matches!(
        token,
        Token::Plus
            | Token::Minus
            | Token::Star
            | Token::Slash
            | Token::Percent
            | Token::EqEq
            | Token::BangEq
            | Token::Lt
            | Token::LtEq
            | Token::Gt
            | Token::GtEq
            | Token::AmpAmp
            | Token::PipePipe
            | Token::Amp
            | Token::ColonColon
            | Token::PipeGt
            | Token::GtGt
            | Token::LtLt
            | Token::ColonEq
            | Token::Dot
            | Token::LParen
            | Token::Comma
            | Token::Then
            | Token::Else
    )
}

//! Token classification shared by the grammars.
//!
//! Single source of truth for which tokens are binary operators, which can
//! end an expression and how tokens are named in diagnostics.

use fern_ast::BinaryOp;
use fern_lexer::Token;

/// Name a token for a diagnostic parameter; `None` is end of input.
pub fn describe(token: Option<&Token>) -> String {
    match token {
        Some(token) => token.to_string(),
        None => "end of input".to_string(),
    }
}

/// Map a binary operator token to its AST operator.
///
/// `|>` is a binary operator syntactically but has its own node kind, so it
/// is not covered here; see [`is_binary_operator`].
///
/// # Examples
/// ```
/// use fern_ast::BinaryOp;
/// use fern_lexer::Token;
/// use fern_parser::parser::token_utils::binary_op;
///
/// assert_eq!(binary_op(&Token::ColonColon), Some(BinaryOp::Cons));
/// assert_eq!(binary_op(&Token::PipeGt), None);
/// ```
pub fn binary_op(token: &Token) -> Option<BinaryOp> {
    let op = match token {
        Token::ColonEq => BinaryOp::RefAssign,
        Token::GtGt => BinaryOp::ForwardCompose,
        Token::LtLt => BinaryOp::BackwardCompose,
        Token::PipePipe => BinaryOp::LogicalOr,
        Token::AmpAmp => BinaryOp::LogicalAnd,
        Token::EqEq => BinaryOp::Equal,
        Token::BangEq => BinaryOp::NotEqual,
        Token::Lt => BinaryOp::LessThan,
        Token::LtEq => BinaryOp::LessEqual,
        Token::Gt => BinaryOp::GreaterThan,
        Token::GtEq => BinaryOp::GreaterEqual,
        Token::ColonColon => BinaryOp::Cons,
        Token::Amp => BinaryOp::Concat,
        Token::Plus => BinaryOp::Add,
        Token::Minus => BinaryOp::Subtract,
        Token::Star => BinaryOp::Multiply,
        Token::Slash => BinaryOp::Divide,
        Token::Percent => BinaryOp::Modulo,
        _ => return None,
    };
    Some(op)
}

/// Whether the token is any infix operator, `|>` included.
pub fn is_binary_operator(token: &Token) -> bool {
    matches!(token, Token::PipeGt) || binary_op(token).is_some()
}

/// Whether an expression can end with this token.
///
/// Used to tell binary `-` from unary `-`.
pub fn can_end_expression(token: &Token) -> bool {
    matches!(
        token,
        Token::Ident(_)
            | Token::Int(_)
            | Token::Float(_)
            | Token::Str(_)
            | Token::True
            | Token::False
            | Token::RParen
            | Token::RBracket
            | Token::RBrace
    )
}

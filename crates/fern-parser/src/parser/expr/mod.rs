//! Expression parser: a precedence ladder in recursive descent.
//!
//! ## Precedence Levels (lowest to highest)
//!
//! 1. `x => e` (Lambda) - right associative
//! 2. `:=` (RefAssign) - right associative
//! 3. `e: T` (Type annotation)
//! 4. `|>` (Pipe) - left associative
//! 5. `>>`, `<<` (Composition) - left associative
//! 6. `||` - left associative
//! 7. `&&` - left associative
//! 8. `==`, `!=` - left associative
//! 9. `<`, `<=`, `>`, `>=` - left associative
//! 10. `::` (Cons) - right associative
//! 11. `&` (Concat) - left associative
//! 12. `+`, `-` - left associative
//! 13. `*`, `/`, `%` - left associative
//! 14. Unary `-`, `!` - prefix, stacking
//! 15. Postfix: `(args)`, `.field`, `!` - left associative
//! 16. Primary
//!
//! ## Module Organization
//!
//! - `ladder` - tiers 1 through 15
//! - `atoms` - literals, identifiers, list literals, primary dispatch
//! - `special` - `if`, `match`, `unsafe`, `while`, blocks, block `let`
//! - `ambiguity` - what `(` and `{` start

mod ambiguity;
mod atoms;
mod ladder;
mod special;

use super::{PResult, Parser};
use fern_ast::Expr;

/// Parse a full expression, starting at the lambda tier.
pub(crate) fn parse_expr(p: &mut Parser<'_>) -> PResult<Expr> {
    ladder::parse_lambda(p)
}

/// Parse a match guard.
///
/// Starts below the lambda tier so `when ready => body` leaves the `=>`
/// to the match arm.
pub(crate) fn parse_guard(p: &mut Parser<'_>) -> PResult<Expr> {
    ladder::parse_ref_assign(p)
}

//! `let` bindings, shared by top-level declarations and block statements.

use super::{DiagnosticCode, PResult, Parser};
use fern_ast::{LetBinding, Location};
use fern_lexer::Token;

/// A parsed `let [mut] [rec] ... (and ...)*`.
pub(crate) enum LetForm {
    /// A lone binding, with or without `rec`
    Single {
        binding: LetBinding,
        recursive: bool,
    },
    /// `let rec a = ... and b = ...`, in source order
    Group(Vec<LetBinding>),
}

/// Parse `let [mut] [rec] p [: T] = e (and [mut] p [: T] = e)*`.
///
/// `and` is only accepted after `rec`.
pub(crate) fn parse_let(p: &mut Parser<'_>) -> PResult<LetForm> {
    let loc = p.expect(Token::Let, "to start a binding")?;
    let mutable = p.eat(&Token::Mut);
    let recursive = p.eat(&Token::Rec);

    let binding = parse_binding(p, loc, mutable)?;
    if !p.check(&Token::And) {
        return Ok(LetForm::Single { binding, recursive });
    }

    let mut bindings = vec![binding];
    while p.check(&Token::And) {
        if !recursive {
            return Err(p.error_here(DiagnosticCode::AndWithoutRec));
        }
        let loc = p.location();
        p.advance();
        let mutable = p.eat(&Token::Mut);
        bindings.push(parse_binding(p, loc, mutable)?);
    }

    Ok(LetForm::Group(bindings))
}

fn parse_binding(p: &mut Parser<'_>, loc: Location, mutable: bool) -> PResult<LetBinding> {
    let pattern = p.parse_pattern()?;
    let type_annotation = if p.eat(&Token::Colon) {
        Some(p.parse_type()?)
    } else {
        None
    };
    p.expect(Token::Eq, "in let binding")?;
    let value = p.parse_expression()?;

    Ok(LetBinding {
        pattern,
        type_annotation,
        value,
        mutable,
        loc,
    })
}

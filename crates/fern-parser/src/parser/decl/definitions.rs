//! `let` and `type` declarations.

use super::super::bindings::{self, LetForm};
use super::super::types::{parse_record_fields, parse_type_params};
use super::super::{PResult, Parser};
use fern_ast::{DeclKind, Declaration, Location, TypeDecl, TypeDefinition, VariantConstructor};
use fern_lexer::Token;

/// Parse a top-level `let`; an `and` group becomes one `LetRecGroup`.
pub(super) fn parse_let_decl(
    p: &mut Parser<'_>,
    loc: Location,
    exported: bool,
) -> PResult<Declaration> {
    let kind = match bindings::parse_let(p)? {
        LetForm::Single { binding, recursive } => DeclKind::Let {
            binding,
            recursive,
            exported,
        },
        LetForm::Group(bindings) => DeclKind::LetRecGroup { bindings, exported },
    };
    Ok(Declaration::new(kind, loc))
}

/// Parse `type T = ... (and U = ...)*` into sibling declarations.
///
/// Siblings after the first are located at their `and`.
pub(super) fn parse_type_decls(
    p: &mut Parser<'_>,
    loc: Location,
    exported: bool,
) -> PResult<Vec<Declaration>> {
    p.expect(Token::Type, "to start a type declaration")?;

    let first = parse_type_binding(p, exported)?;
    let mut declarations = vec![Declaration::new(DeclKind::Type(first), loc)];
    while p.check(&Token::And) {
        let loc = p.location();
        p.advance();
        let sibling = parse_type_binding(p, exported)?;
        declarations.push(Declaration::new(DeclKind::Type(sibling), loc));
    }

    Ok(declarations)
}

/// `Name [<params>] = definition`
fn parse_type_binding(p: &mut Parser<'_>, exported: bool) -> PResult<TypeDecl> {
    let (name, _) = p.expect_ident("as the type name")?;
    let params = if p.eat(&Token::Lt) {
        parse_type_params(p)?
    } else {
        Vec::new()
    };
    p.expect(Token::Eq, "after the type name")?;
    let definition = parse_definition(p)?;

    Ok(TypeDecl {
        name,
        params,
        definition,
        exported,
    })
}

fn parse_definition(p: &mut Parser<'_>) -> PResult<TypeDefinition> {
    if p.eat(&Token::LBrace) {
        return parse_record_fields(p).map(TypeDefinition::Record);
    }
    if starts_variant(p) {
        return parse_variants(p).map(TypeDefinition::Variant);
    }
    p.parse_type().map(TypeDefinition::Alias)
}

/// A leading `|`, or an uppercase name followed by `(` or `|`.
fn starts_variant(p: &Parser<'_>) -> bool {
    match p.peek() {
        Some(Token::Bar) => true,
        Some(token) if token.is_upper_ident() => {
            matches!(p.peek_nth(1), Some(Token::LParen | Token::Bar))
        }
        _ => false,
    }
}

/// `[|] Name [(T, ...)] (| Name [(T, ...)])*`
fn parse_variants(p: &mut Parser<'_>) -> PResult<Vec<VariantConstructor>> {
    p.eat(&Token::Bar);

    let mut constructors = Vec::new();
    loop {
        let (name, loc) = p.expect_ident("as a constructor name")?;
        let args = if p.eat(&Token::LParen) {
            p.comma_list(Token::RParen, "to close the constructor arguments", |p| p.parse_type())?
        } else {
            Vec::new()
        };
        constructors.push(VariantConstructor { name, args, loc });

        if !p.eat(&Token::Bar) {
            break;
        }
    }

    Ok(constructors)
}

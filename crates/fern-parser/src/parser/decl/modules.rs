//! Imports, export lists and re-exports.

use super::super::{PResult, Parser};
use fern_ast::{
    DeclKind, Declaration, ImportDecl, ImportKind, Location, ReExportItems, Specifier,
};
use fern_lexer::Token;

/// `import { ... } from "m"`, `import * as M from "m"`,
/// `import type * as M from "m"`.
pub(super) fn parse_import(p: &mut Parser<'_>) -> PResult<ImportDecl> {
    let loc = p.expect(Token::Import, "to start an import")?;

    let kind = match p.peek() {
        Some(Token::LBrace) => {
            p.advance();
            ImportKind::Named(parse_specifiers(p)?)
        }
        Some(Token::Type) if p.check_nth(1, &Token::Star) => {
            p.advance();
            parse_namespace(p, true)?
        }
        Some(Token::Star) => parse_namespace(p, false)?,
        _ => return Err(p.unexpected("after `import`")),
    };

    p.expect(Token::From, "after the import clause")?;
    let source = p.expect_string("as the module to import from")?;
    Ok(ImportDecl { kind, source, loc })
}

fn parse_namespace(p: &mut Parser<'_>, type_only: bool) -> PResult<ImportKind> {
    p.expect(Token::Star, "in a namespace import")?;
    p.expect(Token::As, "after `*`")?;
    let (alias, _) = p.expect_ident("as the namespace name")?;
    Ok(ImportKind::Namespace { alias, type_only })
}

/// `{ ... } [from "m"]` or `* from "m"` after `export`.
pub(super) fn parse_export_clause(p: &mut Parser<'_>, loc: Location) -> PResult<Declaration> {
    if p.eat(&Token::Star) {
        p.expect(Token::From, "after `export *`")?;
        let source = p.expect_string("as the module to re-export")?;
        let kind = DeclKind::ReExport {
            items: ReExportItems::All,
            source,
        };
        return Ok(Declaration::new(kind, loc));
    }

    p.expect(Token::LBrace, "to open the export list")?;
    let specifiers = parse_specifiers(p)?;
    let kind = if p.eat(&Token::From) {
        DeclKind::ReExport {
            items: ReExportItems::Named(specifiers),
            source: p.expect_string("as the module to re-export")?,
        }
    } else {
        DeclKind::Export(specifiers)
    };
    Ok(Declaration::new(kind, loc))
}

/// `[type] name [as alias], ...` after the `{`, through the `}`.
fn parse_specifiers(p: &mut Parser<'_>) -> PResult<Vec<Specifier>> {
    p.comma_list(
        Token::RBrace,
        "to close the specifier list",
        |p| {
            let loc = p.location();
            let is_type = p.eat(&Token::Type);
            let (name, _) = p.expect_ident("in the specifier list")?;
            let alias = if p.eat(&Token::As) {
                Some(p.expect_ident("as the alias")?.0)
            } else {
                None
            };
            Ok(Specifier {
                name,
                alias,
                is_type,
                loc,
            })
        },
    )
}

//! Declaration parsers (keyword-dispatched) and the module driver.
//!
//! Organized by semantic grouping:
//! - `definitions` - `let` and `type`
//! - `externals` - foreign values, types and `external` blocks
//! - `modules` - imports, export lists and re-exports

mod definitions;
mod externals;
mod modules;

use super::{DiagnosticCode, PResult, ParseMode, Parser};
use fern_ast::{Declaration, ImportDecl, Module};
use fern_lexer::Token;
use tracing::debug;

/// One top-level item.
enum Item {
    Import(ImportDecl),
    Declarations(Vec<Declaration>),
}

impl Item {
    fn single(declaration: Declaration) -> Self {
        Item::Declarations(vec![declaration])
    }
}

/// Parse every top-level item through the end of input.
///
/// Items are separated by `;` or an implicit terminator. In
/// [`ParseMode::Batch`] a recoverable error synchronizes the cursor and the
/// loop goes on; the cap sentinel always aborts.
pub(crate) fn parse_module(p: &mut Parser<'_>, mode: ParseMode) -> PResult<Module> {
    let mut module = Module::default();

    loop {
        while p.eat(&Token::Semicolon) {}
        if p.at_end() {
            break;
        }

        let result = parse_item(p).and_then(|item| {
            match item {
                Item::Import(import) => module.imports.push(import),
                Item::Declarations(declarations) => module.declarations.extend(declarations),
            }
            expect_separator(p)
        });

        if let Err(error) = result {
            if mode == ParseMode::SingleShot || !error.is_recoverable() {
                return Err(error);
            }
            p.stream.synchronize();
        }
    }

    debug!(
        imports = module.imports.len(),
        declarations = module.declarations.len(),
        "parsed module"
    );
    Ok(module)
}

fn parse_item(p: &mut Parser<'_>) -> PResult<Item> {
    let loc = p.location();
    match p.peek() {
        Some(Token::Import) => modules::parse_import(p).map(Item::Import),
        Some(Token::Export) => parse_export(p),
        Some(Token::Let) => definitions::parse_let_decl(p, loc, false).map(Item::single),
        Some(Token::Type) => definitions::parse_type_decls(p, loc, false).map(Item::Declarations),
        Some(Token::External) => externals::parse_external(p, loc, false).map(Item::single),
        _ => Err(p.error_here(DiagnosticCode::ExpectedDeclaration)),
    }
}

/// `export let|type|external ...`, `export { ... } [from "m"]`,
/// `export * from "m"`. Exported declarations are located at `export`.
fn parse_export(p: &mut Parser<'_>) -> PResult<Item> {
    let loc = p.expect(Token::Export, "to start an export")?;
    match p.peek() {
        Some(Token::Let) => definitions::parse_let_decl(p, loc, true).map(Item::single),
        Some(Token::Type) => definitions::parse_type_decls(p, loc, true).map(Item::Declarations),
        Some(Token::External) => externals::parse_external(p, loc, true).map(Item::single),
        Some(Token::LBrace | Token::Star) => modules::parse_export_clause(p, loc).map(Item::single),
        _ => Err(p.unexpected("after `export`")),
    }
}

fn expect_separator(p: &mut Parser<'_>) -> PResult<()> {
    if p.at_end() || p.eat(&Token::Semicolon) || p.implicit_terminator() {
        Ok(())
    } else {
        Err(p.error_here(DiagnosticCode::MissingTerminator))
    }
}

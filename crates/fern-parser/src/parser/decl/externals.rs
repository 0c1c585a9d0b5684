//! Foreign declarations: single `external` values and `external` blocks.

use super::super::types::parse_type_params;
use super::super::{PResult, Parser};
use fern_ast::{DeclKind, Declaration, ExternalBlock, ExternalDecl, ExternalItem, Location};
use fern_lexer::Token;

/// Parse `external ...`, either form.
pub(super) fn parse_external(
    p: &mut Parser<'_>,
    loc: Location,
    exported: bool,
) -> PResult<Declaration> {
    p.expect(Token::External, "to start an external declaration")?;

    let kind = match p.peek() {
        Some(Token::From | Token::LBrace) => DeclKind::ExternalBlock(parse_block(p, exported)?),
        _ => DeclKind::External(parse_single(p, exported)?),
    };
    Ok(Declaration::new(kind, loc))
}

/// `name: [<params>] Type = "foreign" [from "module"]`
fn parse_single(p: &mut Parser<'_>, exported: bool) -> PResult<ExternalDecl> {
    let (name, _) = p.expect_ident("as the external name")?;
    p.expect(Token::Colon, "after the external name")?;
    let type_params = parse_optional_params(p)?;
    let type_expr = p.parse_type()?;
    p.expect(Token::Eq, "after the external type")?;
    let foreign_name = p.expect_string("as the foreign name")?;
    let module = parse_optional_source(p)?;

    Ok(ExternalDecl {
        name,
        type_params,
        type_expr,
        foreign_name,
        module,
        exported,
    })
}

/// `[from "module"] { item* }`, items optionally separated by `;` or `,`.
fn parse_block(p: &mut Parser<'_>, exported: bool) -> PResult<ExternalBlock> {
    let module = parse_optional_source(p)?;
    p.expect(Token::LBrace, "to open the external block")?;

    let mut items = Vec::new();
    while !p.eat(&Token::RBrace) {
        items.push(parse_item(p)?);
        p.stream.eat_any(&[Token::Semicolon, Token::Comma]);
    }

    Ok(ExternalBlock {
        module,
        items,
        exported,
    })
}

fn parse_item(p: &mut Parser<'_>) -> PResult<ExternalItem> {
    let loc = p.location();

    if p.eat(&Token::Type) {
        let (name, _) = p.expect_ident("as the external type name")?;
        let params = if p.eat(&Token::Lt) {
            parse_type_params(p)?
        } else {
            Vec::new()
        };
        p.expect(Token::Eq, "after the external type name")?;
        let type_expr = p.parse_type()?;
        return Ok(ExternalItem::Type {
            name,
            params,
            type_expr,
            loc,
        });
    }

    let (name, _) = p.expect_ident("as the external name")?;
    p.expect(Token::Colon, "after the external name")?;
    let type_params = parse_optional_params(p)?;
    let type_expr = p.parse_type()?;
    p.expect(Token::Eq, "after the external type")?;
    let foreign_name = p.expect_string("as the foreign name")?;

    Ok(ExternalItem::Value {
        name,
        type_params,
        type_expr,
        foreign_name,
        loc,
    })
}

fn parse_optional_params(p: &mut Parser<'_>) -> PResult<Vec<String>> {
    if p.eat(&Token::Lt) {
        parse_type_params(p)
    } else {
        Ok(Vec::new())
    }
}

fn parse_optional_source(p: &mut Parser<'_>) -> PResult<Option<String>> {
    if p.eat(&Token::From) {
        p.expect_string("as the foreign module").map(Some)
    } else {
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::parse;
    use fern_ast::{DeclKind, Declaration, ExternalItem, TypeExprKind};
    use fern_lexer::tokenize;

    fn parse_decl(source: &str) -> Declaration {
        let lexemes = tokenize(source).unwrap();
        let mut module = parse(&lexemes, "test.fern").expect("Parse failed");
        module.declarations.remove(0)
    }

    #[test]
    fn test_single_external() {
        let decl = parse_decl(r#"external log: (String) -> () = "console.log" from "js""#);
        let DeclKind::External(external) = decl.kind else {
            panic!("expected external");
        };
        assert_eq!(external.name, "log");
        assert_eq!(external.foreign_name, "console.log");
        assert_eq!(external.module.as_deref(), Some("js"));
        assert!(matches!(
            external.type_expr.kind,
            TypeExprKind::Function { .. }
        ));
    }

    #[test]
    fn test_generic_external() {
        let decl = parse_decl(r#"external identity: <a> (a) -> a = "id""#);
        let DeclKind::External(external) = decl.kind else {
            panic!("expected external");
        };
        assert_eq!(external.type_params, vec!["a".to_string()]);
        assert_eq!(external.module, None);
    }

    #[test]
    fn test_external_block_separators() {
        let source = r#"external from "dom" {
  type Element = Unknown
  query: (String) -> Element = "querySelector";
  append: (Element, Element) -> () = "append",
  append: (Element) -> () = "append"
}"#;
        let DeclKind::ExternalBlock(block) = parse_decl(source).kind else {
            panic!("expected external block");
        };
        assert_eq!(block.module.as_deref(), Some("dom"));
        assert_eq!(block.items.len(), 4);
        assert!(matches!(block.items[0], ExternalItem::Type { .. }));
    }
}

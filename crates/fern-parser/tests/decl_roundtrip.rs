//! Declaration tests over whole modules.

use fern_ast::{
    DeclKind, Declaration, ExprKind, ImportKind, Module, ReExportItems, TypeDefinition,
};
use fern_lexer::tokenize;
use fern_parser::{parse, DiagnosticCode};

fn parse_module(source: &str) -> Module {
    let lexemes = tokenize(source).expect("Lex failed");
    parse(&lexemes, "module.fern").expect("Parse failed")
}

fn parse_decls(source: &str) -> Vec<Declaration> {
    parse_module(source).declarations
}

// =============================================================================
// Let
// =============================================================================

#[test]
fn test_let_forms() {
    let decls = parse_decls(
        "let x = 1\nlet mut count: Int = 0\nlet (a, b) = pair\nlet rec go = n => go(n)",
    );
    assert_eq!(decls.len(), 4);

    let DeclKind::Let { binding, .. } = &decls[1].kind else {
        panic!("expected let");
    };
    assert!(binding.mutable);
    assert!(binding.type_annotation.is_some());

    assert!(matches!(
        decls[3].kind,
        DeclKind::Let {
            recursive: true,
            ..
        }
    ));
}

#[test]
fn test_let_rec_group_preserves_order() {
    let decls = parse_decls(
        "let rec isEven = n => if n == 0 then true else isOdd(n - 1)\n\
         and isOdd = n => if n == 0 then false else isEven(n - 1)",
    );
    assert_eq!(decls.len(), 1);
    let DeclKind::LetRecGroup { bindings, exported } = &decls[0].kind else {
        panic!("expected recursive group");
    };
    assert!(!exported);
    let names: Vec<_> = bindings
        .iter()
        .map(|b| b.pattern.as_var().map(str::to_string))
        .collect();
    assert_eq!(
        names,
        vec![Some("isEven".to_string()), Some("isOdd".to_string())]
    );
}

#[test]
fn test_and_without_rec_is_rejected() {
    let lexemes = tokenize("let a = 1\nand b = 2").unwrap();
    let errors = parse(&lexemes, "module.fern").unwrap_err();
    assert_eq!(errors[0].code, DiagnosticCode::AndWithoutRec);
    assert_eq!(errors[0].location.line, 2);
}

// =============================================================================
// Types
// =============================================================================

#[test]
fn test_type_declarations() {
    let decls = parse_decls(
        "type Shape = | Circle(Float) | Rect(Float, Float)\n\
         type Pair<a, b> = (a, b)\n\
         type User = { name: String, age: Int }\n\
         export type Id = String",
    );
    assert_eq!(decls.len(), 4);

    let DeclKind::Type(shape) = &decls[0].kind else {
        panic!("expected type");
    };
    let TypeDefinition::Variant(constructors) = &shape.definition else {
        panic!("expected variant");
    };
    assert_eq!(constructors[1].name, "Rect");
    assert_eq!(constructors[1].args.len(), 2);

    let DeclKind::Type(pair) = &decls[1].kind else {
        panic!("expected type");
    };
    assert_eq!(pair.params, vec!["a".to_string(), "b".to_string()]);

    assert!(decls[3].is_exported());
}

#[test]
fn test_type_params_reject_trailing_comma() {
    let lexemes = tokenize("type Pair<a, b,> = (a, b)").unwrap();
    let errors = parse(&lexemes, "module.fern").unwrap_err();
    assert_eq!(errors[0].code, DiagnosticCode::ExpectedIdentifier);
}

#[test]
fn test_and_type_siblings() {
    let decls = parse_decls("type Expr = Lit(Int) | Add(Expr, Expr)\nand Env = List<Expr>");
    assert_eq!(decls.len(), 2);
    assert_eq!(decls[1].loc.line, 2);
}

// =============================================================================
// Modules
// =============================================================================

#[test]
fn test_imports_and_exports() {
    let module = parse_module(
        r#"import {
  map,
  type Option,
} from "std/list"
import * as Json from "std/json"

export { map as listMap }
export * from "std/string"
export external now: () -> Int = "Date.now""#,
    );

    assert_eq!(module.imports.len(), 2);
    assert!(matches!(
        module.imports[1].kind,
        ImportKind::Namespace {
            type_only: false,
            ..
        }
    ));

    assert_eq!(module.declarations.len(), 3);
    let DeclKind::Export(specifiers) = &module.declarations[0].kind else {
        panic!("expected export list");
    };
    assert_eq!(specifiers[0].local_name(), "listMap");
    assert!(matches!(
        &module.declarations[1].kind,
        DeclKind::ReExport { items: ReExportItems::All, source } if source == "std/string"
    ));
    assert!(module.declarations[2].is_exported());
}

#[test]
fn test_block_statements_inside_declarations() {
    let decls = parse_decls(
        "let main = () => {\n  let total = sum(xs)\n  print(total)\n  total\n}",
    );
    let DeclKind::Let { binding, .. } = &decls[0].kind else {
        panic!("expected let");
    };
    let ExprKind::Lambda { body, .. } = &binding.value.kind else {
        panic!("expected lambda");
    };
    assert!(matches!(&body.kind, ExprKind::Block(statements) if statements.len() == 3));
}

//! What `(` and `{` start: unit, lambda, grouping, tuple, record, update,
//! block, and the rejected forms.

use fern_ast::{Expr, ExprKind, PatternKind, RecordEntry};
use fern_lexer::tokenize;
use fern_parser::{parse_expression, Diagnostic, DiagnosticCode};

fn parse(source: &str) -> Expr {
    let lexemes = tokenize(source).expect("Lex failed");
    parse_expression(&lexemes, "test.fern").expect("Parse failed")
}

fn parse_err(source: &str) -> Diagnostic {
    let lexemes = tokenize(source).expect("Lex failed");
    let mut errors = parse_expression(&lexemes, "test.fern").expect_err("Parse should fail");
    assert_eq!(errors.len(), 1, "single-shot parsing reports one diagnostic");
    errors.remove(0)
}

// =============================================================================
// Parentheses
// =============================================================================

#[test]
fn test_unit_and_zero_param_lambda() {
    assert_eq!(parse("()").kind, ExprKind::UnitLit);

    let ExprKind::Lambda { params, body, .. } = parse("() => 1").kind else {
        panic!("expected lambda");
    };
    assert!(params.is_empty());
    assert_eq!(body.kind, ExprKind::IntLit(1));
}

#[test]
fn test_grouping_is_transparent() {
    let expr = parse("(42)");
    assert_eq!(expr.kind, ExprKind::IntLit(42));
    assert_eq!(expr.loc.column, 2);
    assert_eq!(parse("(42,)").kind, ExprKind::IntLit(42));
}

#[test]
fn test_tuple_versus_lambda() {
    let ExprKind::Tuple(items) = parse("(x, y)").kind else {
        panic!("expected tuple");
    };
    assert_eq!(items.len(), 2);

    let ExprKind::Lambda { params, .. } = parse("(x, y) => x + y").kind else {
        panic!("expected lambda");
    };
    assert_eq!(params.len(), 2);
    assert_eq!(params[1].pattern.kind, PatternKind::Var("y".into()));
}

#[test]
fn test_typed_lambda_params() {
    let ExprKind::Lambda {
        params,
        return_type,
        ..
    } = parse("(a: Int, b: List<Int>): Bool => a > 0").kind
    else {
        panic!("expected lambda");
    };
    assert!(params.iter().all(|p| p.type_annotation.is_some()));
    assert!(return_type.is_some());
}

#[test]
fn test_nested_parens_scan_to_matching_close() {
    let ExprKind::App { args, .. } = parse("f((a, b), (c) => c)").kind else {
        panic!("expected call");
    };
    assert!(matches!(args[0].kind, ExprKind::Tuple(_)));
    assert!(matches!(args[1].kind, ExprKind::Lambda { .. }));
}

#[test]
fn test_lone_comma_rejected() {
    parse_err("(,)");
    parse_err("[,]");
    parse_err("{,}");
}

// =============================================================================
// Operator sections
// =============================================================================

#[test]
fn test_bare_section() {
    let error = parse_err("(+)");
    assert_eq!(error.code, DiagnosticCode::OperatorSection);
    assert_eq!(error.param("kind"), Some("bare"));
    assert_eq!(error.param("hint"), Some("(a, b) => a + b"));
}

#[test]
fn test_left_and_right_sections() {
    let error = parse_err("(1 +)");
    assert_eq!(error.param("kind"), Some("left"));
    assert_eq!(error.param("hint"), Some("x => 1 + x"));

    let error = parse_err("(* 2)");
    assert_eq!(error.param("kind"), Some("right"));
    assert_eq!(error.param("operator"), Some("*"));
    assert_eq!(error.param("hint"), Some("x => x * 2"));
}

// =============================================================================
// Braces
// =============================================================================

#[test]
fn test_empty_braces_are_a_block() {
    assert_eq!(parse("{}").kind, ExprKind::Block(Vec::new()));
}

#[test]
fn test_record_construction() {
    let ExprKind::Record { fields } = parse("{ x: 1 }").kind else {
        panic!("expected record");
    };
    assert_eq!(fields.len(), 1);

    let ExprKind::Record { fields } = parse("{ x, y: 2, }").kind else {
        panic!("expected record");
    };
    let RecordEntry::Field { name, value, .. } = &fields[0] else {
        panic!("expected field");
    };
    assert_eq!(name, "x");
    assert_eq!(value.kind, ExprKind::Var("x".into()));
}

#[test]
fn test_record_update_forms() {
    let ExprKind::RecordUpdate { base, updates } = parse("{ ...point, x: 0 }").kind else {
        panic!("expected update");
    };
    assert_eq!(base.kind, ExprKind::Var("point".into()));
    assert_eq!(updates.len(), 1);

    assert!(matches!(
        parse("{ point | x: 0 }").kind,
        ExprKind::RecordUpdate { .. }
    ));
}

#[test]
fn test_statement_then_semicolon_is_a_block() {
    assert!(matches!(parse("{ x; }").kind, ExprKind::Block(ref s) if s.len() == 1));
    assert!(matches!(parse("{ f(x); }").kind, ExprKind::Block(ref s) if s.len() == 1));
    assert!(matches!(
        parse("{ f(x)\n  g(y) }").kind,
        ExprKind::Block(ref s) if s.len() == 2
    ));
}

#[test]
fn test_keyword_starts_a_block() {
    for source in ["{ let x = 1; x }", "{ if a then b }", "{ while go { step() } }"] {
        assert!(
            matches!(parse(source).kind, ExprKind::Block(_)),
            "source: {}",
            source
        );
    }
}

#[test]
fn test_lone_expression_in_braces_is_ambiguous() {
    let error = parse_err("{ 42 }");
    assert_eq!(error.code, DiagnosticCode::AmbiguousBraces);
    assert_eq!(error.location.column, 1);
    assert!(error.param("hint").is_some());
}

#[test]
fn test_record_entries_span_lines() {
    let ExprKind::Record { fields } = parse("{\n  x: 1,\n  y: 2\n}").kind else {
        panic!("expected record");
    };
    assert_eq!(fields.len(), 2);
}

#[test]
fn test_let_is_a_block_statement_only() {
    let ExprKind::Block(statements) = parse("{ let x = 1\n  let y = x\n  y }").kind else {
        panic!("expected block");
    };
    assert!(matches!(statements[1].kind, ExprKind::Let { .. }));

    let error = parse_err("1 + let x = 2");
    assert_eq!(error.code, DiagnosticCode::ExpectedExpression);
    assert_eq!(error.location.column, 5);
    assert_eq!(parse_err("f(let x = 1)").code, DiagnosticCode::ExpectedExpression);
}

// =============================================================================
// Trailing commas
// =============================================================================

#[test]
fn test_trailing_comma_does_not_change_the_tree() {
    let pairs = [
        ("[1, 2, 3,]", "[1, 2, 3]"),
        ("[x, ...rest,]", "[x, ...rest]"),
        ("(1, 2,)", "(1, 2)"),
        ("{ x: 1, }", "{ x: 1 }"),
        ("{ x, y, }", "{ x, y }"),
        ("{ p | x: 1, }", "{ p | x: 1 }"),
        ("(a, b,) => a", "(a, b) => a"),
    ];
    for (with_comma, without) in pairs {
        assert_eq!(parse(with_comma), parse(without), "source: {}", with_comma);
    }
}

#[test]
fn test_list_accepts_only_one_trailing_comma() {
    let error = parse_err("[1,,]");
    assert_eq!(error.code, DiagnosticCode::UnexpectedToken);
    assert_eq!(error.location.column, 4);
}

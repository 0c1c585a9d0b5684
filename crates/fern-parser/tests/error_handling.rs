//! Diagnostics: codes, locations, parameters, batch recovery and the cap.

use fern_lexer::tokenize;
use fern_parser::{
    parse, parse_with_options, Diagnostic, DiagnosticCategory, DiagnosticCode, ParseMode,
    ParseOptions,
};

fn errors(source: &str) -> Vec<Diagnostic> {
    let lexemes = tokenize(source).expect("Lex failed");
    parse(&lexemes, "errors.fern").expect_err("Parse should fail")
}

fn batch_errors(source: &str, options: &ParseOptions) -> Vec<Diagnostic> {
    let lexemes = tokenize(source).expect("Lex failed");
    parse_with_options(&lexemes, "errors.fern", options).expect_err("Parse should fail")
}

// =============================================================================
// Single-shot
// =============================================================================

#[test]
fn test_single_shot_stops_at_first_error() {
    let errors = errors("let = 1\nlet = 2\nlet = 3");
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].code, DiagnosticCode::ExpectedPattern);
    assert_eq!(errors[0].location.line, 1);
    assert_eq!(errors[0].location.column, 5);
    assert_eq!(&*errors[0].location.file, "errors.fern");
}

#[test]
fn test_expected_token_parameters() {
    let errors = errors("let x 1");
    assert_eq!(errors[0].code, DiagnosticCode::ExpectedToken);
    assert_eq!(errors[0].param("expected"), Some("="));
    assert_eq!(errors[0].param("found"), Some("1"));
}

#[test]
fn test_end_of_input_is_described() {
    let errors = errors("let x =");
    assert_eq!(errors[0].code, DiagnosticCode::ExpectedExpression);
    assert_eq!(errors[0].param("found"), Some("end of input"));
}

#[test]
fn test_missing_string_literal() {
    let errors = errors("import * as M from list");
    assert_eq!(errors[0].code, DiagnosticCode::ExpectedStringLiteral);
}

#[test]
fn test_categories() {
    assert_eq!(
        DiagnosticCode::AndWithoutRec.category(),
        DiagnosticCategory::Unexpected
    );
    assert_eq!(
        DiagnosticCode::AmbiguousBraces.category(),
        DiagnosticCategory::Ambiguous
    );
    assert_eq!(
        DiagnosticCode::OperatorSection.category(),
        DiagnosticCategory::Unsupported
    );
    assert_eq!(
        DiagnosticCode::TooManyErrors.category(),
        DiagnosticCategory::Limit
    );
}

// =============================================================================
// Batch mode
// =============================================================================

#[test]
fn test_batch_collects_independent_errors() {
    let source = "let = 1\nlet good = 2\nlet x = (+)\nexport 5\nlet y = { 1 }";
    let errors = batch_errors(source, &ParseOptions::batch());

    let codes: Vec<_> = errors.iter().map(|e| e.code).collect();
    assert_eq!(
        codes,
        vec![
            DiagnosticCode::ExpectedPattern,
            DiagnosticCode::OperatorSection,
            DiagnosticCode::UnexpectedToken,
            DiagnosticCode::AmbiguousBraces,
        ]
    );
    let lines: Vec<_> = errors.iter().map(|e| e.location.line).collect();
    assert_eq!(lines, vec![1, 3, 4, 5]);
}

#[test]
fn test_error_cap_appends_sentinel() {
    let source = "let = 1\n".repeat(15);
    let errors = batch_errors(&source, &ParseOptions::batch());

    assert_eq!(errors.len(), 11);
    assert!(errors[..10]
        .iter()
        .all(|e| e.code == DiagnosticCode::ExpectedPattern));
    assert_eq!(errors[10].code, DiagnosticCode::TooManyErrors);
}

#[test]
fn test_custom_cap() {
    let options = ParseOptions {
        mode: ParseMode::Batch,
        max_errors: 3,
    };
    let errors = batch_errors(&"let = 1\n".repeat(5), &options);
    assert_eq!(errors.len(), 4);
    assert_eq!(errors[3].code, DiagnosticCode::TooManyErrors);
}

#[test]
fn test_batch_below_cap_has_no_sentinel() {
    let errors = batch_errors(&"let = 1\n".repeat(4), &ParseOptions::batch());
    assert_eq!(errors.len(), 4);
    assert!(errors.iter().all(|e| e.code != DiagnosticCode::TooManyErrors));
}

// =============================================================================
// Configuration
// =============================================================================

#[test]
fn test_options_deserialize_with_defaults() {
    let options: ParseOptions = serde_json::from_str(r#"{ "mode": "batch" }"#).unwrap();
    assert_eq!(options.mode, ParseMode::Batch);
    assert_eq!(options.max_errors, 10);

    let options: ParseOptions = serde_json::from_str("{}").unwrap();
    assert_eq!(options, ParseOptions::default());
}

//! Hand-written recursive descent parser for Fern
//!
//! Turns the token stream produced by `fern-lexer` into a `fern_ast::Module`,
//! reporting structured diagnostics for anything outside the grammar.
//!
//! ```rust
//! let lexemes = fern_lexer::tokenize("let answer = 6 * 7").unwrap();
//! let module = fern_parser::parse(&lexemes, "answer.fern").unwrap();
//! assert_eq!(module.declarations.len(), 1);
//! ```

pub mod parser;

pub use parser::{
    parse, parse_expression, parse_pattern, parse_type_expr, parse_with_options, Diagnostic,
    DiagnosticCategory, DiagnosticCode, Grammar, ParseError, ParseMode, ParseOptions, Parser,
};

// Re-export lexer
pub use fern_lexer::{Lexeme, Token};

//! Hand-written recursive descent parser for Fern.
//!
//! ## Architecture
//!
//! - `stream`: TokenStream wrapper with lookahead, checkpoints and push-back
//! - `error`: diagnostics, the error cap and `ParseError`
//! - `termination`: the automatic statement termination heuristic
//! - `grammar`: function table wiring the mutually recursive grammars
//! - `types`: type expression grammar (with `>>` splitting)
//! - `patterns`: pattern grammar
//! - `expr`: expression ladder and the ambiguity resolver
//! - `decl`: declarations and the module driver
//!
//! ## Public API
//!
//! ```rust,ignore
//! pub fn parse(tokens: &[Lexeme], filename: &str) -> Result<Module, Vec<Diagnostic>>
//! pub fn parse_expression(tokens: &[Lexeme], filename: &str) -> Result<Expr, Vec<Diagnostic>>
//! ```

mod error;
mod stream;

pub use error::{
    Diagnostic, DiagnosticCategory, DiagnosticCode, Diagnostics, PResult, ParseError, Severity,
    DEFAULT_MAX_ERRORS,
};
pub use grammar::Grammar;
pub use stream::{Checkpoint, TokenStream};

mod bindings;
mod decl;
mod expr;
mod grammar;
mod helpers;
mod patterns;
pub mod termination;

/// Token classification shared by the grammars.
pub mod token_utils;
mod types;

use fern_ast::{Expr, Location, Module, Pattern, TypeExpr};
use fern_lexer::{Lexeme, Token};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::instrument;

/// How the module driver reacts to a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParseMode {
    /// Stop at the first diagnostic
    #[default]
    SingleShot,
    /// Synchronize and keep collecting until the error cap
    Batch,
}

/// Parser configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseOptions {
    /// Error handling mode
    pub mode: ParseMode,
    /// Diagnostics collected before the `TooManyErrors` sentinel
    pub max_errors: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            mode: ParseMode::SingleShot,
            max_errors: DEFAULT_MAX_ERRORS,
        }
    }
}

impl ParseOptions {
    /// Options for batch (linting-style) parsing.
    pub fn batch() -> Self {
        Self {
            mode: ParseMode::Batch,
            ..Self::default()
        }
    }
}

/// Parser state: cursor, diagnostics, record-context flag and the grammar
/// table. One instance per module; not shared across threads.
pub struct Parser<'src> {
    pub(crate) stream: TokenStream<'src>,
    pub(crate) diagnostics: Diagnostics,
    pub(crate) in_record: bool,
    pub(crate) grammar: Grammar,
}

impl<'src> Parser<'src> {
    /// Create a parser wired with the standard grammar.
    pub fn new(tokens: &'src [Lexeme], filename: &str, options: &ParseOptions) -> Self {
        Self::with_grammar(tokens, filename, options, Grammar::standard())
    }

    /// Create a parser with a custom grammar table.
    pub fn with_grammar(
        tokens: &'src [Lexeme],
        filename: &str,
        options: &ParseOptions,
        grammar: Grammar,
    ) -> Self {
        Self {
            stream: TokenStream::new(tokens, Arc::from(filename)),
            diagnostics: Diagnostics::new(options.max_errors),
            in_record: false,
            grammar,
        }
    }

    // === Cursor ===

    pub(crate) fn peek(&self) -> Option<&Token> {
        self.stream.peek()
    }

    pub(crate) fn peek_nth(&self, n: usize) -> Option<&Token> {
        self.stream.peek_nth(n)
    }

    pub(crate) fn advance(&mut self) -> Option<Token> {
        self.stream.advance()
    }

    pub(crate) fn check(&self, expected: &Token) -> bool {
        self.stream.check(expected)
    }

    pub(crate) fn check_nth(&self, n: usize, expected: &Token) -> bool {
        self.stream.check_nth(n, expected)
    }

    pub(crate) fn eat(&mut self, expected: &Token) -> bool {
        self.stream.eat(expected)
    }

    pub(crate) fn at_end(&self) -> bool {
        self.stream.at_end()
    }

    pub(crate) fn location(&self) -> Location {
        self.stream.current_location()
    }

    pub(crate) fn previous_location(&self) -> Location {
        self.stream.previous_location()
    }

    // === Cross-grammar calls ===

    /// Parse a full expression through the grammar table.
    pub fn parse_expression(&mut self) -> PResult<Expr> {
        (self.grammar.expression)(self)
    }

    /// Parse a `when` guard through the grammar table.
    pub fn parse_guard(&mut self) -> PResult<Expr> {
        (self.grammar.guard)(self)
    }

    /// Parse a pattern through the grammar table.
    pub fn parse_pattern(&mut self) -> PResult<Pattern> {
        (self.grammar.pattern)(self)
    }

    /// Parse a type expression through the grammar table.
    pub fn parse_type(&mut self) -> PResult<TypeExpr> {
        (self.grammar.type_expr)(self)
    }

    // === Context ===

    /// Run `f` with the record-context flag set to `value`.
    ///
    /// The previous value is restored on every exit path, `?` included.
    pub(crate) fn with_record_context<T>(
        &mut self,
        value: bool,
        f: impl FnOnce(&mut Self) -> PResult<T>,
    ) -> PResult<T> {
        let saved = std::mem::replace(&mut self.in_record, value);
        let result = f(self);
        self.in_record = saved;
        result
    }

    /// Whether an implicit statement terminator sits before the current token.
    pub(crate) fn implicit_terminator(&self) -> bool {
        match (self.stream.previous(), self.stream.current()) {
            (Some(previous), Some(current)) => {
                termination::implicit_terminator(previous, current, self.in_record)
            }
            _ => false,
        }
    }

    /// Diagnostics recorded so far.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        self.diagnostics.as_slice()
    }

    /// Turn a grammar result into the public result shape.
    fn finish<T>(self, result: PResult<T>) -> Result<T, Vec<Diagnostic>> {
        match result {
            Ok(value) if self.diagnostics.is_empty() => Ok(value),
            _ => Err(self.diagnostics.into_vec()),
        }
    }
}

/// Parse a module in single-shot mode.
///
/// # Returns
/// - `Ok(Module)` if parsing succeeds
/// - `Err(Vec<Diagnostic>)` holding the first diagnostic otherwise
pub fn parse(tokens: &[Lexeme], filename: &str) -> Result<Module, Vec<Diagnostic>> {
    parse_with_options(tokens, filename, &ParseOptions::default())
}

/// Parse a module with explicit options.
///
/// In [`ParseMode::Batch`] the error list holds every diagnostic collected,
/// capped at `max_errors` plus the `TooManyErrors` sentinel.
#[instrument(level = "debug", skip_all, fields(file = filename, tokens = tokens.len()))]
pub fn parse_with_options(
    tokens: &[Lexeme],
    filename: &str,
    options: &ParseOptions,
) -> Result<Module, Vec<Diagnostic>> {
    let mut parser = Parser::new(tokens, filename, options);
    let result = decl::parse_module(&mut parser, options.mode);
    parser.finish(result)
}

/// Parse a standalone expression; every token must be consumed.
#[instrument(level = "debug", skip_all, fields(file = filename, tokens = tokens.len()))]
pub fn parse_expression(tokens: &[Lexeme], filename: &str) -> Result<Expr, Vec<Diagnostic>> {
    parse_standalone(tokens, filename, |p| p.parse_expression())
}

/// Parse a standalone pattern; every token must be consumed.
#[instrument(level = "debug", skip_all, fields(file = filename, tokens = tokens.len()))]
pub fn parse_pattern(tokens: &[Lexeme], filename: &str) -> Result<Pattern, Vec<Diagnostic>> {
    parse_standalone(tokens, filename, |p| p.parse_pattern())
}

/// Parse a standalone type expression; every token must be consumed.
#[instrument(level = "debug", skip_all, fields(file = filename, tokens = tokens.len()))]
pub fn parse_type_expr(tokens: &[Lexeme], filename: &str) -> Result<TypeExpr, Vec<Diagnostic>> {
    parse_standalone(tokens, filename, |p| p.parse_type())
}

fn parse_standalone<T, F>(tokens: &[Lexeme], filename: &str, entry: F) -> Result<T, Vec<Diagnostic>>
where
    F: FnOnce(&mut Parser<'_>) -> PResult<T>,
{
    let mut parser = Parser::new(tokens, filename, &ParseOptions::default());
    let result = entry(&mut parser).and_then(|value| {
        parser.expect_end()?;
        Ok(value)
    });
    parser.finish(result)
}

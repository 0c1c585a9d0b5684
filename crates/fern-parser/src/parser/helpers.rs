//! Common parsing helpers shared by every grammar.
//!
//! Expectation checks that raise structured diagnostics, and the
//! comma-separated list pattern that appears in almost every production.

use super::token_utils::describe;
use super::{Diagnostic, DiagnosticCode, PResult, ParseError, Parser};
use fern_ast::Location;
use fern_lexer::Token;

impl Parser<'_> {
    /// Record a diagnostic and return the error to propagate.
    pub(crate) fn report(&mut self, diagnostic: Diagnostic) -> ParseError {
        self.diagnostics.report(diagnostic)
    }

    /// Report `code` at the current token, with the token as `found`.
    pub(crate) fn error_here(&mut self, code: DiagnosticCode) -> ParseError {
        let diagnostic =
            Diagnostic::new(code, self.location()).with_param("found", describe(self.peek()));
        self.report(diagnostic)
    }

    /// Report an unexpected token at the current position.
    pub(crate) fn unexpected(&mut self, context: &str) -> ParseError {
        let diagnostic = Diagnostic::new(DiagnosticCode::UnexpectedToken, self.location())
            .with_param("found", describe(self.peek()))
            .with_param("context", context);
        self.report(diagnostic)
    }

    /// Expect a specific token and advance if it matches.
    ///
    /// Returns the location of the consumed token.
    pub(crate) fn expect(&mut self, expected: Token, context: &str) -> PResult<Location> {
        if self.check(&expected) {
            let loc = self.location();
            self.advance();
            Ok(loc)
        } else {
            let diagnostic = Diagnostic::new(DiagnosticCode::ExpectedToken, self.location())
                .with_param("expected", &expected)
                .with_param("found", describe(self.peek()))
                .with_param("context", context);
            Err(self.report(diagnostic))
        }
    }

    /// Expect an identifier and return its name and location.
    pub(crate) fn expect_ident(&mut self, context: &str) -> PResult<(String, Location)> {
        let loc = self.location();
        if let Some(Token::Ident(name)) = self.peek() {
            let name = name.to_string();
            self.advance();
            return Ok((name, loc));
        }
        let diagnostic = Diagnostic::new(DiagnosticCode::ExpectedIdentifier, loc)
            .with_param("found", describe(self.peek()))
            .with_param("context", context);
        Err(self.report(diagnostic))
    }

    /// Expect a string literal and return its contents.
    pub(crate) fn expect_string(&mut self, context: &str) -> PResult<String> {
        if let Some(Token::Str(value)) = self.peek() {
            let value = value.to_string();
            self.advance();
            return Ok(value);
        }
        let diagnostic = Diagnostic::new(DiagnosticCode::ExpectedStringLiteral, self.location())
            .with_param("found", describe(self.peek()))
            .with_param("context", context);
        Err(self.report(diagnostic))
    }

    /// Require that every token has been consumed.
    pub(crate) fn expect_end(&mut self) -> PResult<()> {
        if self.at_end() {
            Ok(())
        } else {
            Err(self.unexpected("after the end of the input"))
        }
    }

    /// Parse `item (, item)* [,] close` after the opening delimiter.
    ///
    /// An empty list and one trailing comma are accepted; a lone comma is not.
    pub(crate) fn comma_list<T>(
        &mut self,
        close: Token,
        context: &str,
        mut item: impl FnMut(&mut Self) -> PResult<T>,
    ) -> PResult<Vec<T>> {
        let mut items = Vec::new();
        if self.eat(&close) {
            return Ok(items);
        }
        loop {
            items.push(item(self)?);
            if !self.eat(&Token::Comma) {
                break;
            }
            if self.check(&close) {
                break;
            }
        }
        self.expect(close, context)?;
        Ok(items)
    }
}

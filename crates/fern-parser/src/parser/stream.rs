//! Token stream wrapper for the recursive descent parser.

use fern_ast::Location;
use fern_lexer::{Lexeme, Token};
use std::sync::Arc;
use tracing::debug;

/// Saved cursor state for bounded backtracking.
#[derive(Debug, Clone)]
pub struct Checkpoint {
    pos: usize,
    pending: Option<Lexeme>,
    last: Option<Lexeme>,
}

/// Token stream with lookahead, checkpoints and one push-back slot.
///
/// The lexeme slice is never mutated. Splitting a `>>` into two `>` is done
/// by consuming the `>>` and parking a synthetic `>` in the push-back slot,
/// which is read before the slice.
pub struct TokenStream<'src> {
    tokens: &'src [Lexeme],
    pos: usize,
    pending: Option<Lexeme>,
    last: Option<Lexeme>,
    file: Arc<str>,
}

impl<'src> TokenStream<'src> {
    /// Create a new token stream over lexed input.
    pub fn new(tokens: &'src [Lexeme], file: Arc<str>) -> Self {
        Self {
            tokens,
            pos: 0,
            pending: None,
            last: None,
            file,
        }
    }

    /// The lexeme under the cursor, `None` at end of input.
    pub fn current(&self) -> Option<&Lexeme> {
        self.pending.as_ref().or_else(|| self.tokens.get(self.pos))
    }

    /// The lexeme `n` positions ahead of the cursor.
    pub fn nth(&self, n: usize) -> Option<&Lexeme> {
        match &self.pending {
            Some(pending) if n == 0 => Some(pending),
            Some(_) => self.tokens.get(self.pos + n - 1),
            None => self.tokens.get(self.pos + n),
        }
    }

    /// Peek at the current token without consuming it.
    pub fn peek(&self) -> Option<&Token> {
        self.current().map(|lexeme| &lexeme.token)
    }

    /// Peek at the nth token ahead without consuming.
    pub fn peek_nth(&self, n: usize) -> Option<&Token> {
        self.nth(n).map(|lexeme| &lexeme.token)
    }

    /// Advance to the next token and return the current one.
    pub fn advance(&mut self) -> Option<Token> {
        let lexeme = match self.pending.take() {
            Some(pending) => pending,
            None => {
                let lexeme = self.tokens.get(self.pos)?.clone();
                self.pos += 1;
                lexeme
            }
        };
        let token = lexeme.token.clone();
        self.last = Some(lexeme);
        Some(token)
    }

    /// Check if the current token has the same kind as `expected`.
    ///
    /// Payloads are ignored: `check(&Token::Int(0))` matches any integer.
    pub fn check(&self, expected: &Token) -> bool {
        matches!(self.peek(), Some(t) if std::mem::discriminant(t) == std::mem::discriminant(expected))
    }

    /// Check the token `n` positions ahead.
    pub fn check_nth(&self, n: usize, expected: &Token) -> bool {
        matches!(self.peek_nth(n), Some(t) if std::mem::discriminant(t) == std::mem::discriminant(expected))
    }

    /// Consume the current token if it matches `expected`.
    pub fn eat(&mut self, expected: &Token) -> bool {
        if self.check(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consume the current token if it matches any of `candidates`.
    pub fn eat_any(&mut self, candidates: &[Token]) -> Option<Token> {
        if candidates.iter().any(|candidate| self.check(candidate)) {
            self.advance()
        } else {
            None
        }
    }

    /// Check if we've reached the end of the token stream.
    pub fn at_end(&self) -> bool {
        self.current().is_none()
    }

    /// Snapshot the cursor.
    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            pos: self.pos,
            pending: self.pending.clone(),
            last: self.last.clone(),
        }
    }

    /// Rewind to a snapshot taken by [`checkpoint`](Self::checkpoint).
    pub fn restore(&mut self, checkpoint: Checkpoint) {
        self.pos = checkpoint.pos;
        self.pending = checkpoint.pending;
        self.last = checkpoint.last;
    }

    /// Park a synthetic lexeme in front of the cursor.
    ///
    /// Only one lexeme can be pending; the slot is always empty when this is
    /// called because the caller just consumed the lexeme it splits.
    pub fn push_front(&mut self, lexeme: Lexeme) {
        debug_assert!(self.pending.is_none(), "push-back slot already occupied");
        self.pending = Some(lexeme);
    }

    /// The most recently consumed lexeme.
    pub fn previous(&self) -> Option<&Lexeme> {
        self.last.as_ref()
    }

    /// Location of a lexeme in this stream's file.
    pub fn location_of(&self, lexeme: &Lexeme) -> Location {
        Location::new(
            self.file.clone(),
            lexeme.line,
            lexeme.column,
            lexeme.span.start as u32,
        )
    }

    /// Location of the current token.
    ///
    /// At end of input this points just past the last token.
    pub fn current_location(&self) -> Location {
        if let Some(lexeme) = self.current() {
            return self.location_of(lexeme);
        }
        match self.tokens.last() {
            Some(last) => Location::new(
                self.file.clone(),
                last.line,
                last.column + (last.span.end - last.span.start) as u32,
                last.span.end as u32,
            ),
            None => Location::new(self.file.clone(), 1, 1, 0),
        }
    }

    /// Location of the most recently consumed token.
    pub fn previous_location(&self) -> Location {
        match &self.last {
            Some(lexeme) => self.location_of(lexeme),
            None => self.current_location(),
        }
    }

    /// Skip to a safe point after a recoverable error.
    ///
    /// Always consumes at least one token. Stops after a consumed `;`, before
    /// the first token on a new source line, or before a declaration keyword.
    pub fn synchronize(&mut self) {
        let start = self.pos;
        let Some(first) = self.advance() else {
            return;
        };

        if first != Token::Semicolon {
            while let Some(current) = self.current() {
                let previous_line = self.last.as_ref().map_or(current.line, |l| l.line);
                if current.line != previous_line || starts_declaration(&current.token) {
                    break;
                }
                if self.advance() == Some(Token::Semicolon) {
                    break;
                }
            }
        }

        debug!(skipped = self.pos - start, "synchronized after error");
    }
}

fn starts_declaration(token: &Token) -> bool {
    matches!(
        token,
        Token::Let | Token::Type | Token::Import | Token::Export | Token::External
    )
}

// Allow unwrap in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]

//! Reference lexer for the Fern language.
//!
//! The parser treats lexing as an external collaborator: it only consumes a
//! slice of [`Lexeme`]s. This crate provides the logos-based tokenizer that
//! produces exactly that shape, so the parser can be driven from source text
//! by tests and embedders.
//!
//! # Design
//!
//! - `Token` - token type and literal payload in one enum
//! - `Lexeme` - a token plus its byte span, 1-based line/column and the
//!   "preceded by whitespace" flag
//! - Comments (`//` and `/* */`) are stripped during lexing (not tokens)
//! - Token strings defined once in `TOKEN_STRINGS` (single source of truth for Display)
//!
//! # Examples
//!
//! ```
//! use fern_lexer::{tokenize, Token};
//!
//! let lexemes = tokenize("let x = 1").unwrap();
//! assert_eq!(lexemes[0].token, Token::Let);
//! assert_eq!(lexemes[3].column, 9);
//! ```

use logos::Logos;
use std::ops::Range;
use std::rc::Rc;
use thiserror::Error;

/// Fern token.
///
/// Token strings for keywords, operators, and delimiters are defined once
/// in the `TOKEN_STRINGS` table and indexed by discriminant for Display.
///
/// # Layout
///
/// Uses `#[repr(u16)]` to guarantee discriminant values are stable and
/// can be safely used to index into `TOKEN_STRINGS`. Payload-carrying
/// variants come last and are displayed separately.
#[derive(Logos, Debug, Clone, PartialEq)]
#[repr(u16)]
#[logos(skip r"[ \t\r\n\f]+")]
#[logos(skip r"//[^\n]*")]
#[logos(skip r"/\*([^*]|\*+[^*/])*\*+/")]
pub enum Token {
    // === Keywords ===
    /// Keyword `let`
    #[token("let")]
    Let,
    /// Keyword `mut`
    #[token("mut")]
    Mut,
    /// Keyword `rec`
    #[token("rec")]
    Rec,
    /// Keyword `and` (binding groups, not logical and)
    #[token("and")]
    And,
    /// Keyword `type`
    #[token("type")]
    Type,
    /// Keyword `if`
    #[token("if")]
    If,
    /// Keyword `then`
    #[token("then")]
    Then,
    /// Keyword `else`
    #[token("else")]
    Else,
    /// Keyword `match`
    #[token("match")]
    Match,
    /// Keyword `when`
    #[token("when")]
    When,
    /// Keyword `import`
    #[token("import")]
    Import,
    /// Keyword `export`
    #[token("export")]
    Export,
    /// Keyword `external`
    #[token("external")]
    External,
    /// Keyword `from`
    #[token("from")]
    From,
    /// Keyword `as`
    #[token("as")]
    As,
    /// Keyword `unsafe`
    #[token("unsafe")]
    Unsafe,
    /// Keyword `while`
    #[token("while")]
    While,
    /// Boolean literal `true`
    #[token("true")]
    True,
    /// Boolean literal `false`
    #[token("false")]
    False,

    // === Operators ===

    // Arithmetic
    /// Operator `+`
    #[token("+")]
    Plus,
    /// Operator `-`
    #[token("-")]
    Minus,
    /// Operator `*`
    #[token("*")]
    Star,
    /// Operator `/`
    #[token("/")]
    Slash,
    /// Operator `%`
    #[token("%")]
    Percent,

    // Comparison
    /// Operator `==`
    #[token("==")]
    EqEq,
    /// Operator `!=`
    #[token("!=")]
    BangEq,
    /// Operator `<`
    #[token("<")]
    Lt,
    /// Operator `<=`
    #[token("<=")]
    LtEq,
    /// Operator `>`
    #[token(">")]
    Gt,
    /// Operator `>=`
    #[token(">=")]
    GtEq,

    // Logic
    /// Operator `&&`
    #[token("&&")]
    AmpAmp,
    /// Operator `||`
    #[token("||")]
    PipePipe,
    /// Operator `!` (logical not, postfix dereference)
    #[token("!")]
    Bang,

    // Lists, strings, functions
    /// Operator `&` (string concatenation)
    #[token("&")]
    Amp,
    /// Operator `::` (list cons)
    #[token("::")]
    ColonColon,
    /// Operator `|>` (pipe)
    #[token("|>")]
    PipeGt,
    /// Operator `>>` (forward composition, or two closing angle brackets)
    #[token(">>")]
    GtGt,
    /// Operator `<<` (backward composition)
    #[token("<<")]
    LtLt,
    /// Operator `:=` (reference assignment)
    #[token(":=")]
    ColonEq,

    // Arrows & binding
    /// Operator `=>` (lambda, match arm)
    #[token("=>")]
    FatArrow,
    /// Operator `->` (function type)
    #[token("->")]
    Arrow,
    /// Operator `=`
    #[token("=")]
    Eq,
    /// Operator `:`
    #[token(":")]
    Colon,

    // Other
    /// Operator `;`
    #[token(";")]
    Semicolon,
    /// Operator `,`
    #[token(",")]
    Comma,
    /// Operator `.`
    #[token(".")]
    Dot,
    /// Operator `...` (spread, list rest)
    #[token("...")]
    Ellipsis,
    /// Operator `|` (variants, unions, match arms)
    #[token("|")]
    Bar,
    /// Wildcard `_`
    #[token("_", priority = 3)]
    Underscore,

    // === Delimiters ===
    /// Delimiter `(`
    #[token("(")]
    LParen,
    /// Delimiter `)`
    #[token(")")]
    RParen,
    /// Delimiter `{`
    #[token("{")]
    LBrace,
    /// Delimiter `}`
    #[token("}")]
    RBrace,
    /// Delimiter `[`
    #[token("[")]
    LBracket,
    /// Delimiter `]`
    #[token("]")]
    RBracket,

    // === Literals ===
    /// Integer literal (e.g., 42, 0, 1000)
    ///
    /// Overflowing literals fail the callback and surface as a lex error.
    #[regex(r"[0-9]+", |lex| lex.slice().parse::<i64>().ok())]
    Int(i64),

    /// Float literal (e.g., 3.5, 1.0, 5.67e-8)
    #[regex(r"[0-9]+\.[0-9]+([eE][+-]?[0-9]+)?", |lex| lex.slice().parse::<f64>().ok())]
    #[regex(r"[0-9]+[eE][+-]?[0-9]+", |lex| lex.slice().parse::<f64>().ok())]
    Float(f64),

    /// String literal (e.g., "hello")
    ///
    /// Uses `Rc<str>` for cheap cloning throughout the parser pipeline.
    #[regex(r#""([^"\\]|\\.)*""#, |lex| {
        let s = lex.slice();
        let content = &s[1..s.len() - 1];
        unescape_string(content).map(|s| Rc::from(s.as_str()))
    })]
    Str(Rc<str>),

    /// Identifier (e.g., `x`, `map`, `Option`)
    ///
    /// Case is significant to the parser: a leading uppercase letter marks
    /// constructors and type constants.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_']*", |lex| Rc::from(lex.slice()))]
    Ident(Rc<str>),
}

/// Unescape a string literal content.
fn unescape_string(s: &str) -> Option<String> {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some('n') => result.push('\n'),
                Some('r') => result.push('\r'),
                Some('t') => result.push('\t'),
                Some('0') => result.push('\0'),
                Some('\\') => result.push('\\'),
                Some('"') => result.push('"'),
                Some('\'') => result.push('\''),
                Some(_) | None => return None,
            }
        } else {
            result.push(c);
        }
    }
    Some(result)
}

/// Token string lookup table.
///
/// Maps discriminant indices to their string representation, in enum
/// declaration order.
///
/// NOTE: The `#[token("...")]` attributes above must match these strings.
/// This duplication is unavoidable due to logos requiring literal strings.
const TOKEN_STRINGS: &[&str] = &[
    "let", "mut", "rec", "and", "type", "if", "then", "else", "match", "when", "import",
    "export", "external", "from", "as", "unsafe", "while", "true", "false", // keywords
    "+", "-", "*", "/", "%", // arithmetic
    "==", "!=", "<", "<=", ">", ">=", // comparison
    "&&", "||", "!", // logic
    "&", "::", "|>", ">>", "<<", ":=", // lists, strings, functions
    "=>", "->", "=", ":", // arrows & binding
    ";", ",", ".", "...", "|", "_", // other
    "(", ")", "{", "}", "[", "]", // delimiters
];

impl Token {
    /// Get the index into TOKEN_STRINGS for simple tokens.
    fn token_string_index(&self) -> usize {
        // Safe: Token has #[repr(u16)] so the discriminant is the leading u16
        let discriminant = unsafe { *(self as *const Token as *const u16) };
        discriminant as usize
    }

    /// Whether this is an identifier starting with an uppercase letter.
    pub fn is_upper_ident(&self) -> bool {
        matches!(self, Token::Ident(name) if name.starts_with(|c: char| c.is_ascii_uppercase()))
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::Int(n) => write!(f, "{}", n),
            Token::Float(x) => write!(f, "{}", x),
            Token::Str(s) => write!(f, "\"{}\"", s),
            Token::Ident(id) => write!(f, "{}", id),
            _ => {
                let idx = self.token_string_index();
                match TOKEN_STRINGS.get(idx) {
                    Some(s) => write!(f, "{}", s),
                    None => write!(f, "{:?}", self),
                }
            }
        }
    }
}

/// A token with its source position.
///
/// This is the element type of the parser's input. `line` and `column` are
/// 1-based; `column` counts characters, `span` is in bytes.
#[derive(Debug, Clone, PartialEq)]
pub struct Lexeme {
    /// The token and its literal payload
    pub token: Token,
    /// Byte range in the source text
    pub span: Range<usize>,
    /// 1-based line of the first character
    pub line: u32,
    /// 1-based column of the first character
    pub column: u32,
    /// Whether whitespace or a comment precedes this token
    pub spaced: bool,
}

impl Lexeme {
    /// Create a lexeme with an explicit position.
    pub fn new(token: Token, span: Range<usize>, line: u32, column: u32, spaced: bool) -> Self {
        Self {
            token,
            span,
            line,
            column,
            spaced,
        }
    }
}

/// Lexing failure: no token matches the input at this position.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized input {text:?} at line {line}, column {column}")]
pub struct LexError {
    /// Offending source text
    pub text: String,
    /// Byte offset of the offending text
    pub offset: usize,
    /// 1-based line
    pub line: u32,
    /// 1-based column
    pub column: u32,
}

/// Line-start table used to turn byte offsets into line/column pairs.
struct LineIndex<'src> {
    source: &'src str,
    starts: Vec<usize>,
}

impl<'src> LineIndex<'src> {
    fn new(source: &'src str) -> Self {
        let starts = std::iter::once(0)
            .chain(source.match_indices('\n').map(|(i, _)| i + 1))
            .collect();
        Self { source, starts }
    }

    fn position(&self, offset: usize) -> (u32, u32) {
        let line = self.starts.partition_point(|&start| start <= offset);
        let line_start = self.starts[line - 1];
        let column = self.source[line_start..offset].chars().count() + 1;
        (line as u32, column as u32)
    }
}

/// Tokenize Fern source text.
///
/// Returns every token with its position, or the first unrecognized input.
pub fn tokenize(source: &str) -> Result<Vec<Lexeme>, LexError> {
    let index = LineIndex::new(source);
    let mut lexemes: Vec<Lexeme> = Vec::new();
    let mut lexer = Token::lexer(source);

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        let (line, column) = index.position(span.start);
        match result {
            Ok(token) => {
                let previous_end = lexemes.last().map_or(0, |l| l.span.end);
                let spaced = span.start > previous_end;
                lexemes.push(Lexeme::new(token, span, line, column, spaced));
            }
            Err(()) => {
                return Err(LexError {
                    text: lexer.slice().to_string(),
                    offset: span.start,
                    line,
                    column,
                });
            }
        }
    }

    Ok(lexemes)
}

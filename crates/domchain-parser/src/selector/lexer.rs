//! Lexer for selectors.
//!
//! Produces span-based tokens without storing text. Whitespace is kept as a
//! token because it is the descendant combinator.
//!
//! Consecutive unrecognized characters are coalesced into a single `Garbage`
//! token.

use logos::Logos;

use crate::error::Span;

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SelectorKind {
    #[regex(r"[ \t\r\n\f]+")]
    Whitespace,

    #[token(",")]
    Comma,

    #[token(">")]
    Greater,

    #[token("+")]
    Plus,

    #[token("~")]
    Tilde,

    #[token("*")]
    Star,

    #[token("#")]
    Hash,

    #[token(".")]
    Dot,

    #[token(":")]
    Colon,

    #[token("[")]
    BracketOpen,

    #[token("]")]
    BracketClose,

    #[token("=")]
    Equals,

    #[token("~=")]
    TildeEquals,

    #[token("|=")]
    PipeEquals,

    #[token("^=")]
    CaretEquals,

    #[token("$=")]
    DollarEquals,

    #[token("*=")]
    StarEquals,

    /// Quoted attribute value, quotes included.
    #[regex(r#""([^"\\]|\\.)*""#)]
    #[regex(r"'([^'\\]|\\.)*'")]
    StringLiteral,

    /// Name characters are ASCII alphanumerics, `_`, `-` and any non-ASCII
    /// code point. A backslash escapes one character or up to six hex digits.
    #[regex(r"-?([a-zA-Z_]|[^\x00-\x7F]|\\[0-9a-fA-F]{1,6}[ \t\r\n\f]?|\\[^\r\n\f0-9a-fA-F])([a-zA-Z0-9_\-]|[^\x00-\x7F]|\\[0-9a-fA-F]{1,6}[ \t\r\n\f]?|\\[^\r\n\f0-9a-fA-F])*")]
    Ident,

    /// Coalesced unrecognized characters (never produced by Logos directly).
    Garbage,
}

impl SelectorKind {
    /// Tokens that may end a compound selector.
    pub fn ends_compound(self) -> bool {
        matches!(
            self,
            Self::Whitespace | Self::Comma | Self::Greater | Self::Plus | Self::Tilde
        )
    }

    pub fn describe(self) -> &'static str {
        match self {
            Self::Whitespace => "whitespace",
            Self::Comma => "`,`",
            Self::Greater => "`>`",
            Self::Plus => "`+`",
            Self::Tilde => "`~`",
            Self::Star => "`*`",
            Self::Hash => "`#`",
            Self::Dot => "`.`",
            Self::Colon => "`:`",
            Self::BracketOpen => "`[`",
            Self::BracketClose => "`]`",
            Self::Equals => "`=`",
            Self::TildeEquals => "`~=`",
            Self::PipeEquals => "`|=`",
            Self::CaretEquals => "`^=`",
            Self::DollarEquals => "`$=`",
            Self::StarEquals => "`*=`",
            Self::StringLiteral => "string",
            Self::Ident => "identifier",
            Self::Garbage => "unexpected characters",
        }
    }
}

/// Zero-copy token: kind + span, text retrieved via [`token_text`] when needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: SelectorKind,
    pub span: Span,
}

impl Token {
    #[inline]
    pub fn new(kind: SelectorKind, span: Span) -> Self {
        Self { kind, span }
    }
}

/// Tokenizes a selector into span-based tokens.
pub fn lex(source: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut lexer = SelectorKind::lexer(source);
    let mut error_start: Option<usize> = None;

    loop {
        match lexer.next() {
            Some(Ok(kind)) => {
                if let Some(start) = error_start.take() {
                    let end = lexer.span().start;
                    tokens.push(Token::new(SelectorKind::Garbage, Span::new(start, end)));
                }
                tokens.push(Token::new(kind, lexer.span().into()));
            }
            Some(Err(())) => {
                if error_start.is_none() {
                    error_start = Some(lexer.span().start);
                }
            }
            None => {
                if let Some(start) = error_start.take() {
                    tokens.push(Token::new(
                        SelectorKind::Garbage,
                        Span::new(start, source.len()),
                    ));
                }
                break;
            }
        }
    }

    tokens
}

/// Retrieves the text slice for a token.
#[inline]
pub fn token_text<'s>(source: &'s str, token: &Token) -> &'s str {
    &source[token.span.range()]
}

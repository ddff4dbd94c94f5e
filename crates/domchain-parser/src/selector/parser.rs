//! Recursive-descent parser over selector tokens.
//!
//! Grammar:
//!
//! ```text
//! list      = ws? complex (ws? "," ws? complex)* ws?
//! complex   = compound (combinator compound)*
//! combinator= ws? (">" | "+" | "~") ws? | ws
//! compound  = (ident | "*")? ("#" ident | "." ident | attribute)*
//! attribute = "[" ws? ident ws? (op ws? (ident | string) ws? ("i" | "s")? ws?)? "]"
//! ```
//!
//! The first error aborts the parse.

use std::borrow::Cow;

use super::ast::{AttrCondition, AttrMatcher, AttrOp, Combinator, Complex, Compound, Part};
use super::lexer::{SelectorKind, Token, lex, token_text};
use crate::Result;
use crate::error::{Span, SyntaxError};

pub(super) struct Parser<'src> {
    source: &'src str,
    tokens: Vec<Token>,
    pos: usize,
}

impl<'src> Parser<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            tokens: lex(source),
            pos: 0,
        }
    }

    pub fn parse(mut self) -> Result<Vec<Complex>> {
        self.skip_whitespace();
        let mut groups = vec![self.complex()?];
        while self.eat(SelectorKind::Comma).is_some() {
            self.skip_whitespace();
            groups.push(self.complex()?);
        }
        if self.current().is_some() {
            return Err(self.unexpected());
        }
        Ok(groups)
    }

    fn complex(&mut self) -> Result<Complex> {
        let mut parts = vec![Part {
            combinator: None,
            compound: self.compound()?,
        }];

        loop {
            let spaced = self.skip_whitespace();
            let combinator = match self.current() {
                None | Some(SelectorKind::Comma) => break,
                Some(SelectorKind::Greater) => Combinator::Child,
                Some(SelectorKind::Plus) => Combinator::NextSibling,
                Some(SelectorKind::Tilde) => Combinator::SubsequentSibling,
                Some(_) if spaced => {
                    parts.push(Part {
                        combinator: Some(Combinator::Descendant),
                        compound: self.compound()?,
                    });
                    continue;
                }
                Some(_) => return Err(self.unexpected()),
            };
            self.bump();
            self.skip_whitespace();
            parts.push(Part {
                combinator: Some(combinator),
                compound: self.compound()?,
            });
        }

        Ok(Complex { parts })
    }

    fn compound(&mut self) -> Result<Compound> {
        let start = self.pos;
        let mut compound = Compound::default();

        if let Some(token) = self.eat(SelectorKind::Ident) {
            compound.tag = Some(self.ident(&token).to_ascii_lowercase());
        } else {
            self.eat(SelectorKind::Star);
        }

        loop {
            match self.current() {
                Some(SelectorKind::Hash) => {
                    self.bump();
                    let id = self.expect_ident("expected an id after `#`")?;
                    compound.ids.push(id.into_owned());
                }
                Some(SelectorKind::Dot) => {
                    self.bump();
                    let class = self.expect_ident("expected a class name after `.`")?;
                    compound.classes.push(class.into_owned());
                }
                Some(SelectorKind::BracketOpen) => {
                    let attr = self.attribute()?;
                    compound.attrs.push(attr);
                }
                Some(SelectorKind::Colon) => {
                    return Err(self.error_here("pseudo-classes are not supported"));
                }
                Some(SelectorKind::Ident | SelectorKind::Star) => {
                    return Err(self.error_here("type selector must come first in a compound"));
                }
                Some(kind) if kind.ends_compound() => break,
                None => break,
                Some(_) => return Err(self.unexpected()),
            }
        }

        if self.pos == start {
            return Err(self.error_here("expected a selector"));
        }
        Ok(compound)
    }

    fn attribute(&mut self) -> Result<AttrCondition> {
        let open = self.span_here();
        self.bump();
        self.skip_whitespace();
        let name = self
            .expect_ident("expected an attribute name")?
            .to_ascii_lowercase();
        self.skip_whitespace();

        let op = match self.current() {
            Some(SelectorKind::BracketClose) => {
                self.bump();
                return Ok(AttrCondition {
                    name,
                    matcher: None,
                });
            }
            Some(SelectorKind::Equals) => AttrOp::Exact,
            Some(SelectorKind::TildeEquals) => AttrOp::Includes,
            Some(SelectorKind::PipeEquals) => AttrOp::DashMatch,
            Some(SelectorKind::CaretEquals) => AttrOp::Prefix,
            Some(SelectorKind::DollarEquals) => AttrOp::Suffix,
            Some(SelectorKind::StarEquals) => AttrOp::Substring,
            None => return Err(SyntaxError::new(open, "unclosed `[`")),
            Some(_) => return Err(self.unexpected()),
        };
        self.bump();
        self.skip_whitespace();

        let value = match self.current() {
            Some(SelectorKind::Ident) => self.ident(&self.tokens[self.pos]).into_owned(),
            Some(SelectorKind::StringLiteral) => unquote(self.text(&self.tokens[self.pos])),
            _ => return Err(self.error_here("expected an attribute value")),
        };
        self.bump();
        self.skip_whitespace();

        let mut case_insensitive = false;
        if let Some(SelectorKind::Ident) = self.current() {
            let flag = self.text(&self.tokens[self.pos]);
            if flag.eq_ignore_ascii_case("i") {
                case_insensitive = true;
            } else if !flag.eq_ignore_ascii_case("s") {
                return Err(self.error_here("unknown attribute flag"));
            }
            self.bump();
            self.skip_whitespace();
        }

        if self.eat(SelectorKind::BracketClose).is_none() {
            return Err(match self.current() {
                None => SyntaxError::new(open, "unclosed `[`"),
                Some(_) => self.error_here("expected `]`"),
            });
        }

        Ok(AttrCondition {
            name,
            matcher: Some(AttrMatcher {
                op,
                value,
                case_insensitive,
            }),
        })
    }

    fn current(&self) -> Option<SelectorKind> {
        self.tokens.get(self.pos).map(|t| t.kind)
    }

    fn bump(&mut self) {
        self.pos += 1;
    }

    fn eat(&mut self, kind: SelectorKind) -> Option<Token> {
        let token = *self.tokens.get(self.pos)?;
        if token.kind != kind {
            return None;
        }
        self.bump();
        Some(token)
    }

    /// Returns whether any whitespace was skipped.
    fn skip_whitespace(&mut self) -> bool {
        self.eat(SelectorKind::Whitespace).is_some()
    }

    fn expect_ident(&mut self, message: &str) -> Result<Cow<'src, str>> {
        match self.eat(SelectorKind::Ident) {
            Some(token) => Ok(self.ident(&token)),
            None => Err(self.error_here(message)),
        }
    }

    fn text(&self, token: &Token) -> &'src str {
        token_text(self.source, token)
    }

    /// Identifier text with escapes resolved.
    fn ident(&self, token: &Token) -> Cow<'src, str> {
        unescape_ident(self.text(token))
    }

    fn span_here(&self) -> Span {
        self.tokens
            .get(self.pos)
            .map_or(Span::empty(self.source.len()), |t| t.span)
    }

    fn error_here(&self, message: &str) -> SyntaxError {
        SyntaxError::new(self.span_here(), message)
    }

    fn unexpected(&self) -> SyntaxError {
        match self.current() {
            None => self.error_here("unexpected end of selector"),
            Some(SelectorKind::Garbage) => self.error_here("unexpected characters"),
            Some(kind) => self.error_here(&format!("unexpected {}", kind.describe())),
        }
    }
}

/// Resolve `\X` and `\hex ` escapes in an identifier.
///
/// Hex escapes of zero, surrogates and values past `char::MAX` become U+FFFD.
fn unescape_ident(raw: &str) -> Cow<'_, str> {
    if !raw.contains('\\') {
        return Cow::Borrowed(raw);
    }
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        let mut code = 0u32;
        let mut digits = 0;
        while digits < 6 {
            let Some(digit) = chars.peek().and_then(|d| d.to_digit(16)) else {
                break;
            };
            code = code * 16 + digit;
            digits += 1;
            chars.next();
        }
        if digits == 0 {
            if let Some(escaped) = chars.next() {
                out.push(escaped);
            }
            continue;
        }
        chars.next_if(|w| matches!(w, ' ' | '\t' | '\r' | '\n' | '\x0c'));
        let decoded = char::from_u32(code).filter(|&ch| ch != '\0');
        out.push(decoded.unwrap_or(char::REPLACEMENT_CHARACTER));
    }
    Cow::Owned(out)
}

/// Strip the quotes of a string literal and resolve backslash escapes.
fn unquote(literal: &str) -> String {
    let inner = &literal[1..literal.len() - 1];
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(escaped) = chars.next() {
                out.push(escaped);
            }
        } else {
            out.push(c);
        }
    }
    out
}

//! Lexer for markup.
//!
//! Markup lexing is modal: outside tags only text, comments, declarations and
//! tag openers exist, inside a tag only attributes and the closer. Two Logos
//! token sets cover the two modes and the lexer morphs between them. Raw text
//! elements (`script`, `style`) and escapable raw text elements (`textarea`,
//! `title`) switch to a plain scan up to their closing tag.
//!
//! Unrecognized characters inside tags are coalesced into `Garbage` tokens.

use logos::{Lexer, Logos};

use domchain_core::utils::{is_escapable_raw_text_element, is_raw_text_element};

use crate::error::Span;

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
enum ContentToken {
    #[regex(r"[^<]+")]
    #[token("<")]
    Text,

    #[token("<!--", lex_comment)]
    Comment,

    #[regex(r"<![a-zA-Z][^>]*>")]
    Declaration,

    #[regex(r"<[a-zA-Z][a-zA-Z0-9\-]*")]
    StartTag,

    #[regex(r"</[a-zA-Z][a-zA-Z0-9\-]*")]
    EndTag,
}

fn lex_comment(lexer: &mut Lexer<ContentToken>) -> bool {
    match lexer.remainder().find("-->") {
        Some(end) => {
            lexer.bump(end + 3);
            true
        }
        None => {
            lexer.bump(lexer.remainder().len());
            false
        }
    }
}

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n\f]+")]
enum TagToken {
    #[regex(r#"[^ \t\r\n\f"'<>/=]+"#)]
    Name,

    /// `=` and the value that follows it, quoted or not.
    #[regex(r#"=[ \t\r\n\f]*("[^"]*"|'[^']*'|[^ \t\r\n\f"'=<>`]+)"#)]
    Value,

    #[token(">")]
    Close,

    #[token("/>")]
    SelfClose,

    #[token("/")]
    Slash,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkupKind {
    Text,
    /// Contents of `script` or `style`, never entity-decoded.
    RawText,
    /// Contents of `textarea` or `title`: no tags, but entities decode.
    EscapableRawText,
    Comment,
    /// `<!DOCTYPE ...>` and friends.
    Declaration,
    /// Span covers the tag name only.
    StartTag,
    AttrName,
    /// Span covers the value without quotes.
    AttrValue,
    TagClose,
    SelfClosingTagClose,
    /// Span covers the tag name only.
    EndTag,
    /// A comment that never ends.
    UnterminatedComment,
    /// A tag that hits the end of input before `>`.
    UnterminatedTag,
    Garbage,
}

/// Zero-copy token: kind + span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: MarkupKind,
    pub span: Span,
}

impl Token {
    #[inline]
    pub fn new(kind: MarkupKind, span: Span) -> Self {
        Self { kind, span }
    }
}

/// Tokenizes markup into span-based tokens.
pub fn lex(source: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut content = ContentToken::lexer(source);

    while let Some(result) = content.next() {
        let span = content.span();
        let kind = match result {
            Ok(ContentToken::Text) => MarkupKind::Text,
            Ok(ContentToken::Comment) => MarkupKind::Comment,
            Ok(ContentToken::Declaration) => MarkupKind::Declaration,
            Err(()) if source[span.start..].starts_with("<!--") => {
                MarkupKind::UnterminatedComment
            }
            // `<!` not followed by a comment or a declaration reads as text.
            Err(()) => MarkupKind::Text,
            Ok(tag @ (ContentToken::StartTag | ContentToken::EndTag)) => {
                let (kind, name_start) = if tag == ContentToken::StartTag {
                    (MarkupKind::StartTag, span.start + 1)
                } else {
                    (MarkupKind::EndTag, span.start + 2)
                };
                tokens.push(Token::new(kind, Span::new(name_start, span.end)));

                let mut inside = content.morph::<TagToken>();
                let closed = lex_tag_body(source, &mut inside, &mut tokens);
                content = inside.morph::<ContentToken>();

                let name = &source[name_start..span.end];
                let raw = if is_raw_text_element(name) {
                    Some(MarkupKind::RawText)
                } else if is_escapable_raw_text_element(name) {
                    Some(MarkupKind::EscapableRawText)
                } else {
                    None
                };
                if closed == Some(MarkupKind::TagClose) && kind == MarkupKind::StartTag {
                    if let Some(raw) = raw {
                        lex_raw_text(source, &mut content, name, raw, &mut tokens);
                    }
                }
                continue;
            }
        };
        push_coalescing_text(&mut tokens, Token::new(kind, span.into()));
    }

    tokens
}

/// A lone `<` lexes as its own text token; merge adjacent text runs.
fn push_coalescing_text(tokens: &mut Vec<Token>, token: Token) {
    if token.kind == MarkupKind::Text {
        if let Some(last) = tokens.last_mut() {
            if last.kind == MarkupKind::Text && last.span.end == token.span.start {
                last.span.end = token.span.end;
                return;
            }
        }
    }
    tokens.push(token);
}

/// Lex attributes up to and including the tag closer.
///
/// Returns the closer kind, or `None` when the input ends first.
fn lex_tag_body(
    source: &str,
    lexer: &mut Lexer<TagToken>,
    tokens: &mut Vec<Token>,
) -> Option<MarkupKind> {
    let mut error_start: Option<usize> = None;

    loop {
        let next = lexer.next();
        if !matches!(next, Some(Err(()))) {
            if let Some(start) = error_start.take() {
                let end = if next.is_some() {
                    lexer.span().start
                } else {
                    source.len()
                };
                tokens.push(Token::new(MarkupKind::Garbage, Span::new(start, end)));
            }
        }

        let span = lexer.span();
        match next {
            None => {
                tokens.push(Token::new(
                    MarkupKind::UnterminatedTag,
                    Span::empty(source.len()),
                ));
                return None;
            }
            Some(Err(())) => {
                if error_start.is_none() {
                    error_start = Some(span.start);
                }
            }
            Some(Ok(TagToken::Name)) => {
                tokens.push(Token::new(MarkupKind::AttrName, span.into()));
            }
            Some(Ok(TagToken::Value)) => {
                let value = value_span(source, span.start, span.end);
                tokens.push(Token::new(MarkupKind::AttrValue, value));
            }
            // A lone `/` inside a tag carries no meaning.
            Some(Ok(TagToken::Slash)) => {}
            Some(Ok(TagToken::Close)) => {
                tokens.push(Token::new(MarkupKind::TagClose, span.into()));
                return Some(MarkupKind::TagClose);
            }
            Some(Ok(TagToken::SelfClose)) => {
                tokens.push(Token::new(MarkupKind::SelfClosingTagClose, span.into()));
                return Some(MarkupKind::SelfClosingTagClose);
            }
        }
    }
}

/// Span of the value inside a `Value` token: skip `=`, whitespace and quotes.
fn value_span(source: &str, start: usize, end: usize) -> Span {
    let raw = &source[start + 1..end];
    let trimmed = raw.trim_start();
    let value_start = end - trimmed.len();
    match trimmed.as_bytes().first() {
        Some(b'"' | b'\'') => Span::new(value_start + 1, end - 1),
        _ => Span::new(value_start, end),
    }
}

/// Consume everything up to `</name` (any case) as one `kind` token.
fn lex_raw_text(
    source: &str,
    lexer: &mut Lexer<ContentToken>,
    name: &str,
    kind: MarkupKind,
    tokens: &mut Vec<Token>,
) {
    let rest = lexer.remainder();
    let start = source.len() - rest.len();
    let len = find_closing_tag(rest, name).unwrap_or(rest.len());
    if len > 0 {
        tokens.push(Token::new(kind, Span::new(start, start + len)));
    }
    lexer.bump(len);
}

fn find_closing_tag(haystack: &str, name: &str) -> Option<usize> {
    let bytes = haystack.as_bytes();
    let mut from = 0;
    while let Some(pos) = haystack[from..].find("</") {
        let at = from + pos;
        let name_end = at + 2 + name.len();
        if bytes.len() >= name_end
            && haystack.is_char_boundary(name_end)
            && haystack[at + 2..name_end].eq_ignore_ascii_case(name)
            && bytes
                .get(name_end)
                .is_none_or(|b| b.is_ascii_whitespace() || matches!(b, b'>' | b'/'))
        {
            return Some(at);
        }
        from = at + 2;
    }
    None
}

/// Retrieves the text slice for a token.
#[inline]
pub fn token_text<'s>(source: &'s str, token: &Token) -> &'s str {
    &source[token.span.range()]
}

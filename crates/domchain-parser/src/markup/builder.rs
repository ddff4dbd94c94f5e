//! Tree builder: markup tokens to live nodes.
//!
//! Nodes are created in the target document but stay detached; the caller
//! decides where the returned top-level nodes go. Elements left open at the
//! end of input are closed implicitly. The first error aborts the build.

use std::iter::Peekable;
use std::vec::IntoIter;

use domchain_core::utils::is_void_element;
use domchain_core::{Document, DomError, Element, Node};

use super::ParseOptions;
use super::entities;
use super::lexer::{MarkupKind, Token, token_text};
use crate::Result;
use crate::error::{Span, SyntaxError};

type Tokens = Peekable<IntoIter<Token>>;

pub(super) struct TreeBuilder<'a> {
    source: &'a str,
    document: &'a Document,
    options: ParseOptions,
    roots: Vec<Node>,
    open: Vec<Element>,
}

impl<'a> TreeBuilder<'a> {
    pub fn new(source: &'a str, document: &'a Document, options: ParseOptions) -> Self {
        Self {
            source,
            document,
            options,
            roots: Vec::new(),
            open: Vec::new(),
        }
    }

    pub fn build(mut self, tokens: Vec<Token>) -> Result<Vec<Node>> {
        let mut tokens = tokens.into_iter().peekable();

        while let Some(token) = tokens.next() {
            match token.kind {
                MarkupKind::Text => {
                    let raw = self.text(&token);
                    if self.options.get_skip_blank_text() && raw.trim_ascii().is_empty() {
                        continue;
                    }
                    let text = entities::decode(raw);
                    let node = self.document.create_text(&text);
                    self.attach(node, token.span)?;
                }
                MarkupKind::RawText => {
                    let node = self.document.create_text(self.text(&token));
                    self.attach(node, token.span)?;
                }
                MarkupKind::EscapableRawText => {
                    let text = entities::decode(self.text(&token));
                    let node = self.document.create_text(&text);
                    self.attach(node, token.span)?;
                }
                MarkupKind::Comment | MarkupKind::Declaration => {}
                MarkupKind::StartTag => self.start_tag(token, &mut tokens)?,
                MarkupKind::EndTag => self.end_tag(token, &mut tokens)?,
                MarkupKind::UnterminatedComment => {
                    return Err(SyntaxError::new(
                        Span::new(token.span.start, token.span.start + 4),
                        "unterminated comment",
                    ));
                }
                _ => return Err(SyntaxError::new(token.span, "unexpected markup")),
            }
        }

        Ok(self.roots)
    }

    fn start_tag(&mut self, name_token: Token, tokens: &mut Tokens) -> Result<()> {
        let name = self.text(&name_token).to_ascii_lowercase();
        let element = self.document.create_element(&name);
        let mut self_closing = false;

        loop {
            let Some(token) = tokens.next() else {
                return Err(unclosed_tag(name_token.span));
            };
            match token.kind {
                MarkupKind::AttrName => {
                    let value = match tokens.next_if(|t| t.kind == MarkupKind::AttrValue) {
                        Some(value) => entities::decode(self.text(&value)),
                        None => "".into(),
                    };
                    let attr = self.text(&token);
                    // The first occurrence of a duplicated attribute wins.
                    if !element.has_attribute(attr) {
                        element
                            .set_attribute(attr, &value)
                            .map_err(|e| dom_error(token.span, e))?;
                    }
                }
                MarkupKind::AttrValue => {
                    return Err(SyntaxError::new(token.span, "attribute value without a name"));
                }
                MarkupKind::TagClose => break,
                MarkupKind::SelfClosingTagClose => {
                    self_closing = true;
                    break;
                }
                MarkupKind::UnterminatedTag => return Err(unclosed_tag(name_token.span)),
                _ => {
                    return Err(SyntaxError::new(
                        token.span,
                        "unexpected characters in tag",
                    ));
                }
            }
        }

        self.attach(element.clone().into(), name_token.span)?;
        if self_closing || is_void_element(&name) {
            return Ok(());
        }

        let max_depth = self.options.get_max_depth();
        if self.open.len() >= max_depth as usize {
            return Err(SyntaxError::new(
                name_token.span,
                format!("nesting exceeds the depth limit of {max_depth}"),
            ));
        }
        self.open.push(element);
        Ok(())
    }

    fn end_tag(&mut self, name_token: Token, tokens: &mut Tokens) -> Result<()> {
        let name = self.text(&name_token).to_ascii_lowercase();

        match tokens.next().map(|t| t.kind) {
            Some(MarkupKind::TagClose) => {}
            None | Some(MarkupKind::UnterminatedTag) => {
                return Err(unclosed_tag(name_token.span));
            }
            Some(_) => {
                return Err(SyntaxError::new(
                    name_token.span,
                    format!("closing tag `</{name}>` cannot carry attributes"),
                ));
            }
        }

        let matching = self
            .open
            .iter()
            .rposition(|element| element.tag_name() == name);
        match matching {
            Some(index) => self.open.truncate(index),
            None if is_void_element(&name) => {}
            None => {
                return Err(SyntaxError::new(
                    name_token.span,
                    format!("unexpected closing tag `</{name}>`"),
                ));
            }
        }
        Ok(())
    }

    fn attach(&mut self, node: Node, span: Span) -> Result<()> {
        match self.open.last() {
            Some(parent) => parent.append(&node).map_err(|e| dom_error(span, e)),
            None => {
                self.roots.push(node);
                Ok(())
            }
        }
    }

    fn text(&self, token: &Token) -> &'a str {
        token_text(self.source, token)
    }
}

fn unclosed_tag(span: Span) -> SyntaxError {
    SyntaxError::new(span, "tag is missing its closing `>`")
}

fn dom_error(span: Span, error: DomError) -> SyntaxError {
    SyntaxError::new(span, error.to_string())
}

//! Markup parsing: whole documents and detached fragments.
//!
//! The dialect is the practical subset of HTML that templates use: elements,
//! attributes (quoted, unquoted or bare), text, comments (dropped),
//! declarations (dropped), void elements, self-closing syntax, raw text
//! elements and character references.

mod builder;
mod entities;
pub mod lexer;

#[cfg(test)]
mod entities_tests;
#[cfg(test)]
mod lexer_tests;

use domchain_core::{Document, Node};

pub use entities::decode as decode_entities;

use crate::Result;
use crate::error::SyntaxError;

/// Markup parser configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Maximum element nesting depth (default: 512).
    pub(crate) max_depth: u32,
    /// Drop text nodes that contain only ASCII whitespace (default: false).
    pub(crate) skip_blank_text: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            max_depth: 512,
            skip_blank_text: false,
        }
    }
}

impl ParseOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum element nesting depth.
    pub fn max_depth(mut self, depth: u32) -> Self {
        self.max_depth = depth;
        self
    }

    /// Drop whitespace-only text between tags.
    pub fn skip_blank_text(mut self, skip: bool) -> Self {
        self.skip_blank_text = skip;
        self
    }

    pub fn get_max_depth(&self) -> u32 {
        self.max_depth
    }

    pub fn get_skip_blank_text(&self) -> bool {
        self.skip_blank_text
    }
}

/// Parse `source` into detached top-level nodes owned by `document`.
pub fn parse_fragment(document: &Document, source: &str) -> Result<Vec<Node>> {
    parse_fragment_with(document, source, ParseOptions::default())
}

pub fn parse_fragment_with(
    document: &Document,
    source: &str,
    options: ParseOptions,
) -> Result<Vec<Node>> {
    let tokens = lexer::lex(source);
    builder::TreeBuilder::new(source, document, options).build(tokens)
}

/// Parse `source` into a fresh document.
pub fn parse_document(source: &str) -> Result<Document> {
    parse_document_with(source, ParseOptions::default())
}

pub fn parse_document_with(source: &str, options: ParseOptions) -> Result<Document> {
    let document = Document::new();
    let root = document.root();
    for node in parse_fragment_with(&document, source, options)? {
        root.append(&node)
            .map_err(|e| SyntaxError::at_offset(0, e.to_string()))?;
    }
    Ok(document)
}

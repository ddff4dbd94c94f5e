#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Parsers for domchain.
//!
//! This crate turns text into things the live tree understands:
//! - `selector` - selector lexer, parser and matcher (the tree query primitive)
//! - `markup` - markup lexer and tree builder (documents and fragments)
//! - `error` - span-carrying syntax errors rendered with annotate-snippets

pub mod error;
pub mod markup;
pub mod selector;


pub use error::{Span, SyntaxError};
pub use markup::{
    ParseOptions, parse_document, parse_document_with, parse_fragment, parse_fragment_with,
};
pub use selector::{Selector, query_all};

/// Result type for parsing.
pub type Result<T> = std::result::Result<T, SyntaxError>;

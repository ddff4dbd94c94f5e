//! domchain: a deferred fluent query builder over a live document tree.
//!
//! A [`Query`] is a selector plus an ordered list of recorded mutations.
//! Chaining only records; the tree is touched when the query is consumed:
//! incrementally ([`Query::iter`]), eagerly ([`Query::materialize`]) or by
//! awaiting [`Query::to_future`]. Every consumption re-resolves the selector
//! against the tree as it is at that moment.
//!
//! # Example
//!
//! ```
//! use domchain_lib::{Query, html, parse_document};
//!
//! let doc = parse_document("<ul><li>a</li><li>b</li></ul>")?;
//! let items = Query::new(&doc, "li")
//!     .add_class("item")
//!     .set_attribute("role", "option");
//! assert!(!doc.to_html().contains("item"));
//!
//! items.materialize()?;
//! assert_eq!(
//!     doc.to_html(),
//!     r#"<ul><li class="item" role="option">a</li><li class="item" role="option">b</li></ul>"#,
//! );
//!
//! let extra = html!(&doc, "<li>{}</li>", "<c>")?;
//! Query::new(&doc, "ul").append(extra).materialize()?;
//! assert!(doc.to_html().ends_with("<li>&lt;c&gt;</li></ul>"));
//! # Ok::<(), domchain_lib::Error>(())
//! ```

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod query;
pub mod template;

#[cfg(test)]
mod query_tests;
#[cfg(test)]
mod template_tests;

pub use domchain_core::{Colors, Document, DomError, Element, Event, Handler, ListenerId, Node};
pub use domchain_parser::{ParseOptions, Selector, SyntaxError};
pub use domchain_vm::{MutationOp, NoopTracer, PrintTracer, Tracer, Verbosity};
pub use query::{Iter, Query, QueryFuture};

use domchain_vm::RuntimeError;

/// Errors surfaced by consuming a query or building a template.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A native primitive rejected an operation.
    #[error(transparent)]
    Dom(#[from] DomError),

    /// The selector failed to parse when the query was consumed.
    #[error("invalid selector: {0}")]
    Selector(#[source] SyntaxError),

    /// Markup failed to parse.
    #[error("invalid markup: {0}")]
    Markup(#[source] SyntaxError),

    /// A template did not produce exactly one root element.
    #[error("invalid template: {0}")]
    Template(String),
}

impl From<RuntimeError> for Error {
    fn from(error: RuntimeError) -> Self {
        match error {
            RuntimeError::Selector(e) => Error::Selector(e),
            RuntimeError::Dom(e) => Error::Dom(e),
        }
    }
}

/// Result type for query operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Parse a whole document.
pub fn parse_document(source: &str) -> Result<Document> {
    domchain_parser::parse_document(source).map_err(Error::Markup)
}

//! Selector engine: the tree query primitive.
//!
//! Supports type, universal, `#id`, `.class` and attribute selectors
//! (`[a]`, `=`, `~=`, `|=`, `^=`, `$=`, `*=`, optional `i` flag), the
//! descendant, `>`, `+` and `~` combinators, and `,` groups. Pseudo-classes
//! are rejected with a syntax error.

mod ast;
pub mod lexer;
mod matcher;
mod parser;

#[cfg(test)]
mod lexer_tests;
#[cfg(test)]
mod parser_tests;

use std::fmt;
use std::str::FromStr;

use domchain_core::{Document, Element, Node};

pub use ast::{AttrCondition, AttrMatcher, AttrOp, Combinator, Complex, Compound, Part};

use crate::Result;
use crate::error::SyntaxError;

/// A parsed selector list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    groups: Vec<Complex>,
}

impl Selector {
    pub fn parse(source: &str) -> Result<Self> {
        let groups = parser::Parser::new(source).parse()?;
        Ok(Self { groups })
    }

    pub fn groups(&self) -> &[Complex] {
        &self.groups
    }

    /// Does `element` match any group?
    pub fn matches(&self, element: &Element) -> bool {
        self.groups
            .iter()
            .any(|complex| matcher::matches_complex(complex, element))
    }

    /// Every attached element of `document` that matches, in document order.
    pub fn query_all(&self, document: &Document) -> Vec<Element> {
        self.query_within(&document.root())
    }

    /// Matching descendants of `root` (exclusive), in document order.
    ///
    /// Combinators may still look past `root` towards the document.
    pub fn query_within(&self, root: &Node) -> Vec<Element> {
        root.descendant_elements()
            .into_iter()
            .filter(|element| self.matches(element))
            .collect()
    }
}

impl FromStr for Selector {
    type Err = SyntaxError;

    fn from_str(source: &str) -> Result<Self> {
        Self::parse(source)
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, complex) in self.groups.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{complex}")?;
        }
        Ok(())
    }
}

/// Parse `selector` and return every matching element of `document`.
///
/// Each call parses and walks the tree afresh, so the result reflects the
/// tree at the moment of the call.
pub fn query_all(document: &Document, selector: &str) -> Result<Vec<Element>> {
    Ok(Selector::parse(selector)?.query_all(document))
}

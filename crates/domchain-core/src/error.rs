//! Errors raised by native tree primitives.

/// Failure of a single native primitive.
///
/// These are the only failures a mutation can raise. Callers above the tree
/// propagate them unchanged.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
    /// The insertion would produce an invalid tree (cycle, text parent, document child).
    #[error("hierarchy request error: {0}")]
    HierarchyRequest(&'static str),

    /// Class tokens must be non-empty and contain no whitespace.
    #[error("invalid class token {0:?}")]
    InvalidToken(String),

    /// Attribute or data key is not a valid name.
    #[error("invalid name {0:?}")]
    InvalidName(String),

    /// Nodes cannot move between documents.
    #[error("node belongs to a different document")]
    WrongDocument,
}

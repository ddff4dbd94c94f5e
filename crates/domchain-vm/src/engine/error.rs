//! Errors that can occur while consuming a program.

use domchain_core::DomError;
use domchain_parser::SyntaxError;

/// The first failure of a consumption pass, propagated unchanged.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RuntimeError {
    /// The selector failed to parse at resolution time.
    #[error("invalid selector: {0}")]
    Selector(#[from] SyntaxError),

    /// A native primitive rejected an op.
    #[error(transparent)]
    Dom(#[from] DomError),
}

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Live document tree for domchain.
//!
//! Two layers:
//! - **Arena layer** (`Dom`): nodes addressed by `NodeId`, one primitive per
//!   native mutation (class list, attributes, data, tree insertion, events)
//! - **Handle layer** (`Document`, `Node`, `Element`): cheap clonable handles
//!   that borrow the arena only for the duration of a single primitive
//!
//! The tree is single-threaded. A `Document` is a shared `Rc` handle, so every
//! clone observes and mutates the same live tree.

mod colors;
mod dom;
mod error;
mod event;
mod invariants;
mod node;
mod serialize;
pub mod utils;

#[cfg(test)]
mod event_tests;

pub use colors::{Colors, Painted, Role};
pub use dom::NodeId;
pub use error::DomError;
pub use event::{Event, Handler, ListenerId};
pub use node::{Document, Element, Node};
pub use serialize::escape_markup;

/// Result type for native tree primitives.
pub type Result<T> = std::result::Result<T, DomError>;

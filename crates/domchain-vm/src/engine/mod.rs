//! Runtime engine for applying recorded mutations to a live tree.
//!
//! Each consumption re-resolves the selector against the current tree, then
//! for every match (document order) replays every op (recording order)
//! before handing the element out.

mod error;
mod invariants;
mod materialize;
mod op;
mod program;
mod settle;
mod trace;

#[cfg(test)]
mod program_tests;

pub use error::RuntimeError;
pub use materialize::Materialize;
pub use op::MutationOp;
pub use program::{OpList, Program};
pub use settle::Settle;
pub use trace::{NoopTracer, PrintTracer, Tracer, Verbosity};

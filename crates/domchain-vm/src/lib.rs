#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Deferred mutation engine for domchain.
//!
//! A `Program` is a selector plus an ordered list of recorded `MutationOp`s.
//! Nothing touches the tree until the program is consumed, either lazily
//! (`Materialize`), eagerly (`Program::run`) or by awaiting a `Settle`.

pub mod engine;

pub use engine::{
    Materialize, MutationOp, NoopTracer, OpList, PrintTracer, Program, RuntimeError, Settle,
    Tracer, Verbosity,
};

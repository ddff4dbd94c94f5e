//! Awaitable consumption.
//!
//! `Settle` runs its program to exhaustion on the first poll and resolves to
//! the materialized elements. It never returns `Pending`: the live tree is
//! synchronous, so awaiting only defers the start of the pass to the first
//! poll. A `Settle` that is dropped unpolled has no effect.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use domchain_core::Element;

use super::error::RuntimeError;
use super::invariants::settle_polled_after_completion;
use super::program::Program;

#[must_use = "a Settle does nothing unless awaited or polled"]
pub struct Settle {
    program: Option<Program>,
}

impl Settle {
    pub(super) fn new(program: Program) -> Self {
        Self {
            program: Some(program),
        }
    }

    /// Has the pass already run?
    pub fn is_terminated(&self) -> bool {
        self.program.is_none()
    }
}

impl Future for Settle {
    type Output = Result<Vec<Element>, RuntimeError>;

    fn poll(mut self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Self::Output> {
        match self.program.take() {
            Some(program) => Poll::Ready(program.run()),
            None => settle_polled_after_completion(),
        }
    }
}

impl std::fmt::Debug for Settle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settle")
            .field("program", &self.program)
            .finish()
    }
}

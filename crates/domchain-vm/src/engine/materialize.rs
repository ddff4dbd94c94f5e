//! Incremental consumption.
//!
//! The selector is resolved on the first pull, not at construction. Element
//! `i` receives every op at the moment it is pulled, so a caller who stops
//! early leaves later matches untouched. After a failure the iterator is
//! fused: the remaining matches are never visited.

use std::iter::FusedIterator;
use std::vec;

use domchain_core::Element;
use domchain_parser::query_all;

use super::error::RuntimeError;
use super::op::MutationOp;
use super::program::Program;
use super::trace::{NoopTracer, Tracer};

enum State<'p> {
    Pending,
    Running {
        matches: vec::IntoIter<Element>,
        ops: Vec<&'p MutationOp>,
        yielded: usize,
    },
    Done,
}

/// Lazy producer of materialized elements for one consumption pass.
pub struct Materialize<'p, T: Tracer = NoopTracer> {
    program: &'p Program,
    tracer: T,
    state: State<'p>,
}

impl<'p, T: Tracer> Materialize<'p, T> {
    pub(super) fn new(program: &'p Program, tracer: T) -> Self {
        Self {
            program,
            tracer,
            state: State::Pending,
        }
    }

    pub fn program(&self) -> &'p Program {
        self.program
    }

    /// Has the selector been resolved yet?
    pub fn is_started(&self) -> bool {
        !matches!(self.state, State::Pending)
    }

    /// Matches resolved but not yet pulled.
    pub fn remaining(&self) -> usize {
        match &self.state {
            State::Running { matches, .. } => matches.len(),
            _ => 0,
        }
    }

    pub fn into_tracer(self) -> T {
        self.tracer
    }

    fn resolve(&mut self) -> Result<State<'p>, RuntimeError> {
        let program = self.program;
        let selector = program.selector();
        let matches = match query_all(program.document(), selector) {
            Ok(matches) => matches,
            Err(error) => {
                self.tracer.trace_selector_error(selector, &error);
                return Err(error.into());
            }
        };
        self.tracer.trace_resolve(selector, matches.len());

        Ok(State::Running {
            matches: matches.into_iter(),
            ops: program.ops().to_vec(),
            yielded: 0,
        })
    }
}

impl<T: Tracer> Iterator for Materialize<'_, T> {
    type Item = Result<Element, RuntimeError>;

    fn next(&mut self) -> Option<Self::Item> {
        if let State::Pending = self.state {
            match self.resolve() {
                Ok(running) => self.state = running,
                Err(error) => {
                    self.state = State::Done;
                    return Some(Err(error));
                }
            }
        }

        let State::Running {
            matches,
            ops,
            yielded,
        } = &mut self.state
        else {
            return None;
        };

        let Some(element) = matches.next() else {
            self.tracer.trace_done(*yielded);
            self.state = State::Done;
            return None;
        };

        self.tracer.trace_element(*yielded, &element);
        let mut failure = None;
        for op in ops.iter() {
            self.tracer.trace_op(op, &element);
            if let Err(error) = op.apply(&element) {
                self.tracer.trace_failure(op, &element, &error);
                failure = Some(error);
                break;
            }
        }

        if let Some(error) = failure {
            self.state = State::Done;
            return Some(Err(error.into()));
        }
        *yielded += 1;
        Some(Ok(element))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match &self.state {
            State::Pending => (0, None),
            State::Running { matches, .. } => (0, Some(matches.len())),
            State::Done => (0, Some(0)),
        }
    }
}

impl<T: Tracer> FusedIterator for Materialize<'_, T> {}

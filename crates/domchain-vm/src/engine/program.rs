//! Programs: a selector and a persistent op list.
//!
//! `OpList` is a singly-linked list of `Rc` cells pointing from the newest op
//! back to the first. Pushing allocates one cell and leaves every list that
//! shares the prefix untouched, so recording never aliases another chain.

use std::rc::Rc;

use domchain_core::{Document, Element};

use super::error::RuntimeError;
use super::materialize::Materialize;
use super::op::MutationOp;
use super::settle::Settle;
use super::trace::{NoopTracer, Tracer};

struct Cell {
    op: MutationOp,
    prev: Option<Rc<Cell>>,
}

#[derive(Clone, Default)]
pub struct OpList {
    head: Option<Rc<Cell>>,
    len: usize,
}

impl OpList {
    pub fn new() -> Self {
        Self::default()
    }

    /// A new list with `op` appended; `self` is unchanged.
    pub fn push(&self, op: MutationOp) -> Self {
        Self {
            head: Some(Rc::new(Cell {
                op,
                prev: self.head.clone(),
            })),
            len: self.len + 1,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Ops in recording order.
    pub fn to_vec(&self) -> Vec<&MutationOp> {
        let mut ops = Vec::with_capacity(self.len);
        let mut cursor = self.head.as_deref();
        while let Some(cell) = cursor {
            ops.push(&cell.op);
            cursor = cell.prev.as_deref();
        }
        ops.reverse();
        ops
    }

    pub fn iter(&self) -> impl Iterator<Item = &MutationOp> {
        self.to_vec().into_iter()
    }

    /// Do both lists share the same newest cell?
    pub fn ptr_eq(&self, other: &OpList) -> bool {
        match (&self.head, &other.head) {
            (Some(a), Some(b)) => Rc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        }
    }
}

// Unlink iteratively so dropping a long chain cannot overflow the stack.
impl Drop for OpList {
    fn drop(&mut self) {
        let mut cursor = self.head.take();
        while let Some(cell) = cursor {
            cursor = match Rc::try_unwrap(cell) {
                Ok(mut owned) => owned.prev.take(),
                Err(_) => break,
            };
        }
    }
}

impl std::fmt::Debug for OpList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// What to select and what to do with each match.
#[derive(Clone)]
pub struct Program {
    document: Document,
    selector: Rc<str>,
    ops: OpList,
}

impl Program {
    pub fn new(document: &Document, selector: &str) -> Self {
        Self {
            document: document.clone(),
            selector: selector.into(),
            ops: OpList::new(),
        }
    }

    /// Same selector and document, one more op.
    pub fn push(&self, op: MutationOp) -> Self {
        Self {
            document: self.document.clone(),
            selector: self.selector.clone(),
            ops: self.ops.push(op),
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn selector(&self) -> &str {
        &self.selector
    }

    pub fn ops(&self) -> &OpList {
        &self.ops
    }

    /// Start an incremental consumption. Nothing happens until the first pull.
    pub fn materialize(&self) -> Materialize<'_, NoopTracer> {
        Materialize::new(self, NoopTracer)
    }

    pub fn materialize_traced<T: Tracer>(&self, tracer: T) -> Materialize<'_, T> {
        Materialize::new(self, tracer)
    }

    /// Consume to exhaustion, stopping at the first failure.
    pub fn run(&self) -> Result<Vec<Element>, RuntimeError> {
        self.materialize().collect()
    }

    pub fn run_traced<T: Tracer>(&self, tracer: T) -> Result<Vec<Element>, RuntimeError> {
        self.materialize_traced(tracer).collect()
    }

    /// A future that runs the program when first polled.
    pub fn settle(&self) -> Settle {
        Settle::new(self.clone())
    }
}

impl std::fmt::Debug for Program {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Program")
            .field("selector", &self.selector)
            .field("ops", &self.ops)
            .finish()
    }
}

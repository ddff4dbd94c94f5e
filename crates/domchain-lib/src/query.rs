//! The query builder.
//!
//! `Query` is persistent: every chaining call returns a new query that shares
//! the recorded prefix with its parent, and the parent is never affected.
//! Chaining never touches the tree and performs no validation; bad selectors
//! and arguments surface when the query is consumed.

use std::future::Future;
use std::iter::FusedIterator;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll};

use domchain_core::{Document, Element, Event, Node};
use domchain_vm::{Materialize, MutationOp, NoopTracer, Program, Settle, Tracer};

use crate::{Error, Result};

#[derive(Clone, Debug)]
pub struct Query {
    program: Program,
}

impl Query {
    /// A query over `document` with no recorded operations.
    pub fn new(document: &Document, selector: &str) -> Self {
        Self {
            program: Program::new(document, selector),
        }
    }

    fn record(&self, op: MutationOp) -> Self {
        Self {
            program: self.program.push(op),
        }
    }

    // ------------------------------------------------------------------
    // Classes
    // ------------------------------------------------------------------

    pub fn add_class(&self, name: &str) -> Self {
        self.record(MutationOp::AddClass(name.to_owned()))
    }

    pub fn remove_class(&self, name: &str) -> Self {
        self.record(MutationOp::RemoveClass(name.to_owned()))
    }

    pub fn toggle_class(&self, name: &str) -> Self {
        self.record(MutationOp::ToggleClass(name.to_owned()))
    }

    /// Swap `old` for `new` in place. Elements without `old` are left as is.
    pub fn replace_class(&self, old: &str, new: &str) -> Self {
        self.record(MutationOp::ReplaceClass {
            old: old.to_owned(),
            new: new.to_owned(),
        })
    }

    // ------------------------------------------------------------------
    // Attributes and data
    // ------------------------------------------------------------------

    pub fn set_attribute(&self, name: &str, value: &str) -> Self {
        self.record(MutationOp::SetAttribute {
            name: name.to_owned(),
            value: value.to_owned(),
        })
    }

    pub fn remove_attribute(&self, name: &str) -> Self {
        self.record(MutationOp::RemoveAttribute(name.to_owned()))
    }

    pub fn toggle_attribute(&self, name: &str) -> Self {
        self.record(MutationOp::ToggleAttribute(name.to_owned()))
    }

    /// Set every `(key, value)` entry as custom data, in iteration order.
    ///
    /// Keys are camelCase and land on `data-*` attributes.
    pub fn set_data<K, V>(&self, entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let entries = entries
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        self.record(MutationOp::SetData(entries))
    }

    pub fn remove_data(&self, key: &str) -> Self {
        self.record(MutationOp::RemoveData(key.to_owned()))
    }

    // ------------------------------------------------------------------
    // Tree
    // ------------------------------------------------------------------

    /// Insert `node` as the last child of every match.
    ///
    /// With several matches the same node moves from one to the next and ends
    /// up under the last one.
    pub fn append(&self, node: impl Into<Node>) -> Self {
        self.record(MutationOp::Append(node.into()))
    }

    pub fn prepend(&self, node: impl Into<Node>) -> Self {
        self.record(MutationOp::Prepend(node.into()))
    }

    pub fn remove(&self) -> Self {
        self.record(MutationOp::Remove)
    }

    pub fn before(&self, node: impl Into<Node>) -> Self {
        self.record(MutationOp::Before(node.into()))
    }

    pub fn after(&self, node: impl Into<Node>) -> Self {
        self.record(MutationOp::After(node.into()))
    }

    // ------------------------------------------------------------------
    // Events
    // ------------------------------------------------------------------

    /// Run `handler` on every future `event` on each match.
    pub fn on(&self, event: &str, handler: impl Fn(&Event) + 'static) -> Self {
        self.record(MutationOp::On {
            event: event.to_owned(),
            handler: Rc::new(handler),
        })
    }

    /// Run `handler` on the first future `event` on each match only.
    pub fn once(&self, event: &str, handler: impl Fn(&Event) + 'static) -> Self {
        self.record(MutationOp::Once {
            event: event.to_owned(),
            handler: Rc::new(handler),
        })
    }

    // ------------------------------------------------------------------
    // Consumption
    // ------------------------------------------------------------------

    /// Incremental consumption: each element is mutated when pulled.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            inner: self.program.materialize(),
        }
    }

    pub fn iter_traced<T: Tracer>(&self, tracer: T) -> Iter<'_, T> {
        Iter {
            inner: self.program.materialize_traced(tracer),
        }
    }

    /// Eager consumption: mutate every match, stopping at the first failure.
    pub fn materialize(&self) -> Result<Vec<Element>> {
        self.iter().collect()
    }

    pub fn materialize_traced<T: Tracer>(&self, tracer: T) -> Result<Vec<Element>> {
        self.iter_traced(tracer).collect()
    }

    /// Awaitable consumption: eager materialization once first polled.
    pub fn to_future(&self) -> QueryFuture {
        QueryFuture {
            inner: self.program.settle(),
        }
    }

    // ------------------------------------------------------------------
    // Introspection
    // ------------------------------------------------------------------

    pub fn selector(&self) -> &str {
        self.program.selector()
    }

    pub fn document(&self) -> &Document {
        self.program.document()
    }

    /// Recorded operations in recording order.
    pub fn operations(&self) -> Vec<&MutationOp> {
        self.program.ops().to_vec()
    }

    /// Number of recorded operations.
    pub fn len(&self) -> usize {
        self.program.ops().len()
    }

    pub fn is_empty(&self) -> bool {
        self.program.ops().is_empty()
    }

    pub fn program(&self) -> &Program {
        &self.program
    }
}

impl<'q> IntoIterator for &'q Query {
    type Item = Result<Element>;
    type IntoIter = Iter<'q>;

    fn into_iter(self) -> Iter<'q> {
        self.iter()
    }
}

/// Incremental consumption pass over a [`Query`].
pub struct Iter<'q, T: Tracer = NoopTracer> {
    inner: Materialize<'q, T>,
}

impl<'q, T: Tracer> Iter<'q, T> {
    pub fn into_tracer(self) -> T {
        self.inner.into_tracer()
    }
}

impl<T: Tracer> Iterator for Iter<'_, T> {
    type Item = Result<Element>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|item| item.map_err(Error::from))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T: Tracer> FusedIterator for Iter<'_, T> {}

/// Future returned by [`Query::to_future`].
#[must_use = "a QueryFuture does nothing unless awaited or polled"]
#[derive(Debug)]
pub struct QueryFuture {
    inner: Settle,
}

impl Future for QueryFuture {
    type Output = Result<Vec<Element>>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.inner)
            .poll(cx)
            .map(|result| result.map_err(Error::from))
    }
}

//! Tracing infrastructure for consumption passes.
//!
//! The tracer is a zero-cost abstraction: `NoopTracer` methods are
//! `#[inline(always)]` empty functions, so an untraced pass carries no
//! tracing state or calls. `PrintTracer` formats one line per event to any
//! `io::Write`.

use std::io;

use domchain_core::{Colors, DomError, Element, Role};
use domchain_parser::SyntaxError;

use super::op::MutationOp;

/// Verbosity level for trace output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Verbosity {
    /// Resolution, failures and completion.
    #[default]
    Default,
    /// Also every element pulled.
    Verbose,
    /// Also every op applied.
    VeryVerbose,
}

/// Instrumentation hooks for a consumption pass.
///
/// - `trace_resolve` - after the selector matched
/// - `trace_selector_error` - when the selector failed to parse
/// - `trace_element` - when an element is pulled, before its ops run
/// - `trace_op` - before an op is applied
/// - `trace_failure` - after an op failed (the pass ends)
/// - `trace_done` - when the matches are exhausted
pub trait Tracer {
    fn trace_resolve(&mut self, selector: &str, matched: usize);

    fn trace_selector_error(&mut self, selector: &str, error: &SyntaxError);

    fn trace_element(&mut self, index: usize, element: &Element);

    fn trace_op(&mut self, op: &MutationOp, element: &Element);

    fn trace_failure(&mut self, op: &MutationOp, element: &Element, error: &DomError);

    fn trace_done(&mut self, yielded: usize);
}

impl<T: Tracer + ?Sized> Tracer for &mut T {
    #[inline(always)]
    fn trace_resolve(&mut self, selector: &str, matched: usize) {
        (**self).trace_resolve(selector, matched);
    }

    #[inline(always)]
    fn trace_selector_error(&mut self, selector: &str, error: &SyntaxError) {
        (**self).trace_selector_error(selector, error);
    }

    #[inline(always)]
    fn trace_element(&mut self, index: usize, element: &Element) {
        (**self).trace_element(index, element);
    }

    #[inline(always)]
    fn trace_op(&mut self, op: &MutationOp, element: &Element) {
        (**self).trace_op(op, element);
    }

    #[inline(always)]
    fn trace_failure(&mut self, op: &MutationOp, element: &Element, error: &DomError) {
        (**self).trace_failure(op, element, error);
    }

    #[inline(always)]
    fn trace_done(&mut self, yielded: usize) {
        (**self).trace_done(yielded);
    }
}

/// No-op tracer that gets optimized away completely.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopTracer;

impl Tracer for NoopTracer {
    #[inline(always)]
    fn trace_resolve(&mut self, _selector: &str, _matched: usize) {}

    #[inline(always)]
    fn trace_selector_error(&mut self, _selector: &str, _error: &SyntaxError) {}

    #[inline(always)]
    fn trace_element(&mut self, _index: usize, _element: &Element) {}

    #[inline(always)]
    fn trace_op(&mut self, _op: &MutationOp, _element: &Element) {}

    #[inline(always)]
    fn trace_failure(&mut self, _op: &MutationOp, _element: &Element, _error: &DomError) {}

    #[inline(always)]
    fn trace_done(&mut self, _yielded: usize) {}
}

/// Tracer that writes one formatted line per event.
///
/// Write errors are ignored: tracing never changes the outcome of a pass.
pub struct PrintTracer<W: io::Write> {
    out: W,
    verbosity: Verbosity,
    colors: Colors,
}

impl<W: io::Write> PrintTracer<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            verbosity: Verbosity::default(),
            colors: Colors::OFF,
        }
    }

    pub fn verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = verbosity;
        self
    }

    pub fn colors(mut self, colors: Colors) -> Self {
        self.colors = colors;
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, line: std::fmt::Arguments<'_>) {
        let _ = writeln!(self.out, "{line}");
    }
}

impl PrintTracer<io::Stderr> {
    pub fn stderr() -> Self {
        Self::new(io::stderr())
    }
}

impl<W: io::Write> Tracer for PrintTracer<W> {
    fn trace_resolve(&mut self, selector: &str, matched: usize) {
        let selector = self.colors.paint(Role::Selector, selector);
        self.line(format_args!("resolve {selector} ({matched} matched)"));
    }

    fn trace_selector_error(&mut self, selector: &str, error: &SyntaxError) {
        let c = self.colors;
        self.line(format_args!(
            "{} {}: {}",
            c.paint(Role::Failure, "error"),
            c.paint(Role::Selector, selector),
            error.message
        ));
    }

    fn trace_element(&mut self, index: usize, element: &Element) {
        if self.verbosity == Verbosity::Default {
            return;
        }
        self.line(format_args!("  pull {index} {element:?}"));
    }

    fn trace_op(&mut self, op: &MutationOp, _element: &Element) {
        if self.verbosity != Verbosity::VeryVerbose {
            return;
        }
        let op = self.colors.paint(Role::Detail, op);
        self.line(format_args!("    {op}"));
    }

    fn trace_failure(&mut self, op: &MutationOp, element: &Element, error: &DomError) {
        let fail = self.colors.paint(Role::Failure, "fail");
        self.line(format_args!("  {fail} {op} on {element:?}: {error}"));
    }

    fn trace_done(&mut self, yielded: usize) {
        let done = self.colors.paint(Role::Success, "done");
        self.line(format_args!("{done} ({yielded} yielded)"));
    }
}

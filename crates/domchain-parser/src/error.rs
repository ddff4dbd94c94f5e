//! Syntax error types and rendering utilities.

use std::ops::Range;

use annotate_snippets::{AnnotationKind, Level, Renderer, Snippet};

/// Byte range into the parsed source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Zero-width span at `offset`.
    pub fn empty(offset: usize) -> Self {
        Self::new(offset, offset)
    }

    pub fn range(self) -> Range<usize> {
        self.start..self.end
    }
}

impl From<Range<usize>> for Span {
    fn from(range: Range<usize>) -> Self {
        Self::new(range.start, range.end)
    }
}

/// A syntax error with location and message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("error at {}..{}: {message}", .span.start, .span.end)]
pub struct SyntaxError {
    pub span: Span,
    pub message: String,
}

impl SyntaxError {
    pub fn new(span: impl Into<Span>, message: impl Into<String>) -> Self {
        Self {
            span: span.into(),
            message: message.into(),
        }
    }

    pub fn at_offset(offset: usize, message: impl Into<String>) -> Self {
        Self::new(Span::empty(offset), message)
    }

    /// Render against `source` using annotate-snippets (plain text).
    pub fn render(&self, source: &str) -> String {
        self.render_with(source, None, false)
    }

    /// Render with an optional origin path and ANSI styling.
    pub fn render_with(&self, source: &str, path: Option<&str>, colored: bool) -> String {
        let renderer = if colored {
            Renderer::styled()
        } else {
            Renderer::plain()
        };

        let mut snippet = Snippet::source(source).line_start(1).annotation(
            AnnotationKind::Primary
                .span(adjust_range(self.span, source.len()))
                .label(&self.message),
        );
        if let Some(p) = path {
            snippet = snippet.path(p);
        }

        let report = vec![Level::ERROR.primary_title(&self.message).element(snippet)];
        renderer.render(&report).to_string()
    }
}

fn adjust_range(span: Span, limit: usize) -> Range<usize> {
    if span.start == span.end {
        let start = span.start.min(limit);
        return start..(start + 1).min(limit);
    }
    span.range()
}

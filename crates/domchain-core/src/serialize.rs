//! Markup serialization.
//!
//! Attributes print in insertion order. Void elements print without a
//! closing tag. Empty attribute values print as `name=""`. Text inside
//! `script` and `style` prints verbatim so it reads back unchanged.

use std::fmt::Write;

use crate::dom::{Dom, NodeId, NodeKind};
use crate::utils::{is_raw_text_element, is_void_element};

pub(crate) fn outer_html(dom: &Dom, id: NodeId) -> String {
    let mut out = String::new();
    write_node(dom, id, false, &mut out);
    out
}

pub(crate) fn inner_html(dom: &Dom, id: NodeId) -> String {
    let mut out = String::new();
    let raw = dom.element(id).is_some_and(|e| is_raw_text_element(&e.tag));
    for &child in dom.children(id) {
        write_node(dom, child, raw, &mut out);
    }
    out
}

/// `raw` is set for children of raw text elements.
fn write_node(dom: &Dom, id: NodeId, raw: bool, out: &mut String) {
    match &dom.node(id).kind {
        NodeKind::Document => {
            for &child in dom.children(id) {
                write_node(dom, child, false, out);
            }
        }
        NodeKind::Text(text) if raw => out.push_str(text),
        NodeKind::Text(text) => escape_into(text, false, out),
        NodeKind::Element(element) => {
            out.push('<');
            out.push_str(&element.tag);
            for (name, value) in &element.attrs {
                // Writing to a String never fails.
                let _ = write!(out, " {name}=\"");
                escape_into(value, true, out);
                out.push('"');
            }
            out.push('>');
            if is_void_element(&element.tag) {
                return;
            }
            let raw = is_raw_text_element(&element.tag);
            for &child in dom.children(id) {
                write_node(dom, child, raw, out);
            }
            out.push_str("</");
            out.push_str(&element.tag);
            out.push('>');
        }
    }
}

fn escape_into(text: &str, attribute: bool, out: &mut String) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' if !attribute => out.push_str("&lt;"),
            '>' if !attribute => out.push_str("&gt;"),
            '"' if attribute => out.push_str("&quot;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            c => out.push(c),
        }
    }
}

/// Escape `text` so it reads as literal data in any markup context.
///
/// Besides the markup delimiters this covers whitespace, `=` and backtick, so
/// the result stays one value even in an unquoted attribute position.
pub fn escape_markup(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '=' | '\'' | '`' => {
                let _ = write!(out, "&#{};", u32::from(c));
            }
            c if c.is_ascii_whitespace() => {
                let _ = write!(out, "&#{};", u32::from(c));
            }
            c => out.push(c),
        }
    }
    out
}

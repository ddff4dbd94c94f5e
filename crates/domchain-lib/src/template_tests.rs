use indoc::indoc;

use crate::template::{Escaped, materialize};
use crate::{Document, Error, html};

fn template_error(markup: &str) -> String {
    match materialize(&Document::new(), markup) {
        Err(Error::Template(message)) => message,
        other => panic!("expected a template error, got {other:?}"),
    }
}

#[test]
fn single_root() {
    let doc = Document::new();

    let li = materialize(&doc, r#"<li class="new">x</li>"#).unwrap();

    assert_eq!(li.tag_name(), "li");
    assert!(li.parent().is_none());
    assert!(li.document().ptr_eq(&doc));
    assert_eq!(doc.to_html(), "");
}

#[test]
fn surrounding_whitespace_is_ignored() {
    let doc = Document::new();

    let card = materialize(
        &doc,
        indoc! {r#"

            <section class="card">
              <h2>Title</h2>
            </section>
        "#},
    )
    .unwrap();

    insta::assert_snapshot!(card.outer_html(), @r#"<section class="card"><h2>Title</h2></section>"#);
}

#[test]
fn several_roots_are_rejected() {
    insta::assert_snapshot!(
        template_error("<li>a</li><li>b</li>"),
        @"expected one root element, found 2 top-level nodes"
    );
}

#[test]
fn text_root_is_rejected() {
    assert_eq!(template_error("hello"), "the root is text, not an element");
}

#[test]
fn empty_template_is_rejected() {
    assert_eq!(template_error(""), "no root element");
    assert_eq!(template_error("  \n "), "no root element");
}

#[test]
fn markup_errors_keep_their_span() {
    let Err(Error::Markup(err)) = materialize(&Document::new(), "<p></q>") else {
        panic!("expected a markup error");
    };

    assert_eq!(err.message, "unexpected closing tag `</q>`");
    assert_eq!(err.span.range(), 5..6);
}

#[test]
fn interpolated_values_are_escaped() {
    let doc = Document::new();
    let name = "<script>alert(1)</script>";

    let p = html!(&doc, r#"<p title="{}">{}</p>"#, "\"quoted\"", name).unwrap();

    assert_eq!(p.text_content(), name);
    assert_eq!(p.attribute("title").as_deref(), Some("\"quoted\""));
    assert!(p.element_children().is_empty());
}

#[test]
fn unquoted_attribute_values_cannot_add_attributes() {
    let doc = Document::new();

    let a = html!(&doc, "<a class={}>{}</a>", "a onclick=evil()", "x y").unwrap();

    assert_eq!(a.attributes(), [("class".to_owned(), "a onclick=evil()".to_owned())]);
    assert_eq!(a.text_content(), "x y");
    assert_eq!(a.outer_html(), r#"<a class="a onclick=evil()">x y</a>"#);
}

#[test]
fn interpolation_accepts_any_display() {
    let doc = Document::new();

    let td = html!(&doc, "<td data-n=\"{}\">{}</td>", 7, 42).unwrap();

    assert_eq!(td.data("n").as_deref(), Some("7"));
    assert_eq!(td.text_content(), "42");
}

#[test]
fn escaped_display() {
    assert_eq!(Escaped("a & b").to_string(), "a&#32;&amp;&#32;b");
    assert_eq!(Escaped(&3).to_string(), "3");
}

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use futures::executor::block_on;
use indoc::indoc;

use crate::{Document, DomError, Element, Error, PrintTracer, Query, Verbosity, html, parse_document};

fn two_divs() -> Document {
    parse_document("<div></div><div></div>").unwrap()
}

fn select(doc: &Document, selector: &str) -> Vec<Element> {
    Query::new(doc, selector).materialize().unwrap()
}

fn counter() -> (Rc<Cell<u32>>, impl Fn(&crate::Event) + 'static) {
    let hits = Rc::new(Cell::new(0));
    let seen = hits.clone();
    (hits, move |_: &crate::Event| seen.set(seen.get() + 1))
}

#[test]
fn chaining_does_not_touch_the_tree() {
    let doc = two_divs();

    let query = Query::new(&doc, "div")
        .add_class("x")
        .set_attribute("role", "note")
        .append(doc.create_element("span"))
        .remove();

    assert_eq!(query.len(), 4);
    assert_eq!(doc.to_html(), "<div></div><div></div>");
}

#[test]
fn chaining_is_persistent() {
    let doc = two_divs();
    let base = Query::new(&doc, "div").add_class("a");

    let left = base.add_class("b");
    let right = base.remove_class("a");

    assert_eq!(base.len(), 1);
    insta::assert_debug_snapshot!(left.operations(), @r#"
    [
        add_class("a"),
        add_class("b"),
    ]
    "#);
    insta::assert_debug_snapshot!(right.operations(), @r#"
    [
        add_class("a"),
        remove_class("a"),
    ]
    "#);
}

#[test]
fn fresh_query_starts_empty() {
    let doc = two_divs();
    let _ = Query::new(&doc, "div").add_class("a");

    let fresh = Query::new(&doc, "div");

    assert!(fresh.is_empty());
    assert_eq!(fresh.selector(), "div");
    assert!(fresh.document().ptr_eq(&doc));
}

#[test]
fn operations_apply_in_order() {
    let doc = two_divs();

    let elements = Query::new(&doc, "div")
        .add_class("a")
        .add_class("b")
        .materialize()
        .unwrap();

    for div in &elements {
        assert_eq!(div.classes(), vec!["a", "b"]);
    }
}

#[test]
fn replace_class_with_absent_old_is_a_noop() {
    let doc = parse_document(r#"<div class="c"></div>"#).unwrap();

    Query::new(&doc, "div").replace_class("a", "b").materialize().unwrap();

    assert_eq!(doc.to_html(), r#"<div class="c"></div>"#);
}

#[test]
fn taking_only_the_first_leaves_the_second_untouched() {
    let doc = two_divs();
    let query = Query::new(&doc, "div").add_class("foo");

    let Some(Ok(first)) = query.iter().next() else {
        panic!("expected a match");
    };

    assert!(first.has_class("foo"));
    assert_eq!(doc.to_html(), r#"<div class="foo"></div><div></div>"#);
}

#[test]
fn consuming_twice_reapplies() {
    let doc = two_divs();
    let query = Query::new(&doc, "div").toggle_class("on");

    let first = query.materialize().unwrap();
    assert_eq!(doc.to_html(), r#"<div class="on"></div><div class="on"></div>"#);

    let second = query.materialize().unwrap();
    assert_eq!(doc.to_html(), "<div></div><div></div>");
    assert_eq!(first, second);
}

#[test]
fn idempotent_ops_are_stable_across_consumptions() {
    let doc = two_divs();
    let query = Query::new(&doc, "div").add_class("foo");

    query.materialize().unwrap();
    let once = doc.to_html();
    query.materialize().unwrap();

    assert_eq!(doc.to_html(), once);
}

#[test]
fn for_loop_consumes_incrementally() {
    let doc = two_divs();
    let query = Query::new(&doc, "div").add_class("seen");
    let mut states = Vec::new();

    for div in &query {
        let div = div.unwrap();
        states.push(select(&doc, ".seen").len());
        assert!(div.has_class("seen"));
    }

    assert_eq!(states, [1, 2]);
}

#[test]
fn materialize_mutates_every_match() {
    let doc = two_divs();

    let _ = Query::new(&doc, "div").add_class("foo").materialize();

    assert_eq!(
        doc.to_html(),
        r#"<div class="foo"></div><div class="foo"></div>"#
    );
}

#[test]
fn awaiting_forces_completion() {
    let doc = two_divs();
    let pending = Query::new(&doc, "div").add_class("foo").to_future();

    assert!(select(&doc, ".foo").is_empty());

    let elements = block_on(pending).unwrap();

    assert_eq!(elements.len(), 2);
    assert_eq!(select(&doc, ".foo"), elements);
}

#[test]
fn async_callers_can_await_directly() {
    let doc = two_divs();

    block_on(async {
        Query::new(&doc, "div").set_data([("state", "ready")]).to_future().await
    })
    .unwrap();

    assert_eq!(
        doc.to_html(),
        r#"<div data-state="ready"></div><div data-state="ready"></div>"#
    );
}

#[test]
fn on_fires_every_time() {
    let doc = parse_document("<button>go</button>").unwrap();
    let (hits, handler) = counter();

    let [button] = Query::new(&doc, "button")
        .on("click", handler)
        .materialize()
        .unwrap()
        .try_into()
        .unwrap();
    for _ in 0..3 {
        button.dispatch("click");
    }

    assert_eq!(hits.get(), 3);
}

#[test]
fn once_fires_exactly_once() {
    let doc = parse_document("<button>go</button>").unwrap();
    let (hits, handler) = counter();

    let [button] = Query::new(&doc, "button")
        .once("click", handler)
        .materialize()
        .unwrap()
        .try_into()
        .unwrap();
    for _ in 0..3 {
        button.dispatch("click");
    }

    assert_eq!(hits.get(), 1);
}

#[test]
fn handlers_see_the_event_target() {
    let doc = parse_document(r#"<ul><li id="a">a</li><li id="b">b</li></ul>"#).unwrap();
    let log = Rc::new(RefCell::new(Vec::new()));

    let sink = log.clone();
    let items = Query::new(&doc, "li")
        .on("select", move |event| {
            let target = event.target().as_element().and_then(|e| e.attribute("id"));
            sink.borrow_mut().push(target.unwrap_or_default());
        })
        .materialize()
        .unwrap();
    items[1].dispatch("select");
    items[0].dispatch("select");

    assert_eq!(*log.borrow(), ["b", "a"]);
}

#[test]
fn before_and_after_insert_siblings() {
    let doc = parse_document(indoc! {r#"
        <ul><li class="first">1</li><li class="target">2</li><li class="last">3</li></ul>
    "#})
    .unwrap();

    let above = html!(&doc, "<li>{}</li>", "above").unwrap();
    let below = html!(&doc, "<li>{}</li>", "below").unwrap();
    Query::new(&doc, "ul > .target")
        .before(above)
        .after(below)
        .materialize()
        .unwrap();

    let [ul] = select(&doc, "ul").try_into().unwrap();
    insta::assert_snapshot!(
        ul.inner_html(),
        @r#"<li class="first">1</li><li>above</li><li class="target">2</li><li>below</li><li class="last">3</li>"#
    );
}

#[test]
fn append_and_prepend() {
    let doc = parse_document("<p>mid</p>").unwrap();

    Query::new(&doc, "p")
        .append(html!(&doc, "<b>{}</b>", "end").unwrap())
        .prepend(html!(&doc, "<i>{}</i>", "start").unwrap())
        .materialize()
        .unwrap();

    assert_eq!(doc.to_html(), "<p><i>start</i>mid<b>end</b></p>");
}

#[test]
fn appending_one_node_to_many_moves_it() {
    let doc = two_divs();
    let badge = doc.create_element("span");

    Query::new(&doc, "div").append(badge).materialize().unwrap();

    assert_eq!(doc.to_html(), "<div></div><div><span></span></div>");
}

#[test]
fn attributes_and_data() {
    let doc = parse_document(r#"<input name="q" disabled>"#).unwrap();

    Query::new(&doc, "input")
        .set_attribute("type", "search")
        .toggle_attribute("disabled")
        .toggle_attribute("required")
        .remove_attribute("name")
        .set_data([("userId", "7"), ("trackingCode", "abc")])
        .remove_data("trackingCode")
        .materialize()
        .unwrap();

    assert_eq!(
        doc.to_html(),
        r#"<input type="search" required="" data-user-id="7">"#
    );
}

#[test]
fn remove_detaches_matches() {
    let doc = parse_document("<ul><li>a</li><li class=keep>b</li></ul>").unwrap();

    Query::new(&doc, "li").remove_class("keep").remove().materialize().unwrap();
    assert_eq!(doc.to_html(), "<ul></ul>");
}

#[test]
fn failure_propagates_and_stops() {
    let doc = two_divs();
    let query = Query::new(&doc, "div").add_class("ok").add_class("not ok");

    let mut iter = query.iter();
    assert_eq!(
        iter.next(),
        Some(Err(Error::Dom(DomError::InvalidToken("not ok".into()))))
    );
    assert_eq!(iter.next(), None);
    assert_eq!(doc.to_html(), r#"<div class="ok"></div><div></div>"#);
}

#[test]
fn awaiting_propagates_failure() {
    let doc = two_divs();
    let query = Query::new(&doc, "div").set_data([("bad-key", "x")]);

    let result = block_on(query.to_future());

    assert_eq!(result, Err(Error::Dom(DomError::InvalidName("bad-key".into()))));
}

#[test]
fn invalid_selector_is_reported_at_consumption() {
    let doc = two_divs();
    let query = Query::new(&doc, "div >>").add_class("x");

    let Err(Error::Selector(err)) = query.materialize() else {
        panic!("expected a selector error");
    };
    assert_eq!(err.message, "expected a selector");
    assert!(err.render(query.selector()).contains("div >>"));
}

#[test]
fn pseudo_classes_are_rejected() {
    let doc = two_divs();

    let result = Query::new(&doc, "div:first-child").materialize();

    assert!(matches!(result, Err(Error::Selector(_))));
    assert_eq!(doc.to_html(), "<div></div><div></div>");
}

#[test]
fn traced_consumption() {
    let doc = two_divs();
    let mut tracer = PrintTracer::new(Vec::new()).verbosity(Verbosity::VeryVerbose);

    Query::new(&doc, "div")
        .add_class("x")
        .materialize_traced(&mut tracer)
        .unwrap();

    insta::assert_snapshot!(String::from_utf8(tracer.into_inner()).unwrap(), @r#"
    resolve div (2 matched)
      pull 0 <div>#1
        add_class("x")
      pull 1 <div>#2
        add_class("x")
    done (2 yielded)
    "#);
}

#[test]
fn traced_iteration_hands_back_the_tracer() {
    let doc = two_divs();
    let query = Query::new(&doc, "div");

    let mut iter = query.iter_traced(PrintTracer::new(Vec::new()));
    iter.next().unwrap().unwrap();
    let out = String::from_utf8(iter.into_tracer().into_inner()).unwrap();

    assert_eq!(out, "resolve div (2 matched)\n");
}

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::{Document, Element, Handler};

fn counter() -> (Rc<Cell<u32>>, Handler) {
    let hits = Rc::new(Cell::new(0));
    let seen = hits.clone();
    (hits, Rc::new(move |_| seen.set(seen.get() + 1)))
}

fn nested() -> (Document, Element, Element) {
    let doc = Document::new();
    let outer = doc.create_element("div");
    let inner = doc.create_element("button");
    outer.append(&inner).unwrap();
    doc.root().append(&outer).unwrap();
    (doc, outer, inner)
}

#[test]
fn on_fires_every_time() {
    let (_doc, _outer, button) = nested();
    let (hits, handler) = counter();

    button.on("click", handler);
    for _ in 0..3 {
        button.dispatch("click");
    }

    assert_eq!(hits.get(), 3);
}

#[test]
fn once_fires_exactly_once() {
    let (_doc, _outer, button) = nested();
    let (hits, handler) = counter();

    button.once("click", handler);
    for _ in 0..3 {
        button.dispatch("click");
    }

    assert_eq!(hits.get(), 1);
    assert_eq!(button.listener_count("click"), 0);
}

#[test]
fn once_is_deregistered_before_reentrant_dispatch() {
    let (_doc, _outer, button) = nested();
    let hits = Rc::new(Cell::new(0));

    let seen = hits.clone();
    let target = button.clone();
    button.once(
        "click",
        Rc::new(move |_| {
            seen.set(seen.get() + 1);
            target.dispatch("click");
        }),
    );
    button.dispatch("click");

    assert_eq!(hits.get(), 1);
}

#[test]
fn other_event_types_do_not_fire() {
    let (_doc, _outer, button) = nested();
    let (hits, handler) = counter();

    button.on("click", handler);
    button.dispatch("keydown");

    assert_eq!(hits.get(), 0);
}

#[test]
fn events_bubble_to_ancestors() {
    let (_doc, outer, button) = nested();
    let order = Rc::new(RefCell::new(Vec::new()));

    let log = order.clone();
    outer.on(
        "click",
        Rc::new(move |e| log.borrow_mut().push(format!("outer:{:?}", e.current_target()))),
    );
    let log = order.clone();
    button.on(
        "click",
        Rc::new(move |e| log.borrow_mut().push(format!("button:{:?}", e.target()))),
    );
    button.dispatch("click");

    insta::assert_debug_snapshot!(order.borrow(), @r#"
    [
        "button:<button>#2",
        "outer:<div>#1",
    ]
    "#);
}

#[test]
fn stop_propagation_halts_bubbling() {
    let (_doc, outer, button) = nested();
    let (hits, handler) = counter();

    outer.on("click", handler);
    button.on("click", Rc::new(|e| e.stop_propagation()));
    let event = button.dispatch("click");

    assert!(event.propagation_stopped());
    assert_eq!(hits.get(), 0);
}

#[test]
fn stop_immediate_propagation_skips_later_listeners() {
    let (_doc, _outer, button) = nested();
    let (hits, handler) = counter();

    button.on("click", Rc::new(|e| e.stop_immediate_propagation()));
    button.on("click", handler);
    button.dispatch("click");

    assert_eq!(hits.get(), 0);
}

#[test]
fn off_removes_registration() {
    let (_doc, _outer, button) = nested();
    let (hits, handler) = counter();

    let id = button.on("click", handler);
    assert!(button.off(id));
    assert!(!button.off(id));
    button.dispatch("click");

    assert_eq!(hits.get(), 0);
}

#[test]
fn handlers_may_mutate_the_tree() {
    let (_doc, _outer, button) = nested();

    let target = button.clone();
    button.on(
        "click",
        Rc::new(move |_| {
            target.toggle_class("pressed").unwrap();
        }),
    );
    button.dispatch("click");

    assert!(button.has_class("pressed"));
}

#[test]
fn listeners_survive_removal_and_reinsertion() {
    let (doc, outer, button) = nested();
    let (hits, handler) = counter();
    button.on("click", handler);

    button.remove();
    button.dispatch("click");
    doc.root().append(&button).unwrap();
    button.dispatch("click");

    assert!(button.is_connected());
    assert!(outer.element_children().is_empty());
    assert_eq!(hits.get(), 2);
}

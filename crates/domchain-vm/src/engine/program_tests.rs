use domchain_core::Document;
use domchain_parser::parse_document;

use super::{MutationOp, OpList, Program};

fn names(list: &OpList) -> Vec<String> {
    list.iter().map(|op| op.to_string()).collect()
}

#[test]
fn push_preserves_recording_order() {
    let list = OpList::new()
        .push(MutationOp::AddClass("a".into()))
        .push(MutationOp::Remove)
        .push(MutationOp::AddClass("b".into()));

    assert_eq!(list.len(), 3);
    assert_eq!(names(&list), ["add_class(\"a\")", "remove()", "add_class(\"b\")"]);
}

#[test]
fn push_leaves_the_original_untouched() {
    let base = OpList::new().push(MutationOp::AddClass("a".into()));
    let left = base.push(MutationOp::AddClass("b".into()));
    let right = base.push(MutationOp::AddClass("c".into()));

    assert_eq!(names(&base), ["add_class(\"a\")"]);
    assert_eq!(names(&left), ["add_class(\"a\")", "add_class(\"b\")"]);
    assert_eq!(names(&right), ["add_class(\"a\")", "add_class(\"c\")"]);
    assert!(!left.ptr_eq(&right));
    assert!(base.clone().ptr_eq(&base));
}

#[test]
fn empty_list() {
    let list = OpList::new();

    assert!(list.is_empty());
    assert!(list.to_vec().is_empty());
    assert!(list.ptr_eq(&OpList::default()));
}

#[test]
fn long_chains_drop_without_recursion() {
    let mut list = OpList::new();
    for _ in 0..200_000 {
        list = list.push(MutationOp::Remove);
    }
    assert_eq!(list.len(), 200_000);
    drop(list);
}

#[test]
fn programs_share_selector_and_document() {
    let doc = parse_document("<p></p>").unwrap();
    let base = Program::new(&doc, "p");
    let next = base.push(MutationOp::AddClass("x".into()));

    assert_eq!(base.ops().len(), 0);
    assert_eq!(next.ops().len(), 1);
    assert_eq!(next.selector(), "p");
    assert!(next.document().ptr_eq(&doc));
}

#[test]
fn sibling_programs_do_not_see_each_other() {
    let doc = parse_document("<p></p>").unwrap();
    let base = Program::new(&doc, "p").push(MutationOp::AddClass("a".into()));
    let _other = base.push(MutationOp::AddClass("b".into()));

    let elements = base.run().unwrap();

    assert_eq!(elements[0].classes(), vec!["a"]);
}

#[test]
fn debug_lists_ops() {
    let program = Program::new(&Document::new(), "li.item")
        .push(MutationOp::AddClass("x".into()))
        .push(MutationOp::RemoveData("userId".into()));

    insta::assert_snapshot!(
        format!("{program:?}"),
        @r#"Program { selector: "li.item", ops: [add_class("x"), remove_data("userId")] }"#
    );
}

use std::borrow::Cow;

use super::decode_entities;

#[test]
fn text_without_references_is_borrowed() {
    assert!(matches!(decode_entities("plain"), Cow::Borrowed("plain")));
}

#[test]
fn named_references() {
    assert_eq!(
        decode_entities("&lt;b&gt; &amp; &quot;q&quot; &apos;s&apos;"),
        "<b> & \"q\" 's'"
    );
    assert_eq!(decode_entities("a&nbsp;b"), "a\u{a0}b");
}

#[test]
fn numeric_references() {
    assert_eq!(decode_entities("&#65;&#x42;&#X43;"), "ABC");
    assert_eq!(decode_entities("&#x1F600;"), "\u{1F600}");
}

#[test]
fn malformed_references_stay_literal() {
    assert_eq!(decode_entities("fish & chips"), "fish & chips");
    assert_eq!(decode_entities("&amp"), "&amp");
    assert_eq!(decode_entities("&bogus;"), "&bogus;");
    assert_eq!(decode_entities("&#xZZ;"), "&#xZZ;");
    assert_eq!(decode_entities("&&amp;"), "&&");
}

#[test]
fn reference_bodies_are_bounded() {
    assert_eq!(decode_entities("&#x0010FFFF;"), "&#x0010FFFF;");
    assert_eq!(decode_entities("&amp x;"), "&amp x;");

    let many = "&a".repeat(50_000);
    assert_eq!(decode_entities(&many), many);
}

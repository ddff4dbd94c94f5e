use super::Selector;

fn normalized(source: &str) -> String {
    Selector::parse(source).unwrap().to_string()
}

fn error(source: &str) -> String {
    let err = Selector::parse(source).unwrap_err();
    format!("{}..{}: {}", err.span.start, err.span.end, err.message)
}

#[test]
fn whitespace_is_normalized() {
    assert_eq!(normalized("  div   >p  "), "div > p");
    assert_eq!(normalized("ul li"), "ul li");
    assert_eq!(normalized("h1+p ~ ul"), "h1 + p ~ ul");
}

#[test]
fn groups_are_kept_in_order() {
    assert_eq!(normalized("b , a,c"), "b, a, c");
    assert_eq!(Selector::parse("b, a").unwrap().groups().len(), 2);
}

#[test]
fn type_selectors_are_lowercased() {
    assert_eq!(normalized("DIV.Active"), "div.Active");
}

#[test]
fn compounds_keep_every_simple_selector() {
    assert_eq!(normalized("a#home.nav.link[href]"), "a#home.nav.link[href]");
    assert_eq!(normalized("*"), "*");
    assert_eq!(normalized("*.x"), ".x");
}

#[test]
fn attribute_values_and_flags() {
    assert_eq!(normalized("[data-id = 'a b']"), r#"[data-id="a b"]"#);
    assert_eq!(normalized("[lang|=en i]"), r#"[lang|="en" i]"#);
    assert_eq!(normalized(r#"[title="say \"hi\""]"#), r#"[title="say \"hi\""]"#);
}

#[test]
fn parses_from_str() {
    let selector: Selector = "ul > li".parse().unwrap();
    assert_eq!(selector.to_string(), "ul > li");
}

#[test]
fn empty_selector_is_rejected() {
    assert_eq!(error(""), "0..0: expected a selector");
    assert_eq!(error("   "), "3..3: expected a selector");
}

#[test]
fn dangling_combinator_is_rejected() {
    assert_eq!(error("div >"), "5..5: expected a selector");
    assert_eq!(error("div,"), "4..4: expected a selector");
}

#[test]
fn missing_names_are_rejected() {
    assert_eq!(error("div#"), "4..4: expected an id after `#`");
    assert_eq!(error(". a"), "1..2: expected a class name after `.`");
    assert_eq!(error("[=x]"), "1..2: expected an attribute name");
}

#[test]
fn unclosed_attribute_is_rejected() {
    assert_eq!(error("a[href"), "1..2: unclosed `[`");
    assert_eq!(error("a[href='x'"), "1..2: unclosed `[`");
    assert_eq!(error("a[href=]"), "7..8: expected an attribute value");
}

#[test]
fn pseudo_classes_are_rejected() {
    assert_eq!(error("li:first-child"), "2..3: pseudo-classes are not supported");
}

#[test]
fn misplaced_type_selector_is_rejected() {
    assert_eq!(error(".adiv*"), "5..6: type selector must come first in a compound");
}

#[test]
fn garbage_is_rejected() {
    assert_eq!(error("div @"), "4..5: unexpected characters");
    assert_eq!(error("div@"), "3..4: unexpected characters");
}

#[test]
fn escaped_identifiers_are_resolved() {
    let selector = Selector::parse(r".md\:flex#\31 23.café").unwrap();
    let compound = &selector.groups()[0].parts[0].compound;

    assert_eq!(compound.classes, ["md:flex", "café"]);
    assert_eq!(compound.ids, ["123"]);
}

#[test]
fn display_reescapes_identifiers() {
    assert_eq!(normalized(r".md\:flex"), r".md\:flex");
    assert_eq!(normalized(r"#\31 23"), r"#\31 23");
    assert_eq!(normalized(r".\-"), r".\-");
    assert_eq!(normalized(r"[data\.x]"), r"[data\.x]");
    assert_eq!(normalized(r".a\ b"), r".a\ b");
}

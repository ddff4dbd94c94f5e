use super::lexer::{lex, token_text};

fn snapshot(input: &str) -> String {
    let mut out = String::new();
    for token in lex(input) {
        out.push_str(&format!(
            "{:?} {:?}\n",
            token.kind,
            token_text(input, &token)
        ));
    }
    out
}

#[test]
fn element_with_attributes_and_text() {
    insta::assert_snapshot!(snapshot(r#"<a href="/x" data-on>Hi &amp; bye</a>"#), @r#"
    StartTag "a"
    AttrName "href"
    AttrValue "/x"
    AttrName "data-on"
    TagClose ">"
    Text "Hi &amp; bye"
    EndTag "a"
    TagClose ">"
    "#);
}

#[test]
fn attribute_value_forms() {
    insta::assert_snapshot!(snapshot("<input value = 'a b' size=3 checked>"), @r#"
    StartTag "input"
    AttrName "value"
    AttrValue "a b"
    AttrName "size"
    AttrValue "3"
    AttrName "checked"
    TagClose ">"
    "#);
}

#[test]
fn declarations_comments_and_self_closing() {
    insta::assert_snapshot!(snapshot("<!DOCTYPE html><!-- note --><br/>"), @r#"
    Declaration "<!DOCTYPE html>"
    Comment "<!-- note -->"
    StartTag "br"
    SelfClosingTagClose "/>"
    "#);
}

#[test]
fn raw_text_elements_are_opaque() {
    insta::assert_snapshot!(snapshot("<script>if (a < b) {}</script>"), @r#"
    StartTag "script"
    TagClose ">"
    RawText "if (a < b) {}"
    EndTag "script"
    TagClose ">"
    "#);
}

#[test]
fn escapable_raw_text_elements() {
    insta::assert_snapshot!(snapshot("<textarea><b>&amp;</b></textarea>"), @r#"
    StartTag "textarea"
    TagClose ">"
    EscapableRawText "<b>&amp;</b>"
    EndTag "textarea"
    TagClose ">"
    "#);
}

#[test]
fn lone_angle_bracket_is_text() {
    insta::assert_snapshot!(snapshot("1 < 2"), @r#"
    Text "1 < 2"
    "#);
}

#[test]
fn unterminated_constructs() {
    insta::assert_snapshot!(snapshot(r#"<div class="a""#), @r#"
    StartTag "div"
    AttrName "class"
    AttrValue "a"
    UnterminatedTag ""
    "#);
    insta::assert_snapshot!(snapshot("a<!-- x"), @r#"
    Text "a"
    UnterminatedComment "<!-- x"
    "#);
}

#[test]
fn garbage_inside_tag() {
    insta::assert_snapshot!(snapshot("<p <>"), @r#"
    StartTag "p"
    Garbage "<"
    TagClose ">"
    "#);
}

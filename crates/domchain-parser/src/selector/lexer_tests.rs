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
fn compound_with_combinator() {
    insta::assert_snapshot!(snapshot("div > .a#b"), @r##"
    Ident "div"
    Whitespace " "
    Greater ">"
    Whitespace " "
    Dot "."
    Ident "a"
    Hash "#"
    Ident "b"
    "##);
}

#[test]
fn attribute_operators() {
    insta::assert_snapshot!(snapshot("[x~='y'][a|=b][c^=\"d\"][e$=f][g*=h]"), @r#"
    BracketOpen "["
    Ident "x"
    TildeEquals "~="
    StringLiteral "'y'"
    BracketClose "]"
    BracketOpen "["
    Ident "a"
    PipeEquals "|="
    Ident "b"
    BracketClose "]"
    BracketOpen "["
    Ident "c"
    CaretEquals "^="
    StringLiteral "\"d\""
    BracketClose "]"
    BracketOpen "["
    Ident "e"
    DollarEquals "$="
    Ident "f"
    BracketClose "]"
    BracketOpen "["
    Ident "g"
    StarEquals "*="
    Ident "h"
    BracketClose "]"
    "#);
}

#[test]
fn sibling_combinators_and_groups() {
    insta::assert_snapshot!(snapshot("h1+p~ul,*"), @r#"
    Ident "h1"
    Plus "+"
    Ident "p"
    Tilde "~"
    Ident "ul"
    Comma ","
    Star "*"
    "#);
}

#[test]
fn hyphenated_identifiers() {
    insta::assert_snapshot!(snapshot(".nav-item-2 -x"), @r#"
    Dot "."
    Ident "nav-item-2"
    Whitespace " "
    Ident "-x"
    "#);
}

#[test]
fn garbage_is_coalesced() {
    insta::assert_snapshot!(snapshot("div @@ p"), @r#"
    Ident "div"
    Whitespace " "
    Garbage "@@"
    Whitespace " "
    Ident "p"
    "#);
}

#[test]
fn non_ascii_and_escaped_identifiers() {
    insta::assert_snapshot!(snapshot(r".café #\31 23 .md\:flex"), @r##"
    Dot "."
    Ident "café"
    Whitespace " "
    Hash "#"
    Ident "\\31 23"
    Whitespace " "
    Dot "."
    Ident "md\\:flex"
    "##);
}

//! Building elements from markup templates.
//!
//! Used at call sites to produce nodes for `append`, `prepend`, `before` and
//! `after`. Interpolated values are data: [`html!`](crate::html) escapes them
//! before the markup is parsed.

use std::fmt;

use domchain_core::{Document, Element, escape_markup};
use domchain_parser::{ParseOptions, parse_fragment_with};

use crate::{Error, Result};

/// Parse `markup` into a single detached root element owned by `document`.
///
/// Whitespace-only text around the root is ignored. Anything else beside
/// exactly one root element is an [`Error::Template`].
pub fn materialize(document: &Document, markup: &str) -> Result<Element> {
    let options = ParseOptions::new().skip_blank_text(true);
    let nodes = parse_fragment_with(document, markup, options).map_err(Error::Markup)?;

    match nodes.as_slice() {
        [] => Err(Error::Template("no root element".to_owned())),
        [node] => node
            .as_element()
            .ok_or_else(|| Error::Template("the root is text, not an element".to_owned())),
        more => Err(Error::Template(format!(
            "expected one root element, found {} top-level nodes",
            more.len()
        ))),
    }
}

/// Displays a value with markup-significant characters escaped.
pub struct Escaped<'a, T: ?Sized>(pub &'a T);

impl<T: fmt::Display + ?Sized> fmt::Display for Escaped<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&escape_markup(&self.0.to_string()))
    }
}

/// Build one element from a format-style template.
///
/// Every positional `{}` argument is escaped, so interpolated values can
/// never introduce markup. Whitespace, `=` and quotes are escaped too, which
/// keeps a value in an unquoted attribute position from splitting into extra
/// attributes. Inline captures such as `{name}` bypass escaping;
/// pass values positionally.
///
/// ```
/// use domchain_lib::{Document, html};
///
/// let doc = Document::new();
/// let li = html!(&doc, r#"<li class="{}">{}</li>"#, "a\"b", "x < y")?;
/// assert_eq!(li.outer_html(), r#"<li class="a&quot;b">x &lt; y</li>"#);
/// # Ok::<(), domchain_lib::Error>(())
/// ```
#[macro_export]
macro_rules! html {
    ($doc:expr, $template:literal $(, $arg:expr)* $(,)?) => {
        $crate::template::materialize(
            $doc,
            &::std::format!($template $(, $crate::template::Escaped(&$arg))*),
        )
    };
}

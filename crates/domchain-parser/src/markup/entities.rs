//! Character reference decoding.

use std::borrow::Cow;

const NAMED: &[(&str, char)] = &[
    ("amp", '&'),
    ("lt", '<'),
    ("gt", '>'),
    ("quot", '"'),
    ("apos", '\''),
    ("nbsp", '\u{a0}'),
];

/// Longest reference body: `#x` plus six hex digits.
const MAX_BODY: usize = 8;

/// Decode named and numeric character references.
///
/// Unknown or malformed references are kept literally.
pub fn decode(text: &str) -> Cow<'_, str> {
    if !text.contains('&') {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        rest = &rest[amp..];
        match decode_one(rest) {
            Some((c, consumed)) => {
                out.push(c);
                rest = &rest[consumed..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    Cow::Owned(out)
}

/// Decode the reference at the start of `text` (which begins with `&`).
///
/// Only the next `MAX_BODY` bytes are inspected, so decoding stays linear.
fn decode_one(text: &str) -> Option<(char, usize)> {
    let len = text[1..]
        .bytes()
        .take(MAX_BODY + 1)
        .position(|b| !(b.is_ascii_alphanumeric() || b == b'#'))?;
    let semi = len + 1;
    if text.as_bytes()[semi] != b';' {
        return None;
    }
    let body = &text[1..semi];

    let c = if let Some(num) = body.strip_prefix('#') {
        let code = match num.strip_prefix(['x', 'X']) {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => num.parse::<u32>().ok()?,
        };
        char::from_u32(code)?
    } else {
        NAMED.iter().find(|(name, _)| *name == body)?.1
    };

    Some((c, semi + 1))
}

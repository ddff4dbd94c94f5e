//! Name validation and `data-*` key conversion.

/// Elements that never have children or a closing tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
    "track", "wbr",
];

/// Is `tag` (any case) a void element?
pub fn is_void_element(tag: &str) -> bool {
    VOID_ELEMENTS.iter().any(|v| v.eq_ignore_ascii_case(tag))
}

/// Elements whose text is neither entity-decoded on parse nor escaped on output.
const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style"];

/// Elements that hold only text, read up to their closing tag, but still
/// decode and escape entities.
const ESCAPABLE_RAW_TEXT_ELEMENTS: &[&str] = &["textarea", "title"];

pub fn is_raw_text_element(tag: &str) -> bool {
    RAW_TEXT_ELEMENTS.iter().any(|t| t.eq_ignore_ascii_case(tag))
}

pub fn is_escapable_raw_text_element(tag: &str) -> bool {
    ESCAPABLE_RAW_TEXT_ELEMENTS
        .iter()
        .any(|t| t.eq_ignore_ascii_case(tag))
}

/// Class tokens are non-empty and contain no ASCII whitespace.
pub fn is_valid_class_token(token: &str) -> bool {
    !token.is_empty() && !token.bytes().any(|b| b.is_ascii_whitespace())
}

/// Attribute names are non-empty and free of whitespace, controls, quotes, `>`, `/` and `=`.
pub fn is_valid_attribute_name(name: &str) -> bool {
    !name.is_empty()
        && !name.chars().any(|c| {
            c.is_whitespace() || c.is_control() || matches!(c, '"' | '\'' | '>' | '/' | '=')
        })
}

/// Convert a camelCase data key to its `data-*` attribute name.
///
/// Returns `None` for keys the platform rejects: a `-` followed by a
/// lowercase ASCII letter, or a result that is not a valid attribute name.
///
/// # Examples
/// ```
/// use domchain_core::utils::data_key_to_attribute;
/// assert_eq!(data_key_to_attribute("userId").as_deref(), Some("data-user-id"));
/// assert_eq!(data_key_to_attribute("id").as_deref(), Some("data-id"));
/// assert_eq!(data_key_to_attribute("bad-key"), None);
/// ```
pub fn data_key_to_attribute(key: &str) -> Option<String> {
    let bytes = key.as_bytes();
    if bytes
        .windows(2)
        .any(|w| w[0] == b'-' && w[1].is_ascii_lowercase())
    {
        return None;
    }

    let mut name = String::with_capacity(key.len() + 5);
    name.push_str("data-");
    for c in key.chars() {
        if c.is_ascii_uppercase() {
            name.push('-');
            name.push(c.to_ascii_lowercase());
        } else {
            name.push(c);
        }
    }
    is_valid_attribute_name(&name).then_some(name)
}

/// Convert a `data-*` attribute name back to its camelCase key.
///
/// # Examples
/// ```
/// use domchain_core::utils::attribute_to_data_key;
/// assert_eq!(attribute_to_data_key("data-user-id").as_deref(), Some("userId"));
/// assert_eq!(attribute_to_data_key("title"), None);
/// ```
pub fn attribute_to_data_key(name: &str) -> Option<String> {
    let rest = name.strip_prefix("data-")?;
    let mut key = String::with_capacity(rest.len());
    let mut upper_next = false;
    for c in rest.chars() {
        if c == '-' {
            upper_next = true;
            continue;
        }
        if upper_next && c.is_ascii_lowercase() {
            key.push(c.to_ascii_uppercase());
        } else {
            if upper_next {
                key.push('-');
            }
            key.push(c);
        }
        upper_next = false;
    }
    if upper_next {
        key.push('-');
    }
    Some(key)
}

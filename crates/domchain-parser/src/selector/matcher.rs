//! Matching compiled selectors against live elements.
//!
//! Complex selectors match right to left: the rightmost compound must match
//! the candidate, then each combinator walks the tree towards the left part,
//! backtracking over every ancestor or sibling that could satisfy it.

use domchain_core::Element;

use super::ast::{AttrCondition, AttrOp, Combinator, Complex, Compound, Part};

pub(super) fn matches_complex(complex: &Complex, element: &Element) -> bool {
    matches_parts(&complex.parts, element)
}

fn matches_parts(parts: &[Part], element: &Element) -> bool {
    let Some((last, rest)) = parts.split_last() else {
        return true;
    };
    if !matches_compound(&last.compound, element) {
        return false;
    }

    let Some(combinator) = last.combinator else {
        return rest.is_empty();
    };

    match combinator {
        Combinator::Child => element
            .parent_element()
            .is_some_and(|parent| matches_parts(rest, &parent)),
        Combinator::Descendant => {
            let mut cursor = element.parent_element();
            while let Some(ancestor) = cursor {
                if matches_parts(rest, &ancestor) {
                    return true;
                }
                cursor = ancestor.parent_element();
            }
            false
        }
        Combinator::NextSibling => element
            .previous_element_sibling()
            .is_some_and(|sibling| matches_parts(rest, &sibling)),
        Combinator::SubsequentSibling => {
            let mut cursor = element.previous_element_sibling();
            while let Some(sibling) = cursor {
                if matches_parts(rest, &sibling) {
                    return true;
                }
                cursor = sibling.previous_element_sibling();
            }
            false
        }
    }
}

fn matches_compound(compound: &Compound, element: &Element) -> bool {
    if let Some(tag) = &compound.tag {
        if element.tag_name() != *tag {
            return false;
        }
    }

    if !compound.ids.is_empty() {
        let id = element.attribute("id");
        if !compound.ids.iter().all(|want| id.as_deref() == Some(want)) {
            return false;
        }
    }

    if !compound.classes.iter().all(|class| element.has_class(class)) {
        return false;
    }

    compound.attrs.iter().all(|attr| matches_attr(attr, element))
}

fn matches_attr(condition: &AttrCondition, element: &Element) -> bool {
    let Some(actual) = element.attribute(&condition.name) else {
        return false;
    };
    let Some(matcher) = &condition.matcher else {
        return true;
    };

    let (actual, want) = if matcher.case_insensitive {
        (actual.to_lowercase(), matcher.value.to_lowercase())
    } else {
        (actual, matcher.value.clone())
    };

    match matcher.op {
        AttrOp::Exact => actual == want,
        AttrOp::Includes => {
            !want.is_empty()
                && !want.contains(char::is_whitespace)
                && actual.split_ascii_whitespace().any(|token| token == want)
        }
        AttrOp::DashMatch => {
            actual == want
                || actual
                    .strip_prefix(want.as_str())
                    .is_some_and(|rest| rest.starts_with('-'))
        }
        AttrOp::Prefix => !want.is_empty() && actual.starts_with(&want),
        AttrOp::Suffix => !want.is_empty() && actual.ends_with(&want),
        AttrOp::Substring => !want.is_empty() && actual.contains(&want),
    }
}

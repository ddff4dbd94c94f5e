//! Compiled selector structure.
//!
//! A selector list is a set of complex selectors (`,` groups). A complex
//! selector is a left-to-right chain of compounds joined by combinators.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Combinator {
    /// Whitespace: any ancestor.
    Descendant,
    /// `>`: the parent.
    Child,
    /// `+`: the immediately preceding element sibling.
    NextSibling,
    /// `~`: any preceding element sibling.
    SubsequentSibling,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttrOp {
    /// `=`
    Exact,
    /// `~=`
    Includes,
    /// `|=`
    DashMatch,
    /// `^=`
    Prefix,
    /// `$=`
    Suffix,
    /// `*=`
    Substring,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttrMatcher {
    pub op: AttrOp,
    pub value: String,
    pub case_insensitive: bool,
}

/// `[name]` or `[name op value]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttrCondition {
    pub name: String,
    pub matcher: Option<AttrMatcher>,
}

/// Simple selectors that all apply to one element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Compound {
    /// Lowercased type selector. `None` means universal (explicit or implied).
    pub tag: Option<String>,
    pub ids: Vec<String>,
    pub classes: Vec<String>,
    pub attrs: Vec<AttrCondition>,
}

impl Compound {
    pub fn is_empty(&self) -> bool {
        self.tag.is_none() && self.ids.is_empty() && self.classes.is_empty() && self.attrs.is_empty()
    }
}

/// A compound and its relation to the compound on its left.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Part {
    /// `None` only for the leftmost part.
    pub combinator: Option<Combinator>,
    pub compound: Compound,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Complex {
    pub parts: Vec<Part>,
}

impl fmt::Display for Combinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Descendant => " ",
            Self::Child => " > ",
            Self::NextSibling => " + ",
            Self::SubsequentSibling => " ~ ",
        })
    }
}

impl fmt::Display for AttrOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Exact => "=",
            Self::Includes => "~=",
            Self::DashMatch => "|=",
            Self::Prefix => "^=",
            Self::Suffix => "$=",
            Self::Substring => "*=",
        })
    }
}

impl fmt::Display for Compound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.tag {
            Some(tag) => write_ident(f, tag)?,
            None if self.is_empty() => f.write_str("*")?,
            None => {}
        }
        for id in &self.ids {
            f.write_str("#")?;
            write_ident(f, id)?;
        }
        for class in &self.classes {
            f.write_str(".")?;
            write_ident(f, class)?;
        }
        for attr in &self.attrs {
            f.write_str("[")?;
            write_ident(f, &attr.name)?;
            match &attr.matcher {
                None => f.write_str("]")?,
                Some(m) => {
                    write!(f, "{}{:?}", m.op, m.value)?;
                    if m.case_insensitive {
                        f.write_str(" i")?;
                    }
                    f.write_str("]")?;
                }
            }
        }
        Ok(())
    }
}

impl fmt::Display for Complex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for part in &self.parts {
            if let Some(combinator) = part.combinator {
                write!(f, "{combinator}")?;
            }
            write!(f, "{}", part.compound)?;
        }
        Ok(())
    }
}

/// Write `name` so that it lexes back as a single identifier.
fn write_ident(f: &mut fmt::Formatter<'_>, name: &str) -> fmt::Result {
    let mut chars = name.chars().peekable();
    let mut first = true;
    while let Some(c) = chars.next() {
        let plain = c.is_ascii_alphanumeric() || c == '_' || c == '-' || !c.is_ascii();
        let bad_start = first
            && (c.is_ascii_digit()
                || (c == '-' && chars.peek().is_none_or(|n| n.is_ascii_digit() || *n == '-')));
        if c.is_ascii_control() || (bad_start && c != '-') {
            write!(f, "\\{:x} ", u32::from(c))?;
        } else if plain && !bad_start {
            write!(f, "{c}")?;
        } else {
            write!(f, "\\{c}")?;
        }
        first = false;
    }
    Ok(())
}

//! Recorded mutation operations.
//!
//! Each variant captures its arguments by value at recording time and maps to
//! exactly one native primitive on a single element.

use std::fmt;

use domchain_core::{DomError, Element, Handler, Node};

#[derive(Clone)]
pub enum MutationOp {
    AddClass(String),
    RemoveClass(String),
    ToggleClass(String),
    /// No-op when `old` is absent.
    ReplaceClass { old: String, new: String },
    SetAttribute { name: String, value: String },
    RemoveAttribute(String),
    ToggleAttribute(String),
    /// Entries apply in their own order.
    SetData(Vec<(String, String)>),
    RemoveData(String),
    Append(Node),
    Prepend(Node),
    Remove,
    Before(Node),
    After(Node),
    On { event: String, handler: Handler },
    Once { event: String, handler: Handler },
}

impl MutationOp {
    /// Name of the chaining method that records this op.
    pub fn name(&self) -> &'static str {
        match self {
            Self::AddClass(_) => "add_class",
            Self::RemoveClass(_) => "remove_class",
            Self::ToggleClass(_) => "toggle_class",
            Self::ReplaceClass { .. } => "replace_class",
            Self::SetAttribute { .. } => "set_attribute",
            Self::RemoveAttribute(_) => "remove_attribute",
            Self::ToggleAttribute(_) => "toggle_attribute",
            Self::SetData(_) => "set_data",
            Self::RemoveData(_) => "remove_data",
            Self::Append(_) => "append",
            Self::Prepend(_) => "prepend",
            Self::Remove => "remove",
            Self::Before(_) => "before",
            Self::After(_) => "after",
            Self::On { .. } => "on",
            Self::Once { .. } => "once",
        }
    }

    /// Perform the native primitive on `element`.
    pub fn apply(&self, element: &Element) -> Result<(), DomError> {
        match self {
            Self::AddClass(name) => element.add_class(name),
            Self::RemoveClass(name) => element.remove_class(name),
            Self::ToggleClass(name) => element.toggle_class(name).map(drop),
            Self::ReplaceClass { old, new } => element.replace_class(old, new).map(drop),
            Self::SetAttribute { name, value } => element.set_attribute(name, value),
            Self::RemoveAttribute(name) => element.remove_attribute(name),
            Self::ToggleAttribute(name) => element.toggle_attribute(name).map(drop),
            Self::SetData(entries) => entries
                .iter()
                .try_for_each(|(key, value)| element.set_data(key, value)),
            Self::RemoveData(key) => element.remove_data(key),
            Self::Append(node) => element.append(node),
            Self::Prepend(node) => element.prepend(node),
            Self::Remove => {
                element.remove();
                Ok(())
            }
            Self::Before(node) => element.before(node),
            Self::After(node) => element.after(node),
            Self::On { event, handler } => {
                element.on(event, handler.clone());
                Ok(())
            }
            Self::Once { event, handler } => {
                element.once(event, handler.clone());
                Ok(())
            }
        }
    }
}

/// Call syntax, e.g. `set_attribute("href", "/")`.
impl fmt::Display for MutationOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.name())?;
        match self {
            Self::AddClass(s)
            | Self::RemoveClass(s)
            | Self::ToggleClass(s)
            | Self::RemoveAttribute(s)
            | Self::ToggleAttribute(s)
            | Self::RemoveData(s) => write!(f, "{s:?}")?,
            Self::ReplaceClass { old, new } => write!(f, "{old:?}, {new:?}")?,
            Self::SetAttribute { name, value } => write!(f, "{name:?}, {value:?}")?,
            Self::SetData(entries) => {
                f.write_str("{")?;
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key}: {value:?}")?;
                }
                f.write_str("}")?;
            }
            Self::Append(node) | Self::Prepend(node) | Self::Before(node) | Self::After(node) => {
                write!(f, "{node:?}")?
            }
            Self::Remove => {}
            Self::On { event, .. } | Self::Once { event, .. } => write!(f, "{event:?}")?,
        }
        f.write_str(")")
    }
}

impl fmt::Debug for MutationOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

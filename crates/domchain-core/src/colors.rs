//! ANSI styling for trace output.

use std::fmt;

/// What a painted span means. Each role maps to one 16-color ANSI code.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    /// Selectors and tag names.
    Selector,
    /// A step that succeeded.
    Success,
    /// A failed step.
    Failure,
    /// Recorded operations and other secondary detail.
    Detail,
}

impl Role {
    fn code(self) -> &'static str {
        match self {
            Role::Selector => "\x1b[34m",
            Role::Success => "\x1b[32m",
            Role::Failure => "\x1b[31m",
            Role::Detail => "\x1b[2m",
        }
    }
}

const RESET: &str = "\x1b[0m";

/// Whether trace output carries ANSI escapes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Colors {
    enabled: bool,
}

impl Colors {
    pub const ON: Self = Self { enabled: true };
    pub const OFF: Self = Self { enabled: false };

    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Wrap `value` so it displays in the color for `role`.
    pub fn paint<T: fmt::Display>(self, role: Role, value: T) -> Painted<T> {
        Painted {
            role: self.enabled.then_some(role),
            value,
        }
    }
}

/// A value displayed with optional ANSI styling.
pub struct Painted<T> {
    role: Option<Role>,
    value: T,
}

impl<T: fmt::Display> fmt::Display for Painted<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.role {
            Some(role) => write!(f, "{}{}{RESET}", role.code(), self.value),
            None => self.value.fmt(f),
        }
    }
}

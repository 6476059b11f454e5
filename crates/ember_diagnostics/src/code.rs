//! Diagnostic codes with category prefixes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Category of a diagnostic code, shown as its prefix letter.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum Category {
    /// User-facing errors, `E`.
    Error,
    /// Warnings, `W`.
    Warning,
    /// Broken compiler invariants, `I`.
    Internal,
}

impl Category {
    /// Prefix letter of this category.
    pub fn prefix(self) -> char {
        match self {
            Category::Error => 'E',
            Category::Warning => 'W',
            Category::Internal => 'I',
        }
    }
}

/// A category plus a number, displayed as e.g. `E301`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct DiagnosticCode {
    /// Category of the code.
    pub category: Category,
    /// Number within the category.
    pub number: u16,
}

impl DiagnosticCode {
    /// Creates a code.
    pub const fn new(category: Category, number: u16) -> Self {
        Self { category, number }
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:03}", self.category.prefix(), self.number)
    }
}

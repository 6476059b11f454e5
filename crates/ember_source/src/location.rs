//! Line/column positions for display.

use std::fmt;
use std::path::PathBuf;

/// A resolved, 1-indexed source position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    /// Path (or synthetic name) of the file.
    pub path: PathBuf,
    /// Line number, starting at 1.
    pub line: u32,
    /// Column number in bytes, starting at 1.
    pub column: u32,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.path.display(), self.line, self.column)
    }
}

//! Identifier of a file loaded into the [`SourceDb`](crate::SourceDb).

use serde::{Deserialize, Serialize};

/// Opaque handle to a loaded source file.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct FileId(u32);

impl FileId {
    /// Placeholder for compiler-generated nodes with no source text.
    pub const DUMMY: FileId = FileId(u32::MAX);

    /// Creates a `FileId` from a raw index.
    pub fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// Returns the raw index.
    pub fn as_raw(self) -> u32 {
        self.0
    }
}

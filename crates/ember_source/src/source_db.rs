//! Storage for loaded source text.

use crate::file_id::FileId;
use crate::location::Location;
use crate::span::Span;
use std::io;
use std::path::{Path, PathBuf};

/// One loaded file with a line-start index.
pub struct SourceFile {
    /// Handle of this file.
    pub id: FileId,
    /// Filesystem path or synthetic name.
    pub path: PathBuf,
    /// Full text.
    pub content: String,
    line_starts: Vec<u32>,
}

impl SourceFile {
    fn new(id: FileId, path: PathBuf, content: String) -> Self {
        let line_starts = std::iter::once(0)
            .chain(
                content
                    .bytes()
                    .enumerate()
                    .filter(|(_, b)| *b == b'\n')
                    .map(|(i, _)| i as u32 + 1),
            )
            .collect();
        Self {
            id,
            path,
            content,
            line_starts,
        }
    }

    /// 1-indexed `(line, column)` of a byte offset.
    pub fn line_col(&self, offset: u32) -> (u32, u32) {
        let line_idx = self
            .line_starts
            .partition_point(|&start| start <= offset)
            .saturating_sub(1);
        (line_idx as u32 + 1, offset - self.line_starts[line_idx] + 1)
    }

    /// Text of the 1-indexed line, without its terminator.
    pub fn line_text(&self, line: u32) -> &str {
        let idx = (line.max(1) - 1) as usize;
        let Some(&start) = self.line_starts.get(idx) else {
            return "";
        };
        let end = self
            .line_starts
            .get(idx + 1)
            .map_or(self.content.len(), |&next| next as usize);
        self.content[start as usize..end].trim_end_matches(['\n', '\r'])
    }
}

/// All source files of a compilation session.
#[derive(Default)]
pub struct SourceDb {
    files: Vec<SourceFile>,
}

impl SourceDb {
    /// Creates an empty database.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads a file from disk.
    pub fn load_file(&mut self, path: &Path) -> Result<FileId, io::Error> {
        let content = std::fs::read_to_string(path)?;
        Ok(self.add_source(path, content))
    }

    /// Adds in-memory text under a display name.
    pub fn add_source(&mut self, name: impl Into<PathBuf>, content: String) -> FileId {
        let id = FileId::from_raw(self.files.len() as u32);
        self.files.push(SourceFile::new(id, name.into(), content));
        id
    }

    /// Returns the file for `id`, or `None` for dummy or unknown handles.
    pub fn file(&self, id: FileId) -> Option<&SourceFile> {
        self.files.get(id.as_raw() as usize)
    }

    /// Resolves the start of `span`. Dummy spans have no location.
    pub fn locate(&self, span: Span) -> Option<Location> {
        let file = self.file(span.file)?;
        let (line, column) = file.line_col(span.start);
        Some(Location {
            path: file.path.clone(),
            line,
            column,
        })
    }
}

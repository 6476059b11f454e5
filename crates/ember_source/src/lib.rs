//! Source locations attached to expression nodes and diagnostics.
//!
//! Expression trees carry a [`Span`] per node. The [`SourceDb`] owns the text
//! of every loaded file and resolves spans to a [`Location`] (file, line,
//! column) when a diagnostic is rendered.

#![warn(missing_docs)]

pub mod file_id;
pub mod location;
pub mod source_db;
pub mod span;

pub use file_id::FileId;
pub use location::Location;
pub use source_db::{SourceDb, SourceFile};
pub use span::Span;

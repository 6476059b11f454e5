//! The diagnostic message type.

use crate::code::DiagnosticCode;
use crate::severity::Severity;
use ember_source::Span;
use serde::{Deserialize, Serialize};

/// Whether a label marks the main location or extra context.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum LabelStyle {
    /// Underlined with `^`.
    Primary,
    /// Underlined with `-`.
    Secondary,
}

/// A message attached to a span inside a diagnostic.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Label {
    /// Annotated span.
    pub span: Span,
    /// Text shown beside the underline.
    pub message: String,
    /// Primary or secondary.
    pub style: LabelStyle,
}

impl Label {
    /// Creates a primary label.
    pub fn primary(span: Span, message: impl Into<String>) -> Self {
        Self {
            span,
            message: message.into(),
            style: LabelStyle::Primary,
        }
    }

    /// Creates a secondary label.
    pub fn secondary(span: Span, message: impl Into<String>) -> Self {
        Self {
            span,
            message: message.into(),
            style: LabelStyle::Secondary,
        }
    }
}

/// A structured message about one construct in the input.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Severity.
    pub severity: Severity,
    /// Stable code.
    pub code: DiagnosticCode,
    /// One-line message.
    pub message: String,
    /// Location of the offending construct.
    pub primary_span: Span,
    /// Extra annotated spans.
    pub labels: Vec<Label>,
    /// `= note:` footers.
    pub notes: Vec<String>,
}

impl Diagnostic {
    fn with_severity(
        severity: Severity,
        code: DiagnosticCode,
        message: impl Into<String>,
        span: Span,
    ) -> Self {
        Self {
            severity,
            code,
            message: message.into(),
            primary_span: span,
            labels: Vec::new(),
            notes: Vec::new(),
        }
    }

    /// Creates an error.
    pub fn error(code: DiagnosticCode, message: impl Into<String>, span: Span) -> Self {
        Self::with_severity(Severity::Error, code, message, span)
    }

    /// Creates a warning.
    pub fn warning(code: DiagnosticCode, message: impl Into<String>, span: Span) -> Self {
        Self::with_severity(Severity::Warning, code, message, span)
    }

    /// Adds a label.
    pub fn with_label(mut self, label: Label) -> Self {
        self.labels.push(label);
        self
    }

    /// Adds a note.
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }
}

//! Diagnostics emitted while building netlists.
//!
//! A [`Diagnostic`] carries a severity, a [`DiagnosticCode`], a message and a
//! source span. The [`DiagnosticSink`] collects them and owns the error
//! counter that tells the caller whether synthesis succeeded overall.
//! [`TerminalRenderer`] formats diagnostics for humans.

#![warn(missing_docs)]

pub mod code;
pub mod diagnostic;
pub mod renderer;
pub mod severity;
pub mod sink;

pub use code::{Category, DiagnosticCode};
pub use diagnostic::{Diagnostic, Label, LabelStyle};
pub use renderer::TerminalRenderer;
pub use severity::Severity;
pub use sink::DiagnosticSink;

//! Accumulator for emitted diagnostics and the design error counter.

use crate::diagnostic::Diagnostic;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

/// Collects diagnostics and counts errors.
///
/// The error count only ever grows; [`take_all`](Self::take_all) drains the
/// messages but leaves the count intact so the caller can still tell that
/// synthesis failed. Emission takes `&self` and is internally synchronized.
#[derive(Default)]
pub struct DiagnosticSink {
    diagnostics: Mutex<Vec<Diagnostic>>,
    error_count: AtomicUsize,
}

impl DiagnosticSink {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a diagnostic, counting it if it is an error.
    pub fn emit(&self, diag: Diagnostic) {
        if diag.severity.is_error() {
            self.error_count.fetch_add(1, Ordering::Relaxed);
        }
        self.diagnostics
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(diag);
    }

    /// Number of errors emitted so far.
    pub fn error_count(&self) -> usize {
        self.error_count.load(Ordering::Relaxed)
    }

    /// Returns `true` once any error was emitted.
    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }

    /// Snapshot of all diagnostics.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.diagnostics
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Drains all diagnostics.
    pub fn take_all(&self) -> Vec<Diagnostic> {
        let mut diagnostics = self
            .diagnostics
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        std::mem::take(&mut *diagnostics)
    }
}

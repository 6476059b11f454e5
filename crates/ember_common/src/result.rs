//! Internal error type for netlist-construction invariants.

/// Result of a fallible netlist operation.
///
/// `Err` signals that a caller broke a structural invariant (wiring buses of
/// different widths, touching a reclaimed bus). Problems in the user's design
/// are reported as diagnostics instead.
pub type EmberResult<T> = Result<T, InternalError>;

/// A violated netlist invariant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("internal netlist error: {message}")]
pub struct InternalError {
    /// Description of the violated invariant.
    pub message: String,
}

impl InternalError {
    /// Creates a new internal error.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<String> for InternalError {
    fn from(message: String) -> Self {
        Self { message }
    }
}

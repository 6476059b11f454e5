//! Per-node synthesis failures and their diagnostic codes.

use ember_common::InternalError;
use ember_diagnostics::{Category, DiagnosticCode};

/// `E301`: construct has no structural realization.
pub const UNSYNTHESIZABLE: DiagnosticCode = DiagnosticCode::new(Category::Error, 301);
/// `E302`: operand widths are incompatible.
pub const WIDTH_MISMATCH: DiagnosticCode = DiagnosticCode::new(Category::Error, 302);
/// `E303`: part-select bounds are reversed or out of range.
pub const BAD_PART_SELECT: DiagnosticCode = DiagnosticCode::new(Category::Error, 303);
/// `E304`: comparison cannot be built.
pub const INVALID_COMPARISON: DiagnosticCode = DiagnosticCode::new(Category::Error, 304);
/// `E305`: node width disagrees with its operands.
pub const DECLARED_WIDTH: DiagnosticCode = DiagnosticCode::new(Category::Error, 305);
/// `E399`: the netlist rejected an operation.
pub const INTERNAL: DiagnosticCode = DiagnosticCode::new(Category::Error, 399);

/// Why a node could not be synthesized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SynthError {
    /// An operand already failed and reported; nothing more to say.
    #[error("operand failed to synthesize")]
    OperandFailed,

    /// Division, modulus, function calls.
    #[error("cannot synthesize {construct}")]
    Unsynthesizable {
        /// What the construct is, e.g. `division`.
        construct: &'static str,
    },

    /// Real-valued literal.
    #[error("real constants are not synthesizable")]
    RealConstant,

    /// Bitwise operands of different widths.
    #[error("operands of `{op}` have different widths ({left} and {right} bits)")]
    BitwiseWidthMismatch {
        /// Operator token.
        op: &'static str,
        /// Left width.
        left: u32,
        /// Right width.
        right: u32,
    },

    /// Other operand pairs that must agree.
    #[error("{what} width mismatch ({left} and {right} bits)")]
    OperandWidthMismatch {
        /// Which operands, e.g. `conditional branch`.
        what: &'static str,
        /// First width.
        left: u32,
        /// Second width.
        right: u32,
    },

    /// Ternary select wider than one bit.
    #[error("condition is {0} bits wide, expected 1")]
    ConditionWidth(u32),

    /// `msb < lsb`.
    #[error("part-select [{msb}:{lsb}] is reversed")]
    ReversedPartSelect {
        /// Selected MSB.
        msb: u32,
        /// Selected LSB.
        lsb: u32,
    },

    /// `msb >= width`.
    #[error("part-select [{msb}:{lsb}] is outside a {width}-bit signal")]
    PartSelectOutOfRange {
        /// Selected MSB.
        msb: u32,
        /// Selected LSB.
        lsb: u32,
        /// Width of the referenced net.
        width: u32,
    },

    /// Shift value narrower than the result.
    #[error("shifted value has {actual} bits, result needs {declared}")]
    ShiftDataTooNarrow {
        /// Result width.
        declared: u32,
        /// Value width.
        actual: u32,
    },

    /// Node width disagrees with what its operands produce.
    #[error("expression is declared {declared} bits wide but produces {actual}")]
    DeclaredWidth {
        /// Width on the node.
        declared: u32,
        /// Width implied by the operands.
        actual: u32,
    },

    /// Comparison with an operand that has no bits.
    #[error("comparison operand has no bits")]
    InvalidComparison,

    /// Reduction or logical operand with no bits.
    #[error("operand of `{op}` has no bits")]
    EmptyOperand {
        /// Operator token.
        op: &'static str,
    },

    /// A netlist invariant was violated.
    #[error(transparent)]
    Internal(#[from] InternalError),
}

impl SynthError {
    /// Diagnostic code for this failure.
    pub fn code(&self) -> DiagnosticCode {
        match self {
            SynthError::Unsynthesizable { .. } | SynthError::RealConstant => UNSYNTHESIZABLE,
            SynthError::BitwiseWidthMismatch { .. }
            | SynthError::OperandWidthMismatch { .. }
            | SynthError::ConditionWidth(_)
            | SynthError::ShiftDataTooNarrow { .. }
            | SynthError::EmptyOperand { .. } => WIDTH_MISMATCH,
            SynthError::ReversedPartSelect { .. } | SynthError::PartSelectOutOfRange { .. } => {
                BAD_PART_SELECT
            }
            SynthError::InvalidComparison => INVALID_COMPARISON,
            SynthError::DeclaredWidth { .. } => DECLARED_WIDTH,
            SynthError::OperandFailed | SynthError::Internal(_) => INTERNAL,
        }
    }
}

/// Result of synthesizing one node.
pub type SynthResult<T> = Result<T, SynthError>;

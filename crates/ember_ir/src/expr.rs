//! Elaborated expression trees, the input of synthesis.
//!
//! Widths are already resolved: every node carries its declared result
//! width (comparison, logical and reduction nodes are always one bit).
//! Signal references point at nets of the [`Design`](crate::Design) they are
//! synthesized into.

use crate::ids::NetId;
use ember_common::{Ident, LogicVec};
use ember_source::Span;
use serde::{Deserialize, Serialize};

/// Add/subtract operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArithOp {
    /// `+`
    Add,
    /// `-`
    Sub,
}

/// Two-operand bitwise operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BitwiseOp {
    /// `&`
    And,
    /// `|`
    Or,
    /// `^`
    Xor,
    /// `~|`
    Nor,
    /// `~^`
    Xnor,
}

/// Relational operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompareOp {
    /// `<`
    Lt,
    /// `>`
    Gt,
    /// `<=`
    Le,
    /// `>=`
    Ge,
    /// `==`
    Eq,
    /// `!=`
    Ne,
    /// `===`
    CaseEq,
    /// `!==`
    CaseNe,
}

impl CompareOp {
    /// `==`, `!=`, `===` or `!==`.
    pub fn is_equality(self) -> bool {
        matches!(
            self,
            CompareOp::Eq | CompareOp::Ne | CompareOp::CaseEq | CompareOp::CaseNe
        )
    }

    /// `==` or `===`.
    pub fn is_positive_equality(self) -> bool {
        matches!(self, CompareOp::Eq | CompareOp::CaseEq)
    }
}

/// Division operator; never synthesizable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DivOp {
    /// `/`
    Div,
    /// `%`
    Mod,
}

/// Short-circuit logical operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LogicalOp {
    /// `&&`
    And,
    /// `||`
    Or,
}

/// Shift direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShiftOp {
    /// `<<`
    Left,
    /// `>>`
    Right,
}

/// Unary reduction operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReduceOp {
    /// `&`
    And,
    /// `|`
    Or,
    /// `^`
    Xor,
    /// `~&`
    Nand,
    /// `~|`
    Nor,
    /// `~^`
    Xnor,
    /// `!`
    LogicNot,
}

macro_rules! op_symbols {
    ($ty:ty { $($variant:ident => $sym:literal),* $(,)? }) => {
        impl $ty {
            /// Source-level operator token.
            pub fn symbol(self) -> &'static str {
                match self {
                    $(Self::$variant => $sym,)*
                }
            }
        }
    };
}

op_symbols!(ArithOp { Add => "+", Sub => "-" });
op_symbols!(BitwiseOp { And => "&", Or => "|", Xor => "^", Nor => "~|", Xnor => "~^" });
op_symbols!(CompareOp {
    Lt => "<", Gt => ">", Le => "<=", Ge => ">=",
    Eq => "==", Ne => "!=", CaseEq => "===", CaseNe => "!==",
});
op_symbols!(DivOp { Div => "/", Mod => "%" });
op_symbols!(LogicalOp { And => "&&", Or => "||" });
op_symbols!(ShiftOp { Left => "<<", Right => ">>" });
op_symbols!(ReduceOp {
    And => "&", Or => "|", Xor => "^", Nand => "~&", Nor => "~|", Xnor => "~^", LogicNot => "!",
});

/// An elaborated expression node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expr {
    /// `left + right`, `left - right`.
    Arith {
        /// Operator.
        op: ArithOp,
        /// Left operand.
        left: Box<Expr>,
        /// Right operand.
        right: Box<Expr>,
        /// Result width.
        width: u32,
        /// Source span.
        span: Span,
    },
    /// `left & right` and friends.
    Bitwise {
        /// Operator.
        op: BitwiseOp,
        /// Left operand.
        left: Box<Expr>,
        /// Right operand.
        right: Box<Expr>,
        /// Result width.
        width: u32,
        /// Source span.
        span: Span,
    },
    /// Relational comparison; one bit wide.
    Compare {
        /// Operator.
        op: CompareOp,
        /// Left operand.
        left: Box<Expr>,
        /// Right operand.
        right: Box<Expr>,
        /// Source span.
        span: Span,
    },
    /// `/` or `%`.
    Divide {
        /// Operator.
        op: DivOp,
        /// Dividend.
        left: Box<Expr>,
        /// Divisor.
        right: Box<Expr>,
        /// Result width.
        width: u32,
        /// Source span.
        span: Span,
    },
    /// `&&` or `||`; one bit wide.
    Logical {
        /// Operator.
        op: LogicalOp,
        /// Left operand.
        left: Box<Expr>,
        /// Right operand.
        right: Box<Expr>,
        /// Source span.
        span: Span,
    },
    /// `value << distance`, `value >> distance`.
    Shift {
        /// Direction.
        op: ShiftOp,
        /// Shifted value.
        value: Box<Expr>,
        /// Shift amount, sized independently.
        distance: Box<Expr>,
        /// Result width.
        width: u32,
        /// Source span.
        span: Span,
    },
    /// `{a, b, c}`; the first operand lands in the high bits.
    Concat {
        /// Operands, most significant first.
        operands: Vec<Expr>,
        /// Result width.
        width: u32,
        /// Source span.
        span: Span,
    },
    /// Sized integer literal.
    Const {
        /// Value; its width is the node width.
        value: LogicVec,
        /// Source span.
        span: Span,
    },
    /// Real literal.
    Real {
        /// Value.
        value: f64,
        /// Source span.
        span: Span,
    },
    /// `~operand`.
    Not {
        /// Operand.
        operand: Box<Expr>,
        /// Result width.
        width: u32,
        /// Source span.
        span: Span,
    },
    /// Reduction or `!`; one bit wide.
    Reduce {
        /// Operator.
        op: ReduceOp,
        /// Operand.
        operand: Box<Expr>,
        /// Source span.
        span: Span,
    },
    /// `condition ? true_val : false_val`.
    Ternary {
        /// One-bit select.
        condition: Box<Expr>,
        /// Value when the condition is 1.
        true_val: Box<Expr>,
        /// Value when the condition is 0.
        false_val: Box<Expr>,
        /// Result width.
        width: u32,
        /// Source span.
        span: Span,
    },
    /// `net[msb:lsb]`; a full-width reference has `msb = width-1`, `lsb = 0`.
    Signal {
        /// Referenced net.
        net: NetId,
        /// Most significant selected bit.
        msb: u32,
        /// Least significant selected bit.
        lsb: u32,
        /// Source span.
        span: Span,
    },
    /// Function or system task call.
    FuncCall {
        /// Callee name.
        name: Ident,
        /// Arguments.
        args: Vec<Expr>,
        /// Result width.
        width: u32,
        /// Source span.
        span: Span,
    },
}

impl Expr {
    /// Declared width of the node's result.
    pub fn width(&self) -> u32 {
        match self {
            Expr::Arith { width, .. }
            | Expr::Bitwise { width, .. }
            | Expr::Divide { width, .. }
            | Expr::Shift { width, .. }
            | Expr::Concat { width, .. }
            | Expr::Not { width, .. }
            | Expr::Ternary { width, .. }
            | Expr::FuncCall { width, .. } => *width,
            Expr::Compare { .. }
            | Expr::Logical { .. }
            | Expr::Reduce { .. }
            | Expr::Real { .. } => 1,
            Expr::Const { value, .. } => value.width(),
            Expr::Signal { msb, lsb, .. } => {
                if msb >= lsb {
                    msb - lsb + 1
                } else {
                    0
                }
            }
        }
    }

    /// Source span of the node.
    pub fn span(&self) -> Span {
        *self.span_slot()
    }

    /// Returns the node with its span replaced.
    pub fn with_span(mut self, span: Span) -> Self {
        *self.span_slot_mut() = span;
        self
    }

    fn span_slot(&self) -> &Span {
        match self {
            Expr::Arith { span, .. }
            | Expr::Bitwise { span, .. }
            | Expr::Compare { span, .. }
            | Expr::Divide { span, .. }
            | Expr::Logical { span, .. }
            | Expr::Shift { span, .. }
            | Expr::Concat { span, .. }
            | Expr::Const { span, .. }
            | Expr::Real { span, .. }
            | Expr::Not { span, .. }
            | Expr::Reduce { span, .. }
            | Expr::Ternary { span, .. }
            | Expr::Signal { span, .. }
            | Expr::FuncCall { span, .. } => span,
        }
    }

    fn span_slot_mut(&mut self) -> &mut Span {
        match self {
            Expr::Arith { span, .. }
            | Expr::Bitwise { span, .. }
            | Expr::Compare { span, .. }
            | Expr::Divide { span, .. }
            | Expr::Logical { span, .. }
            | Expr::Shift { span, .. }
            | Expr::Concat { span, .. }
            | Expr::Const { span, .. }
            | Expr::Real { span, .. }
            | Expr::Not { span, .. }
            | Expr::Reduce { span, .. }
            | Expr::Ternary { span, .. }
            | Expr::Signal { span, .. }
            | Expr::FuncCall { span, .. } => span,
        }
    }

    /// Short description used in diagnostics, e.g. `division`.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Expr::Arith { .. } => "arithmetic operator",
            Expr::Bitwise { .. } => "bitwise operator",
            Expr::Compare { .. } => "comparison",
            Expr::Divide { op: DivOp::Div, .. } => "division",
            Expr::Divide { op: DivOp::Mod, .. } => "modulus",
            Expr::Logical { .. } => "logical operator",
            Expr::Shift { .. } => "shift",
            Expr::Concat { .. } => "concatenation",
            Expr::Const { .. } => "integer constant",
            Expr::Real { .. } => "real constant",
            Expr::Not { .. } => "bitwise negation",
            Expr::Reduce { .. } => "reduction",
            Expr::Ternary { .. } => "conditional",
            Expr::Signal { .. } => "signal reference",
            Expr::FuncCall { .. } => "function call",
        }
    }

    /// The literal of a [`Const`](Expr::Const) node.
    pub fn as_const(&self) -> Option<&LogicVec> {
        match self {
            Expr::Const { value, .. } => Some(value),
            _ => None,
        }
    }

    /// Returns `true` for an integer literal whose bits are all zero.
    pub fn is_zero_const(&self) -> bool {
        self.as_const().is_some_and(LogicVec::is_all_zero)
    }

    // ---- construction helpers; spans default to `Span::DUMMY` ----

    /// Full-width reference to a `width`-bit net.
    pub fn signal(net: NetId, width: u32) -> Self {
        Expr::Signal {
            net,
            msb: width.saturating_sub(1),
            lsb: 0,
            span: Span::DUMMY,
        }
    }

    /// `net[msb:lsb]`.
    pub fn part_select(net: NetId, msb: u32, lsb: u32) -> Self {
        Expr::Signal {
            net,
            msb,
            lsb,
            span: Span::DUMMY,
        }
    }

    /// Integer literal.
    pub fn constant(value: LogicVec) -> Self {
        Expr::Const {
            value,
            span: Span::DUMMY,
        }
    }

    /// Real literal.
    pub fn real(value: f64) -> Self {
        Expr::Real {
            value,
            span: Span::DUMMY,
        }
    }

    /// Arithmetic node with the width of `left`.
    pub fn arith(op: ArithOp, left: Expr, right: Expr) -> Self {
        Expr::Arith {
            op,
            width: left.width(),
            left: Box::new(left),
            right: Box::new(right),
            span: Span::DUMMY,
        }
    }

    /// Bitwise node with the width of `left`.
    pub fn bitwise(op: BitwiseOp, left: Expr, right: Expr) -> Self {
        Expr::Bitwise {
            op,
            width: left.width(),
            left: Box::new(left),
            right: Box::new(right),
            span: Span::DUMMY,
        }
    }

    /// Comparison node.
    pub fn compare(op: CompareOp, left: Expr, right: Expr) -> Self {
        Expr::Compare {
            op,
            left: Box::new(left),
            right: Box::new(right),
            span: Span::DUMMY,
        }
    }

    /// Division node with the width of `left`.
    pub fn divide(op: DivOp, left: Expr, right: Expr) -> Self {
        Expr::Divide {
            op,
            width: left.width(),
            left: Box::new(left),
            right: Box::new(right),
            span: Span::DUMMY,
        }
    }

    /// Logical node.
    pub fn logical(op: LogicalOp, left: Expr, right: Expr) -> Self {
        Expr::Logical {
            op,
            left: Box::new(left),
            right: Box::new(right),
            span: Span::DUMMY,
        }
    }

    /// Shift node with the width of `value`.
    pub fn shift(op: ShiftOp, value: Expr, distance: Expr) -> Self {
        Expr::Shift {
            op,
            width: value.width(),
            value: Box::new(value),
            distance: Box::new(distance),
            span: Span::DUMMY,
        }
    }

    /// Concatenation whose width is the sum of its operands.
    pub fn concat(operands: Vec<Expr>) -> Self {
        Expr::Concat {
            width: operands.iter().map(Expr::width).sum(),
            operands,
            span: Span::DUMMY,
        }
    }

    /// Bitwise negation.
    pub fn not(operand: Expr) -> Self {
        Expr::Not {
            width: operand.width(),
            operand: Box::new(operand),
            span: Span::DUMMY,
        }
    }

    /// Reduction.
    pub fn reduce(op: ReduceOp, operand: Expr) -> Self {
        Expr::Reduce {
            op,
            operand: Box::new(operand),
            span: Span::DUMMY,
        }
    }

    /// Conditional with the width of `true_val`.
    pub fn ternary(condition: Expr, true_val: Expr, false_val: Expr) -> Self {
        Expr::Ternary {
            width: true_val.width(),
            condition: Box::new(condition),
            true_val: Box::new(true_val),
            false_val: Box::new(false_val),
            span: Span::DUMMY,
        }
    }

    /// Function call.
    pub fn func_call(name: Ident, args: Vec<Expr>, width: u32) -> Self {
        Expr::FuncCall {
            name,
            args,
            width,
            span: Span::DUMMY,
        }
    }
}

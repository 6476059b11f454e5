//! Verilog-like rendering of expression trees.
//!
//! Signal references are printed with the leaf name of their net, so a
//! diagnostic reads `(a & 4'b0000)` rather than a dotted hierarchy path.

use crate::design::Design;
use crate::expr::Expr;
use std::fmt;

/// [`Display`](fmt::Display) adapter pairing an expression with the design
/// that resolves its net names.
pub struct ExprDisplay<'e, 'a> {
    expr: &'e Expr,
    design: &'e Design<'a>,
}

impl<'e, 'a> ExprDisplay<'e, 'a> {
    /// Creates the adapter.
    pub fn new(expr: &'e Expr, design: &'e Design<'a>) -> Self {
        Self { expr, design }
    }

    fn child(&self, expr: &'e Expr) -> Self {
        Self::new(expr, self.design)
    }

    fn infix(&self, f: &mut fmt::Formatter<'_>, l: &'e Expr, op: &str, r: &'e Expr) -> fmt::Result {
        write!(f, "({} {op} {})", self.child(l), self.child(r))
    }
}

impl fmt::Display for ExprDisplay<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.expr {
            Expr::Arith { op, left, right, .. } => self.infix(f, left, op.symbol(), right),
            Expr::Bitwise { op, left, right, .. } => self.infix(f, left, op.symbol(), right),
            Expr::Compare { op, left, right, .. } => self.infix(f, left, op.symbol(), right),
            Expr::Divide { op, left, right, .. } => self.infix(f, left, op.symbol(), right),
            Expr::Logical { op, left, right, .. } => self.infix(f, left, op.symbol(), right),
            Expr::Shift {
                op,
                value,
                distance,
                ..
            } => self.infix(f, value, op.symbol(), distance),
            Expr::Concat { operands, .. } => {
                f.write_str("{")?;
                for (i, operand) in operands.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", self.child(operand))?;
                }
                f.write_str("}")
            }
            Expr::Const { value, .. } => f.write_str(&value.to_verilog()),
            Expr::Real { value, .. } => write!(f, "{value:?}"),
            Expr::Not { operand, .. } => write!(f, "~{}", self.child(operand)),
            Expr::Reduce { op, operand, .. } => write!(f, "{}{}", op.symbol(), self.child(operand)),
            Expr::Ternary {
                condition,
                true_val,
                false_val,
                ..
            } => write!(
                f,
                "{} ? {} : {}",
                self.child(condition),
                self.child(true_val),
                self.child(false_val)
            ),
            Expr::Signal { net, msb, lsb, .. } => match self.design.try_net(*net) {
                Some(n) => {
                    f.write_str(self.design.interner().basename(n.name))?;
                    if *lsb == 0 && msb + 1 == n.width() {
                        Ok(())
                    } else if msb == lsb {
                        write!(f, "[{msb}]")
                    } else {
                        write!(f, "[{msb}:{lsb}]")
                    }
                }
                None => write!(f, "<net {}>[{msb}:{lsb}]", net.as_raw()),
            },
            Expr::FuncCall { name, args, .. } => {
                write!(f, "{}(", self.design.interner().resolve(*name))?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", self.child(arg))?;
                }
                f.write_str(")")
            }
        }
    }
}

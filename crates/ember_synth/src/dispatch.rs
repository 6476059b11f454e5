//! Entry point, per-variant dispatch and failure reporting.

use crate::error::{SynthError, SynthResult};
use crate::{binary, compare, select, unary};
use ember_diagnostics::{Diagnostic, Label};
use ember_ir::{Design, Expr, NetId, ScopeId};
use tracing::{debug, trace};

/// Synthesizes `expr` into `design`, returning the net that carries its value.
///
/// On failure a diagnostic has been emitted (once, by the node that failed
/// for its own reasons) and `None` is returned.
#[tracing::instrument(level = "trace", skip_all, fields(kind = expr.kind_name()))]
pub fn synthesize(expr: &Expr, design: &mut Design<'_>) -> Option<NetId> {
    match synth_node(expr, design) {
        Ok(net) => Some(net),
        Err(SynthError::OperandFailed) => {
            trace!("operand failed");
            None
        }
        Err(err) => {
            report(expr, &err, design);
            None
        }
    }
}

fn synth_node(expr: &Expr, design: &mut Design<'_>) -> SynthResult<NetId> {
    let net = match expr {
        Expr::Arith {
            op, left, right, ..
        } => binary::arith(expr, *op, left, right, design)?,
        Expr::Bitwise {
            op, left, right, ..
        } => binary::bitwise(expr, *op, left, right, design)?,
        Expr::Compare {
            op, left, right, ..
        } => compare::compare(expr, *op, left, right, design)?,
        Expr::Logical {
            op, left, right, ..
        } => binary::logical(expr, *op, left, right, design)?,
        Expr::Shift {
            op,
            value,
            distance,
            ..
        } => binary::shift(expr, *op, value, distance, design)?,
        Expr::Concat { operands, .. } => select::concat(expr, operands, design)?,
        Expr::Const { value, span } => select::constant(value, *span, design)?,
        Expr::Not { operand, .. } => unary::not(expr, operand, design)?,
        Expr::Reduce { op, operand, .. } => unary::reduce(expr, *op, operand, design)?,
        Expr::Ternary {
            condition,
            true_val,
            false_val,
            ..
        } => select::ternary(expr, condition, true_val, false_val, design)?,
        Expr::Signal {
            net,
            msb,
            lsb,
            span,
        } => select::signal(*net, *msb, *lsb, *span, design)?,
        Expr::Divide { .. } | Expr::FuncCall { .. } => {
            return Err(SynthError::Unsynthesizable {
                construct: expr.kind_name(),
            })
        }
        Expr::Real { .. } => return Err(SynthError::RealConstant),
    };
    let (actual, _) = net_info(design, net)?;
    check_declared(expr, actual)?;
    Ok(net)
}

fn report(expr: &Expr, err: &SynthError, design: &Design<'_>) {
    let span = expr.span();
    debug!(code = %err.code(), %err, "synthesis failed");
    let mut diag = Diagnostic::error(err.code(), err.to_string(), span)
        .with_label(Label::primary(span, expr.kind_name()));
    match (err, expr) {
        (SynthError::BitwiseWidthMismatch { .. }, Expr::Bitwise { left, right, .. }) => {
            for operand in [left, right] {
                diag = diag.with_note(format!(
                    "width={}: {}",
                    operand.width(),
                    design.display_expr(operand)
                ));
            }
        }
        (SynthError::Internal(_), _) => {}
        _ => {
            diag = diag.with_note(format!("in `{}`", design.display_expr(expr)));
        }
    }
    design.emit(diag);
}

/// Synthesizes a required operand; a failed operand is silent upstream.
pub(crate) fn operand(expr: &Expr, design: &mut Design<'_>) -> SynthResult<NetId> {
    synthesize(expr, design).ok_or(SynthError::OperandFailed)
}

/// Synthesizes both operands before giving up on either.
pub(crate) fn operand_pair(
    left: &Expr,
    right: &Expr,
    design: &mut Design<'_>,
) -> SynthResult<(NetId, NetId)> {
    let l = synthesize(left, design);
    let r = synthesize(right, design);
    match (l, r) {
        (Some(l), Some(r)) => Ok((l, r)),
        _ => Err(SynthError::OperandFailed),
    }
}

/// Width and scope of a live net.
pub(crate) fn net_info(design: &Design<'_>, net: NetId) -> SynthResult<(u32, ScopeId)> {
    let n = design.try_net(net).ok_or_else(|| {
        SynthError::Internal(ember_common::InternalError::new(format!(
            "net {} was reclaimed while still in use",
            net.as_raw()
        )))
    })?;
    Ok((n.width(), n.scope))
}

/// Checks that a node's declared width matches what its operands produce.
pub(crate) fn check_declared(expr: &Expr, actual: u32) -> SynthResult<()> {
    let declared = expr.width();
    if declared == actual {
        Ok(())
    } else {
        Err(SynthError::DeclaredWidth { declared, actual })
    }
}

//! Relational operators.
//!
//! Comparisons against a literal zero that reduce to "any bit set" or "no
//! bit set" become a single reduction gate. Everything else zero-extends the
//! narrower operand and uses either a 1-bit XOR/XNOR or a comparator.

use crate::dispatch::{net_info, operand, operand_pair};
use crate::error::{SynthError, SynthResult};
use crate::pad::pad_to_width;
use ember_ir::{CompareFlag, CompareOp, Design, DeviceKind, Expr, GateKind, NetId, Terminal};
use tracing::trace;

/// The operand to reduce when `left op right` is a zero test, else `None`.
///
/// `x > 0` and `0 < x` are "any bit set"; the mirrored `x < 0` / `0 > x`
/// are not zero tests and go to the comparator.
fn zero_test_operand<'e>(op: CompareOp, left: &'e Expr, right: &'e Expr) -> Option<&'e Expr> {
    if right.is_zero_const() && (op.is_equality() || op == CompareOp::Gt) {
        Some(left)
    } else if left.is_zero_const() && (op.is_equality() || op == CompareOp::Lt) {
        Some(right)
    } else {
        None
    }
}

fn flag_for(op: CompareOp) -> CompareFlag {
    match op {
        CompareOp::Lt => CompareFlag::Alb,
        CompareOp::Gt => CompareFlag::Agb,
        CompareOp::Eq | CompareOp::CaseEq => CompareFlag::Aeb,
        CompareOp::Ge => CompareFlag::Ageb,
        CompareOp::Le => CompareFlag::Aleb,
        CompareOp::Ne | CompareOp::CaseNe => CompareFlag::Aneb,
    }
}

pub(crate) fn compare(
    expr: &Expr,
    op: CompareOp,
    left: &Expr,
    right: &Expr,
    design: &mut Design<'_>,
) -> SynthResult<NetId> {
    if design.config().zero_compare {
        if let Some(other) = zero_test_operand(op, left, right) {
            return zero_compare(expr, op, other, design);
        }
    }

    let (l, r) = operand_pair(left, right, design)?;
    let (lw, scope) = net_info(design, l)?;
    let (rw, _) = net_info(design, r)?;
    if lw == 0 || rw == 0 {
        return Err(SynthError::InvalidComparison);
    }
    let width = lw.max(rw);
    let span = expr.span();
    let l = pad_to_width(design, l, width, span)?;
    let r = pad_to_width(design, r, width, span)?;
    let out = design.new_temp_net(scope, 1, span);

    if width == 1 && op.is_equality() {
        let gate = if op.is_positive_equality() {
            GateKind::Xnor
        } else {
            GateKind::Xor
        };
        trace!(%gate, "single-bit equality");
        let dev = design.add_device(scope, DeviceKind::Logic { gate, pins: 3 }, span);
        design.wire(out, 0, dev, Terminal::Output)?;
        design.wire(l, 0, dev, Terminal::Input(0))?;
        design.wire(r, 0, dev, Terminal::Input(1))?;
        return Ok(out);
    }

    let dev = design.add_device(scope, DeviceKind::Compare { width }, span);
    for i in 0..width {
        design.wire(l, i, dev, Terminal::DataA(i))?;
        design.wire(r, i, dev, Terminal::DataB(i))?;
    }
    design.wire(out, 0, dev, Terminal::Flag(flag_for(op)))?;
    Ok(out)
}

/// `NOR` of all bits for `==`/`===`, `OR` for `!=`/`!==`/`> 0`.
fn zero_compare(
    expr: &Expr,
    op: CompareOp,
    other: &Expr,
    design: &mut Design<'_>,
) -> SynthResult<NetId> {
    let net = operand(other, design)?;
    let (width, scope) = net_info(design, net)?;
    if width == 0 {
        return Err(SynthError::InvalidComparison);
    }
    let gate = if op.is_positive_equality() {
        GateKind::Nor
    } else {
        GateKind::Or
    };
    trace!(%gate, width, "comparison against zero");
    let span = expr.span();
    let out = design.new_temp_net(scope, 1, span);
    let dev = design.add_device(
        scope,
        DeviceKind::Logic {
            gate,
            pins: width + 1,
        },
        span,
    );
    design.wire(out, 0, dev, Terminal::Output)?;
    for i in 0..width {
        design.wire(net, i, dev, Terminal::Input(i))?;
    }
    Ok(out)
}

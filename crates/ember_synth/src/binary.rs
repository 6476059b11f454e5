//! Two-operand operators: add/sub, bitwise, logical and shift.

use crate::dispatch::{check_declared, net_info, operand_pair};
use crate::error::{SynthError, SynthResult};
use ember_common::{Logic, LogicVec};
use ember_ir::{
    ArithOp, BitwiseOp, Design, DeviceKind, Expr, GateKind, LogicalOp, NetId, ScopeId, ShiftOp,
    Terminal,
};
use tracing::trace;

/// One add/subtract unit; `LPM_Direction` records which.
pub(crate) fn arith(
    expr: &Expr,
    op: ArithOp,
    left: &Expr,
    right: &Expr,
    design: &mut Design<'_>,
) -> SynthResult<NetId> {
    let (l, r) = operand_pair(left, right, design)?;
    let (width, scope) = net_info(design, l)?;
    let (rw, _) = net_info(design, r)?;
    if width != rw {
        return Err(SynthError::OperandWidthMismatch {
            what: "arithmetic operand",
            left: width,
            right: rw,
        });
    }
    check_declared(expr, width)?;

    let span = expr.span();
    let out = design.new_temp_net(scope, width, span);
    let dev = design.add_device(scope, DeviceKind::AddSub { width }, span);
    let direction = match op {
        ArithOp::Add => "ADD",
        ArithOp::Sub => "SUB",
    };
    design.set_attribute(dev, "LPM_Direction", direction);
    for i in 0..width {
        design.wire(l, i, dev, Terminal::DataA(i))?;
        design.wire(r, i, dev, Terminal::DataB(i))?;
        design.wire(out, i, dev, Terminal::Result(i))?;
    }
    Ok(out)
}

fn bitwise_gate(op: BitwiseOp) -> GateKind {
    match op {
        BitwiseOp::And => GateKind::And,
        BitwiseOp::Or => GateKind::Or,
        BitwiseOp::Xor => GateKind::Xor,
        BitwiseOp::Nor => GateKind::Nor,
        BitwiseOp::Xnor => GateKind::Xnor,
    }
}

/// One 3-pin gate per bit, except AND bits whose right side is constant.
pub(crate) fn bitwise(
    expr: &Expr,
    op: BitwiseOp,
    left: &Expr,
    right: &Expr,
    design: &mut Design<'_>,
) -> SynthResult<NetId> {
    let (l, r) = operand_pair(left, right, design)?;
    let (width, scope) = net_info(design, l)?;
    let (rw, _) = net_info(design, r)?;
    if width != rw {
        return Err(SynthError::BitwiseWidthMismatch {
            op: op.symbol(),
            left: width,
            right: rw,
        });
    }
    check_declared(expr, width)?;

    let span = expr.span();
    let fold = op == BitwiseOp::And && design.config().fold_constants;
    let out = design.new_temp_net(scope, width, span);
    for i in 0..width {
        let o_pin = design.net_pin(out, i)?;
        let l_pin = design.net_pin(l, i)?;
        let r_pin = design.net_pin(r, i)?;
        if fold {
            match design.driven_value(r_pin) {
                Some(Logic::Zero) => {
                    trace!(bit = i, "and with 0 tied to constant");
                    design.connect(o_pin, r_pin);
                    continue;
                }
                Some(Logic::One) => {
                    trace!(bit = i, "and with 1 passes left operand");
                    design.connect(o_pin, l_pin);
                    continue;
                }
                _ => {}
            }
        }
        let gate = design.add_device(
            scope,
            DeviceKind::Logic {
                gate: bitwise_gate(op),
                pins: 3,
            },
            span,
        );
        design.wire(out, i, gate, Terminal::Output)?;
        design.wire(l, i, gate, Terminal::Input(0))?;
        design.wire(r, i, gate, Terminal::Input(1))?;
    }
    Ok(out)
}

/// `||` is one wide OR gate; `&&` is a 2-input AND of the operands, each
/// first OR-reduced to one bit when wider.
pub(crate) fn logical(
    expr: &Expr,
    op: LogicalOp,
    left: &Expr,
    right: &Expr,
    design: &mut Design<'_>,
) -> SynthResult<NetId> {
    let (l, r) = operand_pair(left, right, design)?;
    let (lw, scope) = net_info(design, l)?;
    let (rw, _) = net_info(design, r)?;
    if lw == 0 || rw == 0 {
        return Err(SynthError::EmptyOperand { op: op.symbol() });
    }
    let span = expr.span();

    match op {
        LogicalOp::Or => {
            let out = design.new_temp_net(scope, 1, span);
            let gate = design.add_device(
                scope,
                DeviceKind::Logic {
                    gate: GateKind::Or,
                    pins: lw + rw + 1,
                },
                span,
            );
            design.wire(out, 0, gate, Terminal::Output)?;
            for i in 0..lw {
                design.wire(l, i, gate, Terminal::Input(i))?;
            }
            for i in 0..rw {
                design.wire(r, i, gate, Terminal::Input(lw + i))?;
            }
            Ok(out)
        }
        LogicalOp::And => {
            let l1 = truth_bit(l, lw, scope, expr, design)?;
            let r1 = truth_bit(r, rw, scope, expr, design)?;
            let out = design.new_temp_net(scope, 1, span);
            let gate = design.add_device(
                scope,
                DeviceKind::Logic {
                    gate: GateKind::And,
                    pins: 3,
                },
                span,
            );
            design.wire(out, 0, gate, Terminal::Output)?;
            design.wire(l1, 0, gate, Terminal::Input(0))?;
            design.wire(r1, 0, gate, Terminal::Input(1))?;
            Ok(out)
        }
    }
}

/// One-bit "is nonzero" of `net`: the net itself when already one bit.
fn truth_bit(
    net: NetId,
    width: u32,
    scope: ScopeId,
    expr: &Expr,
    design: &mut Design<'_>,
) -> SynthResult<NetId> {
    if width == 1 {
        return Ok(net);
    }
    let span = expr.span();
    let out = design.new_temp_net(scope, 1, span);
    let gate = design.add_device(
        scope,
        DeviceKind::Logic {
            gate: GateKind::Or,
            pins: width + 1,
        },
        span,
    );
    design.wire(out, 0, gate, Terminal::Output)?;
    for i in 0..width {
        design.wire(net, i, gate, Terminal::Input(i))?;
    }
    Ok(out)
}

/// A shifter plus a constant driver on its direction input.
pub(crate) fn shift(
    expr: &Expr,
    op: ShiftOp,
    value: &Expr,
    distance: &Expr,
    design: &mut Design<'_>,
) -> SynthResult<NetId> {
    let (v, d) = operand_pair(value, distance, design)?;
    let (vw, scope) = net_info(design, v)?;
    let (distance_width, _) = net_info(design, d)?;
    let width = expr.width();
    if vw < width {
        return Err(SynthError::ShiftDataTooNarrow {
            declared: width,
            actual: vw,
        });
    }

    let span = expr.span();
    let out = design.new_temp_net(scope, width, span);
    let dev = design.add_device(
        scope,
        DeviceKind::Shift {
            width,
            distance_width,
        },
        span,
    );
    for i in 0..width {
        design.wire(v, i, dev, Terminal::Data(i))?;
        design.wire(out, i, dev, Terminal::Result(i))?;
    }
    for i in 0..distance_width {
        design.wire(d, i, dev, Terminal::Distance(i))?;
    }

    let right = op == ShiftOp::Right;
    let dir = design.new_wire(scope, 1, span);
    let konst = design.add_device(
        scope,
        DeviceKind::Const {
            value: LogicVec::from_bool(right),
        },
        span,
    );
    design.wire(dir, 0, konst, Terminal::Value(0))?;
    design.wire(dir, 0, dev, Terminal::Direction)?;
    Ok(out)
}

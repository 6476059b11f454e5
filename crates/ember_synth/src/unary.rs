//! Bitwise negation and reductions.

use crate::dispatch::{check_declared, net_info, operand};
use crate::error::{SynthError, SynthResult};
use ember_ir::{Design, DeviceKind, Expr, GateKind, NetId, ReduceOp, Terminal};

/// One inverter per bit.
pub(crate) fn not(expr: &Expr, operand_expr: &Expr, design: &mut Design<'_>) -> SynthResult<NetId> {
    let input = operand(operand_expr, design)?;
    let (width, scope) = net_info(design, input)?;
    check_declared(expr, width)?;

    let span = expr.span();
    let out = design.new_temp_net(scope, width, span);
    for i in 0..width {
        let inv = design.add_device(
            scope,
            DeviceKind::Logic {
                gate: GateKind::Not,
                pins: 2,
            },
            span,
        );
        design.wire(out, i, inv, Terminal::Output)?;
        design.wire(input, i, inv, Terminal::Input(0))?;
    }
    Ok(out)
}

fn reduction_gate(op: ReduceOp) -> GateKind {
    match op {
        ReduceOp::And => GateKind::And,
        ReduceOp::Or => GateKind::Or,
        ReduceOp::Xor => GateKind::Xor,
        ReduceOp::Nand => GateKind::Nand,
        ReduceOp::Nor | ReduceOp::LogicNot => GateKind::Nor,
        ReduceOp::Xnor => GateKind::Xnor,
    }
}

/// One gate over every operand bit.
pub(crate) fn reduce(
    expr: &Expr,
    op: ReduceOp,
    operand_expr: &Expr,
    design: &mut Design<'_>,
) -> SynthResult<NetId> {
    let input = operand(operand_expr, design)?;
    let (width, scope) = net_info(design, input)?;
    if width == 0 {
        return Err(SynthError::EmptyOperand { op: op.symbol() });
    }

    let span = expr.span();
    let out = design.new_temp_net(scope, 1, span);
    let gate = design.add_device(
        scope,
        DeviceKind::Logic {
            gate: reduction_gate(op),
            pins: width + 1,
        },
        span,
    );
    design.wire(out, 0, gate, Terminal::Output)?;
    for i in 0..width {
        design.wire(input, i, gate, Terminal::Input(i))?;
    }
    Ok(out)
}

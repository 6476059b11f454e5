//! Constants, signal references, concatenation and the conditional operator.

use crate::dispatch::{check_declared, net_info, synthesize};
use crate::error::{SynthError, SynthResult};
use ember_common::{InternalError, LogicVec};
use ember_ir::{Design, DeviceKind, Expr, NetId, Terminal};
use ember_source::Span;
use tracing::trace;

/// A constant driver in the root scope.
pub(crate) fn constant(
    value: &LogicVec,
    span: Span,
    design: &mut Design<'_>,
) -> SynthResult<NetId> {
    let scope = design.root_scope();
    let width = value.width();
    let out = design.new_temp_net(scope, width, span);
    let dev = design.add_device(
        scope,
        DeviceKind::Const {
            value: value.clone(),
        },
        span,
    );
    for i in 0..width {
        design.wire(out, i, dev, Terminal::Value(i))?;
    }
    Ok(out)
}

/// The referenced net itself, or a new wire tied to the selected bits.
pub(crate) fn signal(
    net: NetId,
    msb: u32,
    lsb: u32,
    span: Span,
    design: &mut Design<'_>,
) -> SynthResult<NetId> {
    let (width, scope) = net_info(design, net)?;
    if msb < lsb {
        return Err(SynthError::ReversedPartSelect { msb, lsb });
    }
    if msb >= width {
        return Err(SynthError::PartSelectOutOfRange { msb, lsb, width });
    }
    if lsb == 0 && msb + 1 == width {
        return Ok(net);
    }

    let sel_width = msb - lsb + 1;
    let out = design.new_local_wire(scope, sel_width, span);
    for i in 0..sel_width {
        let a = design.net_pin(out, i)?;
        let b = design.net_pin(net, lsb + i)?;
        design.connect(a, b);
    }
    Ok(out)
}

/// Operands wired from the low end in reverse order, so the first operand
/// occupies the high bits.
pub(crate) fn concat(
    expr: &Expr,
    operands: &[Expr],
    design: &mut Design<'_>,
) -> SynthResult<NetId> {
    if operands.is_empty() {
        return Err(InternalError::new("concatenation without operands").into());
    }
    let nets: Vec<Option<NetId>> = operands.iter().map(|e| synthesize(e, design)).collect();
    let nets: Vec<NetId> = nets
        .into_iter()
        .collect::<Option<_>>()
        .ok_or(SynthError::OperandFailed)?;

    let mut widths = Vec::with_capacity(nets.len());
    for &net in &nets {
        widths.push(net_info(design, net)?.0);
    }
    let total: u32 = widths.iter().sum();
    check_declared(expr, total)?;

    let (_, scope) = net_info(design, nets[0])?;
    let out = design.new_temp_net(scope, total, expr.span());
    let mut offset = 0;
    for (&net, &width) in nets.iter().zip(&widths).rev() {
        for i in 0..width {
            let a = design.net_pin(out, offset + i)?;
            let b = design.net_pin(net, i)?;
            design.connect(a, b);
        }
        offset += width;
    }

    if design.config().reclaim_temporaries {
        for &net in &nets {
            if design.try_net(net).is_some_and(|n| n.is_reclaimable()) {
                trace!(net = net.as_raw(), "dropping concatenation operand");
                design.reclaim_net(net)?;
            }
        }
    }
    Ok(out)
}

/// A 2-way mux: the true branch on state 1, the false branch on state 0.
pub(crate) fn ternary(
    expr: &Expr,
    condition: &Expr,
    true_val: &Expr,
    false_val: &Expr,
    design: &mut Design<'_>,
) -> SynthResult<NetId> {
    let c = synthesize(condition, design);
    let t = synthesize(true_val, design);
    let f = synthesize(false_val, design);
    let (Some(c), Some(t), Some(f)) = (c, t, f) else {
        return Err(SynthError::OperandFailed);
    };

    let (cw, scope) = net_info(design, c)?;
    let (tw, _) = net_info(design, t)?;
    let (fw, _) = net_info(design, f)?;
    if cw != 1 {
        return Err(SynthError::ConditionWidth(cw));
    }
    if tw != fw {
        return Err(SynthError::OperandWidthMismatch {
            what: "conditional branch",
            left: tw,
            right: fw,
        });
    }
    check_declared(expr, tw)?;

    let span = expr.span();
    let out = design.new_temp_net(scope, tw, span);
    let mux = design.add_device(
        scope,
        DeviceKind::Mux {
            width: tw,
            size: 2,
            select_width: 1,
        },
        span,
    );
    for i in 0..tw {
        design.wire(out, i, mux, Terminal::Result(i))?;
        design.wire(t, i, mux, Terminal::MuxData { state: 1, bit: i })?;
        design.wire(f, i, mux, Terminal::MuxData { state: 0, bit: i })?;
    }
    design.wire(c, 0, mux, Terminal::Select(0))?;
    Ok(out)
}

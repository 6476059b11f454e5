//! Zero extension of a bus.

use ember_common::{EmberResult, InternalError, LogicVec};
use ember_ir::{Design, DeviceKind, NetId, Terminal};
use ember_source::Span;

/// Returns `net` widened to `width` bits with constant-zero high bits.
///
/// A net that is already wide enough is returned unchanged.
pub(crate) fn pad_to_width(
    design: &mut Design<'_>,
    net: NetId,
    width: u32,
    span: Span,
) -> EmberResult<NetId> {
    let (have, scope) = {
        let n = design
            .try_net(net)
            .ok_or_else(|| InternalError::new("padding a reclaimed net"))?;
        (n.width(), n.scope)
    };
    if have >= width {
        return Ok(net);
    }
    let padded = design.new_temp_net(scope, width, span);
    for i in 0..have {
        let a = design.net_pin(net, i)?;
        let b = design.net_pin(padded, i)?;
        design.connect(a, b);
    }
    let zero = design.add_device(
        scope,
        DeviceKind::Const {
            value: LogicVec::all_zero(width - have),
        },
        span,
    );
    for i in have..width {
        design.wire(padded, i, zero, Terminal::Value(i - have))?;
    }
    Ok(padded)
}

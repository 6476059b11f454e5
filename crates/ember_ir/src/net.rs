//! Signal buses.

use crate::ids::{NetId, PinId, ScopeId};
use crate::nexus::Drive;
use ember_common::Ident;
use ember_source::Span;
use serde::{Deserialize, Serialize};

/// How a net came to exist.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum NetKind {
    /// Declared or part-select wire.
    Wire,
    /// Declared variable; its pins count as driven.
    Reg,
    /// Compiler-made temporary.
    Implicit,
}

impl NetKind {
    /// Drive contributed by each pin of a net of this kind.
    pub fn pin_drive(self) -> Drive {
        match self {
            NetKind::Reg => Drive::Live,
            NetKind::Wire | NetKind::Implicit => Drive::Passive,
        }
    }
}

/// A named, fixed-width bus. Bit `i` is [`pins`](Self::pins)`[i]`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Net {
    /// ID in the design.
    pub id: NetId,
    /// Scope-qualified name.
    pub name: Ident,
    /// Owning scope.
    pub scope: ScopeId,
    /// Declared, variable or temporary.
    pub kind: NetKind,
    /// Temporary created during synthesis; eligible for reclamation.
    pub local: bool,
    /// One pin per bit, LSB first.
    pub pins: Vec<PinId>,
    /// Where the bus was declared or produced.
    pub span: Span,
    pub(crate) refs: u32,
}

impl Net {
    /// Number of bits.
    pub fn width(&self) -> u32 {
        self.pins.len() as u32
    }

    /// Pin of bit `bit`, if in range.
    pub fn pin(&self, bit: u32) -> Option<PinId> {
        self.pins.get(bit as usize).copied()
    }

    /// Outstanding references held by expressions or ports.
    pub fn refs(&self) -> u32 {
        self.refs
    }

    /// Returns `true` for a local net nobody references.
    pub fn is_reclaimable(&self) -> bool {
        self.local && self.refs == 0
    }
}

//! Naming scopes and fresh-name counters.

use crate::ids::ScopeId;
use ember_common::Ident;
use serde::{Deserialize, Serialize};

/// A level of the name hierarchy.
///
/// Generated names are `<scope path>.<prefix><n>`; wires and devices count
/// independently so both sequences are dense.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Scope {
    /// Full dotted path of the scope.
    pub name: Ident,
    /// Enclosing scope, `None` for the root.
    pub parent: Option<ScopeId>,
    pub(crate) next_wire: u32,
    pub(crate) next_device: u32,
}

impl Scope {
    pub(crate) fn new(name: Ident, parent: Option<ScopeId>) -> Self {
        Self {
            name,
            parent,
            next_wire: 0,
            next_device: 0,
        }
    }

    pub(crate) fn bump_wire(&mut self) -> u32 {
        let n = self.next_wire;
        self.next_wire += 1;
        n
    }

    pub(crate) fn bump_device(&mut self) -> u32 {
        let n = self.next_device;
        self.next_device += 1;
        n
    }
}

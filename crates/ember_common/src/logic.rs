//! Four-state bit values as seen on a connection point.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single 4-state logic value.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[repr(u8)]
pub enum Logic {
    /// Driven low.
    Zero = 0,
    /// Driven high.
    One = 1,
    /// Unknown.
    X = 2,
    /// High impedance (not driven).
    Z = 3,
}

impl Logic {
    /// Parses `0`, `1`, `x`/`X`, `z`/`Z`/`?`.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '0' => Some(Logic::Zero),
            '1' => Some(Logic::One),
            'x' | 'X' => Some(Logic::X),
            'z' | 'Z' | '?' => Some(Logic::Z),
            _ => None,
        }
    }

    /// Converts a boolean into `Zero`/`One`.
    pub fn from_bool(b: bool) -> Self {
        if b {
            Logic::One
        } else {
            Logic::Zero
        }
    }

    /// Returns `true` for `Zero` and `One`.
    pub fn is_definite(self) -> bool {
        matches!(self, Logic::Zero | Logic::One)
    }

    /// Resolves two constant drivers on one wire.
    ///
    /// A `Z` driver yields to the other driver. Any other disagreement has
    /// no single resolved value and returns `None`.
    pub fn resolve(self, other: Logic) -> Option<Logic> {
        match (self, other) {
            (a, b) if a == b => Some(a),
            (Logic::Z, v) | (v, Logic::Z) => Some(v),
            _ => None,
        }
    }
}

impl fmt::Display for Logic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = match self {
            Logic::Zero => '0',
            Logic::One => '1',
            Logic::X => 'x',
            Logic::Z => 'z',
        };
        write!(f, "{c}")
    }
}

//! Opaque ID newtypes for netlist entities.

use crate::arena::ArenaId;
use serde::{Deserialize, Serialize};

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Serialize, Deserialize)]
        pub struct $name(u32);

        impl $name {
            /// Creates an ID from a raw `u32` index.
            pub fn from_raw(index: u32) -> Self {
                Self(index)
            }

            /// Returns the raw `u32` index.
            pub fn as_raw(self) -> u32 {
                self.0
            }
        }

        impl ArenaId for $name {
            fn from_raw(index: u32) -> Self {
                Self(index)
            }

            fn as_raw(self) -> u32 {
                self.0
            }
        }
    };
}

define_id!(
    /// A signal bus in the design.
    NetId
);

define_id!(
    /// A device (primitive instance) in the design.
    DeviceId
);

define_id!(
    /// A naming scope.
    ScopeId
);

define_id!(
    /// One pin of a net or device; the unit tracked by
    /// [`Connectivity`](crate::nexus::Connectivity).
    PinId
);

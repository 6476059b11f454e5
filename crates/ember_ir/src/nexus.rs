//! Connection points: union-find over every pin in the design.
//!
//! Each pin starts in its own class. [`Connectivity::connect`] merges two
//! classes and folds their driver summaries, so the "all drivers constant"
//! and "driven value" queries stay answerable from the root alone.

use crate::ids::{DeviceId, NetId, PinId};
use ember_common::Logic;
use serde::{Deserialize, Serialize};

/// What a single pin contributes to its connection point.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum Drive {
    /// Listens only (device inputs, plain wires).
    Passive,
    /// Driven by logic whose value is not known here.
    Live,
    /// Driven by a constant.
    Const(Logic),
}

/// Summary of all drivers on one connection point.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum NexusDrive {
    /// No pin drives the point.
    Undriven,
    /// Every driver is constant and they resolve to this value.
    Const(Logic),
    /// At least one non-constant driver.
    Live,
    /// Constant drivers that disagree.
    Conflict,
}

impl NexusDrive {
    fn of(drive: Drive) -> Self {
        match drive {
            Drive::Passive => NexusDrive::Undriven,
            Drive::Live => NexusDrive::Live,
            Drive::Const(v) => NexusDrive::Const(v),
        }
    }

    /// Summary of the union of two connection points.
    pub fn merge(self, other: NexusDrive) -> NexusDrive {
        match (self, other) {
            (NexusDrive::Undriven, d) | (d, NexusDrive::Undriven) => d,
            (NexusDrive::Conflict, _) | (_, NexusDrive::Conflict) => NexusDrive::Conflict,
            (NexusDrive::Const(a), NexusDrive::Const(b)) => {
                a.resolve(b).map_or(NexusDrive::Conflict, NexusDrive::Const)
            }
            _ => NexusDrive::Live,
        }
    }
}

/// The entity a pin belongs to.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum PinOwner {
    /// Bit `bit` of a net.
    Net {
        /// Owning net.
        net: NetId,
        /// Bit index within the net.
        bit: u32,
    },
    /// Terminal `index` of a device.
    Device {
        /// Owning device.
        device: DeviceId,
        /// Positional pin index.
        index: u32,
    },
}

/// Union-find over pins with per-class driver summaries.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Connectivity {
    parent: Vec<u32>,
    size: Vec<u32>,
    drive: Vec<NexusDrive>,
    owners: Vec<PinOwner>,
}

impl Connectivity {
    /// Creates an empty pin set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new pin in a class of its own.
    pub fn add_pin(&mut self, owner: PinOwner, drive: Drive) -> PinId {
        let index = self.parent.len() as u32;
        self.parent.push(index);
        self.size.push(1);
        self.drive.push(NexusDrive::of(drive));
        self.owners.push(owner);
        PinId::from_raw(index)
    }

    /// Number of registered pins.
    pub fn pin_count(&self) -> usize {
        self.parent.len()
    }

    /// Owner of a pin.
    pub fn owner(&self, pin: PinId) -> PinOwner {
        self.owners[pin.as_raw() as usize]
    }

    /// Class representative, compressing the path on the way.
    pub fn find(&mut self, pin: PinId) -> PinId {
        let mut root = pin.as_raw();
        while self.parent[root as usize] != root {
            root = self.parent[root as usize];
        }
        let mut cur = pin.as_raw();
        while self.parent[cur as usize] != root {
            let next = self.parent[cur as usize];
            self.parent[cur as usize] = root;
            cur = next;
        }
        PinId::from_raw(root)
    }

    /// Class representative without mutation.
    pub fn root(&self, pin: PinId) -> PinId {
        let mut root = pin.as_raw();
        while self.parent[root as usize] != root {
            root = self.parent[root as usize];
        }
        PinId::from_raw(root)
    }

    /// Merges the classes of `a` and `b`.
    pub fn connect(&mut self, a: PinId, b: PinId) {
        let ra = self.find(a).as_raw() as usize;
        let rb = self.find(b).as_raw() as usize;
        if ra == rb {
            return;
        }
        let (big, small) = if self.size[ra] >= self.size[rb] {
            (ra, rb)
        } else {
            (rb, ra)
        };
        self.parent[small] = big as u32;
        self.size[big] += self.size[small];
        self.drive[big] = self.drive[big].merge(self.drive[small]);
    }

    /// Returns `true` if `a` and `b` share a connection point.
    pub fn same(&self, a: PinId, b: PinId) -> bool {
        self.root(a) == self.root(b)
    }

    /// Driver summary of the connection point containing `pin`.
    pub fn summary(&self, pin: PinId) -> NexusDrive {
        self.drive[self.root(pin).as_raw() as usize]
    }

    /// Returns `true` if the point has drivers and all of them are
    /// constant and agree. An undriven point is not constant.
    pub fn drivers_constant(&self, pin: PinId) -> bool {
        matches!(self.summary(pin), NexusDrive::Const(_))
    }

    /// The constant value on the point, if [`drivers_constant`](Self::drivers_constant).
    pub fn driven_value(&self, pin: PinId) -> Option<Logic> {
        match self.summary(pin) {
            NexusDrive::Const(v) => Some(v),
            _ => None,
        }
    }

    /// All pins sharing the connection point of `pin`, in registration order.
    pub fn members(&self, pin: PinId) -> Vec<PinId> {
        let root = self.root(pin);
        (0..self.parent.len() as u32)
            .map(PinId::from_raw)
            .filter(|&p| self.root(p) == root)
            .collect()
    }
}

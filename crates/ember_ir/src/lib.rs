//! Gate-level netlist model for the Ember expression synthesizer.
//!
//! A [`Design`] owns every [`Net`] (signal bus) and [`Device`] (primitive
//! instance) together with the [`Connectivity`] that groups their pins into
//! connection points. Expression trees ([`Expr`]) are the input that
//! `ember_synth` lowers into this model.

#![warn(missing_docs)]

pub mod arena;
pub mod design;
pub mod device;
pub mod expr;
pub mod ids;
pub mod net;
pub mod nexus;
pub mod printer;
pub mod scope;

pub use arena::{Arena, ArenaId};
pub use design::Design;
pub use device::{CompareFlag, Device, DeviceClass, DeviceKind, GateKind, Terminal};
pub use ember_config::SynthConfig;
pub use expr::{ArithOp, BitwiseOp, CompareOp, DivOp, Expr, LogicalOp, ReduceOp, ShiftOp};
pub use ids::{DeviceId, NetId, PinId, ScopeId};
pub use net::{Net, NetKind};
pub use nexus::{Connectivity, Drive, NexusDrive, PinOwner};
pub use printer::ExprDisplay;
pub use scope::Scope;

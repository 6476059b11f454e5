//! Expression synthesis: lowers elaborated [`Expr`](ember_ir::Expr) trees
//! into devices and nets of an [`ember_ir::Design`].
//!
//! [`synthesize`] walks the tree once, post-order. Each node either yields
//! the net carrying its value (exactly as wide as the node) or fails. A node
//! that fails for its own reasons emits one error diagnostic into the design;
//! a node that fails because an operand failed stays silent, so every broken
//! construct is counted once.
//!
//! A few operator-local shortcuts are applied while building, each switchable
//! through [`SynthConfig`](ember_ir::SynthConfig):
//!
//! - `fold_constants`: bits of `a & k` with a constant `k` bit become plain
//!   connections instead of AND gates.
//! - `zero_compare`: `x == 0`, `x != 0`, `x > 0` and `0 < x` build a single
//!   reduction gate instead of a comparator.
//! - `reclaim_temporaries`: unreferenced temporary operands of a
//!   concatenation are deleted once wired.

#![warn(missing_docs)]

mod binary;
mod compare;
mod dispatch;
pub mod error;
mod pad;
mod select;
mod unary;

pub use dispatch::synthesize;
pub use error::{SynthError, SynthResult};

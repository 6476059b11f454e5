//! Shared foundational types used across the Ember synthesis workspace.
//!
//! This crate provides interned identifiers with scope-path qualification,
//! 4-state logic values, packed constant vectors, and the internal error type.

#![warn(missing_docs)]

pub mod ident;
pub mod logic;
pub mod logic_vec;
pub mod result;

pub use ident::{Ident, Interner};
pub use logic::Logic;
pub use logic_vec::LogicVec;
pub use result::{EmberResult, InternalError};

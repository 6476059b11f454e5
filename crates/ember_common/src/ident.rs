//! Interned names for scopes, nets, and devices.
//!
//! Every name in a design is hierarchical (`top.alu._s3`). The [`Interner`]
//! stores full dotted paths so that equality of two qualified names is a
//! single integer comparison.

use lasso::ThreadedRodeo;
use serde::{Deserialize, Serialize};

/// Separator between the components of a hierarchical name.
pub const PATH_SEPARATOR: char = '.';

/// An interned, possibly hierarchical, name.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct Ident(u32);

impl Ident {
    /// Creates an `Ident` from a raw index. Intended for tests and deserialization.
    pub fn from_raw(index: u32) -> Self {
        Self(index)
    }

    /// Returns the raw index of this identifier.
    pub fn as_raw(self) -> u32 {
        self.0
    }
}

// SAFETY: `Ident` wraps a `u32`; `try_from_usize` rejects values that do not fit.
unsafe impl lasso::Key for Ident {
    fn into_usize(self) -> usize {
        self.0 as usize
    }

    fn try_from_usize(int: usize) -> Option<Self> {
        u32::try_from(int).ok().map(Ident)
    }
}

/// Thread-safe string interner backed by [`lasso::ThreadedRodeo`].
pub struct Interner {
    rodeo: ThreadedRodeo<Ident>,
}

impl Interner {
    /// Creates a new empty interner.
    pub fn new() -> Self {
        Self {
            rodeo: ThreadedRodeo::new(),
        }
    }

    /// Interns a string, returning the existing [`Ident`] if already present.
    pub fn get_or_intern(&self, s: &str) -> Ident {
        self.rodeo.get_or_intern(s)
    }

    /// Returns the [`Ident`] for `s` without interning it.
    pub fn get(&self, s: &str) -> Option<Ident> {
        self.rodeo.get(s)
    }

    /// Resolves an [`Ident`] back to its string.
    ///
    /// # Panics
    ///
    /// Panics if the `Ident` was not created by this interner.
    pub fn resolve(&self, ident: Ident) -> &str {
        self.rodeo.resolve(&ident)
    }

    /// Interns `leaf` qualified by the hierarchical path `parent`.
    ///
    /// `qualify(top.alu, "_s3")` yields `top.alu._s3`.
    pub fn qualify(&self, parent: Ident, leaf: &str) -> Ident {
        let path = format!("{}{PATH_SEPARATOR}{leaf}", self.resolve(parent));
        self.get_or_intern(&path)
    }

    /// Returns the last component of a hierarchical name.
    pub fn basename(&self, ident: Ident) -> &str {
        let full = self.resolve(ident);
        match full.rfind(PATH_SEPARATOR) {
            Some(pos) => &full[pos + 1..],
            None => full,
        }
    }
}

impl Default for Interner {
    fn default() -> Self {
        Self::new()
    }
}

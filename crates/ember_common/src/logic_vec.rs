//! Packed constant vectors driven by constant devices.

use crate::logic::Logic;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Logic values per storage word (2 bits each).
const VALUES_PER_WORD: u32 = 32;

/// A fixed-width vector of [`Logic`] values, bit 0 least significant.
///
/// Used as the literal held by integer constants and constant-driver devices.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LogicVec {
    width: u32,
    data: Vec<u64>,
}

impl LogicVec {
    /// Creates a vector of the given width with every bit `Zero`.
    pub fn all_zero(width: u32) -> Self {
        Self {
            width,
            data: vec![0; width.div_ceil(VALUES_PER_WORD) as usize],
        }
    }

    /// Creates a vector of the given width with every bit set to `value`.
    pub fn filled(width: u32, value: Logic) -> Self {
        let mut v = Self::all_zero(width);
        for i in 0..width {
            v.set(i, value);
        }
        v
    }

    /// Creates a one-bit vector.
    pub fn from_bool(value: bool) -> Self {
        Self::filled(1, Logic::from_bool(value))
    }

    /// Creates a vector from the low `width` bits of `value`.
    pub fn from_u64(value: u64, width: u32) -> Self {
        let mut v = Self::all_zero(width);
        for i in 0..width.min(64) {
            if (value >> i) & 1 != 0 {
                v.set(i, Logic::One);
            }
        }
        v
    }

    /// Parses a binary string, most significant bit first (`"10xz"`).
    ///
    /// Underscores are ignored as digit separators.
    pub fn from_binary_str(s: &str) -> Option<Self> {
        let digits: Vec<char> = s.chars().filter(|&c| c != '_').collect();
        let mut v = Self::all_zero(digits.len() as u32);
        for (i, c) in digits.iter().rev().enumerate() {
            v.set(i as u32, Logic::from_char(*c)?);
        }
        Some(v)
    }

    /// Number of bits.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns bit `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.width()`.
    pub fn get(&self, index: u32) -> Logic {
        assert!(
            index < self.width,
            "bit {index} out of range for width {}",
            self.width
        );
        let (word, shift) = locate(index);
        match (self.data[word] >> shift) & 0b11 {
            0 => Logic::Zero,
            1 => Logic::One,
            2 => Logic::X,
            _ => Logic::Z,
        }
    }

    /// Sets bit `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.width()`.
    pub fn set(&mut self, index: u32, value: Logic) {
        assert!(
            index < self.width,
            "bit {index} out of range for width {}",
            self.width
        );
        let (word, shift) = locate(index);
        self.data[word] = (self.data[word] & !(0b11u64 << shift)) | ((value as u64) << shift);
    }

    /// Iterates bits from least to most significant.
    pub fn bits(&self) -> impl Iterator<Item = Logic> + '_ {
        (0..self.width).map(|i| self.get(i))
    }

    /// Returns `true` if every bit is `Zero` (an empty vector counts as zero).
    pub fn is_all_zero(&self) -> bool {
        self.bits().all(|b| b == Logic::Zero)
    }

    /// Converts to `u64` if all bits are definite and the width fits.
    pub fn to_u64(&self) -> Option<u64> {
        if self.width > 64 {
            return None;
        }
        let mut out = 0u64;
        for (i, bit) in self.bits().enumerate() {
            match bit {
                Logic::Zero => {}
                Logic::One => out |= 1 << i,
                Logic::X | Logic::Z => return None,
            }
        }
        Some(out)
    }

    /// Returns a copy widened to `width` with zero high bits, or truncated
    /// if `width` is narrower.
    pub fn resized(&self, width: u32) -> Self {
        let mut v = Self::all_zero(width);
        for i in 0..width.min(self.width) {
            v.set(i, self.get(i));
        }
        v
    }

    /// Formats as a sized Verilog binary literal, e.g. `4'b0000`.
    pub fn to_verilog(&self) -> String {
        format!("{}'b{self}", self.width)
    }
}

fn locate(index: u32) -> (usize, u32) {
    ((index / VALUES_PER_WORD) as usize, (index % VALUES_PER_WORD) * 2)
}

impl fmt::Display for LogicVec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in (0..self.width).rev() {
            write!(f, "{}", self.get(i))?;
        }
        Ok(())
    }
}

impl fmt::Debug for LogicVec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LogicVec({})", self.to_verilog())
    }
}

//! Primitive devices and their terminal layouts.
//!
//! Every device kind has a fixed positional pin layout. [`Terminal`] names a
//! pin symbolically; [`DeviceKind::index_of`] and [`DeviceKind::terminal_at`]
//! translate between the two so that callers never compute offsets by hand.
//!
//! | kind    | layout                                                          |
//! |---------|-----------------------------------------------------------------|
//! | logic   | `O`, `I0`..`In-2`                                               |
//! | add/sub | `DataA[w]`, `DataB[w]`, `Result[w]`                             |
//! | compare | `DataA[w]`, `DataB[w]`, `ALB`, `AGB`, `AEB`, `AGEB`, `ALEB`, `ANEB` |
//! | shift   | `Direction`, `Data[w]`, `Distance[d]`, `Result[w]`              |
//! | mux     | `Result[w]`, `Data[s][w]` per state, `Sel[k]`                   |
//! | const   | `Value[w]`                                                      |

use crate::ids::{DeviceId, PinId, ScopeId};
use crate::nexus::Drive;
use ember_common::{Ident, LogicVec};
use ember_source::Span;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Boolean function of a logic gate.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum GateKind {
    /// AND.
    And,
    /// OR.
    Or,
    /// XOR.
    Xor,
    /// NAND.
    Nand,
    /// NOR.
    Nor,
    /// XNOR.
    Xnor,
    /// Inverter; always two pins.
    Not,
}

impl fmt::Display for GateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            GateKind::And => "and",
            GateKind::Or => "or",
            GateKind::Xor => "xor",
            GateKind::Nand => "nand",
            GateKind::Nor => "nor",
            GateKind::Xnor => "xnor",
            GateKind::Not => "not",
        };
        f.write_str(s)
    }
}

/// Result terminals of a comparator.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum CompareFlag {
    /// `A < B`.
    Alb,
    /// `A > B`.
    Agb,
    /// `A == B`.
    Aeb,
    /// `A >= B`.
    Ageb,
    /// `A <= B`.
    Aleb,
    /// `A != B`.
    Aneb,
}

impl CompareFlag {
    /// All flags in pin order.
    pub const ALL: [CompareFlag; 6] = [
        CompareFlag::Alb,
        CompareFlag::Agb,
        CompareFlag::Aeb,
        CompareFlag::Ageb,
        CompareFlag::Aleb,
        CompareFlag::Aneb,
    ];

    fn offset(self) -> u32 {
        match self {
            CompareFlag::Alb => 0,
            CompareFlag::Agb => 1,
            CompareFlag::Aeb => 2,
            CompareFlag::Ageb => 3,
            CompareFlag::Aleb => 4,
            CompareFlag::Aneb => 5,
        }
    }
}

impl fmt::Display for CompareFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CompareFlag::Alb => "ALB",
            CompareFlag::Agb => "AGB",
            CompareFlag::Aeb => "AEB",
            CompareFlag::Ageb => "AGEB",
            CompareFlag::Aleb => "ALEB",
            CompareFlag::Aneb => "ANEB",
        };
        f.write_str(s)
    }
}

/// A named device terminal.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum Terminal {
    /// Gate output.
    Output,
    /// Gate input `n`.
    Input(u32),
    /// First operand bit.
    DataA(u32),
    /// Second operand bit.
    DataB(u32),
    /// Result bit of an add/sub unit, shifter or mux.
    Result(u32),
    /// Comparator output.
    Flag(CompareFlag),
    /// Shift direction input (1 = right).
    Direction,
    /// Shifter data bit.
    Data(u32),
    /// Shift distance bit.
    Distance(u32),
    /// Mux data bit `bit` of input state `state`.
    MuxData {
        /// Select value that routes this input.
        state: u32,
        /// Bit index.
        bit: u32,
    },
    /// Mux select bit.
    Select(u32),
    /// Constant driver bit.
    Value(u32),
}

impl fmt::Display for Terminal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Terminal::Output => write!(f, "O"),
            Terminal::Input(n) => write!(f, "I{n}"),
            Terminal::DataA(i) => write!(f, "DataA[{i}]"),
            Terminal::DataB(i) => write!(f, "DataB[{i}]"),
            Terminal::Result(i) => write!(f, "Result[{i}]"),
            Terminal::Flag(flag) => write!(f, "{flag}"),
            Terminal::Direction => write!(f, "Direction"),
            Terminal::Data(i) => write!(f, "Data[{i}]"),
            Terminal::Distance(i) => write!(f, "Distance[{i}]"),
            Terminal::MuxData { state, bit } => write!(f, "Data[{state}][{bit}]"),
            Terminal::Select(i) => write!(f, "Sel[{i}]"),
            Terminal::Value(i) => write!(f, "Value[{i}]"),
        }
    }
}

/// Coarse device category, used for counting.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum DeviceClass {
    /// Logic gate.
    Logic,
    /// Add/subtract unit.
    AddSub,
    /// Magnitude/equality comparator.
    Compare,
    /// Barrel shifter.
    Shift,
    /// Multiplexer.
    Mux,
    /// Constant driver.
    Const,
}

/// Primitive kind plus its sizing parameters.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum DeviceKind {
    /// Gate with `pins` total pins (one output).
    Logic {
        /// Boolean function.
        gate: GateKind,
        /// Total pin count, output included.
        pins: u32,
    },
    /// `width`-bit adder/subtractor; direction is the `LPM_Direction` attribute.
    AddSub {
        /// Operand and result width.
        width: u32,
    },
    /// `width`-bit comparator.
    Compare {
        /// Operand width.
        width: u32,
    },
    /// Combinational shifter.
    Shift {
        /// Data and result width.
        width: u32,
        /// Distance operand width.
        distance_width: u32,
    },
    /// `size`-way multiplexer.
    Mux {
        /// Data and result width.
        width: u32,
        /// Number of input states.
        size: u32,
        /// Select width.
        select_width: u32,
    },
    /// Drives a fixed value.
    Const {
        /// Driven value, one pin per bit.
        value: LogicVec,
    },
}

impl DeviceKind {
    /// Coarse category.
    pub fn class(&self) -> DeviceClass {
        match self {
            DeviceKind::Logic { .. } => DeviceClass::Logic,
            DeviceKind::AddSub { .. } => DeviceClass::AddSub,
            DeviceKind::Compare { .. } => DeviceClass::Compare,
            DeviceKind::Shift { .. } => DeviceClass::Shift,
            DeviceKind::Mux { .. } => DeviceClass::Mux,
            DeviceKind::Const { .. } => DeviceClass::Const,
        }
    }

    /// Total number of pins.
    pub fn pin_count(&self) -> u32 {
        match *self {
            DeviceKind::Logic { pins, .. } => pins,
            DeviceKind::AddSub { width } => 3 * width,
            DeviceKind::Compare { width } => 2 * width + 6,
            DeviceKind::Shift {
                width,
                distance_width,
            } => 1 + 2 * width + distance_width,
            DeviceKind::Mux {
                width,
                size,
                select_width,
            } => width + size * width + select_width,
            DeviceKind::Const { ref value } => value.width(),
        }
    }

    /// Positional index of `terminal`, or `None` if this kind has no such pin.
    pub fn index_of(&self, terminal: Terminal) -> Option<u32> {
        let index = match (self, terminal) {
            (DeviceKind::Logic { .. }, Terminal::Output) => 0,
            (DeviceKind::Logic { .. }, Terminal::Input(n)) => n + 1,
            (DeviceKind::AddSub { width } | DeviceKind::Compare { width }, t) => match t {
                Terminal::DataA(i) if i < *width => i,
                Terminal::DataB(i) if i < *width => width + i,
                Terminal::Result(i) if i < *width && self.class() == DeviceClass::AddSub => {
                    2 * width + i
                }
                Terminal::Flag(flag) if self.class() == DeviceClass::Compare => {
                    2 * width + flag.offset()
                }
                _ => return None,
            },
            (
                DeviceKind::Shift {
                    width,
                    distance_width,
                },
                t,
            ) => match t {
                Terminal::Direction => 0,
                Terminal::Data(i) if i < *width => 1 + i,
                Terminal::Distance(i) if i < *distance_width => 1 + width + i,
                Terminal::Result(i) if i < *width => 1 + width + distance_width + i,
                _ => return None,
            },
            (
                DeviceKind::Mux {
                    width,
                    size,
                    select_width,
                },
                t,
            ) => match t {
                Terminal::Result(i) if i < *width => i,
                Terminal::MuxData { state, bit } if state < *size && bit < *width => {
                    width + state * width + bit
                }
                Terminal::Select(i) if i < *select_width => width + size * width + i,
                _ => return None,
            },
            (DeviceKind::Const { .. }, Terminal::Value(i)) => i,
            _ => return None,
        };
        (index < self.pin_count()).then_some(index)
    }

    /// Terminal at positional `index`.
    pub fn terminal_at(&self, index: u32) -> Option<Terminal> {
        if index >= self.pin_count() {
            return None;
        }
        let terminal = match *self {
            DeviceKind::Logic { .. } => match index {
                0 => Terminal::Output,
                n => Terminal::Input(n - 1),
            },
            DeviceKind::AddSub { width } => match index / width {
                0 => Terminal::DataA(index),
                1 => Terminal::DataB(index - width),
                _ => Terminal::Result(index - 2 * width),
            },
            DeviceKind::Compare { width } => {
                if index < width {
                    Terminal::DataA(index)
                } else if index < 2 * width {
                    Terminal::DataB(index - width)
                } else {
                    Terminal::Flag(CompareFlag::ALL[(index - 2 * width) as usize])
                }
            }
            DeviceKind::Shift {
                width,
                distance_width,
            } => {
                if index == 0 {
                    Terminal::Direction
                } else if index <= width {
                    Terminal::Data(index - 1)
                } else if index <= width + distance_width {
                    Terminal::Distance(index - 1 - width)
                } else {
                    Terminal::Result(index - 1 - width - distance_width)
                }
            }
            DeviceKind::Mux { width, size, .. } => {
                if index < width {
                    Terminal::Result(index)
                } else if index < width + size * width {
                    let rel = index - width;
                    Terminal::MuxData {
                        state: rel / width,
                        bit: rel % width,
                    }
                } else {
                    Terminal::Select(index - width - size * width)
                }
            }
            DeviceKind::Const { .. } => Terminal::Value(index),
        };
        Some(terminal)
    }

    /// What pin `index` contributes to its connection point.
    pub fn pin_drive(&self, index: u32) -> Drive {
        match (self, self.terminal_at(index)) {
            (DeviceKind::Const { value }, Some(Terminal::Value(i))) => Drive::Const(value.get(i)),
            (_, Some(Terminal::Output | Terminal::Result(_) | Terminal::Flag(_))) => Drive::Live,
            _ => Drive::Passive,
        }
    }
}

impl fmt::Display for DeviceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeviceKind::Logic { gate, pins } => write!(f, "{gate}/{pins}"),
            DeviceKind::AddSub { width } => write!(f, "add_sub[{width}]"),
            DeviceKind::Compare { width } => write!(f, "compare[{width}]"),
            DeviceKind::Shift {
                width,
                distance_width,
            } => write!(f, "shift[{width}, {distance_width}]"),
            DeviceKind::Mux { width, size, .. } => write!(f, "mux[{width}]x{size}"),
            DeviceKind::Const { value } => write!(f, "const {}", value.to_verilog()),
        }
    }
}

/// An instance of a primitive in the design.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Device {
    /// ID in the design.
    pub id: DeviceId,
    /// Scope-qualified instance name.
    pub name: Ident,
    /// Owning scope.
    pub scope: ScopeId,
    /// Primitive and sizing.
    pub kind: DeviceKind,
    /// Positional pins, see [`DeviceKind::terminal_at`].
    pub pins: Vec<PinId>,
    /// Key/value attributes such as `LPM_Direction`.
    pub attributes: Vec<(Ident, String)>,
    /// Expression this device was built for.
    pub span: Span,
}

impl Device {
    /// Pin of `terminal`, or `None` if the kind has no such terminal.
    pub fn terminal(&self, terminal: Terminal) -> Option<PinId> {
        let index = self.kind.index_of(terminal)?;
        self.pins.get(index as usize).copied()
    }

    /// Sets or replaces an attribute.
    pub fn set_attribute(&mut self, key: Ident, value: impl Into<String>) {
        let value = value.into();
        match self.attributes.iter_mut().find(|(k, _)| *k == key) {
            Some((_, v)) => *v = value,
            None => self.attributes.push((key, value)),
        }
    }

    /// Value of an attribute.
    pub fn attribute(&self, key: Ident) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }
}

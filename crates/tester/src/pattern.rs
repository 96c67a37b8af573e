//! Deterministic fill patterns
//!
//! A pattern is an arithmetic byte sequence over the columns of a row:
//! `value(c) = start + delta·c (mod 256)`. Eight-bit wraparound is defined
//! behavior, not an error — the "+1" program relies on it.

use crate::addr::ColAddr;

/// A (start, delta) fill pattern. The same value must drive a row's write
/// sweep and its verify sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Pattern {
    /// Value at column 0.
    pub start: u8,
    /// Added per column, wrapping.
    pub delta: u8,
}

impl Pattern {
    /// A constant fill.
    pub const fn solid(value: u8) -> Self {
        Self {
            start: value,
            delta: 0,
        }
    }

    /// Expected cell value at `col`.
    pub const fn expected(self, col: ColAddr) -> u8 {
        self.start.wrapping_add(self.delta.wrapping_mul(col.get()))
    }
}

/// A pattern with its display banner.
#[derive(Debug, Clone, Copy)]
pub struct NamedPattern {
    /// Banner for display line 1 (≤ 16 characters).
    pub name: &'static str,
    /// The fill.
    pub pattern: Pattern,
}

/// The full-test program: five sweeps, in the order the rig always ran
/// them. Solid fills catch stuck cells, the alternating bit fills catch
/// pattern sensitivity, the "+1" ramp catches address decoding faults.
pub const PATTERN_SUITE: [NamedPattern; 5] = [
    NamedPattern {
        name: "All 0's",
        pattern: Pattern::solid(0x00),
    },
    NamedPattern {
        name: "All 1's",
        pattern: Pattern::solid(0xFF),
    },
    NamedPattern {
        name: "0x55 pattern",
        pattern: Pattern::solid(0x55),
    },
    NamedPattern {
        name: "0xAA pattern",
        pattern: Pattern::solid(0xAA),
    },
    NamedPattern {
        name: "+1 pattern",
        pattern: Pattern {
            start: 0xAA,
            delta: 1,
        },
    },
];

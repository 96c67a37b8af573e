//! Row and column address newtypes
//!
//! Both spaces are 7-bit on a 4116-class part. The newtypes keep a bus byte
//! from being mistaken for a validated address: `new` masks into range the
//! way the part's latch would, `try_new` rejects instead.

use platform::bus::{ADDRESS_MASK, ROW_COUNT, ROW_SIZE};

/// Error for an address outside the 7-bit space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AddressOutOfRange;

impl core::fmt::Display for AddressOutOfRange {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "address outside the 7-bit row/column space")
    }
}

/// Physical row address, `[0, ROW_COUNT)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RowAddr(u8);

impl RowAddr {
    /// Mask `value` into range (hardware-latch semantics).
    pub const fn new(value: u8) -> Self {
        Self(value & ADDRESS_MASK)
    }

    /// Reject values outside `[0, ROW_COUNT)`.
    pub const fn try_new(value: u8) -> Result<Self, AddressOutOfRange> {
        if value as usize >= ROW_COUNT {
            Err(AddressOutOfRange)
        } else {
            Ok(Self(value))
        }
    }

    /// Raw 7-bit value.
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Next row, wrapping modulo `ROW_COUNT`.
    pub const fn wrapping_next(self) -> Self {
        Self::new(self.0.wrapping_add(1))
    }

    /// Row `n` places ahead, wrapping modulo `ROW_COUNT`.
    pub const fn wrapping_offset(self, n: u8) -> Self {
        Self::new(self.0.wrapping_add(n))
    }

    /// All rows in ascending order.
    pub fn all() -> impl Iterator<Item = Self> {
        (0..ROW_COUNT as u8).map(Self::new)
    }
}

impl core::fmt::Display for RowAddr {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Column address within an open row, `[0, ROW_SIZE)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ColAddr(u8);

impl ColAddr {
    /// Mask `value` into range (hardware-latch semantics).
    pub const fn new(value: u8) -> Self {
        Self(value & ADDRESS_MASK)
    }

    /// Reject values outside `[0, ROW_SIZE)`.
    pub const fn try_new(value: u8) -> Result<Self, AddressOutOfRange> {
        if value as usize >= ROW_SIZE {
            Err(AddressOutOfRange)
        } else {
            Ok(Self(value))
        }
    }

    /// Raw 7-bit value.
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Columns from `self` to the end of the row, ascending.
    pub fn to_row_end(self) -> impl Iterator<Item = Self> {
        (self.0..ROW_SIZE as u8).map(Self::new)
    }

    /// All columns in ascending order.
    pub fn all() -> impl Iterator<Item = Self> {
        Self::new(0).to_row_end()
    }
}

impl core::fmt::Display for ColAddr {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

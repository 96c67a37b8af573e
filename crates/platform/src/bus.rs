//! Multiplexed DRAM bus abstraction
//!
//! A 4116-class part shares one 7-bit address bus between row and column
//! addresses: the address presented while RAS falls is latched as the row,
//! the address presented while CAS falls is latched as the column. The data
//! bus is bidirectional (DI and DO are shorted on the tested boards), so the
//! controller must tri-state its drivers outside of write cycles.
//!
//! Implementations are a pure port driver: they move levels onto wires and
//! sample them back, nothing more. No failure is signalled at this layer —
//! a wrong *ordering* of calls corrupts data on the real part instead, which
//! is why the sequencing discipline lives one layer up in `tester::cell_io`.

/// Number of rows in the tested bank (7-bit row address).
pub const ROW_COUNT: usize = 128;

/// Number of cells per row (7-bit column address).
pub const ROW_SIZE: usize = 128;

/// Mask reducing a bus byte to the 7 address bits the part latches.
pub const ADDRESS_MASK: u8 = 0x7F;

/// Logic level on a strobe line.
///
/// All three strobes are active-low: `Low` asserts, `High` releases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinState {
    /// High (logic 1) — strobe released
    High,
    /// Low (logic 0) — strobe asserted
    Low,
}

impl From<bool> for PinState {
    fn from(value: bool) -> Self {
        if value {
            Self::High
        } else {
            Self::Low
        }
    }
}

impl From<PinState> for bool {
    fn from(value: PinState) -> Self {
        matches!(value, PinState::High)
    }
}

/// The three strobe lines of the 4116 protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Strobe {
    /// RAS — latches the presented address as a row and opens its sense
    /// amplifiers; a RAS-only pulse is a refresh cycle.
    RowSelect,
    /// CAS — latches the presented address as a column within the open row.
    ColSelect,
    /// WRITE — write-enable; must fall strictly before CAS in a write cycle
    /// (early write) because DI and DO share a pin.
    WriteEnable,
}

/// Drive direction of the controller's data port.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BusDirection {
    /// High-impedance; the part may drive the bus (read cycles, idle).
    Input,
    /// Controller drives the bus (write cycles only).
    Output,
}

/// The multiplexed address/data/strobe bus.
///
/// Single owner at all times; calls take effect immediately and in order.
/// Address and data changes need a short stabilization delay before the
/// dependent strobe edge — that delay is the caller's job (Clock capability),
/// not the bus's.
pub trait DramBus {
    /// Present a (row or column) address on the multiplexed address bus.
    fn set_address(&mut self, addr: u8);

    /// Present a value on the data bus. Only meaningful in [`BusDirection::Output`].
    fn set_data(&mut self, value: u8);

    /// Sample the data bus. Only meaningful in [`BusDirection::Input`];
    /// a floating bus reads as 0xFF (the board pulls the lines up so a
    /// missing part reads all-ones).
    fn read_data(&mut self) -> u8;

    /// Drive a strobe line to the given level.
    fn set_strobe(&mut self, strobe: Strobe, level: PinState);

    /// Switch the controller's data port between drive and high-impedance.
    fn set_direction(&mut self, direction: BusDirection);
}

impl<T: DramBus + ?Sized> DramBus for &mut T {
    fn set_address(&mut self, addr: u8) {
        T::set_address(self, addr);
    }

    fn set_data(&mut self, value: u8) {
        T::set_data(self, value);
    }

    fn read_data(&mut self) -> u8 {
        T::read_data(self)
    }

    fn set_strobe(&mut self, strobe: Strobe, level: PinState) {
        T::set_strobe(self, strobe, level);
    }

    fn set_direction(&mut self, direction: BusDirection) {
        T::set_direction(self, direction);
    }
}

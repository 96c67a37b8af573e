//! Cell I/O driver — row and cell access cycles over the raw bus
//!
//! One struct owns the bus and the delay provider: the bus has a single
//! owner at all times, and every cycle here returns the strobes to idle
//! before the next one starts. Ordering inside a cycle is load-bearing:
//!
//! - Write cycles are **early write** — WRITE falls strictly before CAS.
//!   DI and DO share a pin on the tested boards; a late write has the part
//!   driving DO against the controller's DI drivers.
//! - The data port is in output mode only between the start and end of a
//!   write cycle, high-impedance otherwise.
//! - Every address or data change settles for [`SETTLE_NS`] before the
//!   strobe edge that depends on it.
//!
//! No errors are signalled here: this is a pure protocol driver.

use core::ops::ControlFlow;

use embedded_hal::delay::DelayNs;
use platform::bus::{BusDirection, DramBus, PinState, Strobe, ROW_SIZE};

use crate::addr::{ColAddr, RowAddr};
use crate::config::{COLUMN_HOLD_NS, SETTLE_NS};
use crate::pattern::Pattern;

/// Row access strategy.
///
/// Both produce identical logical results; bit mode is slower but exercises
/// a full RAS/CAS transaction per cell, which shakes out address-latch
/// faults that page mode never touches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AccessMode {
    /// Latch the row once, walk columns under one RAS assertion.
    Page,
    /// Reopen a full row/column transaction per cell.
    Bit,
}

/// The protocol driver. Owns the bus and the Clock capability.
pub struct CellIo<B, D> {
    bus: B,
    delay: D,
    mode: AccessMode,
}

impl<B, D> CellIo<B, D>
where
    B: DramBus,
    D: DelayNs,
{
    /// New driver in the given access mode. Strobes are assumed idle
    /// (board bring-up releases all three before handing over the bus).
    pub fn new(bus: B, delay: D, mode: AccessMode) -> Self {
        Self { bus, delay, mode }
    }

    /// Current access strategy.
    pub fn mode(&self) -> AccessMode {
        self.mode
    }

    /// Switch access strategy (takes effect from the next cycle).
    pub fn set_mode(&mut self, mode: AccessMode) {
        self.mode = mode;
    }

    /// Give the bus and delay back (tests inspect the simulated bank).
    pub fn release(self) -> (B, D) {
        (self.bus, self.delay)
    }

    /// Busy-wait, keeping the bus idle. Used by the refresh scheduler's
    /// between-pass sleep.
    pub fn idle_us(&mut self, us: u32) {
        self.delay.delay_us(us);
    }

    fn settle(&mut self) {
        self.delay.delay_ns(SETTLE_NS);
    }

    fn hold(&mut self) {
        self.delay.delay_ns(COLUMN_HOLD_NS);
    }

    // -----------------------------------------------------------------------
    // Primitive cycles
    // -----------------------------------------------------------------------

    fn open_row(&mut self, row: RowAddr) {
        self.bus.set_address(row.get());
        self.settle();
        self.bus.set_strobe(Strobe::RowSelect, PinState::Low);
        self.settle();
    }

    fn close_row(&mut self) {
        self.bus.set_strobe(Strobe::RowSelect, PinState::High);
    }

    /// Early-write column cycle within an open row. Caller has put the data
    /// port in output mode.
    fn write_col(&mut self, col: ColAddr, value: u8) {
        self.bus.set_address(col.get());
        self.bus.set_data(value);
        self.settle();
        self.bus.set_strobe(Strobe::WriteEnable, PinState::Low);
        self.settle();
        self.bus.set_strobe(Strobe::ColSelect, PinState::Low);
        self.settle();
        self.bus.set_strobe(Strobe::WriteEnable, PinState::High);
        self.bus.set_strobe(Strobe::ColSelect, PinState::High);
        self.hold();
    }

    /// Read column cycle within an open row.
    fn read_col(&mut self, col: ColAddr) -> u8 {
        self.bus.set_address(col.get());
        self.settle();
        self.bus.set_strobe(Strobe::ColSelect, PinState::Low);
        self.settle();
        let value = self.bus.read_data();
        self.bus.set_strobe(Strobe::ColSelect, PinState::High);
        self.hold();
        value
    }

    // -----------------------------------------------------------------------
    // Row operations
    // -----------------------------------------------------------------------

    /// Fill `row` with `pattern`, columns ascending.
    pub fn write_row(&mut self, row: RowAddr, pattern: Pattern) {
        match self.mode {
            AccessMode::Page => {
                self.open_row(row);
                self.bus.set_direction(BusDirection::Output);
                for col in ColAddr::all() {
                    self.write_col(col, pattern.expected(col));
                }
                self.bus.set_direction(BusDirection::Input);
                self.close_row();
            }
            AccessMode::Bit => {
                for col in ColAddr::all() {
                    self.write_cell(row, col, pattern.expected(col));
                }
            }
        }
    }

    /// Read `row` from `start` upward, handing each (column, value) to
    /// `visit`. `Break` closes the in-flight transaction cleanly (CAS and
    /// RAS released) and returns at once — the fault path relies on this.
    pub fn read_row_from<F>(&mut self, row: RowAddr, start: ColAddr, mut visit: F)
    where
        F: FnMut(ColAddr, u8) -> ControlFlow<()>,
    {
        match self.mode {
            AccessMode::Page => {
                self.open_row(row);
                for col in start.to_row_end() {
                    let value = self.read_col(col);
                    if let ControlFlow::Break(()) = visit(col, value) {
                        break;
                    }
                }
                self.close_row();
            }
            AccessMode::Bit => {
                for col in start.to_row_end() {
                    let value = self.read_cell(row, col);
                    if let ControlFlow::Break(()) = visit(col, value) {
                        break;
                    }
                }
            }
        }
    }

    /// Buffered whole-row read, column order.
    pub fn read_row(&mut self, row: RowAddr, out: &mut [u8; ROW_SIZE]) {
        self.read_row_from(row, ColAddr::new(0), |col, value| {
            out[usize::from(col.get())] = value;
            ControlFlow::Continue(())
        });
    }

    /// Single-cell write (probe mode).
    pub fn write_cell(&mut self, row: RowAddr, col: ColAddr, value: u8) {
        self.open_row(row);
        self.bus.set_direction(BusDirection::Output);
        self.write_col(col, value);
        self.bus.set_direction(BusDirection::Input);
        self.close_row();
    }

    /// Single-cell read (probe mode).
    pub fn read_cell(&mut self, row: RowAddr, col: ColAddr) -> u8 {
        self.open_row(row);
        let value = self.read_col(col);
        self.close_row();
        value
    }

    /// RAS-only refresh cycle: no column activity, no data transfer.
    pub fn refresh_row(&mut self, row: RowAddr) {
        self.bus.set_address(row.get());
        self.settle();
        self.bus.set_strobe(Strobe::RowSelect, PinState::Low);
        self.settle();
        self.bus.set_strobe(Strobe::RowSelect, PinState::High);
    }
}

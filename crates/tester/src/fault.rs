//! Fault records, reporting, and the recovery pause
//!
//! The reporter runs the Testing → Reporting → Paused → Testing cycle:
//! on a mismatch the driver has already released the in-flight row; here we
//! refresh the rest of the array (the row after the fault must not starve
//! while the message is formatted), push the diagnostic, refresh again, and
//! — under [`FaultPolicy::LogAndContinue`] — hold a refresh-covered pause
//! long enough for a human to read the panel before the sweep resumes at
//! the failing cell.

use embedded_hal::delay::DelayNs;
use platform::bus::{DramBus, ROW_COUNT};
use platform::StatusDisplay;

use crate::addr::{ColAddr, RowAddr};
use crate::cell_io::CellIo;
use crate::config::TestConfig;
use crate::message;
use crate::refresh;

/// What a verification mismatch does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FaultPolicy {
    /// Report, then halt forever: the diagnostic stays visible until the
    /// operator resets the board.
    FailFast,
    /// Report, hold a ~0.75 s refresh-covered pause, then resume the sweep
    /// at the failing cell.
    LogAndContinue,
}

/// One verification mismatch. Lives for a single report-and-pause cycle;
/// never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FaultRecord {
    /// Row of the failing cell.
    pub row: RowAddr,
    /// Column of the failing cell.
    pub col: ColAddr,
    /// Pattern value the cell should have held.
    pub expected: u8,
    /// Value the bus actually returned.
    pub observed: u8,
}

impl core::fmt::Display for FaultRecord {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "row {} col {}: expected {:02X}, observed {:02X}",
            self.row, self.col, self.expected, self.observed
        )
    }
}

/// Reporting state: refresh the rows after the fault, push the diagnostic,
/// refresh again. The faulting row itself was refreshed by the access that
/// caught it.
pub fn report<B, D, S>(io: &mut CellIo<B, D>, display: &mut S, fault: &FaultRecord)
where
    B: DramBus,
    D: DelayNs,
    S: StatusDisplay,
{
    refresh::refresh_range(io, fault.row.wrapping_next(), ROW_COUNT - 1);
    display.line2(&message::fault_line(fault));
    refresh::refresh_range(io, fault.row.wrapping_next(), ROW_COUNT - 1);
}

/// Paused state: run the refresh scheduler for the configured duration
/// (~0.75 s) so no other cell decays while the diagnostic is on the panel.
pub fn pause<B, D>(io: &mut CellIo<B, D>, fault: &FaultRecord, config: &TestConfig)
where
    B: DramBus,
    D: DelayNs,
{
    refresh::refresh_all_and_wait(io, fault.row.wrapping_next(), config.pause_passes);
}

//! Pattern engine — the write-all / verify-all sweep
//!
//! Refresh interleaving is the load-bearing shape here: after every row
//! operation the scheduler walks the *rest* of the array, starting at the
//! row after the one just touched (the just-written row is not immediately
//! re-disturbed, and was refreshed by its own access anyway). Testing all
//! rows before refreshing any would silently lose data; that design is
//! wrong, not slow.

use core::ops::ControlFlow;

use embedded_hal::delay::DelayNs;
use platform::bus::{DramBus, ROW_COUNT};
use platform::StatusDisplay;

use crate::addr::{ColAddr, RowAddr};
use crate::cell_io::CellIo;
use crate::config::TestConfig;
use crate::fault::{self, FaultPolicy, FaultRecord};
use crate::message;
use crate::pattern::Pattern;
use crate::refresh;

/// What a completed sweep saw.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SweepStats {
    /// Mismatches reported and recovered from (`LogAndContinue` only;
    /// a `FailFast` sweep never returns stats).
    pub faults: u32,
}

/// Verify `row` against `pattern` from `start` upward. Returns the first
/// mismatch, with the row transaction already closed cleanly.
fn verify_row_from<B, D>(
    io: &mut CellIo<B, D>,
    row: RowAddr,
    start: ColAddr,
    pattern: Pattern,
    ignore_mask: u8,
) -> Option<FaultRecord>
where
    B: DramBus,
    D: DelayNs,
{
    let mut fault = None;
    io.read_row_from(row, start, |col, observed| {
        let expected = pattern.expected(col);
        if (observed ^ expected) & !ignore_mask != 0 {
            fault = Some(FaultRecord {
                row,
                col,
                expected,
                observed,
            });
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    });
    fault
}

/// Write every row with `pattern`, refreshing the remainder of the array
/// after each row. Also the whole body of the continuous-write program.
pub fn write_sweep<B, D, S>(
    io: &mut CellIo<B, D>,
    display: &mut S,
    pattern: Pattern,
) where
    B: DramBus,
    D: DelayNs,
    S: StatusDisplay,
{
    for row in RowAddr::all() {
        display.line2(&message::row_status('W', row));
        io.write_row(row, pattern);
        refresh::refresh_range(io, row.wrapping_next(), ROW_COUNT - 1);
    }
}

/// One full sweep: write every row with `pattern`, wait out the persistence
/// window, then verify every row — refreshing the remainder of the array
/// after each row operation.
///
/// Under [`FaultPolicy::LogAndContinue`] a mismatch is reported, the pause
/// runs, and verification resumes at exactly the failing (row, column).
/// Under [`FaultPolicy::FailFast`] the sweep returns the fault; the caller
/// halts with the diagnostic still on the panel.
pub fn run_sweep<B, D, S>(
    io: &mut CellIo<B, D>,
    display: &mut S,
    pattern: Pattern,
    config: &TestConfig,
) -> Result<SweepStats, FaultRecord>
where
    B: DramBus,
    D: DelayNs,
    S: StatusDisplay,
{
    let mut stats = SweepStats::default();

    write_sweep(io, display, pattern);

    // Persistence window: decay faults need time to exist.
    refresh::refresh_all_and_wait(io, RowAddr::new(0), config.persist_passes);

    // Verify sweep.
    for row in RowAddr::all() {
        display.line2(&message::row_status('R', row));
        let mut resume_at = ColAddr::new(0);
        while let Some(found) = verify_row_from(io, row, resume_at, pattern, config.ignore_mask) {
            fault::report(io, display, &found);
            match config.fault_policy {
                FaultPolicy::FailFast => return Err(found),
                FaultPolicy::LogAndContinue => {
                    fault::pause(io, &found, config);
                    stats.faults += 1;
                    // Resume at the failing cell — not the row start, not
                    // the next cell.
                    resume_at = found.col;
                }
            }
        }
        refresh::refresh_range(io, row.wrapping_next(), ROW_COUNT - 1);
    }

    Ok(stats)
}

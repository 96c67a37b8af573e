//! Refresh scheduler
//!
//! RAS-only refresh over runs of rows. The budget (every row pulsed within
//! [`REFRESH_BUDGET_US`](crate::config::REFRESH_BUDGET_US)) is never checked
//! here — the sweeps in [`engine`](crate::engine) interleave these calls so
//! the invariant holds by construction, and the emulator's timeline proves
//! it in tests.

use embedded_hal::delay::DelayNs;
use platform::bus::DramBus;
use platform::bus::ROW_COUNT;

use crate::addr::RowAddr;
use crate::cell_io::CellIo;
use crate::config::REFRESH_IDLE_US;

/// Refresh `count` consecutive rows starting at `start`, wrapping modulo
/// `ROW_COUNT`.
pub fn refresh_range<B, D>(io: &mut CellIo<B, D>, start: RowAddr, count: usize)
where
    B: DramBus,
    D: DelayNs,
{
    let mut row = start;
    for _ in 0..count {
        io.refresh_row(row);
        row = row.wrapping_next();
    }
}

/// Deliberately let time pass while starving no row: `passes` full refresh
/// passes from `start`, idling [`REFRESH_IDLE_US`] between passes.
///
/// Used for the persistence wait after a write sweep and for the visible
/// pause after a fault report.
pub fn refresh_all_and_wait<B, D>(io: &mut CellIo<B, D>, start: RowAddr, passes: u32)
where
    B: DramBus,
    D: DelayNs,
{
    for _ in 0..passes {
        refresh_range(io, start, ROW_COUNT);
        io.idle_us(REFRESH_IDLE_US);
    }
}

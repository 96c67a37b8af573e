//! Engine configuration and timing constants
//!
//! The durations come from the original rig: a 20 MHz controller driving a
//! 4116 bank, two instruction-cycles of settle per address change and a
//! 1 µs hold per column cycle.

use crate::fault::FaultPolicy;

pub use platform::bus::{ROW_COUNT, ROW_SIZE};

/// Settle time after an address or data change before the dependent strobe
/// edge, in nanoseconds (wire stabilization, two instruction cycles).
pub const SETTLE_NS: u32 = 500;

/// Hold time closing each column cycle, in nanoseconds.
pub const COLUMN_HOLD_NS: u32 = 1_000;

/// Refresh budget: every row must see a RAS pulse within this window, in
/// microseconds. Exceeding it risks silent data loss — an invariant held by
/// construction (interleaved refresh), never checked at runtime.
pub const REFRESH_BUDGET_US: u32 = 2_000;

/// Idle sleep between full refresh passes in `refresh_all_and_wait`, in
/// microseconds. Pass time (~0.2 ms) plus this stays inside the budget.
pub const REFRESH_IDLE_US: u32 = 1_500;

/// Full refresh passes between the write sweep and the verify sweep: lets a
/// real decay fault manifest while every row keeps its refresh guarantee.
pub const PERSIST_PASSES: u32 = 64;

/// Full refresh passes holding the Paused state after a fault report;
/// ~1.7 ms per pass, so 440 passes ≈ 0.75 s of visible diagnostic.
pub const PAUSE_PASSES: u32 = 440;

/// Per-run engine configuration.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TestConfig {
    /// What a verification mismatch does.
    pub fault_policy: FaultPolicy,
    /// Don't-care bits excluded from verification (some board revisions
    /// carry a non-data status bit on the bus). 0 = compare everything.
    pub ignore_mask: u8,
    /// Refresh passes in the persistence wait.
    pub persist_passes: u32,
    /// Refresh passes in the fault pause.
    pub pause_passes: u32,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            fault_policy: FaultPolicy::LogAndContinue,
            ignore_mask: 0,
            persist_passes: PERSIST_PASSES,
            pause_passes: PAUSE_PASSES,
        }
    }
}

//! The four test programs and their dispatcher
//!
//! Dispatch is a plain `match` over [`TestMode`] — each reset runs exactly
//! one arm. The two full tests run the five-sweep suite to completion; the
//! continuous and probe programs never return, so their loop bodies are
//! exposed as step functions that tests drive directly.

use embedded_hal::delay::DelayNs;
use platform::bus::DramBus;
use platform::StatusDisplay;

use crate::addr::{ColAddr, RowAddr};
use crate::cell_io::{AccessMode, CellIo};
use crate::config::TestConfig;
use crate::engine::{self, run_sweep};
use crate::fault::{self, FaultPolicy, FaultRecord};
use crate::message;
use crate::mode::TestMode;
use crate::pattern::{Pattern, PATTERN_SUITE};

/// Cell the probe program hammers.
pub const PROBE_ROW: RowAddr = RowAddr::new(0);
/// Column the probe program hammers.
pub const PROBE_COL: ColAddr = ColAddr::new(0);
/// Value the probe program writes.
pub const PROBE_VALUE: u8 = 0xAA;

/// How a test program ended (the endless programs never produce one).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Outcome {
    /// All five pattern sweeps ran to completion.
    SuiteCompleted {
        /// Mismatches recovered from along the way.
        faults: u32,
    },
}

/// The five-sweep full test. Banner per pattern, "OK!" on the status line
/// when everything passed.
pub fn run_full_suite<B, D, S>(
    io: &mut CellIo<B, D>,
    display: &mut S,
    config: &TestConfig,
) -> Result<Outcome, FaultRecord>
where
    B: DramBus,
    D: DelayNs,
    S: StatusDisplay,
{
    let mut faults = 0;
    for named in PATTERN_SUITE {
        display.line1(named.name);
        let stats = run_sweep(io, display, named.pattern, config)?;
        faults += stats.faults;
    }
    display.line2(message::ALL_PASSED);
    Ok(Outcome::SuiteCompleted { faults })
}

/// One pass of the continuous-write program: a refresh-interleaved write
/// sweep of the alternating-bit fill.
pub fn continuous_write_pass<B, D, S>(io: &mut CellIo<B, D>, display: &mut S)
where
    B: DramBus,
    D: DelayNs,
    S: StatusDisplay,
{
    engine::write_sweep(io, display, Pattern::solid(PROBE_VALUE));
}

/// One iteration of the single-cell probe: write the probe value, read it
/// back, compare (under the configured don't-care mask).
pub fn probe_step<B, D>(io: &mut CellIo<B, D>, config: &TestConfig) -> Result<(), FaultRecord>
where
    B: DramBus,
    D: DelayNs,
{
    io.write_cell(PROBE_ROW, PROBE_COL, PROBE_VALUE);
    let observed = io.read_cell(PROBE_ROW, PROBE_COL);
    if (observed ^ PROBE_VALUE) & !config.ignore_mask != 0 {
        return Err(FaultRecord {
            row: PROBE_ROW,
            col: PROBE_COL,
            expected: PROBE_VALUE,
            observed,
        });
    }
    Ok(())
}

/// Run the program for `mode`. The full tests return an [`Outcome`] (or a
/// fault under [`FaultPolicy::FailFast`]); `ContinuousWrite` and
/// `SingleCellProbe` run until the board is physically reset.
pub fn run_program<B, D, S>(
    mode: TestMode,
    io: &mut CellIo<B, D>,
    display: &mut S,
    config: &TestConfig,
) -> Result<Outcome, FaultRecord>
where
    B: DramBus,
    D: DelayNs,
    S: StatusDisplay,
{
    display.line1(mode.label());
    match mode {
        TestMode::FullTestByPage => {
            io.set_mode(AccessMode::Page);
            run_full_suite(io, display, config)
        }
        TestMode::FullTestByBit => {
            io.set_mode(AccessMode::Bit);
            run_full_suite(io, display, config)
        }
        TestMode::ContinuousWrite => loop {
            continuous_write_pass(io, display);
        },
        TestMode::SingleCellProbe => loop {
            if let Err(found) = probe_step(io, config) {
                fault::report(io, display, &found);
                match config.fault_policy {
                    FaultPolicy::FailFast => return Err(found),
                    FaultPolicy::LogAndContinue => fault::pause(io, &found, config),
                }
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dram_emulator::{SimBank, SimDelay, Timeline};
    use platform::mocks::MockDisplay;

    fn io_over_bank() -> CellIo<SimBank, SimDelay> {
        let timeline = Timeline::new();
        CellIo::new(
            SimBank::new(timeline.clone()),
            SimDelay::new(timeline),
            AccessMode::Page,
        )
    }

    #[test]
    fn probe_step_round_trips_every_iteration() {
        let mut io = io_over_bank();
        let config = TestConfig::default();
        for _ in 0..100 {
            probe_step(&mut io, &config).unwrap();
        }
        let (bank, _) = io.release();
        assert_eq!(bank.cell(0, 0), PROBE_VALUE);
        assert!(bank.violations().is_empty());
    }

    #[test]
    fn probe_step_surfaces_a_mismatch() {
        let mut io = io_over_bank();
        let (mut bank, delay) = io.release();
        bank.inject_once(0, 0, 0x00);
        io = CellIo::new(bank, delay, AccessMode::Page);

        let fault = probe_step(&mut io, &TestConfig::default()).unwrap_err();
        assert_eq!(fault.observed, 0x00);
        assert_eq!(fault.expected, PROBE_VALUE);
        // Transient fault: the next iteration is clean again.
        probe_step(&mut io, &TestConfig::default()).unwrap();
    }

    #[test]
    fn continuous_pass_touches_every_row() {
        let mut io = io_over_bank();
        let mut display = MockDisplay::new();
        continuous_write_pass(&mut io, &mut display);
        let (bank, _) = io.release();
        for row in [0u8, 64, 127] {
            assert_eq!(bank.cell(row, 17), PROBE_VALUE);
        }
        assert!(bank.max_refresh_gap_ns() <= 2_000_000);
    }
}

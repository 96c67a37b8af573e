//! The per-reset boot cycle
//!
//! Every reset runs exactly one of these: initialize the panel, advance the
//! persisted mode, run that mode's program. On hardware the endless modes
//! never return and the cycle only ends at the next reset tap; the
//! [`PassBudget`] exists so the simulator (and tests) can bound them.

use embedded_hal::delay::DelayNs;
use platform::bus::DramBus;
use platform::{ModeStore, StatusDisplay};
use tester::fault;
use tester::program::{self, Outcome};
use tester::{CellIo, FaultPolicy, FaultRecord, TestConfig, TestMode};

/// How many engine passes an endless mode may run before the cycle returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassBudget {
    /// Run until reset. The hardware setting.
    Unbounded,
    /// Return after this many passes. Simulator and test setting.
    Bounded(u32),
}

impl PassBudget {
    fn admits(self, done: u32) -> bool {
        match self {
            Self::Unbounded => true,
            Self::Bounded(max) => done < max,
        }
    }
}

/// How one reset's program ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// A full test ran its five-sweep suite to completion.
    Suite {
        /// Mode that ran.
        mode: TestMode,
        /// Mismatches recovered from along the way.
        faults: u32,
    },
    /// An endless mode exhausted its pass budget.
    Passes {
        /// Mode that ran.
        mode: TestMode,
        /// Passes completed.
        count: u32,
    },
}

/// Why a reset cycle stopped early.
#[derive(Debug)]
pub enum RunError<E> {
    /// The mode store failed to load or save.
    Store(E),
    /// A verification fault under [`FaultPolicy::FailFast`].
    Fault(FaultRecord),
}

impl<E: core::fmt::Debug> core::fmt::Display for RunError<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Store(err) => write!(f, "mode store error: {err:?}"),
            Self::Fault(fault) => write!(f, "halted on fault: {fault}"),
        }
    }
}

#[cfg(feature = "std")]
impl<E: core::fmt::Debug> std::error::Error for RunError<E> {}

/// Run one reset's worth of the tester: init the panel, advance the
/// persisted mode, dispatch its program.
///
/// The two full tests return [`CycleOutcome::Suite`]. `ContinuousWrite` and
/// `SingleCellProbe` loop until `budget` runs out (forever, on hardware).
/// A `FailFast` fault returns [`RunError::Fault`] with the diagnostic still
/// on the panel.
pub fn reset_cycle<B, D, S, M>(
    io: &mut CellIo<B, D>,
    display: &mut S,
    store: &mut M,
    config: &TestConfig,
    budget: PassBudget,
) -> Result<CycleOutcome, RunError<M::Error>>
where
    B: DramBus,
    D: DelayNs,
    S: StatusDisplay,
    M: ModeStore,
{
    display.init();
    let mode = tester::mode::advance(store).map_err(RunError::Store)?;

    match mode {
        TestMode::FullTestByPage | TestMode::FullTestByBit => {
            let Outcome::SuiteCompleted { faults } =
                program::run_program(mode, io, display, config).map_err(RunError::Fault)?;
            Ok(CycleOutcome::Suite { mode, faults })
        }
        TestMode::ContinuousWrite => {
            display.line1(mode.label());
            let mut count = 0;
            while budget.admits(count) {
                program::continuous_write_pass(io, display);
                count += 1;
            }
            Ok(CycleOutcome::Passes { mode, count })
        }
        TestMode::SingleCellProbe => {
            display.line1(mode.label());
            let mut count = 0;
            while budget.admits(count) {
                if let Err(found) = program::probe_step(io, config) {
                    fault::report(io, display, &found);
                    match config.fault_policy {
                        FaultPolicy::FailFast => return Err(RunError::Fault(found)),
                        FaultPolicy::LogAndContinue => fault::pause(io, &found, config),
                    }
                }
                count += 1;
            }
            Ok(CycleOutcome::Passes { mode, count })
        }
    }
}

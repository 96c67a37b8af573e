//! Full boot cycles across simulated resets: sequencer, programs, panel and
//! bank observed together, the way the operator sees them.

use dram_emulator::{SimBank, SimDelay, Timeline};
use firmware::{reset_cycle, CycleOutcome, PassBudget, RunError};
use platform::mocks::{MockDisplay, MockModeStore};
use tester::{AccessMode, CellIo, FaultPolicy, TestConfig, TestMode};

fn io_over_bank() -> CellIo<SimBank, SimDelay> {
    let timeline = Timeline::new();
    CellIo::new(
        SimBank::new(timeline.clone()),
        SimDelay::new(timeline),
        AccessMode::Page,
    )
}

#[test]
fn first_boot_runs_the_page_suite_and_persists_the_mode() {
    let mut io = io_over_bank();
    let mut display = MockDisplay::new();
    let mut store = MockModeStore::erased();

    let outcome = reset_cycle(
        &mut io,
        &mut display,
        &mut store,
        &TestConfig::default(),
        PassBudget::Bounded(1),
    )
    .unwrap();

    assert_eq!(
        outcome,
        CycleOutcome::Suite {
            mode: TestMode::FullTestByPage,
            faults: 0
        }
    );
    assert_eq!(display.init_count(), 1);
    assert!(display.saw("Full test/page"));
    assert!(display.saw("OK!"));
    assert_eq!(store.raw(), Some(TestMode::FullTestByPage.as_raw()));

    let (bank, _) = io.release();
    assert!(bank.violations().is_empty());
    assert_eq!(bank.decayed_rows(), 0);
}

#[test]
fn four_resets_step_through_the_whole_mode_cycle() {
    let mut store = MockModeStore::erased();
    let mut seen = Vec::new();

    for _ in 0..5 {
        let mut io = io_over_bank();
        let mut display = MockDisplay::new();
        let outcome = reset_cycle(
            &mut io,
            &mut display,
            &mut store,
            &TestConfig::default(),
            PassBudget::Bounded(1),
        )
        .unwrap();
        seen.push(match outcome {
            CycleOutcome::Suite { mode, .. } | CycleOutcome::Passes { mode, .. } => mode,
        });
    }

    assert_eq!(
        seen,
        [
            TestMode::FullTestByPage,
            TestMode::FullTestByBit,
            TestMode::ContinuousWrite,
            TestMode::SingleCellProbe,
            TestMode::FullTestByPage,
        ]
    );
    // One save per reset: the sequencer writes exactly once per boot.
    assert_eq!(store.save_count(), 5);
}

#[test]
fn bit_mode_suite_runs_clean_end_to_end() {
    let mut io = io_over_bank();
    let mut display = MockDisplay::new();
    let mut store = MockModeStore::with_value(TestMode::FullTestByPage.as_raw());

    let outcome = reset_cycle(
        &mut io,
        &mut display,
        &mut store,
        &TestConfig::default(),
        PassBudget::Bounded(1),
    )
    .unwrap();

    assert_eq!(
        outcome,
        CycleOutcome::Suite {
            mode: TestMode::FullTestByBit,
            faults: 0
        }
    );
    let (bank, _) = io.release();
    assert!(bank.max_refresh_gap_ns() <= 2_000_000);
}

#[test]
fn transient_fault_is_recovered_across_a_full_boot() {
    let timeline = Timeline::new();
    let mut bank = SimBank::new(timeline.clone());
    // 0x13 mismatches the first suite pattern (all zeros), so the fault
    // surfaces in the very first verify sweep.
    bank.inject_once(5, 40, 0x13);
    let mut io = CellIo::new(bank, SimDelay::new(timeline), AccessMode::Page);
    let mut display = MockDisplay::new();
    let mut store = MockModeStore::erased();

    let outcome = reset_cycle(
        &mut io,
        &mut display,
        &mut store,
        &TestConfig::default(),
        PassBudget::Bounded(1),
    )
    .unwrap();

    // The injected mismatch hits whichever sweep reads (5, 40) first; it is
    // reported, recovered, and the suite still completes.
    assert_eq!(
        outcome,
        CycleOutcome::Suite {
            mode: TestMode::FullTestByPage,
            faults: 1
        }
    );
    assert!(display.saw("!R5 C40 ~13"));
    assert!(display.saw("OK!"));
}

#[test]
fn fail_fast_halts_the_boot_with_the_diagnostic_up() {
    let timeline = Timeline::new();
    let mut bank = SimBank::new(timeline.clone());
    bank.inject_stuck(5, 40, 0x00);
    let mut io = CellIo::new(bank, SimDelay::new(timeline), AccessMode::Page);
    let mut display = MockDisplay::new();
    let mut store = MockModeStore::erased();
    let config = TestConfig {
        fault_policy: FaultPolicy::FailFast,
        ..TestConfig::default()
    };

    let err = reset_cycle(
        &mut io,
        &mut display,
        &mut store,
        &config,
        PassBudget::Bounded(1),
    )
    .unwrap_err();

    match err {
        RunError::Fault(fault) => {
            assert_eq!((fault.row.get(), fault.col.get()), (5, 40));
        }
        RunError::Store(_) => panic!("expected a fault"),
    }
    assert_eq!(display.line2_text(), "!R5 C40 ~00");
    // The mode was still persisted before the program ran: the next reset
    // moves on rather than replaying the failing mode forever.
    assert_eq!(store.raw(), Some(TestMode::FullTestByPage.as_raw()));
}

//! Round-trip property: what a sweep writes is exactly what a read returns,
//! for every pattern, in both access strategies.

use dram_emulator::{SimBank, SimDelay, Timeline};
use platform::bus::ROW_SIZE;
use tester::{AccessMode, CellIo, ColAddr, Pattern, RowAddr};

fn io_over_bank(mode: AccessMode) -> CellIo<SimBank, SimDelay> {
    let timeline = Timeline::new();
    CellIo::new(
        SimBank::new(timeline.clone()),
        SimDelay::new(timeline),
        mode,
    )
}

fn assert_row_round_trips(mode: AccessMode, row: u8, start: u8, delta: u8) {
    let pattern = Pattern { start, delta };
    let row = RowAddr::new(row);
    let mut io = io_over_bank(mode);

    io.write_row(row, pattern);
    let mut out = [0u8; ROW_SIZE];
    io.read_row(row, &mut out);

    for (col, &value) in out.iter().enumerate() {
        let expected = start.wrapping_add(delta.wrapping_mul(col as u8));
        assert_eq!(value, expected, "col {col}");
    }

    let (bank, _) = io.release();
    assert!(bank.violations().is_empty(), "{:?}", bank.violations());
}

proptest::proptest! {
    /// Page mode: write_row(r, p) then read_row(r) yields
    /// [(start + delta·c) mod 256 for c in 0..ROW_SIZE].
    #[test]
    fn page_mode_round_trips(row in 0u8..128, start: u8, delta: u8) {
        assert_row_round_trips(AccessMode::Page, row, start, delta);
    }

    /// Bit mode produces identical logical results to page mode.
    #[test]
    fn bit_mode_round_trips(row in 0u8..128, start: u8, delta: u8) {
        assert_row_round_trips(AccessMode::Bit, row, start, delta);
    }

    /// Single-cell operations agree with row operations.
    #[test]
    fn cell_ops_match_row_ops(row in 0u8..128, col in 0u8..128, value: u8) {
        let mut io = io_over_bank(AccessMode::Page);
        io.write_cell(RowAddr::new(row), ColAddr::new(col), value);
        assert_eq!(io.read_cell(RowAddr::new(row), ColAddr::new(col)), value);
        let (bank, _) = io.release();
        assert!(bank.violations().is_empty());
    }
}

#[test]
fn fresh_bank_reads_back_zeroed_cells() {
    let mut io = io_over_bank(AccessMode::Page);
    assert_eq!(io.read_cell(RowAddr::new(3), ColAddr::new(3)), 0x00);
}

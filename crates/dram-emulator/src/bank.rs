//! The simulated bank: cells, charge decay, and bus-protocol watching.

use platform::{BusDirection, DramBus, PinState, Strobe, ADDRESS_MASK, ROW_COUNT, ROW_SIZE};

use crate::timeline::Timeline;
use crate::{BUS_OP_COST_NS, MIN_SETTLE_NS, RETENTION_NS};

/// What the driver did wrong, as the part's bus would experience it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViolationKind {
    /// A strobe fell before the address lines had settled.
    AddressSettle,
    /// CAS fell in a write cycle before the data lines had settled.
    DataSettle,
    /// CAS fell with no row open (RAS high).
    CasWithoutRas,
    /// WRITE fell after CAS in a write cycle (late write): the part drives
    /// DO while the controller drives DI on the same shorted pin.
    LateWrite,
    /// The controller drove the data bus during a read cycle.
    BusContention,
    /// A write cycle ran with the controller's data port in high-impedance.
    WriteWhileHighZ,
    /// The controller sampled the bus while its own drivers were on.
    ReadWhileDriving,
}

/// One recorded protocol violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Violation {
    /// What went wrong.
    pub kind: ViolationKind,
    /// Open row at the time, if any.
    pub row: Option<u8>,
    /// Latched column at the time, if any.
    pub col: Option<u8>,
    /// Virtual timestamp.
    pub at_ns: u64,
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?} at {} ns", self.kind, self.at_ns)?;
        if let Some(row) = self.row {
            write!(f, " (row {row}")?;
            if let Some(col) = self.col {
                write!(f, ", col {col}")?;
            }
            write!(f, ")")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy)]
struct InjectedFault {
    row: u8,
    col: u8,
    value: u8,
    one_shot: bool,
    fired: bool,
}

/// Simulated 128×128×8 DRAM bank behind a [`DramBus`].
///
/// Pass `&mut SimBank` to the driver under test; every trait method costs
/// [`BUS_OP_COST_NS`] on the shared timeline.
pub struct SimBank {
    timeline: Timeline,
    cells: Vec<[u8; ROW_SIZE]>,

    // Refresh bookkeeping
    refreshed_at: [u64; ROW_COUNT],
    refresh_counts: [u64; ROW_COUNT],
    max_gap_ns: u64,
    retention_ns: u64,
    decayed_rows: u32,

    // Bus state as the part sees it
    address: u8,
    address_changed_at: u64,
    data_in: u8,
    data_changed_at: u64,
    direction: BusDirection,
    ras: PinState,
    cas: PinState,
    we: PinState,
    open_row: Option<u8>,
    latched_col: Option<u8>,
    /// Value on DO while a read cycle is active (CAS low, WRITE high).
    driving_out: Option<u8>,

    violations: Vec<Violation>,
    injected: Vec<InjectedFault>,
    reads: Vec<(u8, u8)>,
}

impl SimBank {
    /// A bank with all cells zeroed, strobes released, bus floating.
    pub fn new(timeline: Timeline) -> Self {
        Self {
            timeline,
            cells: vec![[0u8; ROW_SIZE]; ROW_COUNT],
            refreshed_at: [0; ROW_COUNT],
            refresh_counts: [0; ROW_COUNT],
            max_gap_ns: 0,
            retention_ns: RETENTION_NS,
            decayed_rows: 0,
            address: 0,
            address_changed_at: 0,
            data_in: 0,
            data_changed_at: 0,
            direction: BusDirection::Input,
            ras: PinState::High,
            cas: PinState::High,
            we: PinState::High,
            open_row: None,
            latched_col: None,
            driving_out: None,
            violations: Vec::new(),
            injected: Vec::new(),
            reads: Vec::new(),
        }
    }

    /// Override the retention window (tests of the decay model itself).
    pub fn set_retention_ns(&mut self, ns: u64) {
        self.retention_ns = ns;
    }

    /// A read of (row, col) permanently returns `value` (stuck-at fault).
    pub fn inject_stuck(&mut self, row: u8, col: u8, value: u8) {
        self.injected.push(InjectedFault {
            row,
            col,
            value,
            one_shot: false,
            fired: false,
        });
    }

    /// The *next* read of (row, col) returns `value`, later reads are
    /// honest again (transient fault, lets recovery tests resume cleanly).
    pub fn inject_once(&mut self, row: u8, col: u8, value: u8) {
        self.injected.push(InjectedFault {
            row,
            col,
            value,
            one_shot: true,
            fired: false,
        });
    }

    /// Direct cell access (assertions only; does not touch the bus model).
    pub fn cell(&self, row: u8, col: u8) -> u8 {
        self.cells[usize::from(row)][usize::from(col)]
    }

    /// All protocol violations recorded so far.
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Every (row, col) read through the bus, in order.
    pub fn reads(&self) -> &[(u8, u8)] {
        &self.reads
    }

    /// RAS pulses seen by `row` (accesses count: an access refreshes).
    pub fn refresh_count(&self, row: u8) -> u64 {
        self.refresh_counts[usize::from(row)]
    }

    /// Number of rows that have decayed (lost data) so far.
    pub fn decayed_rows(&self) -> u32 {
        self.decayed_rows
    }

    /// Worst refresh gap any row has experienced, including each row's
    /// currently open gap. The refresh budget invariant holds iff this
    /// never exceeds 2 ms.
    pub fn max_refresh_gap_ns(&self) -> u64 {
        let now = self.timeline.now_ns();
        let open_gap = self
            .refreshed_at
            .iter()
            .map(|&at| now - at)
            .max()
            .unwrap_or(0);
        self.max_gap_ns.max(open_gap)
    }

    /// Handle onto the shared timeline.
    pub fn timeline(&self) -> Timeline {
        self.timeline.clone()
    }

    fn now(&self) -> u64 {
        self.timeline.now_ns()
    }

    fn flag(&mut self, kind: ViolationKind) {
        self.violations.push(Violation {
            kind,
            row: self.open_row,
            col: self.latched_col,
            at_ns: self.now(),
        });
    }

    /// RAS pulse accounting: measure this row's gap, decay it if the gap
    /// blew the retention window, stamp it refreshed.
    fn note_refresh(&mut self, row: u8) {
        let now = self.now();
        let idx = usize::from(row);
        let gap = now - self.refreshed_at[idx];
        if gap > self.max_gap_ns {
            self.max_gap_ns = gap;
        }
        if gap > self.retention_ns {
            // Silent data loss: the charge is gone before the sense
            // amplifiers restore it.
            self.cells[idx] = [0u8; ROW_SIZE];
            self.decayed_rows += 1;
        }
        self.refreshed_at[idx] = now;
        self.refresh_counts[idx] += 1;
    }

    fn settled(&self, changed_at: u64) -> bool {
        self.now() - changed_at >= MIN_SETTLE_NS
    }

    fn effective_read(&mut self, row: u8, col: u8) -> u8 {
        for fault in &mut self.injected {
            if fault.row == row && fault.col == col && !(fault.one_shot && fault.fired) {
                fault.fired = true;
                return fault.value;
            }
        }
        self.cells[usize::from(row)][usize::from(col)]
    }

    fn ras_edge(&mut self, level: PinState) {
        if level == self.ras {
            return;
        }
        self.ras = level;
        match level {
            PinState::Low => {
                if !self.settled(self.address_changed_at) {
                    self.flag(ViolationKind::AddressSettle);
                }
                let row = self.address & ADDRESS_MASK;
                self.open_row = Some(row);
                self.note_refresh(row);
            }
            PinState::High => {
                self.open_row = None;
                self.latched_col = None;
                self.driving_out = None;
            }
        }
    }

    fn cas_edge(&mut self, level: PinState) {
        if level == self.cas {
            return;
        }
        self.cas = level;
        match level {
            PinState::Low => {
                let Some(row) = self.open_row else {
                    self.flag(ViolationKind::CasWithoutRas);
                    return;
                };
                if !self.settled(self.address_changed_at) {
                    self.flag(ViolationKind::AddressSettle);
                }
                let col = self.address & ADDRESS_MASK;
                self.latched_col = Some(col);

                if self.we == PinState::Low {
                    // Early write: data latched on the CAS edge.
                    if self.direction != BusDirection::Output {
                        self.flag(ViolationKind::WriteWhileHighZ);
                        return;
                    }
                    if !self.settled(self.data_changed_at) {
                        self.flag(ViolationKind::DataSettle);
                    }
                    self.cells[usize::from(row)][usize::from(col)] = self.data_in;
                } else {
                    // Read cycle: DO becomes valid.
                    let mut value = self.effective_read(row, col);
                    if self.direction == BusDirection::Output {
                        // Both ends drive the shorted DI/DO pin.
                        self.flag(ViolationKind::BusContention);
                        value &= self.data_in;
                    }
                    self.driving_out = Some(value);
                    self.reads.push((row, col));
                }
            }
            PinState::High => {
                self.driving_out = None;
            }
        }
    }

    fn we_edge(&mut self, level: PinState) {
        if level == self.we {
            return;
        }
        self.we = level;
        if level == PinState::Low && self.cas == PinState::Low {
            // Late write: the part already drives DO from the read that the
            // open CAS started; the write still lands, through contention.
            self.flag(ViolationKind::LateWrite);
            if let (Some(row), Some(col)) = (self.open_row, self.latched_col) {
                if self.direction == BusDirection::Output {
                    self.cells[usize::from(row)][usize::from(col)] = self.data_in;
                }
            }
        }
    }
}

impl DramBus for SimBank {
    fn set_address(&mut self, addr: u8) {
        self.timeline.advance_ns(BUS_OP_COST_NS);
        if addr != self.address {
            self.address = addr;
            self.address_changed_at = self.now();
        }
    }

    fn set_data(&mut self, value: u8) {
        self.timeline.advance_ns(BUS_OP_COST_NS);
        if value != self.data_in {
            self.data_in = value;
            self.data_changed_at = self.now();
        }
    }

    fn read_data(&mut self) -> u8 {
        self.timeline.advance_ns(BUS_OP_COST_NS);
        if self.direction == BusDirection::Output {
            self.flag(ViolationKind::ReadWhileDriving);
            return self.data_in;
        }
        // Pull-ups: a floating bus reads all-ones.
        self.driving_out.unwrap_or(0xFF)
    }

    fn set_strobe(&mut self, strobe: Strobe, level: PinState) {
        self.timeline.advance_ns(BUS_OP_COST_NS);
        match strobe {
            Strobe::RowSelect => self.ras_edge(level),
            Strobe::ColSelect => self.cas_edge(level),
            Strobe::WriteEnable => self.we_edge(level),
        }
    }

    fn set_direction(&mut self, direction: BusDirection) {
        self.timeline.advance_ns(BUS_OP_COST_NS);
        if direction == BusDirection::Output && self.driving_out.is_some() {
            self.flag(ViolationKind::BusContention);
        }
        self.direction = direction;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bank() -> SimBank {
        SimBank::new(Timeline::new())
    }

    /// Hand-rolled early-write cycle, correct ordering.
    fn write_cell_raw(bank: &mut SimBank, row: u8, col: u8, value: u8) {
        bank.set_address(row);
        bank.timeline().advance_ns(MIN_SETTLE_NS);
        bank.set_strobe(Strobe::RowSelect, PinState::Low);
        bank.set_direction(BusDirection::Output);
        bank.set_address(col);
        bank.set_data(value);
        bank.timeline().advance_ns(MIN_SETTLE_NS);
        bank.set_strobe(Strobe::WriteEnable, PinState::Low);
        bank.timeline().advance_ns(MIN_SETTLE_NS);
        bank.set_strobe(Strobe::ColSelect, PinState::Low);
        bank.set_strobe(Strobe::WriteEnable, PinState::High);
        bank.set_strobe(Strobe::ColSelect, PinState::High);
        bank.set_direction(BusDirection::Input);
        bank.set_strobe(Strobe::RowSelect, PinState::High);
    }

    fn read_cell_raw(bank: &mut SimBank, row: u8, col: u8) -> u8 {
        bank.set_address(row);
        bank.timeline().advance_ns(MIN_SETTLE_NS);
        bank.set_strobe(Strobe::RowSelect, PinState::Low);
        bank.set_address(col);
        bank.timeline().advance_ns(MIN_SETTLE_NS);
        bank.set_strobe(Strobe::ColSelect, PinState::Low);
        bank.timeline().advance_ns(MIN_SETTLE_NS);
        let value = bank.read_data();
        bank.set_strobe(Strobe::ColSelect, PinState::High);
        bank.set_strobe(Strobe::RowSelect, PinState::High);
        value
    }

    #[test]
    fn early_write_then_read_round_trips() {
        let mut bank = bank();
        write_cell_raw(&mut bank, 3, 7, 0x5A);
        assert_eq!(read_cell_raw(&mut bank, 3, 7), 0x5A);
        assert!(bank.violations().is_empty(), "{:?}", bank.violations());
    }

    #[test]
    fn floating_bus_reads_all_ones() {
        let mut bank = bank();
        // No CAS: nothing drives the bus, pull-ups win.
        bank.set_address(0);
        bank.timeline().advance_ns(MIN_SETTLE_NS);
        bank.set_strobe(Strobe::RowSelect, PinState::Low);
        assert_eq!(bank.read_data(), 0xFF);
    }

    #[test]
    fn late_write_is_flagged() {
        let mut bank = bank();
        bank.set_address(0);
        bank.timeline().advance_ns(MIN_SETTLE_NS);
        bank.set_strobe(Strobe::RowSelect, PinState::Low);
        bank.set_direction(BusDirection::Output);
        bank.set_address(1);
        bank.set_data(0xAA);
        bank.timeline().advance_ns(MIN_SETTLE_NS);
        // CAS before WRITE: the forbidden ordering.
        bank.set_strobe(Strobe::ColSelect, PinState::Low);
        bank.set_strobe(Strobe::WriteEnable, PinState::Low);
        assert!(bank
            .violations()
            .iter()
            .any(|v| v.kind == ViolationKind::LateWrite));
    }

    #[test]
    fn unsettled_address_is_flagged() {
        let mut bank = bank();
        bank.set_address(9);
        // RAS immediately after the address change.
        bank.set_strobe(Strobe::RowSelect, PinState::Low);
        assert!(bank
            .violations()
            .iter()
            .any(|v| v.kind == ViolationKind::AddressSettle));
    }

    #[test]
    fn unrefreshed_row_decays_to_zero() {
        let mut bank = bank();
        write_cell_raw(&mut bank, 5, 0, 0xA5);
        bank.timeline().advance_ns(RETENTION_NS + 1_000_000);
        assert_eq!(read_cell_raw(&mut bank, 5, 0), 0x00);
        assert_eq!(bank.decayed_rows(), 1);
        assert!(bank.max_refresh_gap_ns() > RETENTION_NS);
    }

    #[test]
    fn ras_pulse_holds_off_decay() {
        let mut bank = bank();
        write_cell_raw(&mut bank, 5, 0, 0xA5);
        for _ in 0..4 {
            bank.timeline().advance_ns(RETENTION_NS / 2);
            // RAS-only refresh cycle.
            bank.set_address(5);
            bank.timeline().advance_ns(MIN_SETTLE_NS);
            bank.set_strobe(Strobe::RowSelect, PinState::Low);
            bank.timeline().advance_ns(MIN_SETTLE_NS);
            bank.set_strobe(Strobe::RowSelect, PinState::High);
        }
        assert_eq!(read_cell_raw(&mut bank, 5, 0), 0xA5);
        assert_eq!(bank.decayed_rows(), 0);
    }

    #[test]
    fn one_shot_fault_fires_once() {
        let mut bank = bank();
        write_cell_raw(&mut bank, 2, 2, 0x77);
        bank.inject_once(2, 2, 0x00);
        assert_eq!(read_cell_raw(&mut bank, 2, 2), 0x00);
        assert_eq!(read_cell_raw(&mut bank, 2, 2), 0x77);
    }

    #[test]
    fn stuck_fault_fires_forever() {
        let mut bank = bank();
        write_cell_raw(&mut bank, 2, 2, 0x77);
        bank.inject_stuck(2, 2, 0x13);
        assert_eq!(read_cell_raw(&mut bank, 2, 2), 0x13);
        assert_eq!(read_cell_raw(&mut bank, 2, 2), 0x13);
    }
}

//! Simulated 4116-class DRAM bank
//!
//! A desktop model of the device under test, faithful where the tester's
//! correctness depends on it:
//!
//! - **Charge decay** — every row carries a last-refresh timestamp on a
//!   shared virtual timeline. A row left longer than its retention window
//!   without a RAS pulse loses its contents (reads as all-zero), exactly the
//!   silent data loss the refresh scheduler exists to prevent.
//! - **Protocol discipline** — the bank watches strobe ordering the way the
//!   real part's bus does: a write cycle where CAS falls before WRITE, a
//!   read sampled while the controller still drives the bus, or a strobe
//!   edge arriving before the address settled are recorded as
//!   [`Violation`]s *and* corrupt data, so a wrong driver fails tests the
//!   way it fails hardware.
//! - **Fault injection** — stuck-at or one-shot wrong reads at a chosen
//!   (row, column), for exercising the fault reporter.
//!
//! Time advances only through [`SimDelay`] (the `DelayNs` Clock capability)
//! and a small fixed cost per bus operation, so tests get a deterministic
//! timeline with no real sleeping.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod bank;
mod timeline;

pub use bank::{SimBank, Violation, ViolationKind};
pub use timeline::{SimDelay, Timeline};

/// Per-bus-call cost on the virtual timeline, in nanoseconds.
///
/// Models one port access of a small controller (a 20 MHz PIC-class part
/// executes an instruction in 200 ns).
pub const BUS_OP_COST_NS: u64 = 200;

/// Minimum address/data settle time the part tolerates before a dependent
/// strobe edge, in nanoseconds.
pub const MIN_SETTLE_NS: u64 = 400;

/// Charge retention window: a row not refreshed within this many
/// nanoseconds decays. 2 ms, the 4116 refresh budget.
pub const RETENTION_NS: u64 = 2_000_000;

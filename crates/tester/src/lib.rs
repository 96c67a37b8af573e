//! 4116 DRAM bank test engine
//!
//! Exhaustively validates a bank of 4116-class dynamic RAM over the
//! multiplexed RAS/CAS/WRITE bus, honoring the 2 ms refresh budget at every
//! point of every sweep, and reports through a two-line status panel.
//!
//! # Architecture
//!
//! ```text
//! mode      — reset-persisted test-mode sequencer
//! program   — the four test programs dispatched per mode
//! engine    — write-all / verify-all sweep with fault recovery
//! fault     — mismatch records, report-and-pause state machine
//! refresh   — RAS-only refresh scheduler
//! cell_io   — row/cell access cycles over the raw bus
//! ```
//!
//! Everything is generic over the `platform` traits plus
//! [`embedded_hal::delay::DelayNs`], so the whole engine runs unmodified
//! against the simulated bank in `dram-emulator`.
//!
//! Single-threaded and cooperative: delays busy-wait, nothing yields, and
//! the strict call ordering inside [`cell_io`] *is* the correctness
//! mechanism — the data bus is shared with the part's own output drivers.

#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_op_in_unsafe_fn)]
#![allow(clippy::module_name_repetitions)]

pub mod addr;
pub mod cell_io;
pub mod config;
pub mod engine;
pub mod fault;
pub mod message;
pub mod mode;
pub mod pattern;
pub mod program;
pub mod refresh;

pub use addr::{ColAddr, RowAddr};
pub use cell_io::{AccessMode, CellIo};
pub use config::{TestConfig, REFRESH_BUDGET_US};
pub use engine::{run_sweep, SweepStats};
pub use fault::{FaultPolicy, FaultRecord};
pub use mode::TestMode;
pub use pattern::{Pattern, PATTERN_SUITE};
pub use program::{run_program, Outcome};

//! 4116 bank tester firmware
//!
//! Top of the stack: ties the persisted mode sequencer, the test engine and
//! the status panel together into the per-reset boot cycle.
//!
//! # Architecture
//!
//! ```text
//! Application Layer (main.rs — simulator binary)
//!         ↓
//! Boot cycle (cycle module: advance mode, dispatch program)
//!         ↓
//! Test engine (tester crate)
//!         ↓
//! Platform HAL (platform traits → dram-emulator or real pins)
//! ```
//!
//! # Features
//!
//! - `simulator` - Desktop binary driving the engine against the emulated
//!   bank (tracing, file-backed mode store)
//! - `std` - Enable standard library (for the simulator and testing)
//! - `defmt` - Defmt derives/logging on a hardware target

#![cfg_attr(all(not(test), not(feature = "std")), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(clippy::print_stdout)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

pub mod cycle;

#[cfg(feature = "simulator")]
pub mod panel;
#[cfg(feature = "simulator")]
pub mod store;

pub use cycle::{reset_cycle, CycleOutcome, PassBudget, RunError};

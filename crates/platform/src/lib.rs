//! Hardware Abstraction Layer (HAL) for the 4116 DRAM bank tester
//!
//! This crate provides trait-based abstractions for every piece of hardware
//! the tester touches, enabling development and testing without a physical
//! board.
//!
//! # Architecture Layers
//!
//! ```text
//! Program Layer (firmware crate)
//!         ↓
//! Test Engine (tester crate)
//!         ↓
//! Platform HAL (this crate - trait abstractions)
//!         ↓
//! Hardware Layer (board GPIO ports / dram-emulator)
//! ```
//!
//! # Abstractions
//!
//! - [`DramBus`] - the multiplexed address/data/strobe bus of a 4116-class
//!   DRAM bank
//! - [`StatusDisplay`] - a two-line, 16-character status panel
//! - [`ModeStore`] - one byte of non-volatile storage surviving device reset
//!
//! The tester's Clock capability is [`embedded_hal::delay::DelayNs`]; supply
//! the board's busy-wait delay on hardware, or a virtual timeline in tests.
//!
//! # Features
//!
//! - `std`: Enable the [`mocks`] module for host tests
//! - `defmt`: Enable defmt logging derives

#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_op_in_unsafe_fn)]
#![allow(clippy::module_name_repetitions)]

pub mod bus;
pub mod display;
pub mod store;

#[cfg(any(test, feature = "std"))]
pub mod mocks;

pub use bus::{BusDirection, DramBus, PinState, Strobe, ADDRESS_MASK, ROW_COUNT, ROW_SIZE};
pub use display::{StatusDisplay, LINE_WIDTH};
pub use store::ModeStore;

// The Clock capability, re-exported so consumers name one crate for the
// whole hardware surface.
pub use embedded_hal::delay::DelayNs;

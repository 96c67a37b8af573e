//! Mock implementations for testing
//!
//! This module provides mock implementations of the platform traits for use
//! in unit and integration tests.

#![cfg(any(test, feature = "std"))]

use crate::display::{StatusDisplay, LINE_WIDTH};
use crate::store::ModeStore;

/// Capacity of the mock display's message history. A full five-sweep test
/// suite renders ~1300 lines; keep headroom above that.
const HISTORY_CAP: usize = 2048;

/// Mock two-line display recording everything pushed at it.
pub struct MockDisplay {
    line1: heapless::String<LINE_WIDTH>,
    line2: heapless::String<LINE_WIDTH>,
    history: heapless::Vec<heapless::String<LINE_WIDTH>, HISTORY_CAP>,
    init_count: usize,
}

impl MockDisplay {
    /// Create a new mock display.
    pub fn new() -> Self {
        Self {
            line1: heapless::String::new(),
            line2: heapless::String::new(),
            history: heapless::Vec::new(),
            init_count: 0,
        }
    }

    /// Text currently on line 1.
    pub fn line1_text(&self) -> &str {
        &self.line1
    }

    /// Text currently on line 2.
    pub fn line2_text(&self) -> &str {
        &self.line2
    }

    /// Every line ever rendered, in order (both lines interleaved).
    /// Bounded; pushes past capacity are dropped.
    pub fn history(&self) -> &[heapless::String<LINE_WIDTH>] {
        &self.history
    }

    /// True if some rendered line contained `needle`.
    pub fn saw(&self, needle: &str) -> bool {
        self.history.iter().any(|line| line.contains(needle))
    }

    /// Number of `init` calls.
    pub fn init_count(&self) -> usize {
        self.init_count
    }

    fn record(&mut self, text: &str) -> heapless::String<LINE_WIDTH> {
        let mut line = heapless::String::new();
        // Clip to the panel width, as the real module would.
        let clipped = text.get(..LINE_WIDTH.min(text.len())).unwrap_or(text);
        line.push_str(clipped).ok();
        // History is bounded; drop silently when full.
        self.history.push(line.clone()).ok();
        line
    }
}

impl Default for MockDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusDisplay for MockDisplay {
    fn init(&mut self) {
        self.init_count += 1;
    }

    fn line1(&mut self, text: &str) {
        self.line1 = self.record(text);
    }

    fn line2(&mut self, text: &str) {
        self.line2 = self.record(text);
    }
}

/// Mock EEPROM cell holding the persisted test mode.
pub struct MockModeStore {
    cell: Option<u8>,
    saves: usize,
}

impl MockModeStore {
    /// An erased cell — models the first-ever power-up.
    pub fn erased() -> Self {
        Self {
            cell: None,
            saves: 0,
        }
    }

    /// A cell already holding `raw` — models a board that has run before.
    pub fn with_value(raw: u8) -> Self {
        Self {
            cell: Some(raw),
            saves: 0,
        }
    }

    /// Current raw content (None = erased).
    pub fn raw(&self) -> Option<u8> {
        self.cell
    }

    /// Number of `save` calls (EEPROM wear tracking in tests).
    pub fn save_count(&self) -> usize {
        self.saves
    }
}

impl ModeStore for MockModeStore {
    type Error = core::convert::Infallible;

    fn load(&mut self) -> Result<Option<u8>, Self::Error> {
        Ok(self.cell)
    }

    fn save(&mut self, raw: u8) -> Result<(), Self::Error> {
        self.cell = Some(raw);
        self.saves += 1;
        Ok(())
    }
}

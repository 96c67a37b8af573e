//! Console rendition of the two-line status panel
//!
//! The simulator has no LCD module; every line pushed at the panel is
//! emitted as a tracing event instead, and the current contents stay
//! readable for assertions and the end-of-run summary.

use platform::display::{StatusDisplay, LINE_WIDTH};

/// Status panel that logs through `tracing`.
#[derive(Debug, Default)]
pub struct ConsolePanel {
    line1: heapless::String<LINE_WIDTH>,
    line2: heapless::String<LINE_WIDTH>,
}

impl ConsolePanel {
    /// Create a blank panel.
    pub fn new() -> Self {
        Self::default()
    }

    /// Text currently on line 1.
    pub fn line1_text(&self) -> &str {
        &self.line1
    }

    /// Text currently on line 2.
    pub fn line2_text(&self) -> &str {
        &self.line2
    }

    fn clip(text: &str) -> heapless::String<LINE_WIDTH> {
        let mut line = heapless::String::new();
        // Hardware panels drop everything past the last column.
        let clipped = text.get(..LINE_WIDTH.min(text.len())).unwrap_or(text);
        line.push_str(clipped).ok();
        line
    }
}

impl StatusDisplay for ConsolePanel {
    fn init(&mut self) {
        self.line1.clear();
        self.line2.clear();
        tracing::debug!("panel initialized");
    }

    fn line1(&mut self, text: &str) {
        self.line1 = Self::clip(text);
        tracing::info!(target: "panel", "[{:<16}]", self.line1.as_str());
    }

    fn line2(&mut self, text: &str) {
        self.line2 = Self::clip(text);
        // Row-status churn is per-row noise; faults and verdicts matter.
        if self.line2.starts_with("..") {
            tracing::debug!(target: "panel", "[{:<16}]", self.line2.as_str());
        } else {
            tracing::info!(target: "panel", "[{:<16}]", self.line2.as_str());
        }
    }
}

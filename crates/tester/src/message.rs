//! Status-line formatting
//!
//! Fixed 16-character panel, so every formatter returns a bounded
//! `heapless::String` and the longest possible output is proven to fit in
//! tests. Row and column are decimal (operators count chips in decimal),
//! the observed byte is hex (operators read bits in hex).

use core::fmt::Write;

use heapless::String;
use platform::LINE_WIDTH;

use crate::addr::RowAddr;
use crate::fault::FaultRecord;

/// One panel line.
pub type Line = String<LINE_WIDTH>;

/// Per-row progress, e.g. `"..R 17"`. `phase` is a single letter:
/// `W` write sweep, `R` read/verify sweep.
pub fn row_status(phase: char, row: RowAddr) -> Line {
    let mut line = Line::new();
    // "..X 127" is 7 chars; cannot overflow the panel.
    write!(line, "..{phase} {row}").ok();
    line
}

/// Fault diagnostic, e.g. `"!R5 C40 ~00"`: row, column, observed byte.
pub fn fault_line(fault: &FaultRecord) -> Line {
    let mut line = Line::new();
    // Worst case "!R127 C127 ~FF" is 14 chars; cannot overflow.
    write!(line, "!R{} C{} ~{:02X}", fault.row, fault.col, fault.observed).ok();
    line
}

/// Sweep-suite completion banner.
pub const ALL_PASSED: &str = "OK!";

#[cfg(test)]
mod tests {
    use super::*;
    use crate::addr::ColAddr;

    #[test]
    fn row_status_formats() {
        assert_eq!(row_status('R', RowAddr::new(5)).as_str(), "..R 5");
        assert_eq!(row_status('W', RowAddr::new(127)).as_str(), "..W 127");
    }

    #[test]
    fn fault_line_carries_row_col_and_observed_byte() {
        let fault = FaultRecord {
            row: RowAddr::new(5),
            col: ColAddr::new(40),
            expected: 0xCA,
            observed: 0x00,
        };
        assert_eq!(fault_line(&fault).as_str(), "!R5 C40 ~00");
    }

    #[test]
    fn worst_case_lines_fit_the_panel() {
        let fault = FaultRecord {
            row: RowAddr::new(127),
            col: ColAddr::new(127),
            expected: 0,
            observed: 0xFF,
        };
        assert_eq!(fault_line(&fault).as_str(), "!R127 C127 ~FF");
        assert!(fault_line(&fault).len() <= LINE_WIDTH);
        assert!(row_status('W', RowAddr::new(127)).len() <= LINE_WIDTH);
    }
}

//! Status panel abstraction
//!
//! The tester reports through a two-line character display (a CM1602-class
//! module). The controller behind it is out of scope here: the engine only
//! ever needs "put this text on line 1 / line 2". The display has no way to
//! signal failure, so neither does this trait — writes are fire-and-forget,
//! matching the write-only wiring on the board.

/// Visible width of one display line, in characters.
///
/// Longer input is the caller's responsibility to truncate; implementations
/// may clip or wrap excess characters arbitrarily.
pub const LINE_WIDTH: usize = 16;

/// Two-line status panel.
pub trait StatusDisplay {
    /// One-time controller setup. Must be called before any line output.
    fn init(&mut self);

    /// Render `text` on the first line (test program banner).
    fn line1(&mut self, text: &str);

    /// Render `text` on the second line (per-row status and diagnostics).
    fn line2(&mut self, text: &str);
}

impl<T: StatusDisplay + ?Sized> StatusDisplay for &mut T {
    fn init(&mut self) {
        T::init(self);
    }

    fn line1(&mut self, text: &str) {
        T::line1(self, text);
    }

    fn line2(&mut self, text: &str) {
        T::line2(self, text);
    }
}

//! Test-mode sequencer
//!
//! One enumerated selector survives device reset in non-volatile storage;
//! each reset advances it (increment with wraparound) *before* use, so the
//! operator steps through the programs by tapping reset. The very first
//! power-up is the special case: erased storage holds no value at all, and
//! the sequencer seeds [`TestMode::FullTestByPage`] rather than trusting
//! undefined content.

use platform::ModeStore;

/// The four test programs, in reset-cycling order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum TestMode {
    /// Full pattern suite, page-mode row access.
    FullTestByPage = 0,
    /// Full pattern suite, bit-mode row access (slower, more transitions).
    FullTestByBit = 1,
    /// Endless refresh-interleaved write sweeps (scope probing).
    ContinuousWrite = 2,
    /// Endless single-cell write/read at (0, 0).
    SingleCellProbe = 3,
}

/// Mode seeded on the first-ever power-up, when storage is erased.
pub const FIRST_BOOT_MODE: TestMode = TestMode::FullTestByPage;

impl TestMode {
    /// Number of modes in the cycle.
    pub const COUNT: u8 = 4;

    /// Decode a persisted byte. Unknown values (corrupt or erased-to-0xFF
    /// storage) decode to `None`.
    pub const fn from_raw(raw: u8) -> Option<Self> {
        match raw {
            0 => Some(Self::FullTestByPage),
            1 => Some(Self::FullTestByBit),
            2 => Some(Self::ContinuousWrite),
            3 => Some(Self::SingleCellProbe),
            _ => None,
        }
    }

    /// The persisted encoding.
    pub const fn as_raw(self) -> u8 {
        self as u8
    }

    /// Successor in the reset cycle, wrapping.
    pub const fn next(self) -> Self {
        match self {
            Self::FullTestByPage => Self::FullTestByBit,
            Self::FullTestByBit => Self::ContinuousWrite,
            Self::ContinuousWrite => Self::SingleCellProbe,
            Self::SingleCellProbe => Self::FullTestByPage,
        }
    }

    /// Display banner (≤ 16 characters).
    pub const fn label(self) -> &'static str {
        match self {
            Self::FullTestByPage => "Full test/page",
            Self::FullTestByBit => "Full test/bit",
            Self::ContinuousWrite => "Cont. write",
            Self::SingleCellProbe => "Cell probe",
        }
    }
}

/// One reset's worth of sequencing: load, advance (or seed on first boot),
/// persist, return the mode to run now.
pub fn advance<M: ModeStore>(store: &mut M) -> Result<TestMode, M::Error> {
    let mode = match store.load()?.and_then(TestMode::from_raw) {
        Some(previous) => previous.next(),
        // First-ever power-up (or corrupt cell): storage content is
        // undefined, seed the cycle start instead of advancing garbage.
        None => FIRST_BOOT_MODE,
    };
    store.save(mode.as_raw())?;
    Ok(mode)
}

//! Non-volatile mode storage
//!
//! One byte survives a device reset: the test-mode selector. On the board
//! this is a data-EEPROM cell; erased EEPROM reads back as no value at all,
//! which is how the very first power-up is distinguished from a reset.

/// One byte of reset-surviving storage.
pub trait ModeStore {
    /// Error type
    type Error: core::fmt::Debug;

    /// Read the stored byte.
    ///
    /// Returns `Ok(None)` when the cell has never been written (first-ever
    /// power-up): the content is *undefined* then, and implementations must
    /// not invent a silent zero.
    fn load(&mut self) -> Result<Option<u8>, Self::Error>;

    /// Persist `raw`, replacing any previous value.
    fn save(&mut self, raw: u8) -> Result<(), Self::Error>;
}

impl<T: ModeStore + ?Sized> ModeStore for &mut T {
    type Error = T::Error;

    fn load(&mut self) -> Result<Option<u8>, Self::Error> {
        T::load(self)
    }

    fn save(&mut self, raw: u8) -> Result<(), Self::Error> {
        T::save(self, raw)
    }
}

//! File-backed mode store for the simulator
//!
//! One byte in a file stands in for the EEPROM cell: it survives process
//! exit the way the real cell survives reset, so repeated simulator runs
//! step through the mode cycle exactly like repeated reset taps.

use std::fs;
use std::io;
use std::path::PathBuf;

use platform::ModeStore;

/// Mode store persisting a single byte to a file.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Store backed by `path`. A missing file models erased storage.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Delete the backing file, returning the store to the erased state.
    pub fn erase(&mut self) -> io::Result<()> {
        match fs::remove_file(&self.path) {
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            other => other,
        }
    }
}

impl ModeStore for FileStore {
    type Error = io::Error;

    fn load(&mut self) -> Result<Option<u8>, Self::Error> {
        match fs::read(&self.path) {
            Ok(bytes) => Ok(bytes.first().copied()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err),
        }
    }

    fn save(&mut self, raw: u8) -> Result<(), Self::Error> {
        fs::write(&self.path, [raw])
    }
}

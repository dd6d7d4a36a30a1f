//! Backing handles for the record store.
//!
//! The store needs a handle it can read from the start, overwrite in place and
//! rewind. Files are the production backing; an in-memory cursor stands in for
//! tests.

use std::fs::{File, OpenOptions};
use std::io::{self, Cursor, Read, Seek, Write};
use std::path::Path;

/// A seekable byte store whose contents can be replaced wholesale.
pub trait Backing: Read + Write + Seek {
    /// Drop all contents, leaving an empty backing positioned at the start.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying handle cannot be truncated.
    fn truncate(&mut self) -> io::Result<()>;

    /// Flush written contents through to durable storage.
    ///
    /// # Errors
    ///
    /// Returns an error if the sync fails.
    fn sync(&mut self) -> io::Result<()> {
        self.flush()
    }
}

impl Backing for File {
    fn truncate(&mut self) -> io::Result<()> {
        self.set_len(0)?;
        self.rewind()
    }

    fn sync(&mut self) -> io::Result<()> {
        self.sync_data()
    }
}

impl Backing for Cursor<Vec<u8>> {
    fn truncate(&mut self) -> io::Result<()> {
        self.get_mut().clear();
        self.set_position(0);
        Ok(())
    }
}

/// Open `path` for reading and writing, creating it with `mode` if absent.
///
/// `mode` only applies on Unix; elsewhere the platform default is used.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or created.
pub fn open_file(path: &Path, mode: u32) -> io::Result<File> {
    let mut options = OpenOptions::new();
    options.read(true).write(true).create(true).truncate(false);

    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(mode);
    }
    #[cfg(not(unix))]
    let _ = mode;

    options.open(path)
}

//! Storage layer for userdb.
//!
//! The [`RecordStore`] keeps the whole collection in one JSON file and
//! rewrites that file on every mutation. There is no locking: two processes
//! writing the same file at once race, and the last writer wins.

pub mod backing;
pub mod codec;

use std::fs::File;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::config::StorageConfig;
use crate::error::{Error, Rejection, Result};
use crate::record::Record;

pub use backing::Backing;

/// Result of a store operation that can be refused on business grounds.
#[derive(Debug)]
pub enum Outcome<T> {
    /// The operation completed.
    Done(T),
    /// The operation was refused and nothing was written.
    Rejected(Rejection),
}

impl<T> Outcome<T> {
    /// Check if the operation completed.
    #[must_use]
    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done(_))
    }

    /// Get the rejection, if any.
    #[must_use]
    pub fn rejection(&self) -> Option<&Rejection> {
        match self {
            Self::Done(_) => None,
            Self::Rejected(rejection) => Some(rejection),
        }
    }
}

/// File-backed store of user records.
///
/// Every operation reads the backing from the start and leaves it rewound,
/// so several operations can run against one handle.
#[derive(Debug)]
pub struct RecordStore<B = File> {
    /// Path to the backing file.
    path: PathBuf,
    /// Open handle to the backing contents.
    backing: B,
    /// Sync after each write.
    sync_writes: bool,
}

impl RecordStore<File> {
    /// Open or create the backing file at the given path.
    ///
    /// Creates the parent directories if they don't exist. A new file is
    /// created with `config.create_mode` and starts out empty.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or file cannot be created or opened.
    pub fn open(path: impl AsRef<Path>, config: &StorageConfig) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|source| Error::DirectoryCreate {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        debug!("Opening backing file at {}", path.display());
        let file =
            backing::open_file(&path, config.create_mode).map_err(|source| Error::FileOpen {
                path: path.clone(),
                source,
            })?;

        Ok(Self {
            path,
            backing: file,
            sync_writes: config.sync_writes,
        })
    }
}

impl RecordStore<Cursor<Vec<u8>>> {
    /// Create an empty in-memory store for testing.
    #[must_use]
    pub fn open_in_memory() -> Self {
        Self::from_bytes(Vec::new())
    }

    /// Create an in-memory store holding the given raw contents.
    #[must_use]
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            path: PathBuf::from(":memory:"),
            backing: Cursor::new(bytes.into()),
            sync_writes: false,
        }
    }

    /// Get the raw contents of the in-memory backing.
    #[must_use]
    pub fn contents(&self) -> &[u8] {
        self.backing.get_ref()
    }
}

impl<B: Backing> RecordStore<B> {
    /// Get the path to the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Decode the whole collection.
    ///
    /// # Errors
    ///
    /// Returns an error if reading fails or the contents are not a JSON array
    /// of records.
    pub fn load_all(&mut self) -> Result<Vec<Record>> {
        self.rewound(|store| {
            let bytes = store.read_raw()?;
            let records = codec::decode(&bytes).map_err(|source| Error::CorruptCollection {
                path: store.path.clone(),
                source,
            })?;
            debug!("Loaded {} records from {}", records.len(), store.path.display());
            Ok(records)
        })
    }

    /// Replace the backing contents with the encoding of `records`.
    ///
    /// Returns the bytes written.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding or writing fails.
    pub fn persist_all(&mut self, records: &[Record]) -> Result<Vec<u8>> {
        let bytes = codec::encode(records).map_err(Error::Encode)?;
        self.rewound(|store| {
            store.backing.truncate()?;
            store.backing.write_all(&bytes)?;
            if store.sync_writes {
                store.backing.sync()?;
            } else {
                store.backing.flush()?;
            }
            debug!("Wrote {} records to {}", records.len(), store.path.display());
            Ok(())
        })?;
        Ok(bytes)
    }

    /// Read the raw backing contents without decoding them.
    ///
    /// # Errors
    ///
    /// Returns an error if reading fails.
    pub fn list(&mut self) -> Result<Vec<u8>> {
        self.rewound(Self::read_raw)
    }

    /// Find the first record with the given id.
    ///
    /// Returns `None` when no record matches.
    ///
    /// # Errors
    ///
    /// Returns an error if the collection cannot be read or decoded.
    pub fn find_by_id(&mut self, id: &str) -> Result<Option<Record>> {
        let found = self
            .load_all()?
            .into_iter()
            .find(|record| record.has_id(id));
        debug!("Lookup of id {id}: {}", if found.is_some() { "hit" } else { "miss" });
        Ok(found)
    }

    /// Append the record encoded in `item`.
    ///
    /// On success returns the new encoding of the whole collection, which is
    /// exactly what is now stored.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored collection cannot be read or decoded,
    /// or the write fails. A malformed item, an empty id or a duplicate id is
    /// a rejection, not an error.
    pub fn add(&mut self, item: &str) -> Result<Outcome<Vec<u8>>> {
        let candidate = match Record::from_json(item) {
            Ok(record) => record,
            Err(err) => {
                warn!("Rejected malformed item: {err}");
                return Ok(Outcome::Rejected(Rejection::InvalidItem(err)));
            }
        };

        if candidate.id.is_empty() {
            warn!("Rejected item without an id");
            return Ok(Outcome::Rejected(Rejection::EmptyId));
        }

        let mut records = self.load_all()?;
        if records.iter().any(|record| record.has_id(&candidate.id)) {
            warn!("Rejected duplicate id {}", candidate.id);
            return Ok(Outcome::Rejected(Rejection::DuplicateId(candidate.id)));
        }

        let id = candidate.id.clone();
        records.push(candidate);
        let bytes = self.persist_all(&records)?;

        info!("Added record {id} to {}", self.path.display());
        Ok(Outcome::Done(bytes))
    }

    /// Delete every record with the given id.
    ///
    /// Returns the number of records removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the collection cannot be read, decoded or written.
    /// An unknown id is a rejection and leaves the backing untouched.
    pub fn remove(&mut self, id: &str) -> Result<Outcome<usize>> {
        let mut records = self.load_all()?;
        let before = records.len();
        records.retain(|record| !record.has_id(id));
        let removed = before - records.len();

        if removed == 0 {
            warn!("No record with id {id} to remove");
            return Ok(Outcome::Rejected(Rejection::NotFound(id.to_string())));
        }

        self.persist_all(&records)?;

        info!("Removed record {id} from {}", self.path.display());
        Ok(Outcome::Done(removed))
    }

    /// Read everything from the start of the backing.
    fn read_raw(&mut self) -> Result<Vec<u8>> {
        self.backing.rewind()?;
        let mut bytes = Vec::new();
        self.backing.read_to_end(&mut bytes)?;
        Ok(bytes)
    }

    /// Run `op`, then rewind the backing whatever the outcome.
    ///
    /// An error from `op` takes precedence over a failed rewind.
    fn rewound<T>(&mut self, op: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        let result = op(self);
        let rewind = self.backing.rewind();
        let value = result?;
        rewind?;
        Ok(value)
    }
}

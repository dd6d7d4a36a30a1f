//! Maps a validated invocation onto the record store.
//!
//! Store errors propagate to the caller and end the run. Rejections are
//! written to the output sink as plain text and the run still succeeds.

use std::io::Write;

use tracing::debug;

use crate::cli::{Invocation, Operation};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::storage::{Backing, Outcome, RecordStore};

/// Open the backing file named by `invocation` and run its operation,
/// writing the result to `out`.
///
/// # Errors
///
/// Returns an error if the file cannot be opened, the stored collection is
/// unreadable, or writing to `out` fails.
pub fn perform<W: Write>(invocation: &Invocation, config: &Config, out: &mut W) -> Result<()> {
    let mut store = RecordStore::open(&invocation.file_name, &config.storage)?;
    run(&mut store, &invocation.operation, out)
}

/// Run one operation against an open store.
///
/// # Errors
///
/// Returns an error if the store fails or writing to `out` fails.
pub fn run<B: Backing, W: Write>(
    store: &mut RecordStore<B>,
    operation: &Operation,
    out: &mut W,
) -> Result<()> {
    debug!("Running {} against {}", operation.kind(), store.path().display());

    match operation {
        Operation::List => {
            let bytes = store.list()?;
            out.write_all(&bytes)?;
        }
        Operation::Add { item } => match store.add(item)? {
            Outcome::Done(collection) => out.write_all(&collection)?,
            Outcome::Rejected(rejection) => write!(out, "{rejection}")?,
        },
        Operation::FindById { id } => {
            if let Some(record) = store.find_by_id(id)? {
                let json = record.to_json().map_err(Error::Encode)?;
                out.write_all(json.as_bytes())?;
            }
        }
        Operation::Remove { id } => {
            if let Outcome::Rejected(rejection) = store.remove(id)? {
                write!(out, "{rejection}")?;
            }
        }
    }

    Ok(())
}

//! `userdb` - A flat store of user records kept in a single JSON file
//!
//! This library provides the record store, its configuration, and the
//! dispatcher that the `userdb` binary drives.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod cli;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod logging;
pub mod record;
pub mod storage;

pub use cli::{Invocation, Operation};
pub use config::Config;
pub use dispatch::perform;
pub use error::{Error, Rejection, Result};
pub use logging::init_logging;
pub use record::Record;
pub use storage::{Outcome, RecordStore};

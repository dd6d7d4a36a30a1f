//! Error types for userdb.
//!
//! Failures come in two kinds. [`Error`] covers everything that aborts the
//! run: bad invocations, unreadable files, corrupt collections, broken
//! configuration. [`Rejection`] covers expected business-rule failures that
//! are reported through the output sink while the process still succeeds.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for userdb operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Validation Errors ===
    /// A required command-line flag was missing or empty.
    #[error("--{flag} flag has to be specified")]
    MissingFlag {
        /// Long name of the flag.
        flag: &'static str,
    },

    /// The requested operation is not one of the recognized names.
    #[error("operation '{name}' not allowed")]
    OperationNotAllowed {
        /// The operation name as given.
        name: String,
    },

    // === Storage Errors ===
    /// Failed to open or create the backing file.
    #[error("failed to open {path}: {source}")]
    FileOpen {
        /// Path to the backing file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to create the directory holding the backing file.
    #[error("failed to create directory {path}: {source}")]
    DirectoryCreate {
        /// Path that couldn't be created.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The stored collection is not a JSON array of records.
    #[error("corrupt collection in {path}: {source}")]
    CorruptCollection {
        /// Path to the backing file.
        path: PathBuf,
        /// The decoder error.
        #[source]
        source: serde_json::Error,
    },

    /// Encoding the collection failed.
    #[error("failed to encode collection: {0}")]
    Encode(#[source] serde_json::Error),

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === I/O Errors ===
    /// File system or output operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A specialized Result type for userdb operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a missing flag error.
    #[must_use]
    pub fn missing_flag(flag: &'static str) -> Self {
        Self::MissingFlag { flag }
    }

    /// Create an unknown operation error.
    #[must_use]
    pub fn operation_not_allowed(name: impl Into<String>) -> Self {
        Self::OperationNotAllowed { name: name.into() }
    }

    /// Check if this error was raised while validating the invocation,
    /// before any file was touched.
    #[must_use]
    pub fn is_validation_error(&self) -> bool {
        matches!(
            self,
            Self::MissingFlag { .. } | Self::OperationNotAllowed { .. }
        )
    }
}

/// An expected failure of a store operation.
///
/// Rejections never abort the process. The dispatcher writes their message
/// to the output sink as plain text.
#[derive(Error, Debug)]
pub enum Rejection {
    /// The item payload is not a valid record.
    #[error("{0}")]
    InvalidItem(#[source] serde_json::Error),

    /// The item payload decoded but carries an empty id.
    #[error("item id must not be empty")]
    EmptyId,

    /// A record with this id is already stored.
    #[error("Item with id {0} already exists")]
    DuplicateId(String),

    /// No record with this id is stored.
    #[error("Item with id {0} not found")]
    NotFound(String),
}

impl Rejection {
    /// Check if this rejection reports a missing record.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Check if this rejection reports a duplicate id.
    #[must_use]
    pub fn is_duplicate(&self) -> bool {
        matches!(self, Self::DuplicateId(_))
    }
}

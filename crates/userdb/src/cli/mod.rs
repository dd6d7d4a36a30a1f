//! Command-line interface for userdb.
//!
//! This module provides the flag surface of the `userdb` binary and turns
//! parsed flags into a validated [`Invocation`].

mod invocation;

use std::path::PathBuf;

use clap::Parser;

pub use invocation::{Invocation, Operation, OperationKind};

/// userdb - Keep user records in a JSON file
///
/// Lists, adds, finds and removes records stored as a JSON array in a single
/// file. The file is created if it does not exist.
#[derive(Debug, Parser)]
#[command(name = "userdb")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all log output except errors
    #[arg(short, long)]
    pub quiet: bool,

    /// Operation to perform
    ///
    /// list - Getting list of Items
    /// add - Adding item to the Collection
    /// findById - Getting Item by ID
    /// remove - Delete Item from the Collection
    #[arg(short, long, value_name = "OPERATION", verbatim_doc_comment)]
    pub operation: Option<String>,

    /// JSON file holding the collection
    #[arg(short, long = "file-name", visible_alias = "fileName", value_name = "FILE")]
    pub file_name: Option<PathBuf>,

    /// Record to add, as JSON
    ///
    /// Example: {"id": "1", "email": "test@test.com", "age": 31}
    #[arg(short, long, value_name = "JSON", verbatim_doc_comment)]
    pub item: Option<String>,

    /// Record ID for findById and remove
    #[arg(long, value_name = "ID")]
    pub id: Option<String>,
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> crate::logging::Verbosity {
        if self.quiet {
            crate::logging::Verbosity::Quiet
        } else {
            match self.verbose {
                0 => crate::logging::Verbosity::Normal,
                1 => crate::logging::Verbosity::Verbose,
                _ => crate::logging::Verbosity::Trace,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn bare() -> Cli {
        Cli {
            config: None,
            verbose: 0,
            quiet: false,
            operation: None,
            file_name: None,
            item: None,
            id: None,
        }
    }

    #[test]
    fn test_cli_name() {
        let cli = Cli::command();
        assert_eq!(cli.get_name(), "userdb");
    }

    #[test]
    fn test_cli_verify() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_verbosity_quiet() {
        let cli = Cli {
            quiet: true,
            ..bare()
        };
        assert_eq!(cli.verbosity(), crate::logging::Verbosity::Quiet);
    }

    #[test]
    fn test_verbosity_normal() {
        assert_eq!(bare().verbosity(), crate::logging::Verbosity::Normal);
    }

    #[test]
    fn test_verbosity_verbose() {
        let cli = Cli {
            verbose: 1,
            ..bare()
        };
        assert_eq!(cli.verbosity(), crate::logging::Verbosity::Verbose);
    }

    #[test]
    fn test_verbosity_trace() {
        let cli = Cli {
            verbose: 3,
            ..bare()
        };
        assert_eq!(cli.verbosity(), crate::logging::Verbosity::Trace);
    }

    #[test]
    fn test_parse_list() {
        let args = ["userdb", "--operation", "list", "--file-name", "users.json"];
        let cli = Cli::try_parse_from(args).unwrap();
        assert_eq!(cli.operation.as_deref(), Some("list"));
        assert_eq!(cli.file_name, Some(PathBuf::from("users.json")));
    }

    #[test]
    fn test_parse_file_name_alias() {
        let args = ["userdb", "-o", "list", "--fileName", "users.json"];
        let cli = Cli::try_parse_from(args).unwrap();
        assert_eq!(cli.file_name, Some(PathBuf::from("users.json")));
    }

    #[test]
    fn test_parse_add_item() {
        let args = [
            "userdb",
            "-o",
            "add",
            "-f",
            "users.json",
            "-i",
            r#"{"id":"1","email":"a@b.com","age":30}"#,
        ];
        let cli = Cli::try_parse_from(args).unwrap();
        assert_eq!(
            cli.item.as_deref(),
            Some(r#"{"id":"1","email":"a@b.com","age":30}"#)
        );
    }

    #[test]
    fn test_parse_id() {
        let args = ["userdb", "-o", "remove", "-f", "u.json", "--id", "2"];
        let cli = Cli::try_parse_from(args).unwrap();
        assert_eq!(cli.id.as_deref(), Some("2"));
    }

    #[test]
    fn test_parse_with_config() {
        let args = ["userdb", "-c", "/custom/config.toml", "-o", "list"];
        let cli = Cli::try_parse_from(args).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/custom/config.toml")));
    }

    #[test]
    fn test_parse_with_verbose_and_quiet() {
        let cli = Cli::try_parse_from(["userdb", "-vv"]).unwrap();
        assert_eq!(cli.verbose, 2);

        let cli = Cli::try_parse_from(["userdb", "-q"]).unwrap();
        assert!(cli.quiet);
    }

    #[test]
    fn test_parse_no_flags() {
        // Required flags are checked when building the invocation.
        let cli = Cli::try_parse_from(["userdb"]).unwrap();
        assert!(cli.operation.is_none());
        assert!(cli.file_name.is_none());
    }
}

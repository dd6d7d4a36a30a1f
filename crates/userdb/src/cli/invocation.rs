//! Typed invocations.
//!
//! Flags arrive as loose optional strings. An [`Invocation`] is the checked
//! form: the operation is known and every flag it needs is present and
//! non-empty. Building one never touches the file system.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::config::Config;
use crate::error::{Error, Result};

use super::Cli;

/// A store operation together with its argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    /// Print the raw collection.
    List,
    /// Append the JSON-encoded record.
    Add {
        /// The record payload.
        item: String,
    },
    /// Print the record with this id.
    FindById {
        /// Id to look up.
        id: String,
    },
    /// Delete the record with this id.
    Remove {
        /// Id to delete.
        id: String,
    },
}

/// The recognized operation names, without their arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    /// `list`
    List,
    /// `add`
    Add,
    /// `findById`
    FindById,
    /// `remove`
    Remove,
}

impl FromStr for OperationKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "list" => Ok(Self::List),
            "add" => Ok(Self::Add),
            "findById" => Ok(Self::FindById),
            "remove" => Ok(Self::Remove),
            other => Err(Error::operation_not_allowed(other)),
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::List => write!(f, "list"),
            Self::Add => write!(f, "add"),
            Self::FindById => write!(f, "findById"),
            Self::Remove => write!(f, "remove"),
        }
    }
}

impl Operation {
    /// The name of this operation as given on the command line.
    #[must_use]
    pub fn kind(&self) -> OperationKind {
        match self {
            Self::List => OperationKind::List,
            Self::Add { .. } => OperationKind::Add,
            Self::FindById { .. } => OperationKind::FindById,
            Self::Remove { .. } => OperationKind::Remove,
        }
    }
}

/// A fully validated request to run one operation against one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Path to the backing file.
    pub file_name: PathBuf,
    /// What to do with it.
    pub operation: Operation,
}

impl Invocation {
    /// Validate parsed flags.
    ///
    /// `config.storage.file_name` stands in for a missing `--file-name`.
    /// Checks run in order: operation, file name, operation name, then the
    /// operation's own argument.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a missing or empty flag, or an
    /// unrecognized operation.
    pub fn from_cli(cli: &Cli, config: &Config) -> Result<Self> {
        let operation = required(cli.operation.as_deref(), "operation")?;

        let file_name = cli
            .file_name
            .clone()
            .filter(|path| !path.as_os_str().is_empty())
            .or_else(|| config.storage.file_name.clone())
            .ok_or_else(|| Error::missing_flag("file-name"))?;

        let operation = match operation.parse::<OperationKind>()? {
            OperationKind::List => Operation::List,
            OperationKind::Add => Operation::Add {
                item: required(cli.item.as_deref(), "item")?.to_string(),
            },
            OperationKind::FindById => Operation::FindById {
                id: required(cli.id.as_deref(), "id")?.to_string(),
            },
            OperationKind::Remove => Operation::Remove {
                id: required(cli.id.as_deref(), "id")?.to_string(),
            },
        };

        Ok(Self {
            file_name,
            operation,
        })
    }
}

/// Treat an absent flag and an empty one alike.
fn required<'a>(value: Option<&'a str>, flag: &'static str) -> Result<&'a str> {
    value
        .filter(|v| !v.is_empty())
        .ok_or_else(|| Error::missing_flag(flag))
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    fn cli(operation: Option<&str>, file_name: Option<&str>) -> Cli {
        Cli {
            config: None,
            verbose: 0,
            quiet: false,
            operation: operation.map(str::to_string),
            file_name: file_name.map(PathBuf::from),
            item: None,
            id: None,
        }
    }

    fn validate(cli: &Cli) -> Result<Invocation> {
        Invocation::from_cli(cli, &Config::default())
    }

    #[test_case("list" => OperationKind::List)]
    #[test_case("add" => OperationKind::Add)]
    #[test_case("findById" => OperationKind::FindById)]
    #[test_case("remove" => OperationKind::Remove)]
    fn parse_operation_kind(name: &str) -> OperationKind {
        name.parse().unwrap()
    }

    #[test_case("delete")]
    #[test_case("findbyid")]
    #[test_case("LIST")]
    #[test_case(" list")]
    fn parse_operation_kind_rejects(name: &str) {
        let err = name.parse::<OperationKind>().unwrap_err();
        assert!(matches!(err, Error::OperationNotAllowed { .. }));
    }

    #[test_case(OperationKind::List => "list")]
    #[test_case(OperationKind::FindById => "findById")]
    fn display_operation_kind(kind: OperationKind) -> String {
        kind.to_string()
    }

    #[test]
    fn list_invocation() {
        let invocation = validate(&cli(Some("list"), Some("users.json"))).unwrap();
        assert_eq!(invocation.file_name, PathBuf::from("users.json"));
        assert_eq!(invocation.operation, Operation::List);
        assert_eq!(invocation.operation.kind(), OperationKind::List);
    }

    #[test]
    fn add_invocation() {
        let mut cli = cli(Some("add"), Some("users.json"));
        cli.item = Some(r#"{"id":"1"}"#.to_string());

        let invocation = validate(&cli).unwrap();

        assert_eq!(
            invocation.operation,
            Operation::Add {
                item: r#"{"id":"1"}"#.to_string()
            }
        );
    }

    #[test_case("findById")]
    #[test_case("remove")]
    fn id_invocations(name: &str) {
        let mut cli = cli(Some(name), Some("users.json"));
        cli.id = Some("7".to_string());

        let invocation = validate(&cli).unwrap();

        assert_eq!(invocation.operation.kind().to_string(), name);
    }

    #[test_case(None, Some("users.json") => "--operation flag has to be specified")]
    #[test_case(Some(""), Some("users.json") => "--operation flag has to be specified")]
    #[test_case(Some("list"), None => "--file-name flag has to be specified")]
    #[test_case(Some("list"), Some("") => "--file-name flag has to be specified")]
    #[test_case(None, None => "--operation flag has to be specified")]
    #[test_case(Some("purge"), Some("users.json") => "operation 'purge' not allowed")]
    fn missing_or_bad_flags(operation: Option<&str>, file_name: Option<&str>) -> String {
        validate(&cli(operation, file_name)).unwrap_err().to_string()
    }

    #[test_case("add", "item")]
    #[test_case("findById", "id")]
    #[test_case("remove", "id")]
    fn operation_argument_required(operation: &str, flag: &str) {
        let err = validate(&cli(Some(operation), Some("users.json"))).unwrap_err();
        assert_eq!(err.to_string(), format!("--{flag} flag has to be specified"));
        assert!(err.is_validation_error());
    }

    #[test]
    fn empty_id_is_missing() {
        let mut cli = cli(Some("remove"), Some("users.json"));
        cli.id = Some(String::new());
        let err = validate(&cli).unwrap_err();
        assert_eq!(err.to_string(), "--id flag has to be specified");
    }

    #[test]
    fn unknown_operation_checked_after_file_name() {
        let err = validate(&cli(Some("purge"), None)).unwrap_err();
        assert_eq!(err.to_string(), "--file-name flag has to be specified");
    }

    #[test]
    fn config_supplies_file_name() {
        let mut config = Config::default();
        config.storage.file_name = Some(PathBuf::from("/var/lib/userdb/users.json"));

        let invocation = Invocation::from_cli(&cli(Some("list"), None), &config).unwrap();

        assert_eq!(
            invocation.file_name,
            PathBuf::from("/var/lib/userdb/users.json")
        );
    }

    #[test]
    fn flag_overrides_config_file_name() {
        let mut config = Config::default();
        config.storage.file_name = Some(PathBuf::from("configured.json"));

        let invocation =
            Invocation::from_cli(&cli(Some("list"), Some("flag.json")), &config).unwrap();

        assert_eq!(invocation.file_name, PathBuf::from("flag.json"));
    }
}

//! `userdb` - CLI for the userdb record store
//!
//! Runs one operation against a JSON collection file and writes the result
//! to stdout.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::io::{self, Write};

use anyhow::Context;
use clap::Parser;

use userdb::cli::Cli;
use userdb::{init_logging, perform, Config, Invocation};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbosity());

    // Load configuration
    let config = Config::load_from(cli.config.clone())?;

    // Validate flags before touching the file
    let invocation = Invocation::from_cli(&cli, &config)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    perform(&invocation, &config, &mut out).with_context(|| {
        format!(
            "{} failed on {}",
            invocation.operation.kind(),
            invocation.file_name.display()
        )
    })?;
    out.flush().context("failed to flush output")?;

    Ok(())
}

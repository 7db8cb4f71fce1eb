// src/cli.rs

//! CLI argument handling using `clap`.
//!
//! The launcher has no options of its own: every argument after the program
//! name belongs to the target. Help and version flags are disabled and an
//! escape `--` is inserted in front of the user's arguments, so `-h`,
//! `--version` and even a literal `--` reach the target untouched.

use std::ffi::OsString;

use clap::Parser;

/// Command-line arguments for `launchshim`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "launchshim",
    about = "Start the bundled executable and relay its I/O, exit code and signals.",
    disable_help_flag = true,
    disable_version_flag = true
)]
pub struct CliArgs {
    /// Arguments forwarded verbatim to the target executable.
    #[arg(num_args = 0.., allow_hyphen_values = true, value_name = "ARGS")]
    pub args: Vec<OsString>,
}

impl CliArgs {
    /// Parse a full argv (program name first).
    pub fn from_os_args<I, T>(argv: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        let mut argv = argv.into_iter().map(Into::into);
        let program = argv.next().unwrap_or_else(|| OsString::from("launchshim"));
        let escaped = [program, OsString::from("--")].into_iter().chain(argv);
        CliArgs::try_parse_from(escaped)
    }
}

/// Parse the process arguments, exiting with clap's usage error on failure.
pub fn parse() -> CliArgs {
    CliArgs::from_os_args(std::env::args_os()).unwrap_or_else(|e| e.exit())
}

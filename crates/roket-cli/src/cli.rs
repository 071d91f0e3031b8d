//! CLI argument definitions for the Roket partitioner.

use camino::Utf8PathBuf;
use clap::{Parser, Subcommand, ValueEnum};

/// Command-line interface for the Roket partitioner.
#[derive(Parser, Debug)]
#[command(name = "roket", version, disable_help_subcommand = true)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: CliCommand,
}

/// Subcommands for the Roket CLI.
#[derive(Subcommand, Debug, Clone)]
pub(crate) enum CliCommand {
    /// Splits every script in the source directory into the server and
    /// client directories.
    Bootstrap,
    /// Prints one variant of a single script.
    Split {
        /// Script to split.
        #[arg(value_name = "FILE")]
        file: Utf8PathBuf,
        /// Variant to print.
        #[arg(long, value_enum, default_value_t = Target::Server)]
        target: Target,
    },
}

/// Variant selected by `roket split`.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, ValueEnum)]
pub(crate) enum Target {
    /// Lines reaching the server.
    #[default]
    Server,
    /// Lines reaching the client.
    Client,
}

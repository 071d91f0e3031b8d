//! CLI entrypoint for the Roket script partitioner.
//!
//! The binary delegates to [`roket_cli::run`], which loads configuration,
//! parses the subcommand, and partitions scripts on disk.

use std::io::{self, StderrLock, StdoutLock};
use std::process::ExitCode;

fn main() -> ExitCode {
    let mut stdout: StdoutLock<'_> = io::stdout().lock();
    let mut stderr: StderrLock<'_> = io::stderr().lock();
    roket_cli::run(std::env::args_os(), &mut stdout, &mut stderr)
}

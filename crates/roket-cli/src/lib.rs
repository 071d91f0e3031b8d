//! Command-line runtime for the Roket script partitioner.
//!
//! The module owns argument parsing, configuration bootstrapping, and the
//! two subcommands. It can be driven from the binary entrypoint or from tests
//! that substitute the configuration loader and the output streams.

use std::ffi::OsString;
use std::fs;
use std::io::Write;
use std::process::ExitCode;

use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use roket_config::Config;
use roket_partition::{DirectoryTree, bootstrap, split};
use tracing::info;

mod cli;
mod config;
mod errors;
mod telemetry;

use cli::{Cli, CliCommand, Target};
use config::{ConfigArgumentSplit, split_config_arguments};
pub(crate) use config::{ConfigLoader, OrthoConfigLoader};
pub(crate) use errors::AppError;

/// CLI flags recognised by the configuration loader.
///
/// MAINTENANCE: keep in sync with the fields of `roket_config::Config`.
const CONFIG_CLI_FLAGS: &[&str] = &[
    "--config-path",
    "--source-dir",
    "--server-dir",
    "--client-dir",
    "--module-extension",
    "--log-filter",
    "--log-format",
];

const CLI_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::run");

struct CliRunner<'a, W: Write, E: Write, L: ConfigLoader> {
    stdout: &'a mut W,
    stderr: &'a mut E,
    loader: &'a L,
}

impl<'a, W, E, L> CliRunner<'a, W, E, L>
where
    W: Write,
    E: Write,
    L: ConfigLoader,
{
    fn new(stdout: &'a mut W, stderr: &'a mut E, loader: &'a L) -> Self {
        Self {
            stdout,
            stderr,
            loader,
        }
    }

    fn run<I>(&mut self, args: I) -> ExitCode
    where
        I: IntoIterator<Item = OsString>,
    {
        let args: Vec<OsString> = args.into_iter().collect();
        let split = split_config_arguments(&args);
        let cli_arguments = prepare_cli_arguments(&args, &split);

        let result = Cli::try_parse_from(cli_arguments)
            .map_err(AppError::CliUsage)
            .and_then(|cli| {
                self.loader
                    .load(&split.config_arguments)
                    .map(|config| (cli, config))
            })
            .and_then(|(cli, config)| {
                telemetry::initialise(&config)?;
                match cli.command {
                    CliCommand::Bootstrap => bootstrap_directories(&config, self.stdout),
                    CliCommand::Split { file, target } => {
                        print_variant(&file, target, self.stdout)
                    }
                }
            });

        match result {
            Ok(()) => ExitCode::SUCCESS,
            Err(AppError::CliUsage(error)) if !error.use_stderr() => {
                let _ = write!(self.stdout, "{error}");
                ExitCode::SUCCESS
            }
            Err(error) => {
                let _ = writeln!(self.stderr, "{error}");
                ExitCode::FAILURE
            }
        }
    }
}

/// Runs the CLI using the provided arguments and IO handles.
#[must_use]
pub fn run<I, W, E>(args: I, stdout: &mut W, stderr: &mut E) -> ExitCode
where
    I: IntoIterator<Item = OsString>,
    W: Write,
    E: Write,
{
    run_with_loader(args, stdout, stderr, &OrthoConfigLoader)
}

pub(crate) fn run_with_loader<I, W, E, L>(
    args: I,
    stdout: &mut W,
    stderr: &mut E,
    loader: &L,
) -> ExitCode
where
    I: IntoIterator<Item = OsString>,
    W: Write,
    E: Write,
    L: ConfigLoader,
{
    CliRunner::new(stdout, stderr, loader).run(args)
}

fn prepare_cli_arguments(args: &[OsString], split: &ConfigArgumentSplit) -> Vec<OsString> {
    let mut cli_arguments: Vec<OsString> = Vec::new();
    if let Some(first) = args.first() {
        cli_arguments.push(first.clone());
    }
    if let Some(command) = args.get(split.command_start..) {
        cli_arguments.extend(command.iter().cloned());
    }
    cli_arguments
}

fn bootstrap_directories<W: Write>(config: &Config, stdout: &mut W) -> Result<(), AppError> {
    config.validate()?;
    let extension = config.module_extension();
    let source = DirectoryTree::open(config.source_dir().to_path_buf(), extension)?;
    let mut server = DirectoryTree::create(config.server_dir().to_path_buf(), extension)?;
    let mut client = DirectoryTree::create(config.client_dir().to_path_buf(), extension)?;
    ensure_distinct_roots(&[&source, &server, &client])?;

    let report = bootstrap(&source, &mut server, &mut client)?;
    info!(
        target: CLI_TARGET,
        source = %config.source_dir(),
        server = %config.server_dir(),
        client = %config.client_dir(),
        "script directories partitioned"
    );

    writeln!(
        stdout,
        "partitioned {} module(s): {} server, {} client, {} ignored",
        report.partitioned.len(),
        report.server_installed,
        report.client_installed,
        report.ignored.len()
    )
    .map_err(AppError::WriteOutput)
}

/// Rejects layouts where two trees resolve to one directory on disk,
/// following symlinks.
fn ensure_distinct_roots(trees: &[&DirectoryTree]) -> Result<(), AppError> {
    let mut resolved: Vec<(&Utf8Path, Utf8PathBuf)> = Vec::with_capacity(trees.len());
    for tree in trees {
        let canonical = tree
            .root()
            .canonicalize_utf8()
            .map_err(|source| AppError::ResolveDirectory {
                path: tree.root().to_path_buf(),
                source,
            })?;
        if let Some((first, _)) = resolved.iter().find(|(_, seen)| *seen == canonical) {
            return Err(AppError::OverlappingDirectories {
                first: first.to_path_buf(),
                second: tree.root().to_path_buf(),
            });
        }
        resolved.push((tree.root(), canonical));
    }
    Ok(())
}

fn print_variant<W: Write>(file: &Utf8Path, target: Target, stdout: &mut W) -> Result<(), AppError> {
    let text = fs::read_to_string(file).map_err(|source| AppError::ReadScript {
        path: file.to_path_buf(),
        source,
    })?;
    let partition = split(&text);
    let variant = match target {
        Target::Server => partition.server(),
        Target::Client => partition.client(),
    };
    stdout
        .write_all(variant.as_bytes())
        .map_err(AppError::WriteOutput)
}

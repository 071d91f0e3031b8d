//! Error types for the CLI runtime.

use std::io;
use std::sync::Arc;

use camino::Utf8PathBuf;
use roket_config::ConfigError;
use roket_partition::PartitionError;
use thiserror::Error;

use crate::telemetry::TelemetryError;

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error("failed to load configuration: {0}")]
    LoadConfiguration(Arc<ortho_config::OrthoError>),
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(#[from] ConfigError),
    #[error("{0}")]
    CliUsage(clap::Error),
    #[error("failed to initialise logging: {0}")]
    Telemetry(#[from] TelemetryError),
    #[error("failed to read script {path}: {source}")]
    ReadScript { path: Utf8PathBuf, source: io::Error },
    #[error("failed to resolve directory {path}: {source}")]
    ResolveDirectory { path: Utf8PathBuf, source: io::Error },
    #[error("{first} and {second} are the same directory")]
    OverlappingDirectories {
        first: Utf8PathBuf,
        second: Utf8PathBuf,
    },
    #[error("bootstrap failed: {0}")]
    Partition(#[from] PartitionError),
    #[error("failed to write output: {0}")]
    WriteOutput(io::Error),
}

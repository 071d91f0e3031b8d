//! Whole-tree partitioning.
//!
//! A bootstrap run clears both destinations, then splits every module of the
//! source tree and installs each non-empty variant under the module's own
//! name. Runs are idempotent: repeating one against an unchanged source tree
//! leaves the destinations in the same state.

use tracing::{debug, info};

use crate::error::PartitionError;
use crate::split::split;
use crate::tree::{ModuleSink, ModuleSource};

/// Marker at the very start of a module that excludes it from partitioning.
pub const IGNORE_MARKER: &str = "--#ignore";

const BOOTSTRAP_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::bootstrap");

/// Summary of one bootstrap run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BootstrapReport {
    /// Modules that were split, in processing order.
    pub partitioned: Vec<String>,
    /// Modules skipped because they start with [`IGNORE_MARKER`].
    pub ignored: Vec<String>,
    /// Number of modules installed into the server destination.
    pub server_installed: usize,
    /// Number of modules installed into the client destination.
    pub client_installed: usize,
}

/// Returns `true` when the module text opts out of partitioning.
#[must_use]
pub fn is_ignored(text: &str) -> bool {
    text.starts_with(IGNORE_MARKER)
}

/// Partitions every module of `source` into the two destination trees.
///
/// The source is read in full before both destinations are cleared. Modules marked with
/// [`IGNORE_MARKER`] are skipped; an empty variant is not installed.
///
/// # Errors
///
/// Returns [`PartitionError::ModuleCollision`] if a destination already holds
/// a module of the same name, which cannot happen with well-behaved sinks
/// since they were just cleared, or any error raised by the trees.
pub fn bootstrap<S, D, C>(
    source: &S,
    server: &mut D,
    client: &mut C,
) -> Result<BootstrapReport, PartitionError>
where
    S: ModuleSource + ?Sized,
    D: ModuleSink + ?Sized,
    C: ModuleSink + ?Sized,
{
    let modules = source.modules()?;
    server.clear()?;
    client.clear()?;

    let mut report = BootstrapReport::default();
    for module in modules {
        if is_ignored(module.text()) {
            debug!(target: BOOTSTRAP_TARGET, module = module.name(), "module ignored");
            report.ignored.push(module.name().to_owned());
            continue;
        }

        let partition = split(module.text());
        if !partition.server().is_empty() {
            server.install(module.name(), partition.server())?;
            report.server_installed += 1;
        }
        if !partition.client().is_empty() {
            client.install(module.name(), partition.client())?;
            report.client_installed += 1;
        }

        debug!(
            target: BOOTSTRAP_TARGET,
            module = module.name(),
            server_bytes = partition.server().len(),
            client_bytes = partition.client().len(),
            "module partitioned"
        );
        report.partitioned.push(module.name().to_owned());
    }

    info!(
        target: BOOTSTRAP_TARGET,
        partitioned = report.partitioned.len(),
        ignored = report.ignored.len(),
        server = report.server_installed,
        client = report.client_installed,
        "bootstrap complete"
    );
    Ok(report)
}

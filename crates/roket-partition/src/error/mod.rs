//! Error types for partitioning operations.
//!
//! Directive and rewrite mismatches are never errors; the only failures are
//! destination collisions and I/O against module trees. I/O errors are
//! wrapped in `Arc` to satisfy the `result_large_err` Clippy lint.

use std::io;
use std::sync::Arc;

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors from reading or populating module trees.
#[derive(Debug, Clone, Error)]
#[non_exhaustive]
pub enum PartitionError {
    /// A module with the same name already exists in the destination.
    ///
    /// Destinations are cleared before every bootstrap run, so this always
    /// indicates a caller bug.
    #[error("module '{name}' already exists in the destination tree")]
    ModuleCollision {
        /// Name of the module that could not be installed.
        name: String,
    },

    /// An I/O operation against a directory tree failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// Path that was being read or written.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: Arc<io::Error>,
    },
}

impl PartitionError {
    /// Creates a module collision error.
    #[must_use]
    pub fn module_collision(name: impl Into<String>) -> Self {
        Self::ModuleCollision { name: name.into() }
    }

    /// Creates an I/O error for the given path.
    #[must_use]
    pub fn io(path: impl Into<Utf8PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source: Arc::new(source),
        }
    }

    /// Returns `true` when the error is a destination name collision.
    #[must_use]
    pub const fn is_collision(&self) -> bool {
        matches!(self, Self::ModuleCollision { .. })
    }
}

//! Error types for chain tables.

use thiserror::Error;

/// Errors raised while editing a [`ChainTable`](crate::ChainTable).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ChainTableError {
    /// The operation name is already bound to a chain of another signature.
    #[error("operation '{operation}' holds a {existing}, not a {requested}")]
    SignatureMismatch {
        /// Operation name.
        operation: String,
        /// Type of the chain already stored.
        existing: &'static str,
        /// Type of the chain that was asked for.
        requested: &'static str,
    },
}

impl ChainTableError {
    /// Creates a [`ChainTableError::SignatureMismatch`].
    pub(crate) fn signature_mismatch(
        operation: impl Into<String>,
        existing: &'static str,
        requested: &'static str,
    ) -> Self {
        Self::SignatureMismatch {
            operation: operation.into(),
            existing,
            requested,
        }
    }

    /// Returns the operation name the error refers to.
    #[must_use]
    pub fn operation(&self) -> &str {
        match self {
            Self::SignatureMismatch { operation, .. } => operation,
        }
    }
}

//! Splitting one module text into server and client variants.

use crate::rewrite::rewrite_references;
use crate::scope::{Scope, classify};

/// The server and client texts derived from one source module.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Partition {
    server: String,
    client: String,
}

impl Partition {
    /// Returns the server variant.
    #[must_use]
    pub fn server(&self) -> &str {
        &self.server
    }

    /// Returns the client variant.
    #[must_use]
    pub fn client(&self) -> &str {
        &self.client
    }

    /// Consumes the partition, returning `(server, client)`.
    #[must_use]
    pub fn into_parts(self) -> (String, String) {
        (self.server, self.client)
    }

    /// Returns `true` when neither variant received any line.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.server.is_empty() && self.client.is_empty()
    }

    fn push_line(&mut self, scope: Scope, line: &str) {
        if scope.reaches_server() {
            self.server.push_str(line);
            self.server.push('\n');
        }
        if scope.reaches_client() {
            self.client.push_str(line);
            self.client.push('\n');
        }
    }
}

/// Splits an annotated module text into its server and client variants.
///
/// Lines are read top to bottom with the scope starting at
/// [`Scope::Shared`]. Directive lines switch the scope and are dropped; every
/// other line is passed through [`rewrite_references`] and appended, with a
/// trailing newline, to the variant(s) the current scope reaches.
///
/// A trailing newline at the end of `source` does not produce an extra empty
/// line. Carriage returns are kept as part of the line.
#[must_use]
pub fn split(source: &str) -> Partition {
    let mut partition = Partition::default();
    let mut scope = Scope::Shared;

    for line in source.split_terminator('\n') {
        if let Some(next) = classify(line) {
            scope = next;
            continue;
        }
        partition.push_line(scope, &rewrite_references(line));
    }

    partition
}

#[cfg(test)]
mod tests;

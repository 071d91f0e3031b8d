//! Scope-tagged source partitioning for Roket scripts.
//!
//! A Roket script is a single Lua module that carries code for both sides of
//! a game. Inline comment directives mark which lines belong where:
//!
//! ```lua
//! print("both sides")
//! --#server
//! print("server only")
//! --#client
//! print("client only")
//! --#end
//! ```
//!
//! This crate splits such a module into a server variant and a client
//! variant, dropping the directive lines and rewriting the compiler's
//! cross-module import idiom so that the generated modules load their
//! siblings from the new layout.
//!
//! - [`classify`] recognises directive lines.
//! - [`rewrite_references`] retargets import calls on one line.
//! - [`split`] turns one module text into a [`Partition`].
//! - [`bootstrap`] partitions a whole [`ModuleSource`] into two
//!   [`ModuleSink`]s, such as [`MemoryTree`] or [`DirectoryTree`].
//!
//! # Example
//!
//! ```
//! use roket_partition::split;
//!
//! let partition = split("a=1\n--#server\nb=2\n--#client\nc=3\n--#end\nd=4\n");
//! assert_eq!(partition.server(), "a=1\nb=2\nd=4\n");
//! assert_eq!(partition.client(), "a=1\nc=3\nd=4\n");
//! ```

mod bootstrap;
mod directory;
mod error;
mod rewrite;
mod scope;
mod split;
mod tree;

pub use bootstrap::{BootstrapReport, IGNORE_MARKER, bootstrap, is_ignored};
pub use directory::{DEFAULT_MODULE_EXTENSION, DirectoryTree};
pub use error::PartitionError;
pub use rewrite::{SIBLING_REQUIRE, SOURCE_IMPORT, rewrite_references};
pub use scope::{COMMENT_MARKER, Scope, classify};
pub use split::{Partition, split};
pub use tree::{MemoryTree, ModuleSink, ModuleSource, SourceModule};

#[cfg(test)]
mod tests;

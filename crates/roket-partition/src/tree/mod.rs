//! Module trees consumed and populated by the partitioner.
//!
//! [`ModuleSource`] is the folder of annotated scripts that gets read once per
//! run; [`ModuleSink`] is a destination folder that is cleared and then
//! filled with generated modules. [`MemoryTree`] implements both and is what
//! tests and embedders without a filesystem use.

use std::collections::BTreeMap;

use crate::error::PartitionError;

/// A named module and its raw text, as read from a source tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceModule {
    name: String,
    text: String,
}

impl SourceModule {
    /// Creates a module from its name and raw text.
    #[must_use]
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }

    /// Returns the module name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the raw module text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// A tree of named modules to partition.
pub trait ModuleSource {
    /// Reads every module in the tree.
    ///
    /// # Errors
    ///
    /// Returns an error if the tree cannot be read.
    fn modules(&self) -> Result<Vec<SourceModule>, PartitionError>;
}

/// A destination tree for generated modules.
pub trait ModuleSink {
    /// Removes every module from the tree.
    ///
    /// # Errors
    ///
    /// Returns an error if a module cannot be removed.
    fn clear(&mut self) -> Result<(), PartitionError>;

    /// Installs a new module.
    ///
    /// # Errors
    ///
    /// Returns [`PartitionError::ModuleCollision`] if a module named `name`
    /// already exists, or an I/O error from the underlying tree.
    fn install(&mut self, name: &str, text: &str) -> Result<(), PartitionError>;
}

/// An in-memory module tree ordered by module name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryTree {
    modules: BTreeMap<String, String>,
}

impl MemoryTree {
    /// Creates an empty tree.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            modules: BTreeMap::new(),
        }
    }

    /// Adds or replaces a module, returning the tree for chaining.
    #[must_use]
    pub fn with_module(mut self, name: impl Into<String>, text: impl Into<String>) -> Self {
        self.modules.insert(name.into(), text.into());
        self
    }

    /// Returns the text of the named module.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.modules.get(name).map(String::as_str)
    }

    /// Returns the module names in order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.modules.keys().map(String::as_str)
    }

    /// Returns the number of modules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    /// Returns `true` when the tree holds no modules.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

impl ModuleSource for MemoryTree {
    fn modules(&self) -> Result<Vec<SourceModule>, PartitionError> {
        Ok(self
            .modules
            .iter()
            .map(|(name, text)| SourceModule::new(name.as_str(), text.as_str()))
            .collect())
    }
}

impl ModuleSink for MemoryTree {
    fn clear(&mut self) -> Result<(), PartitionError> {
        self.modules.clear();
        Ok(())
    }

    fn install(&mut self, name: &str, text: &str) -> Result<(), PartitionError> {
        if self.modules.contains_key(name) {
            return Err(PartitionError::module_collision(name));
        }
        self.modules.insert(name.to_owned(), text.to_owned());
        Ok(())
    }
}

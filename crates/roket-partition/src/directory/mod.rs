//! Filesystem-backed module trees.
//!
//! A [`DirectoryTree`] maps each module to one file, `<name>.<extension>`,
//! directly inside a root directory. Subdirectories and files with other
//! extensions are not modules and are left untouched, including by
//! [`ModuleSink::clear`].

use std::io::{self, Write};

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs::{Dir, OpenOptions};
use tracing::{debug, warn};

use crate::error::PartitionError;
use crate::tree::{ModuleSink, ModuleSource, SourceModule};

/// Extension used for module files unless configured otherwise.
pub const DEFAULT_MODULE_EXTENSION: &str = "lua";

const DIRECTORY_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::directory");

/// A module tree rooted at a filesystem directory.
#[derive(Debug)]
pub struct DirectoryTree {
    root: Utf8PathBuf,
    dir: Dir,
    extension: String,
}

impl DirectoryTree {
    /// Opens an existing directory as a module tree.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the directory cannot be opened.
    pub fn open(root: impl Into<Utf8PathBuf>, extension: &str) -> Result<Self, PartitionError> {
        let root_path = root.into();
        let dir = Dir::open_ambient_dir(&root_path, ambient_authority())
            .map_err(|error| PartitionError::io(root_path.clone(), error))?;
        Ok(Self {
            root: root_path,
            dir,
            extension: extension.trim_start_matches('.').to_owned(),
        })
    }

    /// Opens a directory as a module tree, creating it and its parents first
    /// when missing.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the directory cannot be created or opened.
    pub fn create(root: impl Into<Utf8PathBuf>, extension: &str) -> Result<Self, PartitionError> {
        let root_path = root.into();
        Dir::create_ambient_dir_all(&root_path, ambient_authority())
            .map_err(|error| PartitionError::io(root_path.clone(), error))?;
        Self::open(root_path, extension)
    }

    /// Returns the root directory.
    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    /// Returns the module file extension, without a leading dot.
    #[must_use]
    pub fn extension(&self) -> &str {
        &self.extension
    }

    fn file_name(&self, module: &str) -> String {
        format!("{module}.{}", self.extension)
    }

    fn io_error(&self, file_name: &str, error: io::Error) -> PartitionError {
        PartitionError::io(self.root.join(file_name), error)
    }

    /// Lists `(module name, file name)` pairs for every module file.
    fn module_files(&self) -> Result<Vec<(String, String)>, PartitionError> {
        let entries = self
            .dir
            .entries()
            .map_err(|error| PartitionError::io(self.root.clone(), error))?;

        let mut files = Vec::new();
        for item in entries {
            let entry = item.map_err(|error| PartitionError::io(self.root.clone(), error))?;
            let is_file = entry
                .file_type()
                .map_err(|error| PartitionError::io(self.root.clone(), error))?
                .is_file();
            if !is_file {
                continue;
            }

            let Ok(file_name) = entry.file_name().into_string() else {
                warn!(
                    target: DIRECTORY_TARGET,
                    root = %self.root,
                    "skipping module file with a non UTF-8 name"
                );
                continue;
            };

            let path = Utf8Path::new(&file_name);
            if path.extension() != Some(self.extension.as_str()) {
                continue;
            }
            if let Some(stem) = path.file_stem() {
                files.push((stem.to_owned(), file_name.clone()));
            }
        }

        files.sort();
        Ok(files)
    }
}

impl ModuleSource for DirectoryTree {
    fn modules(&self) -> Result<Vec<SourceModule>, PartitionError> {
        self.module_files()?
            .into_iter()
            .map(|(name, file_name)| {
                let text = self
                    .dir
                    .read_to_string(&file_name)
                    .map_err(|error| self.io_error(&file_name, error))?;
                Ok(SourceModule::new(name, text))
            })
            .collect()
    }
}

impl ModuleSink for DirectoryTree {
    fn clear(&mut self) -> Result<(), PartitionError> {
        for (name, file_name) in self.module_files()? {
            self.dir
                .remove_file(&file_name)
                .map_err(|error| self.io_error(&file_name, error))?;
            debug!(target: DIRECTORY_TARGET, root = %self.root, module = %name, "removed module");
        }
        Ok(())
    }

    fn install(&mut self, name: &str, text: &str) -> Result<(), PartitionError> {
        let file_name = self.file_name(name);
        let mut options = OpenOptions::new();
        options.write(true).create_new(true);

        let file = match self.dir.open_with(&file_name, &options) {
            Ok(file) => file,
            Err(error) if error.kind() == io::ErrorKind::AlreadyExists => {
                return Err(PartitionError::module_collision(name));
            }
            Err(error) => return Err(self.io_error(&file_name, error)),
        };

        self.fill_module_file(&file_name, file, text)
    }
}

impl DirectoryTree {
    /// Writes `text` into a freshly created module file, removing the file
    /// again if the write fails so no partial module survives.
    fn fill_module_file<W: Write>(
        &self,
        file_name: &str,
        mut file: W,
        text: &str,
    ) -> Result<(), PartitionError> {
        let Err(error) = file.write_all(text.as_bytes()) else {
            return Ok(());
        };
        drop(file);
        if let Err(cleanup) = self.dir.remove_file(file_name) {
            warn!(
                target: DIRECTORY_TARGET,
                root = %self.root,
                file = file_name,
                error = %cleanup,
                "could not remove partially written module"
            );
        }
        Err(self.io_error(file_name, error))
    }
}

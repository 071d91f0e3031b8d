//! Shared configuration for the Roket tooling.
//!
//! Values are layered by `ortho_config`: built-in defaults, then a TOML file
//! (`--config-path` or `ROKET_CONFIG_PATH`), then `ROKET_*` environment
//! variables, then command-line flags.

use camino::{Utf8Component, Utf8Path, Utf8PathBuf};
use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

mod defaults;
mod logging;

pub use defaults::{
    DEFAULT_CLIENT_DIR, DEFAULT_LOG_FILTER, DEFAULT_MODULE_EXTENSION, DEFAULT_SERVER_DIR,
    DEFAULT_SOURCE_DIR, default_client_dir, default_log_filter, default_log_filter_string,
    default_log_format, default_module_extension, default_server_dir, default_source_dir,
};
pub use logging::{LogFormat, LogFormatParseError};

/// Resolved configuration for partitioning runs.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, OrthoConfig)]
#[ortho_config(prefix = "ROKET")]
pub struct Config {
    /// Directory holding the tagged scripts.
    #[ortho_config(default = crate::defaults::default_source_dir())]
    pub source_dir: Utf8PathBuf,
    /// Directory that receives server variants.
    #[ortho_config(default = crate::defaults::default_server_dir())]
    pub server_dir: Utf8PathBuf,
    /// Directory that receives client variants.
    #[ortho_config(default = crate::defaults::default_client_dir())]
    pub client_dir: Utf8PathBuf,
    /// Extension, without the dot, of module files.
    #[ortho_config(default = crate::defaults::default_module_extension())]
    pub module_extension: String,
    /// Tracing filter expression.
    #[ortho_config(default = crate::defaults::default_log_filter_string())]
    pub log_filter: String,
    /// Log output format.
    #[ortho_config(default = crate::defaults::default_log_format())]
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_dir: default_source_dir(),
            server_dir: default_server_dir(),
            client_dir: default_client_dir(),
            module_extension: default_module_extension(),
            log_filter: default_log_filter_string(),
            log_format: default_log_format(),
        }
    }
}

impl Config {
    /// Directory holding the tagged scripts.
    pub fn source_dir(&self) -> &Utf8Path {
        &self.source_dir
    }

    /// Directory that receives server variants.
    pub fn server_dir(&self) -> &Utf8Path {
        &self.server_dir
    }

    /// Directory that receives client variants.
    pub fn client_dir(&self) -> &Utf8Path {
        &self.client_dir
    }

    /// Module file extension with any leading dot removed.
    pub fn module_extension(&self) -> &str {
        self.module_extension.trim_start_matches('.')
    }

    /// Tracing filter expression.
    pub fn log_filter(&self) -> &str {
        &self.log_filter
    }

    /// Log output format.
    pub fn log_format(&self) -> LogFormat {
        self.log_format
    }

    /// Checks that the directories and extension describe a usable layout.
    ///
    /// Destinations are cleared before every run, so neither may coincide
    /// with the source directory or with each other. Paths are compared after
    /// resolving `.` and `..` lexically; symlinks are not followed here.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.module_extension().is_empty() {
            return Err(ConfigError::EmptyModuleExtension);
        }
        let source = normalise(&self.source_dir);
        let server = normalise(&self.server_dir);
        let client = normalise(&self.client_dir);
        if server == client {
            return Err(ConfigError::SharedDestination {
                path: self.server_dir.clone(),
            });
        }
        for (destination, normalised) in [(&self.server_dir, &server), (&self.client_dir, &client)] {
            if *normalised == source {
                return Err(ConfigError::DestinationIsSource {
                    path: destination.clone(),
                });
            }
        }
        Ok(())
    }
}

/// Resolves `.` and `..` components without touching the filesystem.
fn normalise(path: &Utf8Path) -> Utf8PathBuf {
    let mut normal = Utf8PathBuf::new();
    for component in path.components() {
        match component {
            Utf8Component::CurDir => {}
            Utf8Component::ParentDir => {
                if matches!(normal.components().next_back(), Some(Utf8Component::Normal(_))) {
                    normal.pop();
                } else if !normal.has_root() {
                    normal.push("..");
                }
            }
            other => normal.push(other.as_str()),
        }
    }
    if normal.as_str().is_empty() {
        normal.push(".");
    }
    normal
}

/// Problems found by [`Config::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// No module extension remains after trimming the leading dot.
    #[error("module extension must not be empty")]
    EmptyModuleExtension,
    /// Server and client output share a directory.
    #[error("server and client output both point at {path}")]
    SharedDestination {
        /// The shared directory.
        path: Utf8PathBuf,
    },
    /// An output directory is the script directory.
    #[error("output directory {path} is also the script directory")]
    DestinationIsSource {
        /// The offending directory.
        path: Utf8PathBuf,
    },
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[test]
    fn defaults_describe_a_valid_layout() {
        let config = Config::default();
        assert_eq!(config.source_dir(), Utf8Path::new(DEFAULT_SOURCE_DIR));
        assert_eq!(config.module_extension(), "lua");
        assert_eq!(config.log_format(), LogFormat::Compact);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn leading_dot_is_ignored() {
        let config = Config {
            module_extension: ".luau".to_owned(),
            ..Config::default()
        };
        assert_eq!(config.module_extension(), "luau");
    }

    #[rstest]
    #[case("", ConfigError::EmptyModuleExtension)]
    #[case(".", ConfigError::EmptyModuleExtension)]
    fn empty_extensions_are_rejected(#[case] extension: &str, #[case] expected: ConfigError) {
        let config = Config {
            module_extension: extension.to_owned(),
            ..Config::default()
        };
        assert_eq!(config.validate(), Err(expected));
    }

    #[test]
    fn shared_destination_is_rejected() {
        let config = Config {
            client_dir: default_server_dir(),
            ..Config::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::SharedDestination {
                path: default_server_dir()
            })
        );
    }

    #[rstest]
    #[case("scripts/.")]
    #[case("./scripts")]
    #[case("out/../scripts")]
    #[case("out/client/../../scripts")]
    fn aliased_source_is_rejected(#[case] alias: &str) {
        let config = Config {
            server_dir: Utf8PathBuf::from(alias),
            ..Config::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::DestinationIsSource {
                path: Utf8PathBuf::from(alias)
            })
        );
    }

    #[test]
    fn aliased_destinations_are_rejected() {
        let config = Config {
            client_dir: Utf8PathBuf::from("out/client/../server"),
            ..Config::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::SharedDestination { .. })
        ));
    }

    #[rstest]
    #[case("a/./b/../c", "a/c")]
    #[case("../x", "../x")]
    #[case("a/../..", "..")]
    #[case("/../etc", "/etc")]
    #[case("./", ".")]
    fn normalise_resolves_dots_lexically(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(normalise(Utf8Path::new(raw)), Utf8PathBuf::from(expected));
    }

    #[test]
    fn destination_matching_source_is_rejected() {
        let config = Config {
            client_dir: default_source_dir(),
            ..Config::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::DestinationIsSource { .. })
        ));
    }

    #[rstest]
    #[case("json", LogFormat::Json)]
    #[case("JSON", LogFormat::Json)]
    #[case("compact", LogFormat::Compact)]
    fn log_formats_parse_case_insensitively(#[case] text: &str, #[case] expected: LogFormat) {
        assert_eq!(text.parse::<LogFormat>(), Ok(expected));
    }

    #[test]
    fn unknown_log_format_is_an_error() {
        assert!("pretty".parse::<LogFormat>().is_err());
    }
}

use camino::Utf8PathBuf;

use crate::logging::LogFormat;

/// Directory scanned for tagged scripts.
pub const DEFAULT_SOURCE_DIR: &str = "scripts";

/// Directory receiving server variants.
pub const DEFAULT_SERVER_DIR: &str = "out/server";

/// Directory receiving client variants.
pub const DEFAULT_CLIENT_DIR: &str = "out/client";

/// File extension, without the dot, that marks a module file.
pub const DEFAULT_MODULE_EXTENSION: &str = "lua";

/// Default log filter expression used by the binary.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Default script directory.
pub fn default_source_dir() -> Utf8PathBuf {
    Utf8PathBuf::from(DEFAULT_SOURCE_DIR)
}

/// Default server output directory.
pub fn default_server_dir() -> Utf8PathBuf {
    Utf8PathBuf::from(DEFAULT_SERVER_DIR)
}

/// Default client output directory.
pub fn default_client_dir() -> Utf8PathBuf {
    Utf8PathBuf::from(DEFAULT_CLIENT_DIR)
}

/// Owned module extension used where allocation is required (e.g. serde).
pub fn default_module_extension() -> String {
    DEFAULT_MODULE_EXTENSION.to_owned()
}

/// Default log filter expression used by the binary.
pub fn default_log_filter() -> &'static str {
    DEFAULT_LOG_FILTER
}

/// Owned log filter value used where allocation is required (e.g. serde).
pub fn default_log_filter_string() -> String {
    DEFAULT_LOG_FILTER.to_owned()
}

/// Default logging format for the binary.
pub fn default_log_format() -> LogFormat {
    LogFormat::Compact
}

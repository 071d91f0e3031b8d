//! Log output format selected by `log_format`.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// How the `roket` binary renders log events on stderr.
///
/// Compact is the default since the binary usually runs in a terminal next
/// to a game project. JSON suits build pipelines that collect logs.
#[derive(
    Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq, EnumString, Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum LogFormat {
    /// One JSON object per event, fields flattened to the top level.
    Json,
    /// One line of text per event.
    #[default]
    Compact,
}

/// Error returned when `log_format` names no known format.
pub type LogFormatParseError = strum::ParseError;

//! Scope directives and line classification.

use strum::{Display, EnumString};

/// Line comment marker that introduces a directive.
pub const COMMENT_MARKER: &str = "--";

/// Directive tokens in the order they are tested.
const DIRECTIVES: [(&str, Scope); 3] = [
    ("server", Scope::Server),
    ("client", Scope::Client),
    ("end", Scope::Shared),
];

/// The environment a line of source is destined for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Scope {
    /// Emitted into the server variant only.
    Server,
    /// Emitted into the client variant only.
    Client,
    /// Emitted into both variants.
    #[default]
    Shared,
}

impl Scope {
    /// Returns `true` when lines in this scope belong to the server variant.
    #[must_use]
    pub const fn reaches_server(self) -> bool {
        matches!(self, Self::Server | Self::Shared)
    }

    /// Returns `true` when lines in this scope belong to the client variant.
    #[must_use]
    pub const fn reaches_client(self) -> bool {
        matches!(self, Self::Client | Self::Shared)
    }
}

/// Recognises a scope directive line.
///
/// A directive is optional leading whitespace, the `--` comment marker,
/// optional whitespace, `#`, and then one of `server`, `client` or `end`.
/// The token is matched as a prefix, so `--#server side` and `--#serverless`
/// are both server directives. `#end` switches back to [`Scope::Shared`].
///
/// Returns `None` for every other line, meaning the current scope is left
/// unchanged.
#[must_use]
pub fn classify(line: &str) -> Option<Scope> {
    let directive = line
        .trim_start_matches(is_pattern_space)
        .strip_prefix(COMMENT_MARKER)?
        .trim_start_matches(is_pattern_space)
        .strip_prefix('#')?;

    DIRECTIVES
        .iter()
        .find(|(token, _)| directive.starts_with(token))
        .map(|(_, scope)| *scope)
}

/// Whitespace as understood by the script runtime's pattern `%s` class.
const fn is_pattern_space(ch: char) -> bool {
    matches!(ch, ' ' | '\t' | '\n' | '\r' | '\x0B' | '\x0C')
}

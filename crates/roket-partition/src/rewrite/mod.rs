//! Cross-module reference rewriting.
//!
//! The script compiler emits imports of sibling scripts as calls that reach
//! into a fixed storage root. Once a module has been partitioned it lives
//! next to its siblings, so those calls are retargeted in two literal steps:
//!
//! ```text
//! TS.import(script, game:GetService("ServerStorage"), "TS", "RoketScripts", "Car").default
//! require(script.Parent, "Car").default
//! require(script.Parent.Car).default
//! ```

use std::borrow::Cow;

/// Import call prefix emitted by the compiler for sibling scripts.
pub const SOURCE_IMPORT: &str =
    r#"TS.import(script, game:GetService("ServerStorage"), "TS", "RoketScripts""#;

/// Simplified import form that loads from the module's new siblings.
pub const SIBLING_REQUIRE: &str = "require(script.Parent";

/// Opening of a quoted path segment argument.
const SEGMENT_OPEN: &str = ", \"";

/// Rewrites the cross-module import idiom on a single line.
///
/// Every occurrence of [`SOURCE_IMPORT`] becomes [`SIBLING_REQUIRE`]. If the
/// line then contains [`SIBLING_REQUIRE`], every `, "<name>"` argument is
/// collapsed into a `.<name>` suffix. Lines matching neither rule are
/// returned borrowed and unchanged.
#[must_use]
pub fn rewrite_references(line: &str) -> Cow<'_, str> {
    let retargeted = if line.contains(SOURCE_IMPORT) {
        Cow::Owned(line.replace(SOURCE_IMPORT, SIBLING_REQUIRE))
    } else {
        Cow::Borrowed(line)
    };

    if !retargeted.contains(SIBLING_REQUIRE) {
        return retargeted;
    }

    match collapse_quoted_segments(&retargeted) {
        Some(collapsed) => Cow::Owned(collapsed),
        None => retargeted,
    }
}

/// Replaces each `, "<name>"` with `.<name>`, left to right without overlap.
///
/// `<name>` is one or more characters other than `"`. A candidate with an
/// empty name is skipped by a single character so a later candidate can
/// still match. Returns `None` when nothing was replaced.
fn collapse_quoted_segments(line: &str) -> Option<String> {
    let mut out = String::with_capacity(line.len());
    let mut rest = line;
    let mut changed = false;

    while let Some(start) = rest.find(SEGMENT_OPEN) {
        let (head, candidate) = rest.split_at(start);
        out.push_str(head);

        let Some(body) = candidate.strip_prefix(SEGMENT_OPEN) else {
            rest = candidate;
            break;
        };

        match body.split_once('"') {
            Some((name, remainder)) if !name.is_empty() => {
                out.push('.');
                out.push_str(name);
                rest = remainder;
                changed = true;
            }
            Some(_) => {
                out.push(',');
                rest = candidate.strip_prefix(',').unwrap_or_default();
            }
            None => {
                rest = candidate;
                break;
            }
        }
    }

    out.push_str(rest);
    changed.then_some(out)
}

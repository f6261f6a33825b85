use regex::Regex;
use std::sync::LazyLock;
use wrapver_core::{ChangeKind, PropertySource, WrapError};

use crate::{
    locator::locate_version,
    normalizer::{NormalizedVersion, normalize_version},
    placeholder::resolve_version,
    splicer::{Splice, splice_bundle_version},
};

static WRAP_BUNDLE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^<bundle.*wrap:mvn:.*</bundle>$").expect("hardcoded regex must compile")
});

/// Whether the trimmed line is a `<bundle>` declaration using the wrap protocol.
#[must_use]
pub fn is_wrap_bundle_line(line: &str) -> bool {
    WRAP_BUNDLE_PATTERN.is_match(line.trim())
}

/// Outcome of processing one wrap bundle line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineRewrite {
    /// The line to write back, identical to the input when `change` is `None`
    pub line: String,
    pub change: Option<ChangeKind>,
    pub version: NormalizedVersion,
}

/// Pin `Bundle-Version` on a single wrap bundle line.
///
/// # Errors
/// Returns the reason the line must be left untouched: an unreadable wrap url,
/// an unresolvable placeholder or a version the OSGi grammar rejects even after
/// cleaning.
pub fn rewrite_line(line: &str, properties: &dyn PropertySource) -> Result<LineRewrite, WrapError> {
    let field = locate_version(line).ok_or(WrapError::VersionNotFound)?;
    let resolved = resolve_version(field.text, properties)?;
    let version = normalize_version(&resolved.value)?;

    if let NormalizedVersion::CleanedValid {
        original,
        version: cleaned,
    } = &version
    {
        let placeholder_note = match resolved.placeholder {
            Some(name) => format!(" (resolved from placeholder '{name}')"),
            None => String::new(),
        };
        tracing::warn!(
            "Line '{}' was set with Bundle-Version '{}', the cleaned form of '{}'{}",
            line.trim(),
            cleaned,
            original,
            placeholder_note
        );
    }

    Ok(match splice_bundle_version(line, &field, version.version())? {
        Splice::Unchanged => LineRewrite {
            line: line.to_string(),
            change: None,
            version,
        },
        Splice::Changed { line, kind } => LineRewrite {
            line,
            change: Some(kind),
            version,
        },
    })
}

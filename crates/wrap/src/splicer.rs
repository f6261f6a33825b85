use wrapver_core::{ChangeKind, WrapError};

use crate::locator::VersionField;

const BUNDLE_VERSION: &str = "Bundle-Version=";
const CLAUSE_SEPARATOR: &str = "&amp;";
const FIRST_CLAUSE_MARKER: &str = "$";

/// Headers that must come after `Bundle-Version` in a wrap declaration.
pub const HEADERS_AFTER_BUNDLE_VERSION: [&str; 9] = [
    "DynamicImport-Package",
    "Export-Package",
    "Export-Service",
    "Fragment-Host",
    "Import-Package",
    "Import-Service",
    "Provide-Capability",
    "Require-Bundle",
    "Require-Capability",
];

/// Result of splicing a `Bundle-Version` clause into a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Splice {
    Unchanged,
    Changed { line: String, kind: ChangeKind },
}

/// Inclusive end of the header clause starting at `clause_start`.
///
/// The first `$` opens a placeholder inside the value; a second `$`, a `<` or
/// a `&` ends the clause.
#[must_use]
pub fn header_last_char_index(line: &str, clause_start: usize) -> Option<usize> {
    let mut placeholder_open = false;
    for (i, b) in line.bytes().enumerate().skip(clause_start) {
        match b {
            b'$' if !placeholder_open => placeholder_open = true,
            b'$' | b'<' | b'&' => return (i > clause_start).then(|| i - 1),
            _ => {}
        }
    }
    None
}

/// Inclusive end of the wrap declaration: the character before the last `<`.
#[must_use]
pub fn wrap_last_char_index(line: &str) -> Option<usize> {
    line.rfind('<').filter(|&i| i > 0).map(|i| i - 1)
}

/// One `Key=Value` clause of a wrap declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderClause<'a> {
    /// Byte offset of the clause in the line
    pub offset: usize,
    pub text: &'a str,
}

impl<'a> HeaderClause<'a> {
    #[must_use]
    pub fn key(&self) -> &'a str {
        self.text
            .split_once('=')
            .map_or(self.text, |(key, _)| key)
            .trim()
    }
}

/// Everything between the artifact version and `</bundle>`:
/// `$Key=Value&amp;Key=Value...`, or nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WrapDeclaration<'a> {
    start: usize,
    text: &'a str,
}

impl<'a> WrapDeclaration<'a> {
    /// # Errors
    /// Returns `DeclarationEndNotFound` when the line has no closing tag after the version.
    pub fn locate(line: &'a str, field: &VersionField<'_>) -> Result<Self, WrapError> {
        let last = wrap_last_char_index(line).ok_or(WrapError::DeclarationEndNotFound)?;
        let start = field.end + 1;
        let text = line
            .get(start..last + 1)
            .ok_or(WrapError::DeclarationEndNotFound)?;
        Ok(Self { start, text })
    }

    #[must_use]
    pub const fn text(&self) -> &'a str {
        self.text
    }

    /// Offset just past the declaration, where a trailing clause goes.
    #[must_use]
    pub const fn end(&self) -> usize {
        self.start + self.text.len()
    }

    #[must_use]
    pub fn has_clauses(&self) -> bool {
        self.text.contains(FIRST_CLAUSE_MARKER)
    }

    #[must_use]
    pub fn clauses(&self) -> Vec<HeaderClause<'a>> {
        let Some(marker) = self.text.find(FIRST_CLAUSE_MARKER) else {
            return Vec::new();
        };
        let body = &self.text[marker + FIRST_CLAUSE_MARKER.len()..];
        let mut offset = self.start + marker + FIRST_CLAUSE_MARKER.len();
        body.split(CLAUSE_SEPARATOR)
            .map(|text| {
                let clause = HeaderClause { offset, text };
                offset += text.len() + CLAUSE_SEPARATOR.len();
                clause
            })
            .collect()
    }
}

fn insert(line: &str, at: usize, text: &str) -> String {
    let mut result = String::with_capacity(line.len() + text.len());
    result.push_str(&line[..at]);
    result.push_str(text);
    result.push_str(&line[at..]);
    result
}

/// Make `line` carry `Bundle-Version=<version>`.
///
/// An existing clause with another value is replaced in place. Otherwise the
/// clause goes before the first header that must follow it, or at the end of
/// the declaration, introduced by `$` when it is the first clause and by
/// `&amp;` when it is not.
///
/// # Errors
/// Returns a locator failure when the existing clause or the declaration end
/// cannot be found.
pub fn splice_bundle_version(
    line: &str,
    field: &VersionField<'_>,
    version: &str,
) -> Result<Splice, WrapError> {
    let clause = format!("{BUNDLE_VERSION}{version}");

    if let Some(start) = line.find(BUNDLE_VERSION) {
        let last = header_last_char_index(line, start).ok_or(WrapError::ClauseEndNotFound)?;
        if line[start..=last] == clause {
            return Ok(Splice::Unchanged);
        }
        let mut replaced = line.to_string();
        replaced.replace_range(start..=last, &clause);
        return Ok(Splice::Changed {
            line: replaced,
            kind: ChangeKind::Replaced,
        });
    }

    let declaration = WrapDeclaration::locate(line, field)?;
    if let Some(next) = declaration
        .clauses()
        .into_iter()
        .find(|clause| HEADERS_AFTER_BUNDLE_VERSION.contains(&clause.key()))
    {
        return Ok(Splice::Changed {
            line: insert(line, next.offset, &format!("{clause}{CLAUSE_SEPARATOR}")),
            kind: ChangeKind::Inserted,
        });
    }

    let separator = if declaration.has_clauses() {
        CLAUSE_SEPARATOR
    } else {
        FIRST_CLAUSE_MARKER
    };
    Ok(Splice::Changed {
        line: insert(line, declaration.end(), &format!("{separator}{clause}")),
        kind: ChangeKind::Inserted,
    })
}

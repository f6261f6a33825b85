/// The artifact version inside `wrap:mvn:group/artifact/version`.
///
/// `start` and `end` are inclusive byte offsets into the line. A `${...}`
/// placeholder keeps its closing brace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VersionField<'a> {
    pub start: usize,
    pub end: usize,
    pub text: &'a str,
}

impl VersionField<'_> {
    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        self.text.starts_with('$')
    }
}

/// Offset right after the second `/` of the line, where the version begins.
#[must_use]
pub fn version_first_index(line: &str) -> Option<usize> {
    line.bytes()
        .enumerate()
        .filter(|&(_, b)| b == b'/')
        .nth(1)
        .map(|(i, _)| i + 1)
}

/// Inclusive end of the version starting at `start`.
///
/// A `}` ends the field and is part of it; `$` and `<` end it and are not.
/// Without any of them the field collapses to `start`. The scan skips the
/// first character so a placeholder's leading `$` is not taken as a terminator.
#[must_use]
pub fn version_end_index(line: &str, start: usize) -> usize {
    for (i, b) in line.bytes().enumerate().skip(start + 1) {
        match b {
            b'}' => return i,
            b'$' | b'<' => return i - 1,
            _ => {}
        }
    }
    start
}

/// Locate the version field, `None` when the wrap url cannot be followed.
#[must_use]
pub fn locate_version(line: &str) -> Option<VersionField<'_>> {
    let start = version_first_index(line)?;
    let end = version_end_index(line, start);
    let text = line.get(start..=end)?;
    let terminated =
        text.ends_with('}') || matches!(line.as_bytes().get(end + 1), Some(b'$' | b'<'));
    if !terminated {
        return None;
    }
    Some(VersionField { start, end, text })
}

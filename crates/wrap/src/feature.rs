use wrapver_core::{FeatureNotFound, FeatureRange};

const FEATURE_START: &str = "<feature";
const FEATURE_END: &str = "</feature>";

/// Whether the trimmed line is an opening `<feature ...>` tag that mentions `name`.
fn is_feature_start(line: &str, name: &str) -> bool {
    let line = line.trim();
    let Some(rest) = line.strip_prefix(FEATURE_START) else {
        return false;
    };
    if !rest.starts_with(|c: char| c.is_whitespace() || c == '>') {
        return false;
    }
    match line.find('>') {
        Some(close) if close == line.len() - 1 => line[..close].contains(name),
        _ => false,
    }
}

/// Lines strictly between the start tag of feature `name` and its `</feature>`.
///
/// Without a closing tag the range runs to the end of the file.
///
/// # Errors
/// Returns `FeatureNotFound` when no start tag mentions `name`.
pub fn find_feature_range<S: AsRef<str>>(
    lines: &[S],
    name: &str,
) -> Result<FeatureRange, FeatureNotFound> {
    let start = lines
        .iter()
        .position(|line| is_feature_start(line.as_ref(), name))
        .ok_or_else(|| FeatureNotFound(name.to_string()))?;
    let first = start + 1;
    let last = lines[first..]
        .iter()
        .position(|line| line.as_ref().trim() == FEATURE_END)
        .map_or(lines.len().checked_sub(1), |offset| {
            (first + offset).checked_sub(1)
        });
    Ok(FeatureRange::inclusive(first, last))
}

use regex::Regex;
use std::sync::LazyLock;

static FUZZY_VERSION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)^([0-9]+)(\.([0-9]+)(\.([0-9]+))?)?([^a-zA-Z0-9](.*))?$")
        .expect("hardcoded regex must compile")
});

fn push_qualifier(result: &mut String, qualifier: &str) {
    result.extend(qualifier.chars().map(|c| {
        if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
            c
        } else {
            '_'
        }
    }));
}

/// Best-effort conversion of a Maven version into the OSGi version grammar
///
/// Missing minor and micro components become `0`, anything after the numeric
/// part becomes the qualifier with disallowed characters replaced by `_`.
/// Versions that do not start with a digit are kept whole as the qualifier of `0.0.0`.
#[must_use]
pub fn clean_version(version: &str) -> String {
    if version.is_empty() {
        return "0.0.0".to_string();
    }

    let mut result = String::with_capacity(version.len() + 6);
    let Some(caps) = FUZZY_VERSION.captures(version) else {
        result.push_str("0.0.0.");
        push_qualifier(&mut result, version);
        return result;
    };

    let major = caps.get(1).map_or("0", |m| m.as_str());
    let minor = caps.get(3).map_or("0", |m| m.as_str());
    let micro = caps.get(5).map_or("0", |m| m.as_str());
    result.push_str(major);
    result.push('.');
    result.push_str(minor);
    result.push('.');
    result.push_str(micro);
    if let Some(qualifier) = caps.get(7) {
        result.push('.');
        push_qualifier(&mut result, qualifier.as_str());
    }
    result
}

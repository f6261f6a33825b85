use wrapver_core::{PropertySource, WrapError};

const MAX_INTERPOLATION_DEPTH: usize = 16;

/// `name` for a `${name}` field, `None` for anything else.
#[must_use]
pub fn placeholder_name(field: &str) -> Option<&str> {
    field.strip_prefix("${")?.strip_suffix('}')
}

/// A version field with any placeholder replaced by its property value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedVersion<'a> {
    pub value: String,
    /// Property name when the field was a `${...}` placeholder
    pub placeholder: Option<&'a str>,
}

fn lookup(name: &str, properties: &dyn PropertySource) -> Result<String, WrapError> {
    properties
        .lookup(name)
        .ok_or_else(|| WrapError::PropertyNotFound {
            name: name.to_string(),
            origin: properties.origin().to_string(),
        })
}

/// Expand `${...}` references left inside a property value.
fn interpolate(mut value: String, properties: &dyn PropertySource) -> Result<String, WrapError> {
    for _ in 0..MAX_INTERPOLATION_DEPTH {
        let Some(open) = value.find("${") else {
            return Ok(value);
        };
        let Some(close) = value[open..].find('}').map(|i| open + i) else {
            return Ok(value);
        };
        let resolved = lookup(&value[open + 2..close], properties)?;
        value.replace_range(open..=close, &resolved);
    }
    if value.contains("${") {
        return Err(WrapError::MalformedPlaceholder(value));
    }
    Ok(value)
}

/// Resolve a version field against the build properties.
///
/// Literal versions are returned unchanged. Property values may themselves
/// reference other properties.
///
/// # Errors
/// Returns `MalformedPlaceholder` for a `$` field that is not `${name}` and
/// `PropertyNotFound` when a referenced property is missing.
pub fn resolve_version<'a>(
    field: &'a str,
    properties: &dyn PropertySource,
) -> Result<ResolvedVersion<'a>, WrapError> {
    if !field.starts_with('$') {
        return Ok(ResolvedVersion {
            value: field.to_string(),
            placeholder: None,
        });
    }
    let name =
        placeholder_name(field).ok_or_else(|| WrapError::MalformedPlaceholder(field.to_string()))?;
    let value = interpolate(lookup(name, properties)?, properties)?;
    Ok(ResolvedVersion {
        value,
        placeholder: Some(name),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use wrapver_core::Properties;

    fn properties() -> Properties {
        let mut properties = Properties::new("pom.xml");
        properties.extend([
            ("qpid-jms-client-version", "1.0.0"),
            ("camel-version", "4.8.0"),
            ("camel-karaf-version", "${camel-version}-karaf"),
            ("loop-a", "${loop-b}"),
            ("loop-b", "${loop-a}"),
            ("dangling", "${nowhere}"),
        ]);
        properties
    }

    #[rstest]
    #[case("${name}", Some("name"))]
    #[case("${qpid-jms-client-version}", Some("qpid-jms-client-version"))]
    #[case("1.0.0", None)]
    #[case("$name", None)]
    #[case("${name", None)]
    fn test_placeholder_name(#[case] field: &str, #[case] expected: Option<&str>) {
        assert_eq!(placeholder_name(field), expected);
    }

    #[test]
    fn test_resolve_literal() {
        let resolved = resolve_version("5.0.0", &properties()).unwrap();
        assert_eq!(resolved.value, "5.0.0");
        assert_eq!(resolved.placeholder, None);
    }

    #[test]
    fn test_resolve_placeholder() {
        let resolved = resolve_version("${qpid-jms-client-version}", &properties()).unwrap();
        assert_eq!(resolved.value, "1.0.0");
        assert_eq!(resolved.placeholder, Some("qpid-jms-client-version"));
    }

    #[test]
    fn test_resolve_nested_placeholder() {
        let resolved = resolve_version("${camel-karaf-version}", &properties()).unwrap();
        assert_eq!(resolved.value, "4.8.0-karaf");
    }

    #[test]
    fn test_resolve_missing_property() {
        let err = resolve_version("${missing}", &properties()).unwrap_err();
        assert_eq!(
            err,
            WrapError::PropertyNotFound {
                name: "missing".to_string(),
                origin: "pom.xml".to_string(),
            }
        );
    }

    #[test]
    fn test_resolve_dangling_nested_property() {
        let err = resolve_version("${dangling}", &properties()).unwrap_err();
        assert!(matches!(err, WrapError::PropertyNotFound { name, .. } if name == "nowhere"));
    }

    #[test]
    fn test_resolve_cycle_is_malformed() {
        let err = resolve_version("${loop-a}", &properties()).unwrap_err();
        assert!(matches!(err, WrapError::MalformedPlaceholder(_)));
    }

    #[test]
    fn test_resolve_malformed() {
        let err = resolve_version("$oops", &properties()).unwrap_err();
        assert_eq!(err, WrapError::MalformedPlaceholder("$oops".to_string()));
    }
}

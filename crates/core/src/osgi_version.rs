use std::{fmt::Display, str::FromStr};

use thiserror::Error;

/// Reasons a string is rejected by the OSGi version grammar.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OsgiVersionError {
    #[error("invalid version \"\": format")]
    Empty,
    #[error("invalid version \"{version}\": empty component")]
    EmptyComponent { version: String },
    #[error("invalid version \"{version}\": non-numeric \"{component}\"")]
    NonNumeric { version: String, component: String },
    #[error("invalid version \"{version}\": \"{component}\" is out of range")]
    OutOfRange { version: String, component: String },
    #[error("invalid version \"{version}\": invalid qualifier \"{qualifier}\"")]
    InvalidQualifier { version: String, qualifier: String },
}

/// A version accepted by an OSGi framework: `major[.minor[.micro[.qualifier]]]`.
///
/// Numeric components must fit a non-negative 32-bit signed integer and the
/// qualifier may only contain ASCII alphanumerics, `_` and `-`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OsgiVersion {
    pub major: u32,
    pub minor: u32,
    pub micro: u32,
    pub qualifier: String,
}

impl OsgiVersion {
    /// Returns true when `version` can be used verbatim as a `Bundle-Version`.
    #[must_use]
    pub fn is_valid(version: &str) -> bool {
        version.parse::<Self>().is_ok()
    }
}

fn parse_component(version: &str, component: &str) -> Result<u32, OsgiVersionError> {
    if component.is_empty() {
        return Err(OsgiVersionError::EmptyComponent {
            version: version.to_string(),
        });
    }
    if !component.bytes().all(|b| b.is_ascii_digit()) {
        return Err(OsgiVersionError::NonNumeric {
            version: version.to_string(),
            component: component.to_string(),
        });
    }
    component
        .parse::<i32>()
        .map(i32::unsigned_abs)
        .map_err(|_| OsgiVersionError::OutOfRange {
            version: version.to_string(),
            component: component.to_string(),
        })
}

fn is_qualifier_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}

impl FromStr for OsgiVersion {
    type Err = OsgiVersionError;

    fn from_str(version: &str) -> Result<Self, Self::Err> {
        if version.is_empty() {
            return Err(OsgiVersionError::Empty);
        }
        let mut parts = version.splitn(4, '.');
        let major = parse_component(version, parts.next().unwrap_or_default())?;
        let minor = parts
            .next()
            .map(|part| parse_component(version, part))
            .transpose()?
            .unwrap_or(0);
        let micro = parts
            .next()
            .map(|part| parse_component(version, part))
            .transpose()?
            .unwrap_or(0);
        let qualifier = match parts.next() {
            None => String::new(),
            Some(qualifier) if !qualifier.is_empty() && qualifier.chars().all(is_qualifier_char) => {
                qualifier.to_string()
            }
            Some(qualifier) => {
                return Err(OsgiVersionError::InvalidQualifier {
                    version: version.to_string(),
                    qualifier: qualifier.to_string(),
                });
            }
        };

        Ok(Self {
            major,
            minor,
            micro,
            qualifier,
        })
    }
}

impl Display for OsgiVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.micro)?;
        if !self.qualifier.is_empty() {
            write!(f, ".{}", self.qualifier)?;
        }
        Ok(())
    }
}

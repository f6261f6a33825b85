use serde::Serialize;
use wrapver_core::{OsgiVersion, WrapError};
use wrapver_utils::clean_version;

/// A version that an OSGi framework accepts as `Bundle-Version`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum NormalizedVersion {
    /// The resolved version was already valid
    RawValid { version: String },
    /// Only the cleaned form of `original` is valid
    CleanedValid { original: String, version: String },
}

impl NormalizedVersion {
    #[must_use]
    pub fn version(&self) -> &str {
        match self {
            Self::RawValid { version } | Self::CleanedValid { version, .. } => version,
        }
    }

    #[must_use]
    pub const fn is_cleaned(&self) -> bool {
        matches!(self, Self::CleanedValid { .. })
    }
}

/// Validate `resolved`, retrying once with its cleaned form.
///
/// # Errors
/// Returns `InvalidVersion` when even the cleaned version is rejected.
pub fn normalize_version(resolved: &str) -> Result<NormalizedVersion, WrapError> {
    if OsgiVersion::is_valid(resolved) {
        return Ok(NormalizedVersion::RawValid {
            version: resolved.to_string(),
        });
    }

    let cleaned = clean_version(resolved);
    match cleaned.parse::<OsgiVersion>() {
        Ok(_) => Ok(NormalizedVersion::CleanedValid {
            original: resolved.to_string(),
            version: cleaned,
        }),
        Err(source) => Err(WrapError::InvalidVersion {
            value: cleaned,
            source,
        }),
    }
}

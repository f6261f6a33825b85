use thiserror::Error;

use crate::OsgiVersionError;

/// Why a single `wrap:mvn:` bundle line was left untouched.
///
/// None of these abort a run; the driver reports them and moves on to the next line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WrapError {
    #[error("could not locate the artifact version in the wrap url")]
    VersionNotFound,
    #[error("could not locate the end of the existing Bundle-Version clause")]
    ClauseEndNotFound,
    #[error("could not locate the end of the wrap declaration")]
    DeclarationEndNotFound,
    #[error("'{0}' is not a ${{...}} placeholder")]
    MalformedPlaceholder(String),
    #[error("Property <{name}> not found in {origin}")]
    PropertyNotFound { name: String, origin: String },
    #[error("'{value}' is not a valid OSGi Version: {source}")]
    InvalidVersion {
        value: String,
        #[source]
        source: OsgiVersionError,
    },
}

impl WrapError {
    /// Failures caused by a line whose shape the scanners could not follow.
    #[must_use]
    pub const fn is_locator_failure(&self) -> bool {
        matches!(
            self,
            Self::VersionNotFound | Self::ClauseEndNotFound | Self::DeclarationEndNotFound
        )
    }
}

/// The requested `<feature>` block does not exist in the descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Feature {0} not found, no lines will be processed")]
pub struct FeatureNotFound(pub String);

//! # wrapver-core
//!
//! Core types shared by the wrapver crates.
//!
//! Holds the OSGi version grammar, the feature line range, the property source
//! abstraction used to resolve `${...}` placeholders, the configuration file model
//! and the error types reported per line and per run.

pub mod change_kind;
pub mod config;
pub mod error;
pub mod feature_range;
pub mod osgi_version;
pub mod property_source;

// Re-export for convenience
pub use change_kind::ChangeKind;
pub use config::Config;
pub use error::{FeatureNotFound, WrapError};
pub use feature_range::FeatureRange;
pub use osgi_version::{OsgiVersion, OsgiVersionError};
pub use property_source::{Properties, PropertySource};

//! # wrapver-wrap
//!
//! Pins an explicit `Bundle-Version` header on `wrap:mvn:` bundles of a Karaf
//! features descriptor.
//!
//! Each `<bundle>wrap:mvn:group/artifact/version[$clause[&amp;clause...]]</bundle>`
//! line is edited in place: the artifact version is located, `${...}` placeholders
//! are resolved against build properties, the result is checked (and if needed
//! cleaned) against the OSGi version grammar and a `Bundle-Version=` clause is
//! spliced into the header list. Everything else in the file is left byte-identical.

pub mod bundle_line;
pub mod feature;
pub mod features_file;
pub mod locator;
pub mod normalizer;
pub mod placeholder;
pub mod splicer;

pub use bundle_line::{LineRewrite, is_wrap_bundle_line, rewrite_line};
pub use feature::find_feature_range;
pub use features_file::{FeaturesFile, FileReport, LineChange, SkippedLine, ensure_bundle_versions};
pub use locator::{VersionField, locate_version, version_end_index, version_first_index};
pub use normalizer::{NormalizedVersion, normalize_version};
pub use placeholder::{ResolvedVersion, placeholder_name, resolve_version};
pub use splicer::{
    HEADERS_AFTER_BUNDLE_VERSION, Splice, WrapDeclaration, header_last_char_index,
    splice_bundle_version, wrap_last_char_index,
};

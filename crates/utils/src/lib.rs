mod clean_version;
mod display_change;
mod get_wrapver_config;
mod read_pom_properties;

pub use clean_version::clean_version;
pub use display_change::{display_change, display_skipped};
pub use get_wrapver_config::{CONFIG_FILE_NAME, get_wrapver_config};
pub use read_pom_properties::{parse_pom_properties, read_pom_properties};

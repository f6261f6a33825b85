use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Loaded from `wrapver.json`, supplies defaults for the command line.
///
/// Every field can be overridden by the matching flag; `properties` are merged
/// over the pom properties and under `-D` overrides.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Path to the Karaf features descriptor to rewrite
    #[serde(default)]
    pub features_file: Option<String>,

    /// Restrict the edit to the `<feature>` whose start tag mentions this name
    #[serde(default)]
    pub target_feature: Option<String>,

    /// Pom whose `<properties>` resolve `${...}` version placeholders (default: "pom.xml")
    #[serde(default = "default_pom")]
    pub pom: String,

    /// Extra properties, taking precedence over the pom's
    #[serde(default)]
    pub properties: BTreeMap<String, String>,
}

fn default_pom() -> String {
    "pom.xml".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            features_file: None,
            target_feature: None,
            pom: default_pom(),
            properties: BTreeMap::new(),
        }
    }
}

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use wrapver_core::{Config, Properties};
use wrapver_utils::{get_wrapver_config, read_pom_properties};

use crate::options::TargetOptions;

/// Configuration file merged with the command line.
///
/// # Errors
/// Returns error if the configuration file cannot be loaded.
pub async fn effective_config(current_dir: &Path, options: &TargetOptions) -> Result<Config> {
    let mut config = get_wrapver_config(current_dir, options.config.as_deref()).await?;
    if let Some(features_file) = &options.features_file {
        config.features_file = Some(features_file.display().to_string());
    }
    if let Some(target_feature) = &options.target_feature {
        config.target_feature = Some(target_feature.clone());
    }
    if let Some(pom) = &options.pom {
        config.pom = pom.display().to_string();
    }
    config.properties.extend(options.properties.iter().cloned());
    Ok(config)
}

/// Pom properties, overridden by the configured ones.
///
/// A pom given on the command line must exist; the configured one is skipped
/// with a warning when it does not.
async fn load_properties(
    current_dir: &Path,
    config: &Config,
    explicit_pom: bool,
) -> Result<Properties> {
    let pom_path = current_dir.join(&config.pom);
    let mut properties = Properties::new(config.pom.clone());
    if explicit_pom || pom_path.is_file() {
        let pom_properties = read_pom_properties(&pom_path).await?;
        tracing::debug!(
            "Loaded {} properties from {}",
            pom_properties.len(),
            pom_path.display()
        );
        properties.extend(pom_properties);
    } else {
        tracing::warn!(
            "Pom {} not found, placeholders resolve from configured properties only",
            pom_path.display()
        );
    }
    properties.extend(config.properties.clone());
    Ok(properties)
}

pub struct CommandContext {
    pub features_file: PathBuf,
    pub target_feature: Option<String>,
    pub properties: Properties,
}

impl CommandContext {
    /// # Errors
    /// Returns error if the configuration or the pom cannot be loaded, or no
    /// features file is given.
    pub async fn new(options: &TargetOptions) -> Result<Self> {
        let current_dir = std::env::current_dir()?;
        let config = effective_config(&current_dir, options).await?;
        let features_file = current_dir.join(
            config
                .features_file
                .as_deref()
                .context("No features file given. Pass --file or set featuresFile in wrapver.json")?,
        );
        let properties = load_properties(&current_dir, &config, options.pom.is_some()).await?;

        Ok(Self {
            features_file,
            target_feature: config.target_feature,
            properties,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;
    use wrapver_core::PropertySource;

    #[tokio::test]
    async fn test_effective_config_cli_overrides() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join("wrapver.json"),
            r#"{"featuresFile": "a.xml", "targetFeature": "x", "properties": {"p": "1", "q": "2"}}"#,
        )
        .unwrap();
        let options = TargetOptions {
            features_file: Some(PathBuf::from("b.xml")),
            properties: vec![("p".to_string(), "3".to_string())],
            ..Default::default()
        };

        let config = effective_config(temp_dir.path(), &options).await.unwrap();
        assert_eq!(config.features_file.as_deref(), Some("b.xml"));
        assert_eq!(config.target_feature.as_deref(), Some("x"));
        assert_eq!(config.properties.get("p").map(String::as_str), Some("3"));
        assert_eq!(config.properties.get("q").map(String::as_str), Some("2"));

        temp_dir.close().unwrap();
    }

    #[tokio::test]
    async fn test_load_properties_precedence() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join("pom.xml"),
            "<project><properties><a>pom</a><b>pom</b></properties></project>",
        )
        .unwrap();
        let mut config = Config::default();
        config.properties.insert("b".to_string(), "config".to_string());

        let properties = load_properties(temp_dir.path(), &config, false).await.unwrap();
        assert_eq!(properties.lookup("a").as_deref(), Some("pom"));
        assert_eq!(properties.lookup("b").as_deref(), Some("config"));
        assert_eq!(properties.origin(), "pom.xml");

        temp_dir.close().unwrap();
    }

    #[tokio::test]
    async fn test_load_properties_without_pom() {
        let temp_dir = TempDir::new().unwrap();
        let properties = load_properties(temp_dir.path(), &Config::default(), false)
            .await
            .unwrap();
        assert!(properties.is_empty());

        let result = load_properties(temp_dir.path(), &Config::default(), true).await;
        assert!(result.is_err());

        temp_dir.close().unwrap();
    }
}

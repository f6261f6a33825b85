use std::path::Path;

use anyhow::{Context, Result};
use tokio::fs::read_to_string;
use wrapver_core::Config;

pub const CONFIG_FILE_NAME: &str = "wrapver.json";

/// Load the configuration file.
///
/// An explicit path must exist; otherwise `wrapver.json` in `current_dir` is used
/// when present and the defaults when it is not.
///
/// # Errors
/// Returns error if the file cannot be read or is not valid JSON.
pub async fn get_wrapver_config(current_dir: &Path, explicit: Option<&Path>) -> Result<Config> {
    let config_file = match explicit {
        Some(path) => current_dir.join(path),
        None => {
            let default_file = current_dir.join(CONFIG_FILE_NAME);
            if !default_file.is_file() {
                return Ok(Config::default());
            }
            default_file
        }
    };
    let content = read_to_string(&config_file)
        .await
        .with_context(|| format!("Failed to read config - {}", config_file.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse config - {}", config_file.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_get_wrapver_config_default_when_missing() {
        let temp_dir = TempDir::new().unwrap();
        let config = get_wrapver_config(temp_dir.path(), None).await.unwrap();
        assert_eq!(config, Config::default());
        temp_dir.close().unwrap();
    }

    #[tokio::test]
    async fn test_get_wrapver_config_reads_default_file() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join(CONFIG_FILE_NAME),
            r#"{"featuresFile": "features.xml", "properties": {"a": "1"}}"#,
        )
        .unwrap();

        let config = get_wrapver_config(temp_dir.path(), None).await.unwrap();
        assert_eq!(config.features_file.as_deref(), Some("features.xml"));
        assert_eq!(config.properties.get("a").map(String::as_str), Some("1"));
        assert_eq!(config.pom, "pom.xml");
        temp_dir.close().unwrap();
    }

    #[tokio::test]
    async fn test_get_wrapver_config_explicit_missing_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let result = get_wrapver_config(temp_dir.path(), Some(Path::new("other.json"))).await;
        assert!(result.is_err());
        temp_dir.close().unwrap();
    }

    #[tokio::test]
    async fn test_get_wrapver_config_invalid_json() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join(CONFIG_FILE_NAME), "{ not json").unwrap();
        let result = get_wrapver_config(temp_dir.path(), None).await;
        assert!(result.is_err());
        temp_dir.close().unwrap();
    }
}

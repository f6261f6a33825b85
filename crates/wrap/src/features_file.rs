use anyhow::{Context, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tokio::fs::{read_to_string, rename, write};
use wrapver_core::{ChangeKind, FeatureNotFound, FeatureRange, PropertySource, WrapError};

use crate::{
    bundle_line::{is_wrap_bundle_line, rewrite_line},
    feature::find_feature_range,
    normalizer::NormalizedVersion,
};

/// A line whose `Bundle-Version` clause was inserted or replaced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineChange {
    /// 1-based line number
    pub line: usize,
    pub kind: ChangeKind,
    pub before: String,
    pub after: String,
    pub version: NormalizedVersion,
}

/// A wrap bundle line left untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkippedLine {
    /// 1-based line number
    pub line: usize,
    pub reason: String,
}

/// Summary of one pass over a features descriptor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileReport {
    /// Wrap bundle lines inside the processed range
    pub bundles: usize,
    pub changes: Vec<LineChange>,
    pub skipped: Vec<SkippedLine>,
}

impl FileReport {
    #[must_use]
    pub fn is_changed(&self) -> bool {
        !self.changes.is_empty()
    }
}

/// A features descriptor held in memory as lines.
///
/// The line ending and the trailing newline of the original content are kept
/// so untouched lines are written back byte-identical.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeaturesFile {
    path: PathBuf,
    lines: Vec<String>,
    line_ending: &'static str,
    trailing_newline: bool,
}

impl FeaturesFile {
    pub fn from_content(path: impl Into<PathBuf>, content: &str) -> Self {
        Self {
            path: path.into(),
            lines: content.lines().map(str::to_string).collect(),
            line_ending: if content.contains("\r\n") { "\r\n" } else { "\n" },
            trailing_newline: content.ends_with('\n'),
        }
    }

    /// # Errors
    /// Returns error if the file cannot be read.
    pub async fn read(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = read_to_string(path)
            .await
            .with_context(|| format!("Failed to read features file - {}", path.display()))?;
        Ok(Self::from_content(path, &content))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Lines to process: the block of `target_feature`, or the whole file.
    ///
    /// # Errors
    /// Returns `FeatureNotFound` when the feature is not declared in the file.
    pub fn feature_range(&self, target_feature: Option<&str>) -> Result<FeatureRange, FeatureNotFound> {
        match target_feature {
            Some(name) => find_feature_range(&self.lines, name),
            None => Ok(FeatureRange::whole(self.lines.len())),
        }
    }

    /// Pin `Bundle-Version` on every wrap bundle line in `range`.
    ///
    /// A line that cannot be processed is reported and left as is; it never
    /// stops the remaining lines from being processed.
    pub fn apply(&mut self, range: FeatureRange, properties: &dyn PropertySource) -> FileReport {
        let mut report = FileReport::default();
        for index in range.indices() {
            let Some(line) = self.lines.get(index) else {
                break;
            };
            if !is_wrap_bundle_line(line) {
                continue;
            }
            report.bundles += 1;
            match rewrite_line(line, properties) {
                Ok(rewrite) => {
                    if let Some(kind) = rewrite.change {
                        tracing::debug!("Line {}: {:?} Bundle-Version", index + 1, kind);
                        let before = std::mem::replace(&mut self.lines[index], rewrite.line);
                        report.changes.push(LineChange {
                            line: index + 1,
                            kind,
                            after: self.lines[index].clone(),
                            before,
                            version: rewrite.version,
                        });
                    }
                }
                Err(err) => {
                    log_skipped(line, &err);
                    report.skipped.push(SkippedLine {
                        line: index + 1,
                        reason: err.to_string(),
                    });
                }
            }
        }
        report
    }

    #[must_use]
    pub fn content(&self) -> String {
        let mut content = self.lines.join(self.line_ending);
        if self.trailing_newline {
            content.push_str(self.line_ending);
        }
        content
    }

    /// Replace the file on disk through a sibling temporary file.
    ///
    /// # Errors
    /// Returns error if the temporary file cannot be written or renamed.
    pub async fn write(&self) -> Result<()> {
        let file_name = self
            .path
            .file_name()
            .context(format!("File name not found - {}", self.path.display()))?;
        let mut temp_name = file_name.to_os_string();
        temp_name.push(".wrapver.tmp");
        let temp_path = self.path.with_file_name(temp_name);

        write(&temp_path, self.content())
            .await
            .with_context(|| format!("Failed to write {}", temp_path.display()))?;
        rename(&temp_path, &self.path)
            .await
            .with_context(|| format!("Failed to replace {}", self.path.display()))?;
        Ok(())
    }
}

fn log_skipped(line: &str, err: &WrapError) {
    match err {
        WrapError::PropertyNotFound { name, .. } => tracing::error!(
            "Line '{}' was ignored because it wasn't possible to read value of placeholder '{}': {}",
            line.trim(),
            name,
            err
        ),
        WrapError::MalformedPlaceholder(_) => {
            tracing::error!("Line '{}' was ignored: {}", line.trim(), err)
        }
        WrapError::InvalidVersion { .. } => {
            tracing::warn!("Line '{}' was ignored because {}", line.trim(), err)
        }
        _ => tracing::info!("Line '{}' was ignored: {}", line.trim(), err),
    }
}

/// Read `path`, pin `Bundle-Version` on its wrap bundles and write it back.
///
/// With `dry_run` or when no line changed the file is not written.
///
/// # Errors
/// Returns error if the file cannot be read or written, or when
/// `target_feature` is not declared in it.
pub async fn ensure_bundle_versions(
    path: &Path,
    target_feature: Option<&str>,
    properties: &dyn PropertySource,
    dry_run: bool,
) -> Result<FileReport> {
    let mut file = FeaturesFile::read(path).await?;
    let range = file.feature_range(target_feature).inspect_err(|err| {
        tracing::error!("{}", err);
    })?;
    if let Some(name) = target_feature {
        tracing::debug!(
            "Feature {} spans lines {}..={}",
            name,
            range.first() + 1,
            range.last().map_or(range.first(), |last| last + 1)
        );
    }

    let report = file.apply(range, properties);
    if dry_run {
        tracing::info!(
            "Dry run, {} of {} wrap bundles would be updated",
            report.changes.len(),
            report.bundles
        );
        return Ok(report);
    }
    if report.is_changed() {
        file.write().await?;
        tracing::info!(
            "File updated successfully, {} of {} wrap bundles updated.",
            report.changes.len(),
            report.bundles
        );
    } else {
        tracing::info!("No wrap bundle needed a Bundle-Version update.");
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;
    use wrapver_core::Properties;

    const FEATURES: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>
<features name='camel-features' xmlns='http://karaf.apache.org/xmlns/features/v1.6.0'>
    <feature name='camel-olingo4' version='${project.version}' start-level='50'>
        <feature version='${project.version}'>camel-core</feature>
        <bundle dependency='true'>wrap:mvn:org.apache.olingo/odata-server-core/5.0.0</bundle>
        <bundle dependency='true'>wrap:mvn:org.apache.olingo/odata-commons-core/5.0.0$overwrite=merge&amp;Export-Package=org.apache.olingo.*;version=5.0.0</bundle>
    </feature>
    <feature name='camel-amqp' version='${project.version}' start-level='50'>
        <bundle dependency='true'>wrap:mvn:org.apache.qpid/qpid-jms-client/${qpid-jms-client-version}</bundle>
        <bundle dependency='true'>wrap:mvn:org.apache.qpid/proton-j/${proton-j-version}</bundle>
        <bundle>mvn:org.apache.camel.karaf/camel-amqp/${project.version}</bundle>
    </feature>
</features>
";

    fn properties() -> Properties {
        let mut properties = Properties::new("pom.xml");
        properties.insert("qpid-jms-client-version", "1.0.0");
        properties
    }

    #[test]
    fn test_content_roundtrip() {
        let file = FeaturesFile::from_content("features.xml", FEATURES);
        assert_eq!(file.content(), FEATURES);
        assert_eq!(file.lines().len(), 13);
    }

    #[test]
    fn test_content_keeps_crlf_and_missing_trailing_newline() {
        let content = "<features>\r\n</features>";
        let file = FeaturesFile::from_content("features.xml", content);
        assert_eq!(file.content(), content);
    }

    #[test]
    fn test_apply_whole_file() {
        let mut file = FeaturesFile::from_content("features.xml", FEATURES);
        let range = file.feature_range(None).unwrap();
        let report = file.apply(range, &properties());

        assert_eq!(report.bundles, 4);
        assert_eq!(report.changes.len(), 3);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].line, 10);
        assert!(report.skipped[0].reason.contains("proton-j-version"));

        assert_eq!(
            file.lines()[4],
            "        <bundle dependency='true'>wrap:mvn:org.apache.olingo/odata-server-core/5.0.0$Bundle-Version=5.0.0</bundle>"
        );
        assert_eq!(
            file.lines()[5],
            "        <bundle dependency='true'>wrap:mvn:org.apache.olingo/odata-commons-core/5.0.0$overwrite=merge&amp;Bundle-Version=5.0.0&amp;Export-Package=org.apache.olingo.*;version=5.0.0</bundle>"
        );
        assert_eq!(
            file.lines()[8],
            "        <bundle dependency='true'>wrap:mvn:org.apache.qpid/qpid-jms-client/${qpid-jms-client-version}$Bundle-Version=1.0.0</bundle>"
        );
        assert_eq!(report.changes[0].line, 5);
        assert_eq!(report.changes[0].kind, ChangeKind::Inserted);
    }

    #[test]
    fn test_apply_leaves_other_lines_untouched() {
        let mut file = FeaturesFile::from_content("features.xml", FEATURES);
        let before = file.lines().to_vec();
        let range = file.feature_range(None).unwrap();
        file.apply(range, &properties());

        for (index, (old, new)) in before.iter().zip(file.lines()).enumerate() {
            if !is_wrap_bundle_line(old) {
                assert_eq!(old, new, "line {} changed", index + 1);
            }
        }
    }

    #[test]
    fn test_apply_target_feature_only() {
        let mut file = FeaturesFile::from_content("features.xml", FEATURES);
        let range = file.feature_range(Some("camel-amqp")).unwrap();
        let report = file.apply(range, &properties());

        assert_eq!(report.bundles, 2);
        assert_eq!(report.changes.len(), 1);
        assert_eq!(report.changes[0].line, 9);
        assert!(!file.lines()[4].contains("Bundle-Version"));
    }

    #[test]
    fn test_apply_twice_is_noop() {
        let mut file = FeaturesFile::from_content("features.xml", FEATURES);
        let range = file.feature_range(None).unwrap();
        file.apply(range, &properties());
        let once = file.content();

        let report = file.apply(range, &properties());
        assert!(!report.is_changed());
        assert_eq!(file.content(), once);
    }

    #[test]
    fn test_feature_range_not_found() {
        let file = FeaturesFile::from_content("features.xml", FEATURES);
        assert!(file.feature_range(Some("camel-kafka")).is_err());
    }

    #[tokio::test]
    async fn test_ensure_bundle_versions_writes_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("features.xml");
        fs::write(&path, FEATURES).unwrap();

        let report = ensure_bundle_versions(&path, None, &properties(), false)
            .await
            .unwrap();
        assert_eq!(report.changes.len(), 3);

        let written = fs::read_to_string(&path).unwrap();
        assert!(written.contains("odata-server-core/5.0.0$Bundle-Version=5.0.0</bundle>"));
        assert!(written.ends_with("</features>\n"));
        assert!(!temp_dir.path().join("features.xml.wrapver.tmp").exists());

        temp_dir.close().unwrap();
    }

    #[tokio::test]
    async fn test_ensure_bundle_versions_dry_run() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("features.xml");
        fs::write(&path, FEATURES).unwrap();

        let report = ensure_bundle_versions(&path, None, &properties(), true)
            .await
            .unwrap();
        assert_eq!(report.changes.len(), 3);
        assert_eq!(fs::read_to_string(&path).unwrap(), FEATURES);

        temp_dir.close().unwrap();
    }

    #[tokio::test]
    async fn test_ensure_bundle_versions_feature_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("features.xml");
        fs::write(&path, FEATURES).unwrap();

        let result = ensure_bundle_versions(&path, Some("camel-kafka"), &properties(), false).await;
        let err = result.unwrap_err();
        assert!(err.downcast_ref::<FeatureNotFound>().is_some());
        assert_eq!(fs::read_to_string(&path).unwrap(), FEATURES);

        temp_dir.close().unwrap();
    }

    #[tokio::test]
    async fn test_ensure_bundle_versions_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let result = ensure_bundle_versions(
            &temp_dir.path().join("missing.xml"),
            None,
            &properties(),
            false,
        )
        .await;
        assert!(result.is_err());
        temp_dir.close().unwrap();
    }
}

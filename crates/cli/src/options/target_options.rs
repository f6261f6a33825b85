use clap::Args;
use std::path::PathBuf;

/// Which descriptor to edit and where placeholder values come from.
///
/// Every option falls back to the configuration file.
#[derive(Args, Debug, Clone, Default)]
pub struct TargetOptions {
    /// Karaf features descriptor to edit
    #[arg(short = 'f', long = "file", value_name = "FEATURES_FILE")]
    pub features_file: Option<PathBuf>,

    /// Only edit the <feature> whose start tag mentions this name
    #[arg(short = 't', long = "feature", value_name = "NAME")]
    pub target_feature: Option<String>,

    /// Pom whose <properties> resolve ${...} versions
    #[arg(long, value_name = "POM")]
    pub pom: Option<PathBuf>,

    /// Property override, may be repeated
    #[arg(short = 'D', value_name = "KEY=VALUE", value_parser = parse_property)]
    pub properties: Vec<(String, String)>,

    /// Configuration file [default: wrapver.json]
    #[arg(short, long, value_name = "CONFIG")]
    pub config: Option<PathBuf>,
}

fn parse_property(value: &str) -> Result<(String, String), String> {
    match value.split_once('=') {
        Some((key, val)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), val.to_string()))
        }
        _ => Err(format!("expected KEY=VALUE, got '{value}'")),
    }
}

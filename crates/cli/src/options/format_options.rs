use clap::ValueEnum;

/// CLI output format selection.
///
/// Controls whether commands print human-readable output or JSON for CI integration.
#[derive(Debug, Clone, ValueEnum)]
pub enum FormatOptions {
    /// JSON format for CI/CD pipelines
    #[value(name = "json")]
    Json,
    /// Human-readable colored terminal output
    #[value(name = "stdout")]
    Stdout,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_options_from_str() {
        assert!(matches!(
            FormatOptions::from_str("json", false),
            Ok(FormatOptions::Json)
        ));
        assert!(matches!(
            FormatOptions::from_str("stdout", false),
            Ok(FormatOptions::Stdout)
        ));
        assert!(FormatOptions::from_str("yaml", false).is_err());
    }
}

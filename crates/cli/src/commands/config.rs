use anyhow::Result;
use clap::Args;

use crate::{context::effective_config, options::TargetOptions};

#[derive(Args, Debug)]
#[command(about = "Print the effective wrapver configuration")]
pub struct ConfigArgs {
    #[command(flatten)]
    pub target: TargetOptions,
}

/// Display the configuration file merged with the command line
///
/// # Errors
/// Returns error if reading the configuration fails.
pub async fn handle_config(args: &ConfigArgs) -> Result<()> {
    let current_dir = std::env::current_dir()?;
    let config = effective_config(&current_dir, &args.target).await?;
    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        config: ConfigArgs,
    }

    #[test]
    fn test_config_args_parsing() {
        let cli = TestCli::parse_from(["test", "--config", "other.json"]);
        assert!(cli.config.target.config.is_some());
    }

    #[test]
    fn test_config_args_debug() {
        let cli = TestCli::parse_from(["test"]);
        let debug_str = format!("{:?}", cli.config);
        assert!(debug_str.contains("ConfigArgs"));
    }
}

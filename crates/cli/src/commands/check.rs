use anyhow::Result;
use clap::Args;
use wrapver_utils::{display_change, display_skipped};
use wrapver_wrap::ensure_bundle_versions;

use crate::{context::CommandContext, options::FormatOptions, options::TargetOptions};

#[derive(Args, Debug)]
#[command(about = "Show which wrap bundles would change, without writing")]
pub struct CheckArgs {
    #[command(flatten)]
    pub target: TargetOptions,

    #[arg(long, default_value = "stdout")]
    pub format: FormatOptions,
}

/// Report planned Bundle-Version changes
///
/// # Errors
/// Returns error if the context cannot be built, the file cannot be read, or
/// the target feature does not exist.
pub async fn handle_check(args: &CheckArgs) -> Result<()> {
    let context = CommandContext::new(&args.target).await?;
    let report = ensure_bundle_versions(
        &context.features_file,
        context.target_feature.as_deref(),
        &context.properties,
        true,
    )
    .await?;

    match args.format {
        FormatOptions::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        FormatOptions::Stdout => {
            if report.changes.is_empty() && report.skipped.is_empty() {
                println!("All {} wrap bundles are up to date", report.bundles);
                return Ok(());
            }
            for change in &report.changes {
                println!(
                    "{}",
                    display_change(change.line, change.kind, &change.before, &change.after)
                );
            }
            for skipped in &report.skipped {
                println!("{}", display_skipped(skipped.line, &skipped.reason));
            }
            println!(
                "{} of {} wrap bundles would be updated",
                report.changes.len(),
                report.bundles
            );
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        check: CheckArgs,
    }

    #[test]
    fn test_check_args_default_format() {
        let cli = TestCli::parse_from(["test"]);
        assert!(matches!(cli.check.format, FormatOptions::Stdout));
    }

    #[test]
    fn test_check_args_json() {
        let cli = TestCli::parse_from(["test", "--format", "json", "-t", "camel-amqp"]);
        assert!(matches!(cli.check.format, FormatOptions::Json));
        assert_eq!(cli.check.target.target_feature.as_deref(), Some("camel-amqp"));
    }
}

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use wrapver_utils::display_change;
use wrapver_wrap::ensure_bundle_versions;

use crate::{context::CommandContext, options::TargetOptions};

#[derive(Args, Debug, Default)]
#[command(about = "Pin Bundle-Version on wrap:mvn: bundles of a features file")]
pub struct EnsureArgs {
    #[command(flatten)]
    pub target: TargetOptions,

    /// If true, do not write the features file.
    #[arg(short, long, default_value = "false")]
    pub dry_run: bool,
}

/// Ensure every wrap bundle carries a Bundle-Version
///
/// # Errors
/// Returns error if the context cannot be built, the file cannot be read or
/// written, or the target feature does not exist.
pub async fn handle_ensure(args: &EnsureArgs) -> Result<()> {
    let context = CommandContext::new(&args.target).await?;
    let report = ensure_bundle_versions(
        &context.features_file,
        context.target_feature.as_deref(),
        &context.properties,
        args.dry_run,
    )
    .await?;

    for change in &report.changes {
        println!(
            "{}",
            display_change(change.line, change.kind, &change.before, &change.after)
        );
    }
    let summary = format!(
        "{} of {} wrap bundles updated, {} skipped",
        report.changes.len(),
        report.bundles,
        report.skipped.len()
    );
    if args.dry_run {
        println!("{} {}", "Dry run:".bold(), summary);
    } else {
        println!("{} {}", context.features_file.display(), summary);
    }
    Ok(())
}

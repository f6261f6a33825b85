use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::{
    commands::{
        CheckArgs, ConfigArgs, EnsureArgs, handle_check, handle_config, handle_ensure,
    },
    options::TargetOptions,
};
pub mod commands;
mod context;
mod logging;
pub mod options;

pub use logging::init_logging;

#[derive(Parser, Debug)]
#[command(
    name = "wrapver",
    author,
    version,
    about = "Pin Bundle-Version on wrap:mvn: bundles in OSGi features descriptors",
    help_template = "{name} {version}\n{about}\n\n{usage-heading} {usage}\n\n{all-args}"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    target: TargetOptions,

    #[arg(short, long, default_value = "false")]
    dry_run: bool,

    /// Log debug diagnostics
    #[arg(short, long, global = true, default_value = "false")]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    Ensure(EnsureArgs),
    Check(CheckArgs),
    Config(ConfigArgs),
}

pub async fn main(args: &[String]) -> Result<()> {
    let cli = Cli::parse_from(args);
    init_logging(cli.verbose);
    if let Some(command) = cli.command {
        match command {
            Commands::Ensure(args) => handle_ensure(&args).await?,
            Commands::Check(args) => handle_check(&args).await?,
            Commands::Config(args) => handle_config(&args).await?,
        }
    } else {
        handle_ensure(&EnsureArgs {
            target: cli.target,
            dry_run: cli.dry_run,
        })
        .await?;
    }
    Ok(())
}

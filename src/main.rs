use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;
mod config;
mod patch;
mod util;

#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// The command to execute (defaults to `apply`)
    #[command(subcommand)]
    command: Option<FolioCommand>,
}

#[derive(Parser, Default)]
struct ApplyArgs {
    /// The path to the configuration file
    #[arg(short, long, default_value = "folio.yaml")]
    config_file: Option<PathBuf>,

    /// Run every stage but do not write the result
    #[arg(long, default_value = "false")]
    dry_run: bool,

    /// Fail when a stage finds nothing to patch
    #[arg(long, default_value = "false")]
    strict: bool,

    /// Do not keep a `.bak` copy of the overwritten file
    #[arg(long, default_value = "false")]
    no_backup: bool,
}

#[derive(Parser)]
struct PlanArgs {
    /// The path to the configuration file
    #[arg(short, long, default_value = "folio.yaml")]
    config_file: Option<PathBuf>,

    /// Print the plan as JSON
    #[arg(long, default_value = "false")]
    json: bool,
}

#[derive(Parser)]
struct InitArgs {
    /// The directory to write `folio.yaml` into
    #[arg(default_value = ".")]
    path: PathBuf,

    /// Whether to create the directory if it doesn't exist
    #[arg(short, long, default_value = "false")]
    create: bool,

    /// Overwrite an existing `folio.yaml`
    #[arg(short, long, default_value = "false")]
    force: bool,
}

#[derive(Subcommand)]
enum FolioCommand {
    /// Patch the document with every stage in the plan
    Apply(ApplyArgs),

    /// Show the stage order and each stage's dependencies
    Plan(PlanArgs),

    /// Write a default `folio.yaml`
    Init(InitArgs),
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), anyhow::Error> {
    let args = Args::parse();

    match args.command {
        Some(FolioCommand::Apply(args)) => {
            commands::apply::run(&args).await?;
        }
        Some(FolioCommand::Plan(args)) => {
            commands::plan::run(&args)?;
        }
        Some(FolioCommand::Init(args)) => {
            commands::init::run(&args).await?;
        }
        None => {
            commands::apply::run(&ApplyArgs::default()).await?;
        }
    }

    Ok(())
}

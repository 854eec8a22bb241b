use crate::{
    ApplyArgs,
    config::{CONFIG_FILE, FolioConfig, base_path_from_config},
    patch::{
        Document, FragmentStore, PatchContext, PatchReport, Pipeline, SaveOptions, Saved,
        StepReport, StepStatus,
    },
};

pub async fn run(args: &ApplyArgs) -> Result<PatchReport, anyhow::Error> {
    // Determine the config file path
    let config_path = args
        .config_file
        .clone()
        .unwrap_or_else(|| CONFIG_FILE.into());
    let config_path = if config_path.is_relative() {
        std::env::current_dir()?.join(&config_path)
    } else {
        config_path
    };

    let mut config = FolioConfig::load_from_arg(Some(config_path.as_path()))?;
    config.strict |= args.strict;
    config.backup &= !args.no_backup;

    // Validate the stage order before touching the document
    let pipeline = Pipeline::from_config(&config)?;
    println!("Patch plan: {}", pipeline.stage_names().join(" -> "));

    let base_path = base_path_from_config(&config_path);
    let paths = config.resolve_paths(&base_path);

    println!("Reading {}", paths.document.display());
    let document = Document::load(&paths.document).await?;

    let fragments = FragmentStore::new(&paths.fragments_dir);
    let ctx = PatchContext::new(&fragments, config.strict);
    let report = pipeline.run(&document.original, &ctx, print_step)?;

    println!(
        "{} applied, {} skipped, {} missed",
        report.applied(),
        report.skipped(),
        report.missed()
    );

    if args.dry_run {
        println!("Dry run: {} not written", paths.output.display());
        return Ok(report);
    }

    let options = SaveOptions {
        output: paths.output,
        backup: config.backup,
    };
    match document.save(&report.text, &options).await? {
        Saved::Unchanged => {
            println!("No changes; {} left as is", document.path.display());
        }
        Saved::Written { path, backup } => {
            println!("Wrote {}", path.display());
            if let Some(backup) = backup {
                println!("Previous version kept at {}", backup.display());
            }
        }
    }

    Ok(report)
}

fn print_step(step: &StepReport) {
    match step.status {
        StepStatus::Applied => println!("  {}: {}", step.stage, step.detail),
        StepStatus::Skipped => println!("  {}: skipped, {}", step.stage, step.detail),
        StepStatus::Missed => eprintln!("  {}: warning: {}", step.stage, step.detail),
    }
}

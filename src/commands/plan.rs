use serde::Serialize;

use crate::{
    PlanArgs,
    config::{CONFIG_FILE, FolioConfig},
    patch::Pipeline,
};

#[derive(Debug, Serialize)]
struct PlannedStage {
    stage: &'static str,
    requires: &'static [&'static str],
}

pub fn run(args: &PlanArgs) -> Result<(), anyhow::Error> {
    let config_path = args
        .config_file
        .clone()
        .unwrap_or_else(|| CONFIG_FILE.into());

    let config = FolioConfig::load_from_arg(Some(config_path.as_path()))?;
    let planned = plan(&config)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&planned)?);
        return Ok(());
    }

    println!("Patch plan for {}:", config.document.display());
    for (i, step) in planned.iter().enumerate() {
        if step.requires.is_empty() {
            println!("  {}. {}", i + 1, step.stage);
        } else {
            println!(
                "  {}. {} (after {})",
                i + 1,
                step.stage,
                step.requires.join(", ")
            );
        }
    }

    Ok(())
}

fn plan(config: &FolioConfig) -> Result<Vec<PlannedStage>, anyhow::Error> {
    let pipeline = Pipeline::from_config(config)?;
    Ok(pipeline
        .dependencies()
        .into_iter()
        .map(|(stage, requires)| PlannedStage { stage, requires })
        .collect())
}

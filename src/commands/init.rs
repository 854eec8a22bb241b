use crate::{
    InitArgs,
    config::{CONFIG_FILE, FolioConfig},
};

pub async fn run(args: &InitArgs) -> Result<(), anyhow::Error> {
    let path = if args.path.is_relative() {
        std::env::current_dir()?.join(&args.path)
    } else {
        args.path.clone()
    };

    if !path.exists() {
        if args.create {
            tokio::fs::create_dir_all(&path).await?;
            println!("Created directory {path}", path = path.display());
        } else {
            return Err(anyhow::anyhow!(
                "Directory does not exist: {path}",
                path = path.display()
            ));
        }
    }

    let config_file = path.join(CONFIG_FILE);
    if config_file.exists() && !args.force {
        return Err(anyhow::anyhow!(
            "{config_file} already exists (use --force to overwrite)",
            config_file = config_file.display()
        ));
    }

    println!("Initializing patch plan in {}", path.display());

    let config_text = serde_yaml::to_string(&FolioConfig::default())?;
    tokio::fs::write(&config_file, config_text).await?;

    println!(
        "Created config file {config_file}",
        config_file = config_file.display()
    );

    Ok(())
}

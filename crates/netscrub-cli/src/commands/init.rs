use anyhow::Result;
use netscrub_config::Config;
use std::path::PathBuf;

pub fn handle(path: Option<PathBuf>, force: bool) -> Result<()> {
    let path = path.unwrap_or_else(Config::config_path);

    if path.exists() && !force {
        anyhow::bail!("{} already exists (use --force to replace it)", path.display());
    }

    Config::default().save(&path)?;

    println!("✓ Created {}", path.display());
    println!("  Edit [[obfuscate]] and [[omit]] entries, then run 'netscrub clean'");

    Ok(())
}

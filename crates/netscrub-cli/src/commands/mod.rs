pub mod clean;
pub mod filter;
pub mod init;

use anyhow::Result;
use netscrub_config::Config;
use std::path::Path;

/// Explicit config file, or the platform default
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let config = match path {
        Some(path) => {
            tracing::debug!("Loading config from {}", path.display());
            Config::load(path)?
        }
        None => {
            tracing::debug!("Loading config from {}", Config::config_path().display());
            Config::load_default()?
        }
    };

    tracing::debug!(
        "{} obfuscators, {} omit patterns, {} workers",
        config.obfuscate.len(),
        config.omit.len(),
        config.run.workers
    );
    Ok(config)
}

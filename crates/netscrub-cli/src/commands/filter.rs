use anyhow::{Context, Result};
use netscrub_engine::Cleaner;
use std::io::{Read, Write};
use std::path::PathBuf;

pub async fn handle(config: Option<PathBuf>) -> Result<()> {
    let config = super::load_config(config.as_deref())?;
    let cleaner = Cleaner::from_config(&config)?;

    let input = tokio::task::spawn_blocking(|| {
        let mut input = String::new();
        std::io::stdin().read_to_string(&mut input).map(|_| input)
    })
    .await?
    .context("stdin is not valid UTF-8 text")?;

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(cleaner.redact_contents(&input).as_bytes())?;
    stdout.flush()?;

    eprintln!("{}", serde_json::to_string_pretty(&cleaner.reports())?);

    Ok(())
}

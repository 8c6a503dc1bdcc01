mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    // Initialize tracing; stdout is reserved for `filter` output
    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        cli::Commands::Clean {
            input,
            output,
            config,
            report,
            workers,
            overwrite,
        } => {
            commands::clean::handle(commands::clean::CleanArgs {
                input,
                output,
                config,
                report,
                workers,
                overwrite,
            })
            .await
        }
        cli::Commands::Init { path, force } => commands::init::handle(path, force),
        cli::Commands::Filter { config } => commands::filter::handle(config).await,
    }
}

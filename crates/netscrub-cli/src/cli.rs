use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "netscrub")]
#[command(about = "Redact network identities from diagnostic bundles", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Log at debug level (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Redact every file of an input directory into an output directory
    Clean {
        /// Directory to read
        #[arg(short, long)]
        input: PathBuf,

        /// Directory to write; must be absent or empty
        #[arg(short, long)]
        output: PathBuf,

        /// Config file (default: platform config dir, then built-in defaults)
        #[arg(short, long, env = "NETSCRUB_CONFIG")]
        config: Option<PathBuf>,

        /// Where to write the JSON run report (default: next to the output)
        #[arg(long)]
        report: Option<PathBuf>,

        /// Files processed concurrently (default from config: 4)
        #[arg(short, long)]
        workers: Option<usize>,

        /// Write into a non-empty output directory
        #[arg(long)]
        overwrite: bool,
    },

    /// Write the default config file
    Init {
        /// Target file (default: platform config dir)
        #[arg(short, long)]
        path: Option<PathBuf>,

        /// Replace an existing file
        #[arg(long)]
        force: bool,
    },

    /// Redact stdin to stdout; the replacement report goes to stderr
    Filter {
        /// Config file (default: platform config dir, then built-in defaults)
        #[arg(short, long, env = "NETSCRUB_CONFIG")]
        config: Option<PathBuf>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_clean() {
        let cli = Cli::try_parse_from([
            "netscrub", "clean", "-i", "bundle", "-o", "cleaned", "--workers", "2", "-v",
        ])
        .unwrap();

        assert!(cli.verbose);
        match cli.command {
            Commands::Clean {
                input,
                output,
                workers,
                overwrite,
                ..
            } => {
                assert_eq!(input, PathBuf::from("bundle"));
                assert_eq!(output, PathBuf::from("cleaned"));
                assert_eq!(workers, Some(2));
                assert!(!overwrite);
            }
            _ => panic!("expected clean"),
        }
    }

    #[test]
    fn test_clean_requires_output() {
        assert!(Cli::try_parse_from(["netscrub", "clean", "--input", "bundle"]).is_err());
    }
}

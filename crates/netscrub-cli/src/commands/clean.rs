use anyhow::Result;
use netscrub_engine::Cleaner;
use std::path::{Path, PathBuf};

pub struct CleanArgs {
    pub input: PathBuf,
    pub output: PathBuf,
    pub config: Option<PathBuf>,
    pub report: Option<PathBuf>,
    pub workers: Option<usize>,
    pub overwrite: bool,
}

pub async fn handle(args: CleanArgs) -> Result<()> {
    let config = super::load_config(args.config.as_deref())?;

    let mut cleaner = Cleaner::from_config(&config)?;
    if let Some(workers) = args.workers {
        cleaner = cleaner.with_workers(workers);
    }

    let report = cleaner.run(&args.input, &args.output, args.overwrite).await?;

    let report_path = args
        .report
        .unwrap_or_else(|| default_report_path(&args.output));
    report.write(&report_path)?;

    println!(
        "✓ Cleaned {} files into {}",
        report.files_processed,
        args.output.display()
    );
    if !report.omitted.is_empty() {
        println!("  Omitted {} files", report.omitted.len());
    }
    println!("  Report: {}", report_path.display());

    Ok(())
}

/// `<output>.report.json` beside the output directory, so the report never
/// ends up inside the redacted tree
fn default_report_path(output: &Path) -> PathBuf {
    match output.file_name() {
        Some(name) => {
            let mut name = name.to_os_string();
            name.push(".report.json");
            output.with_file_name(name)
        }
        None => PathBuf::from("netscrub-report.json"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_report_path() {
        assert_eq!(
            default_report_path(Path::new("/tmp/bundle-clean")),
            PathBuf::from("/tmp/bundle-clean.report.json")
        );
        assert_eq!(
            default_report_path(Path::new("cleaned/")),
            PathBuf::from("cleaned.report.json")
        );
        assert_eq!(
            default_report_path(Path::new("..")),
            PathBuf::from("netscrub-report.json")
        );
    }
}

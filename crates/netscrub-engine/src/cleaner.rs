use anyhow::{Context, Result, bail};
use netscrub_config::{Config, ObfuscateRule, ObfuscatorKind, Target};
use netscrub_obfuscator::{
    DomainObfuscator, IpObfuscator, KeywordObfuscator, MacObfuscator, Obfuscator,
    ReplacementReport, ReplacementType, Separators,
};
use netscrub_sources::{Omitter, SourceFile};
use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use crate::report::RunReport;

struct Stage {
    obfuscator: Box<dyn Obfuscator>,
    target: Target,
}

/// Applies the configured obfuscators to a whole input tree.
///
/// Cloning is cheap and every clone shares the same obfuscators, so sequence
/// numbers and reports are global to the run.
#[derive(Clone)]
pub struct Cleaner {
    stages: Arc<Vec<Stage>>,
    omitter: Arc<Omitter>,
    workers: usize,
}

enum Processed {
    Written,
    Binary,
}

impl Cleaner {
    pub fn from_config(config: &Config) -> Result<Self> {
        let stages = config
            .obfuscate
            .iter()
            .enumerate()
            .map(|(i, rule)| {
                build_obfuscator(rule)
                    .map(|obfuscator| Stage {
                        obfuscator,
                        target: rule.target,
                    })
                    .with_context(|| format!("Invalid obfuscator #{} ({:?})", i + 1, rule.kind))
            })
            .collect::<Result<Vec<_>>>()?;

        if stages.is_empty() {
            warn!("No obfuscators configured, files will be copied unchanged");
        }

        let omitter = Omitter::new(config.omit.iter().map(|rule| rule.pattern.as_str()))
            .context("Invalid omit configuration")?;

        Ok(Self {
            stages: Arc::new(stages),
            omitter: Arc::new(omitter),
            workers: config.run.workers.max(1),
        })
    }

    /// Override the configured worker count
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Run every contents obfuscator over `text`, in configured order
    pub fn redact_contents(&self, text: &str) -> String {
        self.stages
            .iter()
            .filter(|stage| stage.target.covers_contents())
            .fold(text.to_string(), |acc, stage| stage.obfuscator.contents(&acc))
    }

    /// Run every path obfuscator over `path`, in configured order
    pub fn redact_path(&self, path: &str) -> String {
        self.stages
            .iter()
            .filter(|stage| stage.target.covers_path())
            .fold(path.to_string(), |acc, stage| stage.obfuscator.path(&acc))
    }

    /// Replacement report per obfuscator name
    pub fn reports(&self) -> BTreeMap<String, ReplacementReport> {
        let mut reports: BTreeMap<String, ReplacementReport> = BTreeMap::new();
        for stage in self.stages.iter() {
            reports
                .entry(stage.obfuscator.name().to_string())
                .or_default()
                .extend(stage.obfuscator.report());
        }
        reports
    }

    /// Redact every file under `input` into `output`
    pub async fn run(&self, input: &Path, output: &Path, overwrite: bool) -> Result<RunReport> {
        let files = netscrub_sources::walk(input)
            .with_context(|| format!("Failed to read input {}", input.display()))?;
        prepare_output(input, output, overwrite)?;

        info!(
            "Cleaning {} files from {} into {} with {} workers",
            files.len(),
            input.display(),
            output.display(),
            self.workers
        );

        let mut report = RunReport::new(input, output);

        // Paths are redacted up front and in sorted order so numbering of
        // path values does not depend on task scheduling.
        let mut destinations = HashSet::new();
        let mut pending = Vec::new();
        for file in files {
            if let Some(pattern) = self.omitter.matching_pattern(&file.relative) {
                debug!("Omitting {} (matches {})", file.relative, pattern);
                report.omit(&file.relative, format!("pattern {pattern}"));
                continue;
            }

            let redacted = unique_destination(self.redact_path(&file.relative), &mut destinations);
            pending.push((file, output.join(&redacted)));
        }

        let semaphore = Arc::new(Semaphore::new(self.workers));
        let mut tasks = JoinSet::new();
        for (file, destination) in pending {
            let permit = semaphore.clone().acquire_owned().await?;
            let cleaner = self.clone();
            tasks.spawn(async move {
                let _permit = permit;
                let outcome = cleaner.process_file(&file, &destination).await;
                (file, outcome)
            });
        }

        while let Some(joined) = tasks.join_next().await {
            let (file, outcome) = joined?;
            match outcome? {
                Processed::Written => report.files_processed += 1,
                Processed::Binary => {
                    warn!("Skipping non UTF-8 file {}", file.relative);
                    report.omit(&file.relative, "binary");
                }
            }
        }

        report.omitted.sort();
        report.replacements = self.reports();

        info!(
            "Processed {} files, omitted {}, {} distinct values replaced",
            report.files_processed,
            report.omitted.len(),
            report.replacement_count()
        );

        Ok(report)
    }

    async fn process_file(&self, file: &SourceFile, destination: &Path) -> Result<Processed> {
        let bytes = tokio::fs::read(&file.path)
            .await
            .with_context(|| format!("Failed to read {}", file.path.display()))?;
        let Ok(text) = String::from_utf8(bytes) else {
            return Ok(Processed::Binary);
        };

        let cleaner = self.clone();
        let redacted = tokio::task::spawn_blocking(move || cleaner.redact_contents(&text)).await?;

        if let Some(parent) = destination.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(destination, redacted)
            .await
            .with_context(|| format!("Failed to write {}", destination.display()))?;

        debug!("Cleaned {} -> {}", file.relative, destination.display());
        Ok(Processed::Written)
    }
}

fn build_obfuscator(rule: &ObfuscateRule) -> Result<Box<dyn Obfuscator>> {
    let kind: ReplacementType = rule.replacement.parse()?;

    let obfuscator: Box<dyn Obfuscator> = match rule.kind {
        ObfuscatorKind::Ip => {
            let separators = if rule.dashed_ipv4_in_contents {
                Separators::DotOrDash
            } else {
                Separators::Dot
            };
            Box::new(IpObfuscator::with_contents_separators(kind, separators))
        }
        ObfuscatorKind::Mac => Box::new(MacObfuscator::new(kind)),
        ObfuscatorKind::Domain => Box::new(DomainObfuscator::new(kind, &rule.domains)?),
        ObfuscatorKind::Keywords => Box::new(KeywordObfuscator::new(kind, &rule.keywords)?),
    };

    Ok(obfuscator)
}

/// Static placeholders can fold distinct paths onto one; suffix later ones
fn unique_destination(redacted: String, taken: &mut HashSet<String>) -> String {
    if taken.insert(redacted.clone()) {
        return redacted;
    }

    let mut n = 1;
    loop {
        let candidate = format!("{redacted}.{n}");
        if taken.insert(candidate.clone()) {
            warn!("Redacted path {} already used, writing {}", redacted, candidate);
            return candidate;
        }
        n += 1;
    }
}

fn prepare_output(input: &Path, output: &Path, overwrite: bool) -> Result<()> {
    let input = input.canonicalize()?;
    if resolve_output(output)?.starts_with(&input) {
        bail!("Output directory must not be inside the input directory");
    }

    if output.exists() {
        if !output.is_dir() {
            bail!("Output is not a directory: {}", output.display());
        }
        let has_entries = std::fs::read_dir(output)?.next().is_some();
        if has_entries && !overwrite {
            bail!(
                "Output directory {} is not empty (use --overwrite to write into it)",
                output.display()
            );
        }
    }

    std::fs::create_dir_all(output)
        .with_context(|| format!("Failed to create output {}", output.display()))?;

    Ok(())
}

/// Absolute output path with symlinks resolved through its deepest existing ancestor
fn resolve_output(output: &Path) -> Result<PathBuf> {
    let absolute = std::path::absolute(output)?;
    for ancestor in absolute.ancestors() {
        if ancestor.exists() {
            let rest = absolute.strip_prefix(ancestor)?;
            return Ok(ancestor.canonicalize()?.join(rest));
        }
    }
    Ok(absolute)
}

use anyhow::{Context, Result};
use netscrub_obfuscator::ReplacementReport;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use time::OffsetDateTime;

/// Summary of one `clean` run, written next to the output for the operator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    #[serde(with = "time::serde::rfc3339")]
    pub generated_at: OffsetDateTime,
    pub input: PathBuf,
    pub output: PathBuf,
    pub files_processed: usize,
    pub omitted: Vec<OmittedFile>,

    /// Obfuscator name -> raw text -> placeholder
    pub replacements: BTreeMap<String, ReplacementReport>,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OmittedFile {
    /// Path relative to the input root
    pub path: String,
    pub reason: String,
}

impl RunReport {
    pub fn new(input: &Path, output: &Path) -> Self {
        Self {
            generated_at: OffsetDateTime::now_utc(),
            input: input.to_path_buf(),
            output: output.to_path_buf(),
            files_processed: 0,
            omitted: Vec::new(),
            replacements: BTreeMap::new(),
        }
    }

    pub fn omit(&mut self, path: &str, reason: impl Into<String>) {
        self.omitted.push(OmittedFile {
            path: path.to_string(),
            reason: reason.into(),
        });
    }

    /// Total distinct raw strings replaced across every obfuscator
    pub fn replacement_count(&self) -> usize {
        self.replacements.values().map(BTreeMap::len).sum()
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn write(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_json()?)
            .with_context(|| format!("Failed to write report {}", path.display()))?;
        Ok(())
    }
}

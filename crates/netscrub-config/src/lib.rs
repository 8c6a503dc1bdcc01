use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Configuration for a redaction run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub run: RunConfig,

    /// Obfuscators, applied in the order listed
    #[serde(default = "default_obfuscate")]
    pub obfuscate: Vec<ObfuscateRule>,

    /// Files dropped from the output entirely
    #[serde(default)]
    pub omit: Vec<OmitRule>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObfuscatorKind {
    Ip,
    Mac,
    Domain,
    Keywords,
}

/// Which part of a file an obfuscator rewrites
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Target {
    Contents,
    Path,
    #[default]
    All,
}

impl Target {
    pub fn covers_contents(&self) -> bool {
        matches!(self, Target::Contents | Target::All)
    }

    pub fn covers_path(&self) -> bool {
        matches!(self, Target::Path | Target::All)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObfuscateRule {
    #[serde(rename = "type")]
    pub kind: ObfuscatorKind,

    /// `static` or `consistent`; checked when the obfuscator is built
    #[serde(default = "default_replacement")]
    pub replacement: String,

    #[serde(default)]
    pub target: Target,

    /// Treat `10-0-187-218` as an address in file contents, not only in paths
    #[serde(
        default = "default_dashed_ipv4",
        skip_serializing_if = "is_default_dashed_ipv4"
    )]
    pub dashed_ipv4_in_contents: bool,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub domains: Vec<String>,

    /// Keyword -> replacement. An empty replacement uses the policy placeholder.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub keywords: BTreeMap<String, String>,
}

impl ObfuscateRule {
    pub fn new(kind: ObfuscatorKind, replacement: &str) -> Self {
        Self {
            kind,
            replacement: replacement.to_string(),
            target: Target::default(),
            dashed_ipv4_in_contents: default_dashed_ipv4(),
            domains: Vec::new(),
            keywords: BTreeMap::new(),
        }
    }

    pub fn with_target(mut self, target: Target) -> Self {
        self.target = target;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OmitRule {
    /// Glob matched against the `/`-separated path relative to the input root
    pub pattern: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    /// Files processed concurrently
    #[serde(default = "default_workers")]
    pub workers: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            run: RunConfig::default(),
            obfuscate: default_obfuscate(),
            omit: default_omit(),
        }
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            workers: default_workers(),
        }
    }
}

fn default_workers() -> usize {
    4
}

fn default_replacement() -> String {
    "static".to_string()
}

fn default_dashed_ipv4() -> bool {
    true
}

fn is_default_dashed_ipv4(value: &bool) -> bool {
    *value == default_dashed_ipv4()
}

fn default_obfuscate() -> Vec<ObfuscateRule> {
    vec![
        ObfuscateRule::new(ObfuscatorKind::Ip, "consistent"),
        ObfuscateRule::new(ObfuscatorKind::Mac, "consistent"),
    ]
}

fn default_omit() -> Vec<OmitRule> {
    [
        "**/*.pem",
        "**/*.key",
        "**/*_rsa",
        "**/kubeconfig*",
        "**/secrets/**",
    ]
    .into_iter()
    .map(|pattern| OmitRule {
        pattern: pattern.to_string(),
    })
    .collect()
}

impl Config {
    /// Load and parse a config file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Invalid config {}", path.display()))?;
        Ok(config)
    }

    /// Load from the platform config dir, or fall back to the built-in defaults
    pub fn load_default() -> anyhow::Result<Self> {
        let path = Self::config_path();

        if path.exists() {
            Self::load(&path)
        } else {
            Ok(Config::default())
        }
    }

    /// Write as pretty TOML, creating parent directories
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config {}", path.display()))?;
        Ok(())
    }

    /// Get config file path
    pub fn config_path() -> PathBuf {
        if let Some(dirs) = directories::ProjectDirs::from("io", "netscrub", "netscrub") {
            dirs.config_dir().join("config.toml")
        } else {
            PathBuf::from("~/.netscrub/config.toml")
        }
    }
}

use regex::Regex;

use super::{Category, Match, Matcher};
use crate::error::{ObfuscatorError, Result};

/// Matches configured base domains and any of their subdomains
#[derive(Debug, Clone)]
pub struct DomainMatcher {
    pattern: Regex,
}

impl DomainMatcher {
    pub fn new(domains: &[String]) -> Result<Self> {
        let mut domains: Vec<String> = domains
            .iter()
            .map(|d| d.trim().trim_matches('.').to_ascii_lowercase())
            .filter(|d| !d.is_empty())
            .collect();
        if domains.is_empty() {
            return Err(ObfuscatorError::MissingValues {
                kind: "domain",
                what: "domain name",
            });
        }

        // Longest first so `corp.example.com` wins over `example.com`
        domains.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        domains.dedup();

        let alternatives = domains
            .iter()
            .map(|d| regex::escape(d))
            .collect::<Vec<_>>()
            .join("|");
        let pattern = Regex::new(&format!(
            r"(?i)\b(?:[a-z0-9](?:[a-z0-9-]{{0,61}}[a-z0-9])?\.)*(?:{alternatives})\b"
        ))?;

        Ok(Self { pattern })
    }
}

impl Matcher for DomainMatcher {
    fn find(&self, text: &str) -> Vec<Match> {
        self.pattern
            .find_iter(text)
            .map(|m| Match {
                start: m.start(),
                end: m.end(),
                raw: m.as_str().to_string(),
                category: Category::Domain,
                canonical: m.as_str().to_ascii_lowercase(),
            })
            .collect()
    }
}

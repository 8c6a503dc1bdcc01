//! Per-category obfuscators built from one generic matcher-driven engine

use std::collections::{BTreeMap, HashMap};

use crate::error::Result;
use crate::matcher::{
    DomainMatcher, IpMatcher, KeywordMatcher, MacMatcher, Match, Matcher, Separators,
};
use crate::policy::{ReplacementPolicy, ReplacementType};
use crate::report::{Report, ReplacementReport};

/// Uniform contract shared by every obfuscator kind
pub trait Obfuscator: Send + Sync {
    /// Obfuscator kind, e.g. `ip`
    fn name(&self) -> &str;

    /// Redact free text
    fn contents(&self, text: &str) -> String;

    /// Redact a file or directory path
    fn path(&self, path: &str) -> String;

    /// Everything replaced so far, raw text -> placeholder
    fn report(&self) -> ReplacementReport;
}

/// Composes a category matcher with a replacement policy and a report.
/// One instance lives for one run so numbering is shared across all input.
#[derive(Debug)]
pub struct MatchObfuscator<M> {
    name: &'static str,
    matcher: M,
    policy: ReplacementPolicy,
    fixed: HashMap<String, String>,
    report: Report,
}

impl<M: Matcher> MatchObfuscator<M> {
    pub fn with_matcher(name: &'static str, matcher: M, kind: ReplacementType) -> Self {
        Self {
            name,
            matcher,
            policy: ReplacementPolicy::new(kind),
            fixed: HashMap::new(),
            report: Report::new(),
        }
    }

    /// Pin explicit replacements for some canonical values; the policy covers the rest
    pub fn with_fixed_replacements(mut self, fixed: HashMap<String, String>) -> Self {
        self.fixed = fixed;
        self
    }

    pub fn policy(&self) -> &ReplacementPolicy {
        &self.policy
    }

    fn placeholder_for(&self, m: &Match) -> String {
        match self.fixed.get(&m.canonical) {
            Some(replacement) => replacement.clone(),
            None => self.policy.placeholder(m.category, &m.canonical),
        }
    }

    fn substitute(&self, text: &str, matches: Vec<Match>) -> String {
        if matches.is_empty() {
            return text.to_string();
        }

        let mut output = String::with_capacity(text.len());
        let mut last = 0;
        for m in matches {
            let placeholder = self.placeholder_for(&m);

            output.push_str(&text[last..m.start]);
            output.push_str(&placeholder);
            last = m.end;

            self.report.record(&m.raw, &placeholder);
            if m.canonical != m.raw {
                self.report.record(&m.canonical, &placeholder);
            }
        }
        output.push_str(&text[last..]);

        output
    }
}

impl<M: Matcher> Obfuscator for MatchObfuscator<M> {
    fn name(&self) -> &str {
        self.name
    }

    fn contents(&self, text: &str) -> String {
        self.substitute(text, self.matcher.find(text))
    }

    fn path(&self, path: &str) -> String {
        self.substitute(path, self.matcher.find_in_path(path))
    }

    fn report(&self) -> ReplacementReport {
        self.report.snapshot()
    }
}

pub type IpObfuscator = MatchObfuscator<IpMatcher>;
pub type MacObfuscator = MatchObfuscator<MacMatcher>;
pub type DomainObfuscator = MatchObfuscator<DomainMatcher>;
pub type KeywordObfuscator = MatchObfuscator<KeywordMatcher>;

impl IpObfuscator {
    pub fn new(kind: ReplacementType) -> Self {
        Self::with_matcher("ip", IpMatcher::default(), kind)
    }

    /// Restrict which IPv4 separators count in contents; paths always accept dashes
    pub fn with_contents_separators(kind: ReplacementType, separators: Separators) -> Self {
        Self::with_matcher("ip", IpMatcher::new(separators), kind)
    }
}

impl MacObfuscator {
    pub fn new(kind: ReplacementType) -> Self {
        Self::with_matcher("mac", MacMatcher::new(), kind)
    }
}

impl DomainObfuscator {
    pub fn new(kind: ReplacementType, domains: &[String]) -> Result<Self> {
        Ok(Self::with_matcher("domain", DomainMatcher::new(domains)?, kind))
    }
}

impl KeywordObfuscator {
    /// Keywords mapped to an empty string fall back to the policy placeholder
    pub fn new(kind: ReplacementType, keywords: &BTreeMap<String, String>) -> Result<Self> {
        let matcher = KeywordMatcher::new(keywords.keys())?;
        let fixed = keywords
            .iter()
            .filter(|(_, replacement)| !replacement.is_empty())
            .map(|(keyword, replacement)| (keyword.clone(), replacement.clone()))
            .collect();

        Ok(Self::with_matcher("keywords", matcher, kind).with_fixed_replacements(fixed))
    }
}

//! Replacement policies

use std::fmt;
use std::str::FromStr;

use crate::error::{ObfuscatorError, Result};
use crate::matcher::Category;
use crate::tracker::ConsistentTracker;

/// Replacement policy selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReplacementType {
    /// One fixed placeholder per category, no identity kept
    #[default]
    Static,

    /// Stable numbered placeholder per distinct value within the run
    Consistent,
}

impl FromStr for ReplacementType {
    type Err = ObfuscatorError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            v if v.eq_ignore_ascii_case("static") => Ok(ReplacementType::Static),
            v if v.eq_ignore_ascii_case("consistent") => Ok(ReplacementType::Consistent),
            other => Err(ObfuscatorError::UnknownReplacementType(other.to_string())),
        }
    }
}

impl fmt::Display for ReplacementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReplacementType::Static => f.write_str("static"),
            ReplacementType::Consistent => f.write_str("consistent"),
        }
    }
}

/// Maps a canonical value to its placeholder
#[derive(Debug)]
pub enum ReplacementPolicy {
    Static,
    Consistent(ConsistentTracker),
}

impl ReplacementPolicy {
    pub fn new(kind: ReplacementType) -> Self {
        match kind {
            ReplacementType::Static => ReplacementPolicy::Static,
            ReplacementType::Consistent => ReplacementPolicy::Consistent(ConsistentTracker::new()),
        }
    }

    pub fn placeholder(&self, category: Category, canonical: &str) -> String {
        match self {
            ReplacementPolicy::Static => category.static_placeholder().to_string(),
            ReplacementPolicy::Consistent(tracker) => {
                consistent_placeholder(category, tracker.assign(category, canonical))
            }
        }
    }

    pub fn tracker(&self) -> Option<&ConsistentTracker> {
        match self {
            ReplacementPolicy::Static => None,
            ReplacementPolicy::Consistent(tracker) => Some(tracker),
        }
    }
}

/// `x-<category>-<10-digit sequence>-x`
pub fn consistent_placeholder(category: Category, seq: u64) -> String {
    format!("x-{}-{:010}-x", category.token(), seq)
}

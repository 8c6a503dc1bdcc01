//! Network identity obfuscation engine
//!
//! This crate contains:
//! - Matchers for IPv4/IPv6, MAC, domain and keyword entities in text and paths
//! - Replacement policies (static and consistent)
//! - The consistent tracker that numbers values in first-seen order
//! - Obfuscators and the audit report they accumulate

pub mod error;
pub mod matcher;
pub mod obfuscator;
pub mod policy;
pub mod report;
pub mod tracker;

pub use error::{ObfuscatorError, Result};
pub use matcher::{Category, Match, Matcher, Separators};
pub use obfuscator::{
    DomainObfuscator, IpObfuscator, KeywordObfuscator, MacObfuscator, MatchObfuscator, Obfuscator,
};
pub use policy::{ReplacementPolicy, ReplacementType, consistent_placeholder};
pub use report::{Report, ReplacementReport};
pub use tracker::ConsistentTracker;

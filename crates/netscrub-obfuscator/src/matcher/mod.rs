//! Matchers locate address-like entities inside text buffers and path strings.
//!
//! Every matcher is stateless: a call to [`Matcher::find`] scans the input from
//! scratch and returns non-overlapping matches ordered by start offset.

mod domain;
mod ip;
mod ipv4;
mod ipv6;
mod keyword;
mod mac;

pub use domain::DomainMatcher;
pub use ip::IpMatcher;
pub use ipv4::Ipv4Matcher;
pub use ipv6::Ipv6Matcher;
pub use keyword::KeywordMatcher;
pub use mac::MacMatcher;

use std::cmp::Reverse;
use std::fmt;

/// Entity family a match belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Ipv4,
    Ipv6,
    Mac,
    Domain,
    Keyword,
}

impl Category {
    /// Lower-case family name used inside consistent placeholders
    pub fn token(&self) -> &'static str {
        match self {
            Category::Ipv4 => "ipv4",
            Category::Ipv6 => "ipv6",
            Category::Mac => "mac",
            Category::Domain => "domain",
            Category::Keyword => "keyword",
        }
    }

    /// Fixed placeholder used by the static replacement policy
    pub fn static_placeholder(&self) -> &'static str {
        match self {
            Category::Ipv4 => "xxx.xxx.xxx.xxx",
            Category::Ipv6 => "xxxx:xxxx:xxxx:xxxx:xxxx:xxxx:xxxx:xxxx",
            Category::Mac => "xx:xx:xx:xx:xx:xx",
            Category::Domain => "obfuscated.com",
            Category::Keyword => "xxxxxxxx",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// One located occurrence of an entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    /// Byte offset of the first matched byte
    pub start: usize,

    /// Byte offset one past the last matched byte
    pub end: usize,

    /// The text exactly as it appeared in the input
    pub raw: String,

    pub category: Category,

    /// Normalized identity used as the consistency key
    pub canonical: String,
}

/// Separators accepted between IPv4 octets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Separators {
    /// `10.0.187.218` only
    Dot,

    /// `10.0.187.218` or the hostname fragment `10-0-187-218`
    #[default]
    DotOrDash,
}

/// Trait for locating entities of one obfuscator's categories
pub trait Matcher: Send + Sync {
    /// Find every entity in free text
    fn find(&self, text: &str) -> Vec<Match>;

    /// Find every entity in a file or directory path
    fn find_in_path(&self, path: &str) -> Vec<Match> {
        self.find(path)
    }
}

/// Order matches by position and drop any that overlap an earlier one.
/// At equal start offsets the longer match wins.
pub(crate) fn merge(mut matches: Vec<Match>) -> Vec<Match> {
    matches.sort_by_key(|m| (m.start, Reverse(m.end)));

    let mut merged: Vec<Match> = Vec::with_capacity(matches.len());
    for m in matches {
        if merged.last().is_some_and(|prev| m.start < prev.end) {
            continue;
        }
        merged.push(m);
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(start: usize, end: usize) -> Match {
        Match {
            start,
            end,
            raw: String::new(),
            category: Category::Ipv4,
            canonical: String::new(),
        }
    }

    #[test]
    fn test_merge_orders_and_drops_overlaps() {
        let merged = merge(vec![at(20, 25), at(0, 18), at(7, 18), at(30, 31)]);
        let spans: Vec<_> = merged.iter().map(|m| (m.start, m.end)).collect();
        assert_eq!(spans, vec![(0, 18), (20, 25), (30, 31)]);
    }

    #[test]
    fn test_merge_prefers_longer_at_same_start() {
        let merged = merge(vec![at(4, 6), at(4, 10)]);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].end, 10);
    }

    #[test]
    fn test_category_tokens() {
        assert_eq!(Category::Ipv4.to_string(), "ipv4");
        assert_eq!(Category::Ipv6.token(), "ipv6");
        assert_eq!(Category::Mac.static_placeholder(), "xx:xx:xx:xx:xx:xx");
    }
}

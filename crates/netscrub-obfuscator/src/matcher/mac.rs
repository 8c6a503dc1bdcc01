use regex::Regex;
use std::sync::LazyLock;

use super::{Category, Match, Matcher};

static MAC: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:[0-9a-f]{2}:){5}[0-9a-f]{2}\b|\b(?:[0-9a-f]{2}-){5}[0-9a-f]{2}\b")
        .unwrap()
});

/// All-zero and broadcast addresses carry no identity
const EXCLUDED: &[&str] = &["00:00:00:00:00:00", "FF:FF:FF:FF:FF:FF"];

/// MAC address matcher. Canonical form is upper-case and colon-separated.
#[derive(Debug, Clone, Copy, Default)]
pub struct MacMatcher;

impl MacMatcher {
    pub fn new() -> Self {
        Self
    }
}

impl Matcher for MacMatcher {
    fn find(&self, text: &str) -> Vec<Match> {
        MAC.find_iter(text)
            .filter_map(|m| {
                let canonical = m.as_str().to_ascii_uppercase().replace('-', ":");
                if EXCLUDED.contains(&canonical.as_str()) {
                    return None;
                }

                Some(Match {
                    start: m.start(),
                    end: m.end(),
                    raw: m.as_str().to_string(),
                    category: Category::Mac,
                    canonical,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_colon_and_dash_forms_share_identity() {
        let matches = MacMatcher::new().find("link/ether fa:16:3e:5d:0b:2c brd, iface FA-16-3E-5D-0B-2C");

        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].canonical, "FA:16:3E:5D:0B:2C");
        assert_eq!(matches[1].canonical, "FA:16:3E:5D:0B:2C");
        assert_eq!(matches[1].raw, "FA-16-3E-5D-0B-2C");
    }

    #[test]
    fn test_mixed_separators_rejected() {
        assert!(MacMatcher::new().find("fa:16-3e:5d-0b:2c").is_empty());
    }

    #[test]
    fn test_zero_and_broadcast_excluded() {
        let matcher = MacMatcher::new();
        assert!(matcher.find("link/ether 00:00:00:00:00:00").is_empty());
        assert!(matcher.find("brd ff:ff:ff:ff:ff:ff").is_empty());
    }

    #[test]
    fn test_not_part_of_longer_hex() {
        assert!(MacMatcher::new().find("sha fa:16:3e:5d:0b:2cd9").is_empty());
    }
}

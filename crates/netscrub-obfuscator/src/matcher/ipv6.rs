use regex::Regex;
use std::net::Ipv6Addr;
use std::sync::LazyLock;

use super::{Category, Match, Matcher};

// Greedy colon-hex run with an optional embedded IPv4 tail. Candidates are
// validated with the std parser, so the pattern only needs to over-approximate.
static CANDIDATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:[0-9a-f]{0,4}:){2,7}(?:[0-9]{1,3}(?:\.[0-9]{1,3}){3}|[0-9a-f]{1,4})?")
        .unwrap()
});

/// Unspecified address, the IPv6 bind-all
const UNSPECIFIED: &str = "::";

const LOOPBACK: &str = "::1";

/// IPv6 matcher. The canonical form is the literal text; compression variants
/// of one address are distinct identities.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ipv6Matcher;

impl Ipv6Matcher {
    pub fn new() -> Self {
        Self
    }
}

impl Matcher for Ipv6Matcher {
    fn find(&self, text: &str) -> Vec<Match> {
        let mut matches = Vec::new();
        let mut pos = 0;

        while let Some(candidate) = CANDIDATE.find_at(text, pos) {
            if let Some((start, end)) = validate(text, candidate.start(), candidate.end()) {
                matches.push(Match {
                    start,
                    end,
                    raw: text[start..end].to_string(),
                    category: Category::Ipv6,
                    canonical: text[start..end].to_string(),
                });
                pos = end;
                continue;
            }

            // `source:2001:db8::5` starts the candidate at `ce:`; rescan past that colon
            pos = match candidate.as_str().find(':') {
                Some(colon) => candidate.start() + colon + 1,
                None => candidate.end(),
            };
        }

        matches
    }
}

/// Narrow a candidate span to a real address, or reject it.
fn validate(text: &str, mut start: usize, mut end: usize) -> Option<(usize, usize)> {
    // `addr:2001:db8::1` and `fe80::1: unreachable` pick up a stray colon
    let candidate = &text[start..end];
    if candidate.starts_with(':') && !candidate.starts_with("::") {
        start += 1;
    }
    let candidate = &text[start..end];
    if candidate.ends_with(':') && !candidate.ends_with("::") {
        end -= 1;
    }

    let candidate = &text[start..end];
    if candidate.is_empty() || candidate == UNSPECIFIED {
        return None;
    }
    candidate.parse::<Ipv6Addr>().ok()?;

    let before = text[..start].chars().next_back();
    let rest = &text[end..];
    let mut after = rest.chars();
    let next = after.next();

    // Part of an identifier such as `std::net` or `cafe:babe:face`
    if before.is_some_and(is_word_char) || next.is_some_and(is_word_char) {
        return None;
    }
    // Longer colon run than an address can hold
    if next == Some(':') && after.next().is_some_and(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    if before == Some(':') && ends_with_hex_group(&text[..start - 1]) {
        return None;
    }
    // Loopback in the bracketed host:port idiom, `[::1]:8080`
    if candidate == LOOPBACK && before == Some('[') && rest.starts_with(']') {
        return None;
    }

    Some((start, end))
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// The word before a colon is a bare hex group (`1:` or `ff:`), not a key like `node:`
fn ends_with_hex_group(text: &str) -> bool {
    let word_start = text
        .char_indices()
        .rev()
        .find(|(_, c)| !is_word_char(*c))
        .map_or(0, |(i, c)| i + c.len_utf8());
    let word = &text[word_start..];

    (1..=4).contains(&word.len()) && word.chars().all(|c| c.is_ascii_hexdigit())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raws(text: &str) -> Vec<String> {
        Ipv6Matcher::new()
            .find(text)
            .into_iter()
            .map(|m| m.raw)
            .collect()
    }

    #[test]
    fn test_compressed_address() {
        assert_eq!(
            raws("received request from 2001:db8::ff00:42:8329"),
            vec!["2001:db8::ff00:42:8329"]
        );
    }

    #[test]
    fn test_leading_compression() {
        assert_eq!(raws("tunneling ::2fa:bf9 as 192.168.1.30"), vec!["::2fa:bf9"]);
    }

    #[test]
    fn test_full_form() {
        assert_eq!(
            raws("IPv6: 2001:0db8:85a3:0000:0000:8a2e:0370:7334"),
            vec!["2001:0db8:85a3:0000:0000:8a2e:0370:7334"]
        );
    }

    #[test]
    fn test_embedded_ipv4() {
        assert_eq!(raws("mapped ::ffff:192.168.1.1 here"), vec!["::ffff:192.168.1.1"]);
    }

    #[test]
    fn test_bracketed_loopback_excluded() {
        assert!(raws("Listening on [::1]:8080").is_empty());
    }

    #[test]
    fn test_bare_loopback_matches() {
        assert_eq!(raws("connect to ::1 failed"), vec!["::1"]);
    }

    #[test]
    fn test_bracketed_address_matches() {
        assert_eq!(raws("https://[2001:db8::1]:8443/"), vec!["2001:db8::1"]);
    }

    #[test]
    fn test_unspecified_excluded() {
        assert!(raws("Listening on [::]:8080").is_empty());
    }

    #[test]
    fn test_not_addresses() {
        assert!(raws("at 10:30:45 the job ran").is_empty());
        assert!(raws("use std::net::Ipv6Addr;").is_empty());
        assert!(raws("mac aa:bb:cc:dd:ee:ff").is_empty());
        assert!(raws("Error::new").is_empty());
    }

    #[test]
    fn test_stray_colons_trimmed() {
        assert_eq!(raws("addr:2001:db8::1 up"), vec!["2001:db8::1"]);
        assert_eq!(raws("route fe80::1: unreachable"), vec!["fe80::1"]);
    }

    #[test]
    fn test_key_ending_in_hex_digit() {
        assert_eq!(raws("source:2001:db8::5"), vec!["2001:db8::5"]);
        assert_eq!(raws("node:fe80::1"), vec!["fe80::1"]);
        assert_eq!(
            raws("ip6:fe80::1ff:fe23:4567:890a"),
            vec!["fe80::1ff:fe23:4567:890a"]
        );
        assert_eq!(raws("ipv6:2001:db8::1 up"), vec!["2001:db8::1"]);
    }

    #[test]
    fn test_overlong_colon_run_has_no_tail_match() {
        assert!(raws("1:2:3:4:5:6:7:8:9").is_empty());
        assert!(raws("seq ff:1:2:3:4:5:6::7 end").is_empty());
    }

    #[test]
    fn test_canonical_is_literal() {
        let matches = Ipv6Matcher::new().find("2001:DB8::1 and 2001:db8::1");
        assert_eq!(matches.len(), 2);
        assert_ne!(matches[0].canonical, matches[1].canonical);
    }
}

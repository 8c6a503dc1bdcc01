use regex::Regex;
use std::sync::LazyLock;

use super::{Category, Match, Matcher, Separators};

/// A single octet, 1-3 digits with value 0-255; zero padding such as `010` is allowed.
/// Alternation order matters: the engine is leftmost-first.
const OCTET: &str = r"(?:25[0-5]|2[0-4][0-9]|[01]?[0-9]?[0-9])";

/// Bind-all address, common in "listening on" diagnostics
const EXCLUDED: &[&str] = &["0.0.0.0"];

// Only a trailing boundary: without lookbehind `910.218.98.1` still yields
// `10.218.98.1`, which is accepted.
static DOTTED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!(r"(?:{OCTET}\.){{3}}{OCTET}\b")).unwrap());

static DOTTED_OR_DASHED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?:{OCTET}\.){{3}}{OCTET}\b|(?:{OCTET}-){{3}}{OCTET}\b"
    ))
    .unwrap()
});

/// IPv4 matcher parameterized by the accepted octet separators
#[derive(Debug, Clone, Copy, Default)]
pub struct Ipv4Matcher {
    separators: Separators,
}

impl Ipv4Matcher {
    pub fn new(separators: Separators) -> Self {
        Self { separators }
    }

    fn pattern(&self) -> &'static Regex {
        match self.separators {
            Separators::Dot => &DOTTED,
            Separators::DotOrDash => &DOTTED_OR_DASHED,
        }
    }
}

impl Matcher for Ipv4Matcher {
    fn find(&self, text: &str) -> Vec<Match> {
        self.pattern()
            .find_iter(text)
            .filter_map(|m| {
                let canonical = m.as_str().replace('-', ".");
                if EXCLUDED.contains(&canonical.as_str()) {
                    return None;
                }

                Some(Match {
                    start: m.start(),
                    end: m.end(),
                    raw: m.as_str().to_string(),
                    category: Category::Ipv4,
                    canonical,
                })
            })
            .collect()
    }
}

use aho_corasick::{AhoCorasick, MatchKind};

use super::{Category, Match, Matcher};
use crate::error::{ObfuscatorError, Result};

/// Literal keyword matcher. Overlapping keywords resolve to the longest one.
#[derive(Debug, Clone)]
pub struct KeywordMatcher {
    keywords: Vec<String>,
    automaton: AhoCorasick,
}

impl KeywordMatcher {
    pub fn new<I, S>(keywords: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let keywords: Vec<String> = keywords
            .into_iter()
            .map(|k| k.as_ref().to_string())
            .filter(|k| !k.is_empty())
            .collect();
        if keywords.is_empty() {
            return Err(ObfuscatorError::MissingValues {
                kind: "keywords",
                what: "keyword",
            });
        }

        let automaton = AhoCorasick::builder()
            .match_kind(MatchKind::LeftmostLongest)
            .build(&keywords)?;

        Ok(Self {
            keywords,
            automaton,
        })
    }
}

impl Matcher for KeywordMatcher {
    fn find(&self, text: &str) -> Vec<Match> {
        self.automaton
            .find_iter(text)
            .map(|m| Match {
                start: m.start(),
                end: m.end(),
                raw: text[m.start()..m.end()].to_string(),
                category: Category::Keyword,
                canonical: self.keywords[m.pattern().as_usize()].clone(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_longest_keyword_wins() {
        let matcher = KeywordMatcher::new(["acme", "acme-prod"]).unwrap();
        let matches = matcher.find("cluster acme-prod owned by acme");

        let raws: Vec<_> = matches.iter().map(|m| m.raw.as_str()).collect();
        assert_eq!(raws, vec!["acme-prod", "acme"]);
    }

    #[test]
    fn test_requires_keywords() {
        assert!(KeywordMatcher::new(Vec::<String>::new()).is_err());
        assert!(KeywordMatcher::new([""]).is_err());
    }
}

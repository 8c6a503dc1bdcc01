use glob::{MatchOptions, Pattern};

use crate::error::{Result, SourceError};

/// Glob-based file omission. Patterns match the `/`-separated path relative
/// to the input root.
#[derive(Debug, Clone, Default)]
pub struct Omitter {
    patterns: Vec<Pattern>,
}

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

impl Omitter {
    /// Compile pattern strings, failing on the first invalid one
    pub fn new<I, S>(patterns: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let patterns = patterns
            .into_iter()
            .map(|p| {
                let p = p.as_ref();
                Pattern::new(p).map_err(|source| SourceError::InvalidPattern {
                    pattern: p.to_string(),
                    source,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { patterns })
    }

    /// Get first matching pattern (for the run report)
    pub fn matching_pattern(&self, path: &str) -> Option<&str> {
        self.patterns
            .iter()
            .find(|p| p.matches_with(path, MATCH_OPTIONS))
            .map(|p| p.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn omitted(omitter: &Omitter, path: &str) -> bool {
        omitter.matching_pattern(path).is_some()
    }

    #[test]
    fn test_basic_omit() {
        let omitter = Omitter::new(["**/*.pem", "**/*.key"]).unwrap();

        assert!(omitted(&omitter, "tls.pem"));
        assert!(omitted(&omitter, "namespaces/default/secrets/tls.pem"));
        assert!(omitted(&omitter, "etc/api.key"));
        assert!(!omitted(&omitter, "README.md"));
    }

    #[test]
    fn test_directory_patterns() {
        let omitter = Omitter::new(["**/secrets/**"]).unwrap();

        assert!(omitted(&omitter, "secrets/token"));
        assert!(omitted(&omitter, "namespaces/default/secrets/token"));
        assert!(!omitted(&omitter, "secrets.yaml"));
    }

    #[test]
    fn test_single_star_stays_in_one_directory() {
        let omitter = Omitter::new(["*.log"]).unwrap();

        assert!(omitted(&omitter, "current.log"));
        assert!(!omitted(&omitter, "pods/etcd/current.log"));
    }

    #[test]
    fn test_matching_pattern() {
        let omitter = Omitter::new(["**/kubeconfig*"]).unwrap();

        assert_eq!(
            omitter.matching_pattern("auth/kubeconfig-admin"),
            Some("**/kubeconfig*")
        );
        assert_eq!(omitter.matching_pattern("README.md"), None);
    }

    #[test]
    fn test_invalid_pattern_is_an_error() {
        let err = Omitter::new(["**/ok", "[unclosed"]).unwrap_err();
        assert!(matches!(err, SourceError::InvalidPattern { ref pattern, .. } if pattern == "[unclosed"));
    }

    #[test]
    fn test_empty_omitter() {
        let omitter = Omitter::new(Vec::<String>::new()).unwrap();
        assert!(!omitted(&omitter, "anything"));
    }
}

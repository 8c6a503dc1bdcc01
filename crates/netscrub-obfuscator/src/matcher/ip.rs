use super::{merge, Ipv4Matcher, Ipv6Matcher, Match, Matcher, Separators};

/// IPv4 and IPv6 together. Paths always accept dash-separated IPv4 since
/// hostnames such as `ip-10-0-187-218` end up in directory names.
#[derive(Debug, Clone, Copy)]
pub struct IpMatcher {
    contents: Ipv4Matcher,
    path: Ipv4Matcher,
    ipv6: Ipv6Matcher,
}

impl IpMatcher {
    pub fn new(contents_separators: Separators) -> Self {
        Self {
            contents: Ipv4Matcher::new(contents_separators),
            path: Ipv4Matcher::new(Separators::DotOrDash),
            ipv6: Ipv6Matcher::new(),
        }
    }

    fn scan(&self, ipv4: &Ipv4Matcher, text: &str) -> Vec<Match> {
        let mut matches = ipv4.find(text);
        matches.extend(self.ipv6.find(text));
        merge(matches)
    }
}

impl Default for IpMatcher {
    fn default() -> Self {
        Self::new(Separators::default())
    }
}

impl Matcher for IpMatcher {
    fn find(&self, text: &str) -> Vec<Match> {
        self.scan(&self.contents, text)
    }

    fn find_in_path(&self, path: &str) -> Vec<Match> {
        self.scan(&self.path, path)
    }
}

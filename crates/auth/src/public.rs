use regex::Regex;

/// A request shape that bypasses authentication.
#[derive(Debug, Clone)]
pub struct PublicRule {
    pattern: Regex,
    method: String,
}

impl PublicRule {
    pub fn new(pattern: &str, method: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            pattern: Regex::new(pattern)?,
            method: method.to_ascii_uppercase(),
        })
    }

    pub fn matches(&self, original_url: &str, verb: &str) -> bool {
        self.method == verb && self.pattern.is_match(original_url)
    }
}

/// Ordered public-endpoint rules, matched against the original URL
/// (query string included). Any match exempts the request.
#[derive(Debug, Clone, Default)]
pub struct PublicEndpoints {
    rules: Vec<PublicRule>,
}

impl PublicEndpoints {
    /// Only `GET /` (optionally with a query string) is public.
    pub fn root_only() -> Self {
        let root = PublicRule::new(r"^/(\?.*)?$", "GET").expect("root pattern is a valid regex");
        Self::none().with_rule(root)
    }

    pub fn none() -> Self {
        Self::default()
    }

    pub fn with_rule(mut self, rule: PublicRule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn is_public(&self, original_url: &str, verb: &str) -> bool {
        self.rules.iter().any(|rule| rule.matches(original_url, verb))
    }
}

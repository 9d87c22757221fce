use super::name::strip_extension;
use std::fmt;

/// A single exclusion rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExclusionRule {
    /// Exact path with its extension stripped
    File(String),
    /// Path prefix, truncated at the first `*`
    Prefix(String),
}

impl ExclusionRule {
    /// Parse one pattern. Returns `None` for a blank pattern.
    ///
    /// A leading `/` is added when missing. A pattern containing a `.` is a
    /// file rule; anything else is a prefix rule.
    #[must_use]
    pub fn parse(pattern: &str) -> Option<Self> {
        let pattern = pattern.trim();
        if pattern.is_empty() {
            return None;
        }
        let normalized = if pattern.starts_with('/') {
            pattern.to_string()
        } else {
            format!("/{pattern}")
        };
        if let Some(dot) = normalized.rfind('.') {
            return Some(ExclusionRule::File(normalized[..dot].to_string()));
        }
        let prefix = match normalized.find('*') {
            Some(star) => &normalized[..star],
            None => normalized.as_str(),
        };
        Some(ExclusionRule::Prefix(prefix.to_string()))
    }

    /// Match against a path whose extension is already stripped.
    #[must_use]
    pub fn matches_stripped(&self, stripped: &str) -> bool {
        match self {
            ExclusionRule::File(file) => file == stripped,
            ExclusionRule::Prefix(prefix) => stripped.starts_with(prefix.as_str()),
        }
    }
}

impl fmt::Display for ExclusionRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExclusionRule::File(p) => write!(f, "file:{p}"),
            ExclusionRule::Prefix(p) => write!(f, "prefix:{p}*"),
        }
    }
}

/// Vetoes automapping for configured files and sub-trees.
///
/// ```rust
/// use pagerouter::mapping::ExclusionMatcher;
///
/// let matcher = ExclusionMatcher::from_patterns(["secure/*, /reports/q1.htm"]);
/// assert!(matcher.matches("/secure/login.htm"));
/// assert!(matcher.matches("/reports/q1.htm"));
/// assert!(!matcher.matches("/public/secure.htm"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ExclusionMatcher {
    files: Vec<String>,
    prefixes: Vec<String>,
}

impl ExclusionMatcher {
    /// Build from configured pattern strings. Each string may hold several
    /// patterns separated by commas and/or whitespace.
    pub fn from_patterns<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut matcher = Self::default();
        for pattern in patterns {
            for token in pattern
                .as_ref()
                .split(|c: char| c == ',' || c.is_whitespace())
            {
                match ExclusionRule::parse(token) {
                    Some(ExclusionRule::File(f)) => matcher.files.push(f),
                    Some(ExclusionRule::Prefix(p)) => matcher.prefixes.push(p),
                    None => {}
                }
            }
        }
        matcher
    }

    /// True if `path` (with or without extension) is excluded. File rules
    /// are checked before prefix rules.
    #[must_use]
    pub fn matches(&self, path: &str) -> bool {
        self.matching_rule(path).is_some()
    }

    /// The first rule matching `path`.
    #[must_use]
    pub fn matching_rule(&self, path: &str) -> Option<ExclusionRule> {
        let stripped = strip_extension(path);
        if let Some(file) = self.files.iter().find(|f| f.as_str() == stripped) {
            return Some(ExclusionRule::File(file.clone()));
        }
        self.prefixes
            .iter()
            .find(|p| stripped.starts_with(p.as_str()))
            .map(|p| ExclusionRule::Prefix(p.clone()))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty() && self.prefixes.is_empty()
    }

    /// Number of rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len() + self.prefixes.len()
    }

    pub fn rules(&self) -> impl Iterator<Item = ExclusionRule> + '_ {
        self.files
            .iter()
            .cloned()
            .map(ExclusionRule::File)
            .chain(self.prefixes.iter().cloned().map(ExclusionRule::Prefix))
    }
}

use regex::Regex;

use super::errors::FilterError;

/// Selects resources by name.
///
/// An empty pattern matches every named resource. Resources with an empty
/// name never match, since they could not be identified in a prompt.
#[derive(Debug, Clone, Default)]
pub enum NameFilter {
    #[default]
    All,
    Substring(String),
    Regex(Regex),
}

impl NameFilter {
    /// Build a filter from a `--filter` value.
    ///
    /// With `regex` set the pattern is compiled as a regular expression;
    /// otherwise it is matched as a plain substring.
    pub fn new(pattern: &str, regex: bool) -> Result<Self, FilterError> {
        if pattern.is_empty() {
            return Ok(NameFilter::All);
        }

        if regex {
            let compiled = Regex::new(pattern).map_err(|source| FilterError::InvalidRegex {
                pattern: pattern.to_string(),
                source,
            })?;
            Ok(NameFilter::Regex(compiled))
        } else {
            Ok(NameFilter::Substring(pattern.to_string()))
        }
    }

    pub fn matches(&self, name: &str) -> bool {
        if name.is_empty() {
            return false;
        }
        match self {
            NameFilter::All => true,
            NameFilter::Substring(needle) => name.contains(needle.as_str()),
            NameFilter::Regex(re) => re.is_match(name),
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, NameFilter::All)
    }

    pub fn pattern(&self) -> &str {
        match self {
            NameFilter::All => "",
            NameFilter::Substring(needle) => needle,
            NameFilter::Regex(re) => re.as_str(),
        }
    }
}

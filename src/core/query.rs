use crate::error::{LookupError, Result};
use regex::{Regex, RegexBuilder};

/// A compiled headword pattern.
///
/// Matching is a case-insensitive search anywhere in the headword, so `cat`
/// also finds `bobcat`; anchor with `^`/`$` for exact lookups.
#[derive(Debug, Clone)]
pub struct Query {
    pattern: String,
    /// `None` matches every headword.
    regex: Option<Regex>,
}

impl Query {
    pub fn new(pattern: &str) -> Result<Self> {
        let regex = RegexBuilder::new(pattern)
            .case_insensitive(true)
            .build()
            .map_err(|source| LookupError::InvalidQuery {
                query: pattern.to_string(),
                source,
            })?;
        Ok(Self {
            pattern: pattern.to_string(),
            regex: Some(regex),
        })
    }

    /// Matches every headword. Used when rebuilding caches.
    pub fn match_all() -> Self {
        Self {
            pattern: ".+".to_string(),
            regex: None,
        }
    }

    pub fn is_match(&self, headword: &str) -> bool {
        self.regex.as_ref().map_or(true, |re| re.is_match(headword))
    }

    pub fn as_str(&self) -> &str {
        &self.pattern
    }
}

use regex::Regex;
use crate::errors::ConfigError;

// @module: Keyword occurrence matching

/// Case-insensitive matcher for a configurable keyword stem.
///
/// The matched unit is a whole word that contains the stem, so inflected
/// forms attach for free ("bang", "BANGER", "banging" all hit the stem
/// "bang"). The stem is regex-escaped before compilation, which keeps the
/// same engine reusable for other keyword domains.
#[derive(Debug, Clone)]
pub struct KeywordMatcher {
    pattern: Regex,
}

impl KeywordMatcher {
    /// Compile a matcher for the given keyword stem.
    ///
    /// An empty or blank stem would make every scan meaningless, so it is
    /// rejected at this boundary rather than silently matching nothing.
    pub fn new(keyword: &str) -> Result<Self, ConfigError> {
        let stem = keyword.trim();
        if stem.is_empty() {
            return Err(ConfigError::EmptyKeyword);
        }

        let pattern = Regex::new(&format!(r"(?i)\b\w*{}\w*\b", regex::escape(stem)))
            .map_err(|e| ConfigError::InvalidKeywordPattern(e.to_string()))?;

        Ok(KeywordMatcher { pattern })
    }

    /// Count stem-bearing words in the text
    pub fn count_occurrences(&self, text: &str) -> usize {
        self.pattern.find_iter(text).count()
    }

    /// True iff the text contains at least one stem-bearing word
    pub fn has_match(&self, text: &str) -> bool {
        self.pattern.is_match(text)
    }
}

//! Keyword tokenization and matching over raw source text.
//!
//! Substring matching is deliberately loose: a hit reads as "weak textual
//! evidence of domain relevance", nothing more. The strategy sits behind a
//! trait so it can be swapped for an exact matcher without touching the
//! probes or the scoring logic.

use regex::RegexBuilder;

/// Matching strategy for domain keywords in source text.
pub trait DomainMatcher: Send + Sync {
    /// Split a domain identifier into keyword tokens.
    fn keywords(&self, domain: &str) -> Vec<String>;

    /// Count occurrences of a keyword in a text.
    fn count(&self, text: &str, keyword: &str) -> usize;

    /// Whether the text contains any of the keywords.
    fn contains_any(&self, text: &str, keywords: &[String]) -> bool {
        keywords.iter().any(|k| self.count(text, k) > 0)
    }
}

/// Case-insensitive substring matcher over hyphen-tokenized domains.
#[derive(Debug, Clone, Copy, Default)]
pub struct SubstringMatcher;

impl DomainMatcher for SubstringMatcher {
    fn keywords(&self, domain: &str) -> Vec<String> {
        domain
            .split('-')
            .filter(|token| !token.is_empty())
            .map(str::to_lowercase)
            .collect()
    }

    fn count(&self, text: &str, keyword: &str) -> usize {
        match RegexBuilder::new(&regex::escape(keyword))
            .case_insensitive(true)
            .build()
        {
            Ok(pattern) => pattern.find_iter(text).count(),
            Err(e) => {
                tracing::warn!(keyword = %keyword, error = %e, "Failed to compile keyword pattern");
                0
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keywords_split_on_hyphens() {
        let matcher = SubstringMatcher;
        assert_eq!(matcher.keywords("security-owasp"), vec!["security", "owasp"]);
        assert_eq!(matcher.keywords("api"), vec!["api"]);
    }

    #[test]
    fn test_keywords_skip_empty_tokens() {
        let matcher = SubstringMatcher;
        assert_eq!(matcher.keywords("security--owasp"), vec!["security", "owasp"]);
        assert_eq!(matcher.keywords("-security-"), vec!["security"]);
    }

    #[test]
    fn test_keywords_lowercased() {
        let matcher = SubstringMatcher;
        assert_eq!(matcher.keywords("Security-OWASP"), vec!["security", "owasp"]);
    }

    #[test]
    fn test_count_case_insensitive() {
        let matcher = SubstringMatcher;
        let text = "OWASP guidance. See owasp top ten, and OwAsP cheat sheets.";
        assert_eq!(matcher.count(text, "owasp"), 3);
    }

    #[test]
    fn test_count_substring_hits() {
        let matcher = SubstringMatcher;
        // Loose by design: "auth" hits inside "authentication".
        assert_eq!(matcher.count("authentication and auth", "auth"), 2);
    }

    #[test]
    fn test_count_no_match() {
        let matcher = SubstringMatcher;
        assert_eq!(matcher.count("nothing relevant here", "owasp"), 0);
    }

    #[test]
    fn test_count_escapes_metacharacters() {
        let matcher = SubstringMatcher;
        assert_eq!(matcher.count("a.b literal", "a.b"), 1);
        assert_eq!(matcher.count("axb is not a hit", "a.b"), 0);
    }

    #[test]
    fn test_contains_any() {
        let matcher = SubstringMatcher;
        let keywords = vec!["security".to_string(), "owasp".to_string()];
        assert!(matcher.contains_any("mentions OWASP only", &keywords));
        assert!(!matcher.contains_any("unrelated", &keywords));
    }
}

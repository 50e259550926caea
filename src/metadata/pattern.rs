//! LIKE-style name patterns used by metadata lookups.
//!
//! `%` matches any run of characters, `_` matches exactly one, and the
//! escape string makes the next character literal.

use regex::{Regex, RegexBuilder};

use super::provider::{DEFAULT_SEARCH_ESCAPE, WILDCARD};

/// A compiled name pattern.
#[derive(Debug, Clone)]
pub struct NamePattern {
    source: String,
    regex: Regex,
}

impl NamePattern {
    /// Compile a pattern using the default `\` escape.
    pub fn new(pattern: &str, case_sensitive: bool) -> Self {
        Self::with_escape(pattern, DEFAULT_SEARCH_ESCAPE, case_sensitive)
    }

    /// Compile a pattern with an explicit escape string.
    pub fn with_escape(pattern: &str, escape: &str, case_sensitive: bool) -> Self {
        let mut translated = String::with_capacity(pattern.len() + 8);
        translated.push('^');

        let mut rest = pattern;
        while let Some(c) = rest.chars().next() {
            if !escape.is_empty() && rest.starts_with(escape) {
                rest = &rest[escape.len()..];
                match rest.chars().next() {
                    Some(literal) => {
                        translated.push_str(&regex::escape(&literal.to_string()));
                        rest = &rest[literal.len_utf8()..];
                    }
                    // Trailing escape: keep it literally
                    None => translated.push_str(&regex::escape(escape)),
                }
                continue;
            }
            match c {
                '%' => translated.push_str(".*"),
                '_' => translated.push('.'),
                other => translated.push_str(&regex::escape(&other.to_string())),
            }
            rest = &rest[c.len_utf8()..];
        }
        translated.push('$');

        // The translation only emits escaped literals, `.` and `.*`
        let regex = RegexBuilder::new(&translated)
            .case_insensitive(!case_sensitive)
            .dot_matches_new_line(true)
            .build()
            .unwrap_or_else(|_| Regex::new("^$").expect("empty pattern compiles"));

        Self {
            source: pattern.to_string(),
            regex,
        }
    }

    /// The pattern as given.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Check if the pattern matches every name.
    pub fn is_wildcard(&self) -> bool {
        self.source.starts_with(WILDCARD) && self.source.chars().all(|c| c == '%')
    }

    /// Check if `name` matches this pattern.
    pub fn matches(&self, name: &str) -> bool {
        self.regex.is_match(name)
    }
}

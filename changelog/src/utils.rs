use crate::error::ChangelogError;
use crate::types::Result;
use once_cell::sync::Lazy;
use regex::Regex;

pub const DEFAULT_PULL_REQUEST_PATTERN: &str = "Merge pull request #([0-9]+) from .*";

pub const DEFAULT_ISSUE_PATTERN: &str = "#([0-9]+)";

/// `## [1.2.0] - 2024-05-01` or `## 1.2.0 - 2024-05-01`
pub static RELEASE_HEADER_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^## (?:\[.+\]|\S+) - [0-9]{4}-[0-9]{2}-[0-9]{2}")
        .expect("Failed to compile release header regex")
});

pub static PLACEHOLDER_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{([A-Za-z0-9_-]+)\}").expect("Failed to compile placeholder regex")
});

/// Compiles a user supplied pattern, naming the option it came from on failure.
pub fn compile_pattern(option: &str, pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|e| ChangelogError::invalid_pattern(option, pattern, &e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_release_header_forms() {
        assert!(RELEASE_HEADER_PATTERN.is_match("## [1.0.0] - 2023-01-01"));
        assert!(RELEASE_HEADER_PATTERN.is_match("## 1.0.0 - 2023-01-01"));
        assert!(RELEASE_HEADER_PATTERN.is_match("## v2.0.0-rc.1 - 2023-12-31 (yanked)"));
        assert!(!RELEASE_HEADER_PATTERN.is_match("# Changelog"));
        assert!(!RELEASE_HEADER_PATTERN.is_match("## Unreleased"));
        assert!(!RELEASE_HEADER_PATTERN.is_match("## [1.0.0]"));
        assert!(!RELEASE_HEADER_PATTERN.is_match(" ## [1.0.0] - 2023-01-01"));
    }

    #[test]
    fn test_compile_pattern_names_option() {
        let err = compile_pattern("issue-reference-pattern", "#([0-9]+").unwrap_err();
        assert!(err.is_configuration());
        assert!(err.to_string().contains("issue-reference-pattern"));
    }
}

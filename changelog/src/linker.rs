use crate::error::ChangelogError;
use crate::template::UrlTemplate;
use crate::types::Result;
use crate::utils::compile_pattern;
use regex::{Captures, Regex};

/// Rewrites issue references in a title as Markdown links
#[derive(Debug, Clone)]
pub struct IssueLinker<'a> {
    pattern: Regex,
    template: Option<&'a UrlTemplate>,
}

impl<'a> IssueLinker<'a> {
    pub fn new(pattern: &str, template: Option<&'a UrlTemplate>) -> Result<Self> {
        Ok(Self {
            pattern: compile_pattern("issue-reference-pattern", pattern)?,
            template,
        })
    }

    /// Replaces every match, left to right, with `[<match>](<issue url>)`.
    ///
    /// The issue number is the first capture group, or the digits of the
    /// match when the pattern has none.
    pub fn link(&self, title: &str) -> Result<String> {
        if !self.pattern.is_match(title) {
            return Ok(title.to_string());
        }

        let template = self
            .template
            .ok_or_else(|| ChangelogError::missing_template("issue-url-template", "issue links"))?;

        let linked = self.pattern.replace_all(title, |caps: &Captures| {
            let reference = &caps[0];
            let issue: String = caps.get(1).map_or_else(
                || reference.chars().filter(char::is_ascii_digit).collect(),
                |number| number.as_str().to_string(),
            );
            format!("[{reference}]({})", template.render(&[("issue", issue.as_str())]))
        });

        Ok(linked.into_owned())
    }
}

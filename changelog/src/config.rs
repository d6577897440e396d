use crate::error::ChangelogError;
use crate::template::UrlTemplate;
use crate::types::Result;
use crate::utils::{DEFAULT_ISSUE_PATTERN, DEFAULT_PULL_REQUEST_PATTERN};
use serde::Deserialize;
use std::str::FromStr;

const GITHUB_PULL_URL: &str = "https://github.com/{repo}/pull/{number}";
const GITHUB_COMPARE_URL: &str = "https://github.com/{repo}/compare/{previous}...{current}";
const GITHUB_ISSUE_URL: &str = "https://github.com/{repo}/issues/{issue}";

/// Where the title of a pull request entry is taken from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TitleSource {
    /// First line of the merge commit body (GitHub puts the PR title there)
    #[default]
    Body,
    /// The merge commit subject with the matched merge marker removed
    Subject,
}

impl FromStr for TitleSource {
    type Err = ChangelogError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "body" => Ok(Self::Body),
            "subject" => Ok(Self::Subject),
            other => Err(ChangelogError::Configuration(format!(
                "option 'title-source' must be 'body' or 'subject', got '{other}'"
            ))),
        }
    }
}

/// Changelog options as written by the user. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct ChangelogOptions {
    #[serde(alias = "repo")]
    pub repository_identifier: Option<String>,
    #[serde(alias = "pull-request-pattern")]
    pub pull_request_detection_pattern: Option<String>,
    #[serde(alias = "pull-request-url")]
    pub pull_request_url_template: Option<String>,
    #[serde(alias = "compare-url")]
    pub compare_url_template: Option<String>,
    #[serde(alias = "issue-pattern")]
    pub issue_reference_pattern: Option<String>,
    #[serde(alias = "issue-url")]
    pub issue_url_template: Option<String>,
    pub title_source: Option<TitleSource>,
}

impl ChangelogOptions {
    /// Builds options from `name = value` pairs, accepting the same names and
    /// aliases as the configuration file.
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut options = Self::default();
        for (name, value) in pairs {
            options.set(name.as_ref(), value.into())?;
        }
        Ok(options)
    }

    pub fn set(&mut self, name: &str, value: String) -> Result<()> {
        match name {
            "repository-identifier" | "repo" => self.repository_identifier = Some(value),
            "pull-request-detection-pattern" | "pull-request-pattern" => {
                self.pull_request_detection_pattern = Some(value);
            }
            "pull-request-url-template" | "pull-request-url" => {
                self.pull_request_url_template = Some(value);
            }
            "compare-url-template" | "compare-url" => self.compare_url_template = Some(value),
            "issue-reference-pattern" | "issue-pattern" => {
                self.issue_reference_pattern = Some(value);
            }
            "issue-url-template" | "issue-url" => self.issue_url_template = Some(value),
            "title-source" => self.title_source = Some(value.parse()?),
            unknown => {
                return Err(ChangelogError::Configuration(format!(
                    "unknown option '{unknown}'"
                )));
            }
        }
        Ok(())
    }

    /// Field-wise merge where every value set in `overrides` wins.
    #[must_use]
    pub fn overridden_by(self, overrides: Self) -> Self {
        Self {
            repository_identifier: overrides.repository_identifier.or(self.repository_identifier),
            pull_request_detection_pattern: overrides
                .pull_request_detection_pattern
                .or(self.pull_request_detection_pattern),
            pull_request_url_template: overrides
                .pull_request_url_template
                .or(self.pull_request_url_template),
            compare_url_template: overrides.compare_url_template.or(self.compare_url_template),
            issue_reference_pattern: overrides
                .issue_reference_pattern
                .or(self.issue_reference_pattern),
            issue_url_template: overrides.issue_url_template.or(self.issue_url_template),
            title_source: overrides.title_source.or(self.title_source),
        }
    }

    /// Resolves final templates and patterns. Explicit values always win over
    /// the ones derived from `repository-identifier`.
    #[must_use]
    pub fn resolve(&self) -> ResolvedConfig {
        let derived = |template: &str| {
            self.repository_identifier
                .as_deref()
                .map(|repo| UrlTemplate::new(template.replace("{repo}", repo)))
        };
        let explicit = |value: &Option<String>| value.as_deref().map(UrlTemplate::from);

        ResolvedConfig {
            pull_request_pattern: self
                .pull_request_detection_pattern
                .clone()
                .unwrap_or_else(|| DEFAULT_PULL_REQUEST_PATTERN.to_string()),
            pull_request_url: explicit(&self.pull_request_url_template)
                .or_else(|| derived(GITHUB_PULL_URL)),
            compare_url: explicit(&self.compare_url_template)
                .or_else(|| derived(GITHUB_COMPARE_URL)),
            issue_pattern: self
                .issue_reference_pattern
                .clone()
                .unwrap_or_else(|| DEFAULT_ISSUE_PATTERN.to_string()),
            issue_url: explicit(&self.issue_url_template).or_else(|| derived(GITHUB_ISSUE_URL)),
            title_source: self.title_source.unwrap_or_default(),
        }
    }
}

/// Immutable configuration handed to every step of the generation.
///
/// Patterns are kept as source text; they are compiled when first used so an
/// invalid pattern only fails the run that needs it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    pub pull_request_pattern: String,
    pub pull_request_url: Option<UrlTemplate>,
    pub compare_url: Option<UrlTemplate>,
    pub issue_pattern: String,
    pub issue_url: Option<UrlTemplate>,
    pub title_source: TitleSource,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        ChangelogOptions::default().resolve()
    }
}

impl ResolvedConfig {
    pub fn compare_url(&self) -> Result<&UrlTemplate> {
        self.compare_url
            .as_ref()
            .ok_or_else(|| ChangelogError::missing_template("compare-url-template", "the compare link"))
    }
}

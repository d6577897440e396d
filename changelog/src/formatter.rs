use crate::error::ChangelogError;
use crate::linker::IssueLinker;
use crate::template::UrlTemplate;
use crate::types::{PullRequest, Result};

/// How the version header of a new section is written
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderStyle {
    /// `## [1.1.0] - 2024-05-01`, paired with a `[1.1.0]: <compare url>` definition
    Linked,
    /// `## 1.0.0 - 2024-05-01`, used for the first release
    Plain,
}

impl HeaderStyle {
    #[must_use]
    pub const fn for_release(has_previous_release: bool) -> Self {
        if has_previous_release {
            Self::Linked
        } else {
            Self::Plain
        }
    }

    #[must_use]
    pub fn format(self, version: &str, date: &str) -> String {
        match self {
            Self::Linked => format!("## [{version}] - {date}"),
            Self::Plain => format!("## {version} - {date}"),
        }
    }
}

/// Renders pull requests as Markdown list items
pub struct EntryRenderer<'a> {
    linker: IssueLinker<'a>,
    pull_request_url: Option<&'a UrlTemplate>,
}

impl<'a> EntryRenderer<'a> {
    pub fn new(linker: IssueLinker<'a>, pull_request_url: Option<&'a UrlTemplate>) -> Self {
        Self {
            linker,
            pull_request_url,
        }
    }

    /// `- <linked title> (pull request [#<number>](<url>))`
    pub fn render(&self, pull_request: &PullRequest) -> Result<String> {
        let template = self.pull_request_url.ok_or_else(|| {
            ChangelogError::missing_template("pull-request-url-template", "pull request links")
        })?;
        let title = self.linker.link(&pull_request.title)?;
        let number = pull_request.number.as_str();

        Ok(format!(
            "- {title} (pull request [#{number}]({}))",
            template.render(&[("number", number)])
        ))
    }

    pub fn render_all(&self, pull_requests: &[PullRequest]) -> Result<Vec<String>> {
        pull_requests.iter().map(|pr| self.render(pr)).collect()
    }
}

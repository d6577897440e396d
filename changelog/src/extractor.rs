use crate::config::TitleSource;
use crate::error::ChangelogError;
use crate::history::HistorySource;
use crate::types::{CommitRange, CommitRecord, PullRequest, Result};
use crate::utils::compile_pattern;
use regex::Regex;
use tracing::debug;

/// Recognizes merge commits and turns them into pull request records
#[derive(Debug, Clone)]
pub struct MergeCommitExtractor {
    pattern: Regex,
    title_source: TitleSource,
}

impl MergeCommitExtractor {
    /// Compiles the detection pattern, which must have exactly one capture group.
    pub fn new(pattern: &str, title_source: TitleSource) -> Result<Self> {
        let pattern = compile_pattern("pull-request-detection-pattern", pattern)?;

        let groups = pattern.captures_len() - 1;
        if groups != 1 {
            return Err(ChangelogError::Configuration(format!(
                "option 'pull-request-detection-pattern' must have exactly one capture group for the pull request number, found {groups}"
            )));
        }

        Ok(Self {
            pattern,
            title_source,
        })
    }

    /// Queries the history after `previous_tag` (or all of it) for merged pull requests.
    pub fn merged_since(
        &self,
        history: &dyn HistorySource,
        previous_tag: Option<&str>,
    ) -> Result<Vec<PullRequest>> {
        let range = CommitRange::since(previous_tag);
        debug!(%range, "Reading merge commits");

        let records = history.commits(&range)?;
        let pull_requests = self.extract(&records);

        debug!(
            commits = records.len(),
            pull_requests = pull_requests.len(),
            "Filtered merge commits"
        );
        Ok(pull_requests)
    }

    /// Keeps matching records in their original order; anything else is dropped.
    #[must_use]
    pub fn extract(&self, records: &[CommitRecord]) -> Vec<PullRequest> {
        records.iter().filter_map(|record| self.parse(record)).collect()
    }

    #[must_use]
    pub fn parse(&self, record: &CommitRecord) -> Option<PullRequest> {
        let captures = self.pattern.captures(&record.subject)?;
        let number = captures.get(1)?.as_str().to_string();

        let title = match self.title_source {
            TitleSource::Body => record.body.lines().next().unwrap_or("").trim().to_string(),
            TitleSource::Subject => {
                let marker = captures.get(0)?;
                let subject = &record.subject;
                format!("{}{}", &subject[..marker.start()], &subject[marker.end()..])
                    .trim()
                    .to_string()
            }
        };

        Some(PullRequest { number, title })
    }
}

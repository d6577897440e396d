use crate::config::ResolvedConfig;
use crate::extractor::MergeCommitExtractor;
use crate::formatter::{EntryRenderer, HeaderStyle};
use crate::history::{HistorySource, ReleaseTagAuthority};
use crate::linker::IssueLinker;
use crate::position::existing_body;
use crate::types::Result;
use chrono::{Local, NaiveDate};
use tracing::debug;

/// Standard "Keep a Changelog" preamble written at the top of every document
pub const PREAMBLE: [&str; 6] = [
    "# Changelog",
    "All notable changes to this project will be documented in this file.",
    "",
    "The format is based on [Keep a Changelog](http://keepachangelog.com/en/1.0.0/)",
    "and this project adheres to [Semantic Versioning](http://semver.org/spec/v2.0.0.html).",
    "",
];

/// Builds a new changelog document from merged pull requests and the
/// previously written one.
pub struct ChangelogFormatter<'a> {
    config: &'a ResolvedConfig,
    history: &'a dyn HistorySource,
    tags: &'a dyn ReleaseTagAuthority,
    date: NaiveDate,
}

impl<'a> ChangelogFormatter<'a> {
    pub fn new(
        config: &'a ResolvedConfig,
        history: &'a dyn HistorySource,
        tags: &'a dyn ReleaseTagAuthority,
    ) -> Self {
        Self {
            config,
            history,
            tags,
            date: Local::now().date_naive(),
        }
    }

    /// Uses a fixed date for the version header instead of today.
    #[must_use]
    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = date;
        self
    }

    /// Returns the full replacement for `current`, with a new section for
    /// `version` on top of the existing body.
    ///
    /// # Errors
    ///
    /// Fails without producing any output when the history cannot be read,
    /// the release tag cannot be determined, or a needed template or pattern
    /// is missing or invalid.
    pub fn update_existing_lines<S: AsRef<str>>(
        &self,
        current: &[S],
        version: &str,
    ) -> Result<Vec<String>> {
        let previous_tag = self.tags.current_release_tag()?;
        debug!(?previous_tag, version, "Generating changelog entry");

        let extractor =
            MergeCommitExtractor::new(&self.config.pull_request_pattern, self.config.title_source)?;
        let pull_requests = extractor.merged_since(self.history, previous_tag.as_deref())?;

        let linker = IssueLinker::new(&self.config.issue_pattern, self.config.issue_url.as_ref())?;
        let renderer = EntryRenderer::new(linker, self.config.pull_request_url.as_ref());
        let entries = renderer.render_all(&pull_requests)?;

        let compare_link = self.compare_link(version, previous_tag.as_deref())?;

        let date = self.date.format("%Y-%m-%d").to_string();
        let header = HeaderStyle::for_release(previous_tag.is_some()).format(version, &date);
        let body = existing_body(current);

        let mut output = Vec::with_capacity(PREAMBLE.len() + entries.len() + body.len() + 4);
        output.extend(PREAMBLE.iter().map(|line| line.to_string()));
        output.push(header);
        output.extend(entries);
        output.push(String::new());
        output.extend(body.iter().map(|line| line.as_ref().to_string()));
        if let Some(link) = compare_link {
            output.push(link);
        }
        output.push(String::new());

        Ok(output)
    }

    /// The `[<version>]: <compare url>` definition, or `None` for a first release.
    pub fn compare_link(&self, version: &str, previous_tag: Option<&str>) -> Result<Option<String>> {
        let Some(previous) = previous_tag else {
            return Ok(None);
        };

        let template = self.config.compare_url()?;
        let current = self.tags.tag_for_version(version);
        let url = template.render(&[("previous", previous), ("current", current.as_str())]);

        Ok(Some(format!("[{version}]: {url}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ChangelogOptions;
    use crate::error::ChangelogError;
    use crate::position::find_release_header;
    use crate::types::{CommitRange, CommitRecord};

    struct FakeHistory {
        records: Vec<CommitRecord>,
    }

    impl HistorySource for FakeHistory {
        fn commits(&self, _range: &CommitRange) -> Result<Vec<CommitRecord>> {
            Ok(self.records.clone())
        }
    }

    struct BrokenHistory;

    impl HistorySource for BrokenHistory {
        fn commits(&self, range: &CommitRange) -> Result<Vec<CommitRecord>> {
            Err(ChangelogError::HistoryAccess {
                range: range.to_string(),
                diagnostics: "fatal: ambiguous argument".to_string(),
            })
        }
    }

    struct FakeTags {
        current: Option<&'static str>,
    }

    impl ReleaseTagAuthority for FakeTags {
        fn current_release_tag(&self) -> Result<Option<String>> {
            Ok(self.current.map(str::to_string))
        }

        fn tag_for_version(&self, version: &str) -> String {
            format!("v{version}")
        }
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
    }

    fn github() -> ResolvedConfig {
        ChangelogOptions::from_pairs([("repo", "acme/rocket")]).unwrap().resolve()
    }

    fn merge(number: u32, title: &str) -> CommitRecord {
        CommitRecord::new(
            format!("Merge pull request #{number} from acme/branch-{number}"),
            format!("{title}\n\nDetails that stay out of the changelog."),
        )
    }

    fn preamble() -> Vec<String> {
        PREAMBLE.iter().map(|line| line.to_string()).collect()
    }

    #[test]
    fn test_first_release_uses_plain_header_and_no_link() {
        let config = github();
        let history = FakeHistory {
            records: vec![merge(2, "Add feature")],
        };
        let tags = FakeTags { current: None };
        let formatter = ChangelogFormatter::new(&config, &history, &tags).with_date(date());

        let empty: [&str; 0] = [];
        let lines = formatter.update_existing_lines(&empty, "1.0.0").unwrap();

        let mut expected = preamble();
        expected.extend([
            "## 1.0.0 - 2024-05-01".to_string(),
            "- Add feature (pull request [#2](https://github.com/acme/rocket/pull/2))".to_string(),
            String::new(),
            String::new(),
        ]);
        assert_eq!(lines, expected);
        assert!(!lines.iter().any(|line| line.starts_with("[1.0.0]:")));
    }

    #[test]
    fn test_release_after_previous_tag() {
        let config = github();
        let history = FakeHistory {
            records: vec![
                merge(21, "Fix bug #42"),
                CommitRecord::new("Bump dependencies", ""),
                merge(20, "Add feature"),
            ],
        };
        let tags = FakeTags {
            current: Some("v1.0.0"),
        };
        let formatter = ChangelogFormatter::new(&config, &history, &tags).with_date(date());
        let current = [
            "# Changelog",
            "",
            "## 1.0.0 - 2023-01-01",
            "- Initial release",
            "",
        ];

        let lines = formatter.update_existing_lines(&current, "1.1.0").unwrap();

        let mut expected = preamble();
        expected.extend(
            [
                "## [1.1.0] - 2024-05-01",
                "- Fix bug [#42](https://github.com/acme/rocket/issues/42) (pull request [#21](https://github.com/acme/rocket/pull/21))",
                "- Add feature (pull request [#20](https://github.com/acme/rocket/pull/20))",
                "",
                "## 1.0.0 - 2023-01-01",
                "- Initial release",
                "",
                "[1.1.0]: https://github.com/acme/rocket/compare/v1.0.0...v1.1.0",
                "",
            ]
            .map(String::from),
        );
        assert_eq!(lines, expected);
    }

    #[test]
    fn test_empty_history_still_writes_header() {
        let config = ResolvedConfig::default();
        let history = FakeHistory { records: vec![] };
        let tags = FakeTags { current: None };
        let formatter = ChangelogFormatter::new(&config, &history, &tags).with_date(date());

        let lines = formatter.update_existing_lines(&["# Changelog"], "0.1.0").unwrap();

        let mut expected = preamble();
        expected.extend(["## 0.1.0 - 2024-05-01", "", ""].map(String::from));
        assert_eq!(lines, expected);
    }

    #[test]
    fn test_existing_body_survives_regeneration() {
        let config = github();
        let history = FakeHistory {
            records: vec![merge(5, "Add feature")],
        };
        let tags = FakeTags {
            current: Some("v1.0.0"),
        };
        let formatter = ChangelogFormatter::new(&config, &history, &tags).with_date(date());
        let body = vec![
            "## [1.0.0] - 2023-02-01".to_string(),
            "- Second (pull request [#3](https://github.com/acme/rocket/pull/3))".to_string(),
            String::new(),
            "## 0.9.0 - 2023-01-01".to_string(),
            "- First".to_string(),
            String::new(),
            "[1.0.0]: https://github.com/acme/rocket/compare/v0.9.0...v1.0.0".to_string(),
        ];
        let mut current = vec!["# Changelog".to_string(), "Old intro".to_string(), String::new()];
        current.extend(body.clone());

        let lines = formatter.update_existing_lines(&current, "1.1.0").unwrap();

        let new_header = find_release_header(&lines, 0).unwrap();
        let start = find_release_header(&lines, new_header + 1).unwrap();
        assert_eq!(lines[start..start + body.len()], body[..]);
        assert!(!lines.iter().any(|line| line == "Old intro"));
    }

    #[test]
    fn test_history_failure_aborts() {
        let config = github();
        let tags = FakeTags {
            current: Some("v1.0.0"),
        };
        let formatter = ChangelogFormatter::new(&config, &BrokenHistory, &tags);

        let err = formatter.update_existing_lines(&["# Changelog"], "1.1.0").unwrap_err();

        match err {
            ChangelogError::HistoryAccess { range, diagnostics } => {
                assert_eq!(range, "v1.0.0..HEAD");
                assert_eq!(diagnostics, "fatal: ambiguous argument");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_missing_compare_template_with_previous_release() {
        let config = ChangelogOptions::from_pairs([(
            "pull-request-url",
            "https://git.example.com/pr/{number}",
        )])
        .unwrap()
        .resolve();
        let history = FakeHistory { records: vec![] };
        let tags = FakeTags {
            current: Some("v1.0.0"),
        };
        let formatter = ChangelogFormatter::new(&config, &history, &tags);

        let err = formatter.update_existing_lines(&["# Changelog"], "1.1.0").unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_compare_link_uses_tag_naming() {
        let config = ChangelogOptions::from_pairs([(
            "compare-url",
            "https://git.example.com/diff/{0}..{1}",
        )])
        .unwrap()
        .resolve();
        let history = FakeHistory { records: vec![] };
        let tags = FakeTags { current: None };
        let formatter = ChangelogFormatter::new(&config, &history, &tags);

        assert_eq!(formatter.compare_link("2.0.0", None).unwrap(), None);
        assert_eq!(
            formatter.compare_link("2.0.0", Some("v1.4.2")).unwrap().as_deref(),
            Some("[2.0.0]: https://git.example.com/diff/v1.4.2..v2.0.0")
        );
    }
}

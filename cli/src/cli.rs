use changelog::ChangelogOptions;
use chrono::NaiveDate;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "prlog")]
#[command(
    author,
    version,
    about = "Prepend a changelog entry built from merged pull requests"
)]
pub struct Cli {
    /// Version being released, e.g. 1.4.0
    #[arg(value_name = "VERSION")]
    pub release: String,

    /// Changelog file to update (a missing file starts a new one)
    #[clap(short = 'f', long, default_value = "CHANGELOG.md")]
    pub changelog: PathBuf,

    /// Optional TOML settings file
    #[clap(short, long, default_value = "prlog.toml")]
    pub config: PathBuf,

    /// Directory inside the git repository to read history from
    #[clap(short = 'C', long, default_value = ".")]
    pub repository: PathBuf,

    /// Repository identifier such as `owner/name`, used to derive GitHub URLs
    #[clap(long)]
    pub repo: Option<String>,

    /// Regex recognizing merge commits, with one group for the pull request number
    #[clap(long)]
    pub pull_request_pattern: Option<String>,

    /// Pull request URL template, e.g. `https://host/pr/{number}`
    #[clap(long)]
    pub pull_request_url: Option<String>,

    /// Compare URL template using `{previous}` and `{current}`
    #[clap(long)]
    pub compare_url: Option<String>,

    /// Regex recognizing issue references in titles
    #[clap(long)]
    pub issue_pattern: Option<String>,

    /// Issue URL template using `{issue}`
    #[clap(long)]
    pub issue_url: Option<String>,

    /// Where entry titles come from: `body` or `subject`
    #[clap(long)]
    pub title_source: Option<String>,

    /// Prefix of release tags, e.g. `v`
    #[clap(long)]
    pub tag_prefix: Option<String>,

    /// Date written in the version header (defaults to today)
    #[clap(long, value_name = "YYYY-MM-DD")]
    pub date: Option<NaiveDate>,

    /// Print the updated changelog instead of writing it
    #[clap(long, default_value_t = false)]
    pub dry_run: bool,

    /// Enable verbose output with additional information
    #[clap(short, long, default_value_t = false)]
    pub verbose: bool,
}

impl Cli {
    /// Options given on the command line, to be laid over the settings file.
    pub fn option_overrides(&self) -> changelog::Result<ChangelogOptions> {
        let flags = [
            ("repo", &self.repo),
            ("pull-request-pattern", &self.pull_request_pattern),
            ("pull-request-url", &self.pull_request_url),
            ("compare-url", &self.compare_url),
            ("issue-pattern", &self.issue_pattern),
            ("issue-url", &self.issue_url),
            ("title-source", &self.title_source),
        ];

        ChangelogOptions::from_pairs(
            flags
                .into_iter()
                .filter_map(|(name, value)| value.clone().map(|value| (name, value))),
        )
    }
}

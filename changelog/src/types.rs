use crate::error::ChangelogError;
use std::fmt::{self, Display, Formatter};

/// Type alias for Result with `ChangelogError`
pub type Result<T> = std::result::Result<T, ChangelogError>;

/// A raw commit as returned by a history source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRecord {
    pub subject: String,
    pub body: String,
}

impl CommitRecord {
    pub fn new(subject: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            body: body.into(),
        }
    }
}

/// A merged pull request recognized from a merge commit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequest {
    pub number: String,
    pub title: String,
}

/// The span of history a changelog entry covers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitRange {
    /// Everything reachable from HEAD
    Full,
    /// Everything after the given tag, up to and including HEAD
    Since(String),
}

impl CommitRange {
    #[must_use]
    pub fn since(previous_tag: Option<&str>) -> Self {
        previous_tag.map_or(Self::Full, |tag| Self::Since(tag.to_string()))
    }

    /// The revision expression understood by `git log`
    #[must_use]
    pub fn revision(&self) -> String {
        match self {
            Self::Full => "HEAD".to_string(),
            Self::Since(tag) => format!("{tag}..HEAD"),
        }
    }
}

impl Display for CommitRange {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.revision())
    }
}
